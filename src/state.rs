use std::io::{self, Write};

use nix::errno::Errno;
use termion::color;
use thiserror::Error;

use crate::{
    cmd::{
        execute::{Completion, ExecError, StageError},
        execution_plan::ExecutionPlan,
    },
    config::ShellConfig,
    parse::CommandParseError,
    process::status::ShellExitStatus,
};

/// Everything that can go wrong with a single input line. None of it is fatal
/// to the read loop.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Parse(#[from] CommandParseError),
    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl ShellError {
    /// Platform error number describing the failure.
    pub fn code(&self) -> i32 {
        let errno = match self {
            Self::Parse(_) => Errno::EINVAL,
            Self::Exec(err) => err.errno(),
        };

        errno as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct State {
    pub config: ShellConfig,
    pub show_prompt: bool,
    pub last_status: Option<ShellExitStatus>,
}

impl State {
    pub fn new(config: ShellConfig) -> Self {
        let show_prompt = config
            .show_prompt
            .unwrap_or_else(|| termion::is_tty(&io::stdin()));

        Self {
            config,
            show_prompt,
            last_status: None,
        }
    }

    pub fn render<W: Write>(&self, stdout: &mut W) -> io::Result<()> {
        if self.config.show_cwd {
            if let Ok(dir) = std::env::current_dir() {
                write!(
                    stdout,
                    "{}{}{}",
                    color::Fg(color::Green),
                    dir.display(),
                    color::Fg(color::Reset)
                )?;
            }
        }

        write!(stdout, "{}", self.config.prompt)?;

        stdout.flush()
    }

    /// Parses and runs one line. Per-stage problems are written to `stderr`
    /// and do not fail the line.
    pub async fn execute<W: Write>(&mut self, line: &str, stderr: &mut W) -> Result<Flow, ShellError> {
        let plan = line.parse::<ExecutionPlan>()?;

        trace!(?plan, "execution plan");

        let completion = match plan.execute().await {
            Ok(completion) => completion,
            Err(err) => {
                if let ExecError::Pipe { diagnostics, .. } = &err {
                    report_diagnostics(diagnostics, stderr);
                }
                return Err(err.into());
            }
        };

        if let Completion::Pipeline(report) = &completion {
            report_diagnostics(&report.diagnostics, stderr);

            trace!(
                pipes = report.pipes,
                spawned = report.spawned,
                background = report.background,
                "pipeline finished"
            );
        }

        if let Completion::Exit = completion {
            return Ok(Flow::Exit);
        }

        if let Some(status) = completion.status() {
            self.last_status = Some(status);
        }

        Ok(Flow::Continue)
    }
}

fn report_diagnostics<W: Write>(diagnostics: &[StageError], stderr: &mut W) {
    for diagnostic in diagnostics {
        if let Err(err) = writeln!(stderr, "pish: {diagnostic}") {
            warn!(%err, %diagnostic, "failed to report stage diagnostic");
        }
    }
}
