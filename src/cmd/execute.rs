use std::{
    io,
    path::PathBuf,
    process::{ExitStatus, Stdio},
};

use nix::errno::Errno;
use thiserror::Error;
use tokio::process::{Child, Command};

use super::execution_plan::{ExecutionPlan, Stage};
use crate::{
    builtins::{BuiltinCommand, BuiltinCommands, BuiltinError, BuiltinOutcome, Placement},
    process::{
        pipe::Pipe,
        redirect,
        status::{BuiltinExitStatus, ShellExitStatus},
        supervisor::Supervisor,
    },
};

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("empty pipeline")]
    EmptyPipeline,
    #[error("{name}: cannot be used in a pipeline, run it as a single command")]
    BuiltinInPipeline { name: &'static str },
    #[error(transparent)]
    Builtin(#[from] BuiltinError),
    /// Carries whatever stage problems were seen before the pipeline stopped.
    #[error("failed to create pipe: {source}")]
    Pipe {
        #[source]
        source: Errno,
        diagnostics: Vec<StageError>,
    },
    #[error("failed to wait for pipeline: {0}")]
    Wait(#[source] io::Error),
}

impl ExecError {
    pub fn errno(&self) -> Errno {
        match self {
            Self::EmptyPipeline | Self::BuiltinInPipeline { .. } => Errno::EINVAL,
            Self::Builtin(err) => err.errno(),
            Self::Pipe { source, .. } => *source,
            Self::Wait(err) => err.raw_os_error().map(Errno::from_raw).unwrap_or(Errno::EIO),
        }
    }
}

/// A failure confined to one stage. The rest of the pipeline still runs.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("{}: cannot open input: {source}", path.display())]
    InputRedirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: cannot open output: {source}", path.display())]
    OutputRedirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{program}: command not found")]
    CommandNotFound { program: String },
    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl StageError {
    fn spawn(program: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::CommandNotFound {
                program: program.to_owned(),
            },
            _ => Self::Spawn {
                program: program.to_owned(),
                source,
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct PipelineReport {
    pub pipes: usize,
    pub spawned: usize,
    pub background: bool,
    /// Exit status of the terminal stage. Only set for foreground pipelines
    /// whose last stage actually started.
    pub status: Option<ExitStatus>,
    pub diagnostics: Vec<StageError>,
}

#[derive(Debug)]
pub enum Completion {
    Exit,
    Builtin(BuiltinExitStatus),
    Pipeline(PipelineReport),
}

impl Completion {
    pub fn status(&self) -> Option<ShellExitStatus> {
        match self {
            Self::Exit => None,
            Self::Builtin(status) => Some((*status).into()),
            Self::Pipeline(report) => report.status.map(Into::into),
        }
    }
}

impl ExecutionPlan {
    pub async fn execute(&self) -> Result<Completion, ExecError> {
        let Some(leading) = self.stages.first() else {
            return Err(ExecError::EmptyPipeline);
        };

        if let Some(builtin) = BuiltinCommands::from_name(leading.program()) {
            if builtin.placement() == Placement::Leading {
                return run_builtin(&builtin, leading);
            }
        }

        if self.stages.len() > 1 {
            let misplaced = self
                .stages
                .iter()
                .filter_map(|stage| BuiltinCommands::from_name(stage.program()))
                .find(|builtin| builtin.placement() == Placement::Standalone);

            if let Some(builtin) = misplaced {
                return Err(ExecError::BuiltinInPipeline {
                    name: builtin.name(),
                });
            }
        } else if let Some(builtin) = BuiltinCommands::from_name(leading.program()) {
            return run_builtin(&builtin, leading);
        }

        self.spawn_pipeline().await.map(Completion::Pipeline)
    }

    async fn spawn_pipeline(&self) -> Result<PipelineReport, ExecError> {
        let mut report = PipelineReport {
            background: self.background,
            ..Default::default()
        };
        let mut supervisor = Supervisor::new(self.background);

        let mut upstream = Some(match &self.input {
            Some(path) => redirect::input(path).unwrap_or_else(|source| {
                report.diagnose(StageError::InputRedirect {
                    path: path.clone(),
                    source,
                });
                Stdio::inherit()
            }),
            None => Stdio::inherit(),
        });

        let last = self.stages.len() - 1;

        for (index, stage) in self.stages.iter().enumerate() {
            let stdin = upstream.take().unwrap_or_else(Stdio::null);

            let stdout = if index < last {
                let pipe = match Pipe::open() {
                    Ok(pipe) => pipe,
                    Err(source) => {
                        warn!(%source, stage = index, "failed to create pipe");
                        return Err(ExecError::Pipe {
                            source,
                            diagnostics: report.diagnostics,
                        });
                    }
                };
                report.pipes += 1;
                upstream = Some(Stdio::from(pipe.read));
                Stdio::from(pipe.write)
            } else {
                match &self.output {
                    Some(path) => redirect::output(path).unwrap_or_else(|source| {
                        report.diagnose(StageError::OutputRedirect {
                            path: path.clone(),
                            source,
                        });
                        Stdio::inherit()
                    }),
                    None => Stdio::inherit(),
                }
            };

            match spawn_stage(stage, stdin, stdout) {
                Ok(child) => {
                    report.spawned += 1;
                    if index == last {
                        supervisor.adopt(child);
                    }
                }
                Err(source) => report.diagnose(StageError::spawn(stage.program(), source)),
            }
        }

        report.status = supervisor.settle().await.map_err(ExecError::Wait)?;

        Ok(report)
    }
}

impl PipelineReport {
    fn diagnose(&mut self, err: StageError) {
        warn!(%err, "pipeline stage failed");
        self.diagnostics.push(err);
    }
}

fn run_builtin(builtin: &BuiltinCommands, stage: &Stage) -> Result<Completion, ExecError> {
    trace!(builtin = builtin.name(), "dispatching builtin");

    match builtin.execute(stage.arguments())? {
        BuiltinOutcome::Exit => Ok(Completion::Exit),
        BuiltinOutcome::Status(status) => Ok(Completion::Builtin(status)),
    }
}

/// Spawns one stage wired to `stdin` and `stdout`.
///
/// The command owns both descriptors and is dropped on return, so the
/// parent's copies are closed whether or not the spawn succeeded.
fn spawn_stage(stage: &Stage, stdin: Stdio, stdout: Stdio) -> io::Result<Child> {
    let mut cmd = Command::new(stage.program());
    cmd.args(stage.arguments()).stdin(stdin).stdout(stdout);

    trace!("spawning command: {:?}", cmd);

    cmd.spawn()
}
