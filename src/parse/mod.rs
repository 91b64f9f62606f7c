use thiserror::Error;

use crate::cmd::execution_plan::{ExecutionPlan, Stage};

use self::token::{split, words, PIPE_DELIMITER};

pub mod token;

const BACKGROUND: &str = "&";
const REDIRECT_OUT: &str = ">";
const REDIRECT_IN: &str = "<";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("empty command in pipeline stage {stage}")]
    EmptyCommand { stage: usize },
}

/// Parses one input line into an [`ExecutionPlan`].
///
/// Markers are only recognised at fixed trailing positions: `&` and `> path`
/// on the last stage, `< path` on the first. Anywhere else they are plain
/// arguments.
pub fn parse_command_line(line: &str) -> Result<ExecutionPlan, CommandParseError> {
    let segments = split(line, PIPE_DELIMITER);
    let last = segments.len().saturating_sub(1);

    let mut plan = ExecutionPlan::default();

    for (index, segment) in segments.into_iter().enumerate() {
        let mut args = words(segment)
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        if index == last {
            if args.len() > 1 && args.last().is_some_and(|tok| tok == BACKGROUND) {
                args.pop();
                plan.background = true;
            }

            if let Some(path) = take_redirect(&mut args, REDIRECT_OUT) {
                plan.output = Some(path.into());
            }
        }

        if index == 0 {
            if let Some(path) = take_redirect(&mut args, REDIRECT_IN) {
                plan.input = Some(path.into());
            }
        }

        if args.is_empty() {
            return Err(CommandParseError::EmptyCommand { stage: index });
        }

        plan.stages.push(Stage::new(args));
    }

    trace!(%plan, "parsed command line");

    Ok(plan)
}

fn take_redirect(args: &mut Vec<String>, marker: &str) -> Option<String> {
    if args.len() < 3 || args[args.len() - 2] != marker {
        return None;
    }

    let path = args.pop();
    args.pop();
    path
}
