use std::{fmt, path::PathBuf, str::FromStr};

use itertools::Itertools;

use crate::parse::{parse_command_line, CommandParseError};

/// One command of a pipeline. `args[0]` names the program or builtin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub args: Vec<String>,
}

impl Stage {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }

    pub fn arguments(&self) -> &[String] {
        self.args.get(1..).unwrap_or_default()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.iter().join(" "))
    }
}

/// A parsed input line.
///
/// `input` only ever feeds the first stage and `output` only ever receives
/// the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub stages: Vec<Stage>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub background: bool,
}

impl ExecutionPlan {
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl FromStr for ExecutionPlan {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_command_line(s)
    }
}

impl fmt::Display for ExecutionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stages.iter().join(" | "))?;

        if let Some(input) = &self.input {
            write!(f, " < {}", input.display())?;
        }

        if let Some(output) = &self.output {
            write!(f, " > {}", output.display())?;
        }

        if self.background {
            write!(f, " &")?;
        }

        Ok(())
    }
}
