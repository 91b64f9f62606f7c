use std::{io, path::PathBuf};

use enum_dispatch::enum_dispatch;
use nix::errno::Errno;
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::process::status::BuiltinExitStatus;

pub mod cd;
pub mod exit;

/// Where in a pipeline a builtin is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Runs whenever it leads a pipeline; later stages are ignored.
    Leading,
    /// Only valid as the sole stage; any pipeline containing it is rejected.
    Standalone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOutcome {
    Exit,
    Status(BuiltinExitStatus),
}

#[derive(Debug, Error)]
pub enum BuiltinError {
    #[error("cd: HOME is not set")]
    NoHome,
    #[error("cd: {}: {source}", path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuiltinError {
    pub fn errno(&self) -> Errno {
        match self {
            Self::NoHome => Errno::ENOENT,
            Self::ChangeDir { source, .. } => source
                .raw_os_error()
                .map(Errno::from_raw)
                .unwrap_or(Errno::EIO),
        }
    }
}

#[enum_dispatch(BuiltinCommands)]
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn placement(&self) -> Placement;
    fn execute(&self, args: &[String]) -> Result<BuiltinOutcome, BuiltinError>;
}

#[enum_dispatch]
#[derive(Debug, EnumIter)]
pub enum BuiltinCommands {
    Cd(cd::Cd),
    Exit(exit::Exit),
}

impl BuiltinCommands {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|cmd| cmd.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert!(matches!(
            BuiltinCommands::from_name("cd"),
            Some(BuiltinCommands::Cd(_))
        ));
        assert!(matches!(
            BuiltinCommands::from_name("exit"),
            Some(BuiltinCommands::Exit(_))
        ));
        assert!(BuiltinCommands::from_name("ls").is_none());
        assert!(BuiltinCommands::from_name("pwd").is_none());
    }

    #[test]
    fn placements() {
        assert_eq!(
            BuiltinCommands::from_name("exit").unwrap().placement(),
            Placement::Leading
        );
        assert_eq!(
            BuiltinCommands::from_name("cd").unwrap().placement(),
            Placement::Standalone
        );
    }

    #[test]
    fn errno_of_failed_cd() {
        let err = BuiltinError::ChangeDir {
            path: "/nowhere".into(),
            source: io::Error::from_raw_os_error(Errno::ENOTDIR as i32),
        };
        assert_eq!(err.errno(), Errno::ENOTDIR);
        assert_eq!(BuiltinError::NoHome.errno(), Errno::ENOENT);
    }
}
