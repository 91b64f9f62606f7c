use std::{env, path::PathBuf};

use crate::process::status::BuiltinExitStatus;

use super::{BuiltinCommand, BuiltinError, BuiltinOutcome, Placement};

#[derive(Debug, Default)]
pub struct Cd;

impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn placement(&self) -> Placement {
        Placement::Standalone
    }

    fn execute(&self, args: &[String]) -> Result<BuiltinOutcome, BuiltinError> {
        trace!("executing cd builtin: {args:?}");

        let path = match args.first() {
            Some(path) => PathBuf::from(path),
            None => env::var_os("HOME")
                .map(PathBuf::from)
                .ok_or(BuiltinError::NoHome)?,
        };

        trace!("cd: {:?}", path);

        env::set_current_dir(&path).map_err(|source| BuiltinError::ChangeDir { path, source })?;

        Ok(BuiltinOutcome::Status(BuiltinExitStatus::new_success()))
    }
}
