use super::{BuiltinCommand, BuiltinError, BuiltinOutcome, Placement};

#[derive(Debug, Default)]
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn placement(&self) -> Placement {
        Placement::Leading
    }

    /// Arguments are ignored; the interpreter always leaves with status 0.
    fn execute(&self, _args: &[String]) -> Result<BuiltinOutcome, BuiltinError> {
        trace!("executing exit builtin");

        Ok(BuiltinOutcome::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_ignores_arguments() {
        let outcome = Exit.execute(&["3".to_owned()]).unwrap();
        assert_eq!(outcome, BuiltinOutcome::Exit);
    }
}
