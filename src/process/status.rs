use std::process::ExitStatus;

/// Exit status of whatever ran last: a spawned stage or a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExitStatus {
    Process(ExitStatus),
    Builtin(BuiltinExitStatus),
}

impl From<ExitStatus> for ShellExitStatus {
    fn from(value: ExitStatus) -> Self {
        Self::Process(value)
    }
}

impl From<BuiltinExitStatus> for ShellExitStatus {
    fn from(value: BuiltinExitStatus) -> Self {
        Self::Builtin(value)
    }
}

impl ShellExitStatus {
    /// `None` when a process was killed by a signal.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Process(status) => status.code(),
            Self::Builtin(status) => status.code(),
        }
    }

    pub fn success(&self) -> bool {
        match self {
            Self::Process(status) => status.success(),
            Self::Builtin(status) => status.success(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinExitStatus(i32);

impl BuiltinExitStatus {
    pub fn new_success() -> Self {
        Self(0)
    }

    pub fn new_failure() -> Self {
        Self(1)
    }

    pub fn success(&self) -> bool {
        self.0 == 0
    }

    pub fn failure(&self) -> bool {
        !self.success()
    }

    pub fn code(&self) -> Option<i32> {
        Some(self.0)
    }
}
