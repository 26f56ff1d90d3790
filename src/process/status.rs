use std::{os::unix::process::ExitStatusExt, process::ExitStatus};

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
    /// Numeric status as a shell reports it: signalled children become
    /// `128 + signal`.
    pub fn code(&self) -> i32 {
        match self {
            Self::Process(status) => status
                .code()
                .or_else(|| status.signal().map(|sig| 128 + sig))
                .unwrap_or(1),
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
    pub const NOT_FOUND: Self = Self(127);
    pub const NOT_EXECUTABLE: Self = Self(126);
    pub const SYNTAX_ERROR: Self = Self(2);

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

    pub fn code(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exited_process_keeps_its_code() {
        let status = ShellExitStatus::from(ExitStatus::from_raw(3 << 8));
        assert_eq!(status.code(), 3);
        assert!(!status.success());
    }

    #[test]
    fn signalled_process_maps_above_128() {
        let status = ShellExitStatus::from(ExitStatus::from_raw(9));
        assert_eq!(status.code(), 137);
    }

    #[test]
    fn builtin_codes() {
        assert!(ShellExitStatus::from(BuiltinExitStatus::new_success()).success());
        assert_eq!(BuiltinExitStatus::new_failure().code(), 1);
        assert!(BuiltinExitStatus::NOT_FOUND.failure());
    }
}
