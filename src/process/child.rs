use std::io;

use tokio::process::Child;

use super::status::{BuiltinExitStatus, ShellExitStatus};

pub enum ShellChild {
    Process(Child),
    /// A stage that never started; the status is already known.
    Failed(BuiltinExitStatus),
}

impl From<Child> for ShellChild {
    fn from(value: Child) -> Self {
        Self::Process(value)
    }
}

impl ShellChild {
    pub async fn wait(&mut self) -> io::Result<ShellExitStatus> {
        match self {
            Self::Process(process) => process.wait().await.map(Into::into),
            Self::Failed(status) => Ok(ShellExitStatus::from(*status)),
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            Self::Process(process) => process.id(),
            Self::Failed(_) => None,
        }
    }
}
