use std::path::PathBuf;

use async_trait::async_trait;
use enum_dispatch::enum_dispatch;
use strum::{EnumIter, IntoEnumIterator};

use crate::{process::status::BuiltinExitStatus, session::Flow};

pub mod cd;
pub mod exit;
pub mod pwd;
pub mod which;

/// How many arguments (not counting the name) a builtin takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    Any,
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => *n == count,
            Self::Any => true,
        }
    }
}

#[async_trait]
#[enum_dispatch(BuiltinCommands)]
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn arity(&self) -> Arity;
    /// Only called once `args` satisfies [`BuiltinCommand::arity`].
    async fn execute(&self, working_dir: &mut PathBuf, args: &[String]) -> BuiltinOutput;
}

#[enum_dispatch]
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum BuiltinCommands {
    Cd(cd::Cd),
    Pwd(pwd::Pwd),
    Which(which::Which),
    Exit(exit::Exit),
}

impl BuiltinCommands {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::iter().find(|cmd| cmd.name() == name)
    }

    pub async fn invoke(&self, working_dir: &mut PathBuf, args: &[String]) -> BuiltinOutput {
        if !self.arity().accepts(args.len()) {
            return BuiltinOutput::failure(format!("{}: wrong number of arguments", self.name()));
        }

        self.execute(working_dir, args).await
    }
}

/// Everything a builtin produces. Builtins never write to the terminal
/// themselves; the session forwards this.
#[derive(Debug, PartialEq, Eq)]
pub struct BuiltinOutput {
    pub status: BuiltinExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub flow: Flow,
}

impl BuiltinOutput {
    pub fn success() -> Self {
        Self {
            status: BuiltinExitStatus::new_success(),
            stdout: Vec::new(),
            stderr: Vec::new(),
            flow: Flow::Continue,
        }
    }

    pub fn line(line: impl AsRef<[u8]>) -> Self {
        let mut stdout = line.as_ref().to_vec();
        stdout.push(b'\n');
        Self {
            stdout,
            ..Self::success()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        let mut stderr = message.into().into_bytes();
        stderr.push(b'\n');
        Self {
            status: BuiltinExitStatus::new_failure(),
            stderr,
            ..Self::success()
        }
    }

    pub fn exit() -> Self {
        Self {
            flow: Flow::Exit,
            ..Self::success()
        }
    }
}
