use std::{fmt, path::PathBuf};

use itertools::Itertools;

use crate::builtins::{BuiltinCommand, BuiltinCommands};

/// What one input line asks for.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Blank line.
    Empty,
    Builtin(BuiltinInvocation),
    External(CommandPlan),
}

#[derive(Debug, PartialEq)]
pub struct BuiltinInvocation {
    pub builtin: BuiltinCommands,
    /// Arguments after the builtin's name.
    pub args: Vec<String>,
}

/// One or two external commands, the second fed by the first through a pipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub first: Stage,
    pub second: Option<Stage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    pub args: Vec<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl CommandPlan {
    pub fn is_pipeline(&self) -> bool {
        self.second.is_some()
    }
}

impl Stage {
    pub fn has_redirects(&self) -> bool {
        self.input.is_some() || self.output.is_some()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.iter().join(" "))?;
        if let Some(input) = &self.input {
            write!(f, " < {}", input.display())?;
        }
        if let Some(output) = &self.output {
            write!(f, " > {}", output.display())?;
        }
        Ok(())
    }
}

impl fmt::Display for CommandPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        if let Some(second) = &self.second {
            write!(f, " | {second}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BuiltinInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.builtin.name();
        if self.args.is_empty() {
            f.write_str(name)
        } else {
            write!(f, "{name} {}", self.args.iter().join(" "))
        }
    }
}
