use std::path::PathBuf;

use async_trait::async_trait;

use super::{Arity, BuiltinCommand, BuiltinOutput};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Exit;

#[async_trait]
impl BuiltinCommand for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn arity(&self) -> Arity {
        Arity::Any
    }

    async fn execute(&self, _working_dir: &mut PathBuf, _args: &[String]) -> BuiltinOutput {
        BuiltinOutput::exit()
    }
}
