use std::path::PathBuf;

use async_trait::async_trait;

use super::{Arity, BuiltinCommand, BuiltinOutput};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pwd;

#[async_trait]
impl BuiltinCommand for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(0)
    }

    async fn execute(&self, working_dir: &mut PathBuf, _args: &[String]) -> BuiltinOutput {
        // the directory may have been removed since we entered it
        match tokio::fs::metadata(working_dir.as_path()).await {
            Ok(_) => BuiltinOutput::line(working_dir.to_string_lossy().as_bytes()),
            Err(err) => BuiltinOutput::failure(format!("pwd: {err}")),
        }
    }
}
