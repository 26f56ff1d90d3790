use std::path::PathBuf;

use async_trait::async_trait;

use super::{Arity, BuiltinCommand, BuiltinOutput};

/// Echoes its argument. No `PATH` lookup is done.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Which;

#[async_trait]
impl BuiltinCommand for Which {
    fn name(&self) -> &'static str {
        "which"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(1)
    }

    async fn execute(&self, _working_dir: &mut PathBuf, args: &[String]) -> BuiltinOutput {
        match args.first() {
            Some(name) => BuiltinOutput::line(name),
            None => BuiltinOutput::failure("which: missing name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_unknown_names() {
        let mut cwd = PathBuf::from("/");
        let out = Which
            .execute(&mut cwd, &["definitely-not-a-program".into()])
            .await;
        assert_eq!(out.stdout, b"definitely-not-a-program\n");
    }
}
