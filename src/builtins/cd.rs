use std::path::PathBuf;

use async_trait::async_trait;
use nix::unistd::{access, AccessFlags};

use super::{Arity, BuiltinCommand, BuiltinOutput};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cd;

#[async_trait]
impl BuiltinCommand for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn arity(&self) -> Arity {
        Arity::Exactly(1)
    }

    async fn execute(&self, working_dir: &mut PathBuf, args: &[String]) -> BuiltinOutput {
        trace!("executing cd builtin: {args:?}");

        let Some(dir) = args.first() else {
            return BuiltinOutput::failure("cd: missing directory");
        };

        let full_path = match tokio::fs::canonicalize(working_dir.join(dir)).await {
            Ok(path) => path,
            Err(err) => return BuiltinOutput::failure(format!("cd: {dir}: {err}")),
        };

        match tokio::fs::metadata(&full_path).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return BuiltinOutput::failure(format!("cd: {dir}: Not a directory")),
            Err(err) => return BuiltinOutput::failure(format!("cd: {dir}: {err}")),
        }

        // a directory can only be entered with search permission
        if let Err(err) = access(&full_path, AccessFlags::X_OK) {
            return BuiltinOutput::failure(format!("cd: {dir}: {}", err.desc()));
        }

        trace!("cd: {:?}", full_path);
        *working_dir = full_path;

        BuiltinOutput::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relative_parent_and_absolute() {
        let root = tempfile::tempdir().unwrap();
        let root_path = root.path().canonicalize().unwrap();
        std::fs::create_dir(root_path.join("sub")).unwrap();

        let mut cwd = root_path.clone();
        assert!(Cd.execute(&mut cwd, &["sub".into()]).await.status.success());
        assert_eq!(cwd, root_path.join("sub"));

        assert!(Cd.execute(&mut cwd, &["..".into()]).await.status.success());
        assert_eq!(cwd, root_path);

        let absolute = root_path.join("sub").to_string_lossy().into_owned();
        assert!(Cd.execute(&mut cwd, &[absolute]).await.status.success());
        assert_eq!(cwd, root_path.join("sub"));
    }

    #[tokio::test]
    async fn failures_leave_directory_alone() {
        let root = tempfile::tempdir().unwrap();
        let root_path = root.path().canonicalize().unwrap();
        std::fs::write(root_path.join("file"), "").unwrap();

        let mut cwd = root_path.clone();

        let out = Cd.execute(&mut cwd, &["missing".into()]).await;
        assert!(out.status.failure());
        assert!(String::from_utf8_lossy(&out.stderr).starts_with("cd: missing: "));

        let out = Cd.execute(&mut cwd, &["file".into()]).await;
        assert_eq!(out.stderr, b"cd: file: Not a directory\n");

        assert_eq!(cwd, root_path);
    }
}
