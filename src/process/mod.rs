use std::{
    io,
    os::fd::OwnedFd,
    path::{Path, PathBuf},
    process::Stdio,
};

use thiserror::Error;
use tokio::{
    fs::{File, OpenOptions},
    process::{Child, Command},
};

use self::status::BuiltinExitStatus;

pub mod child;
pub mod pipe;
pub mod status;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("empty command")]
    EmptyCommand,
    #[error("{program}: command not found")]
    NotFound { program: String },
    #[error("{program}: permission denied")]
    PermissionDenied { program: String },
    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create pipe: {0}")]
    Pipe(#[from] nix::Error),
    #[error("failed to wait for child: {0}")]
    Wait(#[source] io::Error),
}

impl LaunchError {
    fn spawn(program: &str, source: io::Error) -> Self {
        let program = program.to_owned();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { program },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { program },
            _ => Self::Spawn { program, source },
        }
    }

    /// The status a stage gets when it fails this way.
    pub fn status(&self) -> BuiltinExitStatus {
        match self {
            Self::NotFound { .. } => BuiltinExitStatus::NOT_FOUND,
            Self::PermissionDenied { .. } => BuiltinExitStatus::NOT_EXECUTABLE,
            _ => BuiltinExitStatus::new_failure(),
        }
    }
}

#[derive(Debug)]
pub enum StdinSource {
    Inherit,
    File(PathBuf),
    Pipe(OwnedFd),
}

#[derive(Debug)]
pub enum StdoutSink {
    Inherit,
    File(PathBuf),
    Pipe(OwnedFd),
}

impl StdinSource {
    async fn open(self, working_dir: &Path) -> Result<Stdio, LaunchError> {
        match self {
            Self::Inherit => Ok(Stdio::inherit()),
            Self::Pipe(fd) => Ok(fd.into()),
            Self::File(path) => {
                let path = working_dir.join(path);
                match File::open(&path).await {
                    Ok(file) => Ok(file.into_std().await.into()),
                    Err(source) => Err(LaunchError::Redirect { path, source }),
                }
            }
        }
    }
}

impl StdoutSink {
    async fn open(self, working_dir: &Path) -> Result<Stdio, LaunchError> {
        match self {
            Self::Inherit => Ok(Stdio::inherit()),
            Self::Pipe(fd) => Ok(fd.into()),
            Self::File(path) => {
                let path = working_dir.join(path);
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .mode(0o644)
                    .open(&path)
                    .await;

                match file {
                    Ok(file) => Ok(file.into_std().await.into()),
                    Err(source) => Err(LaunchError::Redirect { path, source }),
                }
            }
        }
    }
}

/// Spawns `argv` in `working_dir` with the given stdin and stdout. Stderr is
/// always inherited.
///
/// The command (and with it the parent's copy of any pipe end or redirect
/// file) is dropped before this returns.
pub async fn spawn(
    argv: &[String],
    stdin: StdinSource,
    stdout: StdoutSink,
    working_dir: &Path,
) -> Result<Child, LaunchError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(LaunchError::EmptyCommand);
    };

    let stdin = stdin.open(working_dir).await?;
    let stdout = stdout.open(working_dir).await?;

    let mut cmd = Command::new(resolve_program(program, working_dir));
    cmd.args(args)
        .current_dir(working_dir)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::inherit());

    trace!("spawning command: {:?}", cmd);

    cmd.spawn().map_err(|err| LaunchError::spawn(program, err))
}

/// Bare names go through `PATH`; relative paths are taken from the session's
/// working directory rather than the interpreter's own.
fn resolve_program(program: &str, working_dir: &Path) -> PathBuf {
    let path = Path::new(program);
    if program.contains('/') && path.is_relative() {
        working_dir.join(path)
    } else {
        path.to_owned()
    }
}
