use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{
    cmd::execution_plan::Command,
    config::Config,
    input::LineSource,
    parse::parse_command,
    process::status::{BuiltinExitStatus, ShellExitStatus},
};

pub const WELCOME: &str = "Welcome to my shell!";
pub const GOODBYE: &str = "Exiting my shell.";

/// What the input loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Banners and a prompt before every line.
    Interactive,
    Batch,
}

/// Everything that outlives a single line. External commands write straight
/// to the inherited stdout/stderr; `stdout` and `stderr` here carry builtin
/// output, prompts and diagnostics.
pub struct Session {
    config: Config,
    working_dir: PathBuf,
    last_status: Option<ShellExitStatus>,
    stdout: Box<dyn Write + Send>,
    stderr: Box<dyn Write + Send>,
}

impl Session {
    pub fn new(config: Config, working_dir: PathBuf) -> Self {
        Self::with_output(
            config,
            working_dir,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    pub fn with_output(
        config: Config,
        working_dir: PathBuf,
        stdout: Box<dyn Write + Send>,
        stderr: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            config,
            working_dir,
            last_status: None,
            stdout,
            stderr,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn last_status(&self) -> Option<i32> {
        self.last_status.map(|status| status.code())
    }

    pub async fn run(&mut self, input: &mut LineSource, mode: Mode) -> io::Result<()> {
        let interactive = mode == Mode::Interactive;

        if interactive {
            writeln!(self.stdout, "{WELCOME}")?;
        }

        loop {
            if interactive {
                write!(self.stdout, "{}", self.config.prompt)?;
                self.stdout.flush()?;
            }

            let Some(line) = input.next_line().await? else {
                trace!("end of input");
                break;
            };

            if self.execute(&line).await? == Flow::Exit {
                trace!("exit requested");
                break;
            }
        }

        if interactive {
            writeln!(self.stdout, "{GOODBYE}")?;
        }
        self.stdout.flush()
    }

    /// Parses and runs one line. Only failures to write to the session's own
    /// output are returned as errors; everything else is reported and the
    /// session carries on.
    pub async fn execute(&mut self, line: &str) -> io::Result<Flow> {
        let parsed = match parse_command(line, self.working_dir.as_path(), &self.config.limits()) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!("rejected line {line:?}: {err}");
                writeln!(self.stderr, "mysh: {err}")?;
                self.last_status = Some(BuiltinExitStatus::SYNTAX_ERROR.into());
                return Ok(Flow::Continue);
            }
        };

        for diagnostic in &parsed.diagnostics {
            writeln!(self.stderr, "mysh: {diagnostic}")?;
        }

        match parsed.command {
            Command::Empty => Ok(Flow::Continue),
            Command::Builtin(invocation) => {
                trace!("builtin: {invocation}");

                let output = invocation
                    .builtin
                    .invoke(&mut self.working_dir, &invocation.args)
                    .await;

                self.stdout.write_all(&output.stdout)?;
                self.stdout.flush()?;
                for line in String::from_utf8_lossy(&output.stderr).lines() {
                    writeln!(self.stderr, "mysh: {line}")?;
                }

                if output.status.failure() {
                    debug!("builtin {invocation} failed with {}", output.status.code());
                }
                self.last_status = Some(output.status.into());

                Ok(output.flow)
            }
            Command::External(plan) => {
                trace!(pipeline = plan.is_pipeline(), "execution plan: {plan}");

                // keep our own output ahead of the child's
                self.stdout.flush()?;

                let mut failures = Vec::new();
                let status = plan.execute(&self.working_dir, |err| failures.push(err)).await;

                for failure in &failures {
                    writeln!(self.stderr, "mysh: {failure}")?;
                }

                trace!(
                    status = status.code(),
                    success = status.success(),
                    "command finished"
                );
                self.last_status = Some(status);

                Ok(Flow::Continue)
            }
        }
    }
}
