use std::path::Path;

use super::execution_plan::{CommandPlan, Stage};
use crate::process::{
    self,
    child::ShellChild,
    pipe::Pipe,
    status::ShellExitStatus,
    LaunchError, StdinSource, StdoutSink,
};

impl CommandPlan {
    /// Runs the plan to completion and returns its status. For a pipeline that
    /// is the status of the second stage; both stages are always waited for.
    ///
    /// Nothing here ends the session: every failure is passed to `report` and
    /// folded into the returned status.
    pub async fn execute<F>(&self, working_dir: &Path, mut report: F) -> ShellExitStatus
    where
        F: FnMut(LaunchError),
    {
        let Some(second) = &self.second else {
            trace!("spawning single command");
            let mut child = self
                .first
                .launch(StdinSource::Inherit, StdoutSink::Inherit, working_dir, &mut report)
                .await;
            return wait(&mut child, &mut report).await;
        };

        let Pipe { reader, writer } = match Pipe::new() {
            Ok(pipe) => pipe,
            Err(err) => {
                let err = LaunchError::from(err);
                let status = err.status();
                report(err);
                return status.into();
            }
        };

        trace!("spawning left side of pipe");
        let mut left = self
            .first
            .launch(StdinSource::Inherit, StdoutSink::Pipe(writer), working_dir, &mut report)
            .await;

        trace!("spawning right side of pipe");
        let mut right = second
            .launch(StdinSource::Pipe(reader), StdoutSink::Inherit, working_dir, &mut report)
            .await;

        trace!(left = ?left.id(), right = ?right.id(), "waiting for pipeline");
        let left_status = wait(&mut left, &mut report).await;
        let right_status = wait(&mut right, &mut report).await;
        trace!(
            left = left_status.code(),
            right = right_status.code(),
            "pipeline finished"
        );

        right_status
    }
}

impl Stage {
    /// A file redirect on the stage takes precedence over the default stream,
    /// in which case the default (possibly a pipe end) is closed here.
    async fn launch<F>(
        &self,
        stdin: StdinSource,
        stdout: StdoutSink,
        working_dir: &Path,
        report: &mut F,
    ) -> ShellChild
    where
        F: FnMut(LaunchError),
    {
        let stdin = match &self.input {
            Some(path) => StdinSource::File(path.clone()),
            None => stdin,
        };
        let stdout = match &self.output {
            Some(path) => StdoutSink::File(path.clone()),
            None => stdout,
        };

        match process::spawn(&self.args, stdin, stdout, working_dir).await {
            Ok(child) => child.into(),
            Err(err) => {
                let status = err.status();
                report(err);
                ShellChild::Failed(status)
            }
        }
    }
}

async fn wait<F>(child: &mut ShellChild, report: &mut F) -> ShellExitStatus
where
    F: FnMut(LaunchError),
{
    match child.wait().await {
        Ok(status) => status,
        Err(err) => {
            let err = LaunchError::Wait(err);
            let status = err.status();
            report(err);
            status.into()
        }
    }
}
