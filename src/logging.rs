use std::path::Path;

use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

pub const LOG_FILE: &str = "mysh.log";

/// Appender for `LOG_FILE` in `log_dir`, created if missing. Fails instead of
/// panicking when the directory cannot be created or written.
pub fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(log_dir)
}
