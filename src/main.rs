use color_eyre::{eyre::WrapErr, Result};
use mysh::{
    config::Config,
    input::LineSource,
    logging,
    session::{Mode, Session},
};
use tracing_subscriber::prelude::*;

#[macro_use]
extern crate tracing;

const USAGE: &str = "usage: mysh [batch-file]";

#[tokio::main]
async fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.len() > 1 {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    dotenvy::dotenv().ok();

    let config = Config::load()?;

    let appender = logging::file_appender(&config.log_dir).wrap_err_with(|| {
        format!("failed to open log file in {}", config.log_dir.display())
    })?;
    let (writer, _guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_error::ErrorLayer::default())
        .init();

    color_eyre::install()?;

    let (mut input, mode) = match args.first() {
        Some(path) => (
            LineSource::open(path)
                .await
                .wrap_err_with(|| format!("failed to open batch file {path}"))?,
            Mode::Batch,
        ),
        None if termion::is_tty(&std::io::stdin()) => (LineSource::stdin(), Mode::Interactive),
        None => (LineSource::stdin(), Mode::Batch),
    };

    trace!(?mode, "starting session");

    let mut session = Session::new(config, std::env::current_dir()?);
    session.run(&mut input, mode).await?;

    trace!(status = ?session.last_status(), "session finished");

    Ok(())
}
