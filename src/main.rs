use std::io;

use color_eyre::Result;
use pish::{
    config::ShellConfig,
    input::{self, InputMessage},
    state::{Flow, State},
};
use tracing_subscriber::prelude::*;

#[macro_use]
extern crate tracing;

const LOG_FILE: &str = "pish.log";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ShellConfig::load()?;

    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&config.log_dir, LOG_FILE));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_error::ErrorLayer::default())
        .init();

    color_eyre::install()?;

    let mut state = State::new(config);

    trace!(show_prompt = state.show_prompt, "entering read loop");

    loop {
        if state.show_prompt {
            state.render(&mut io::stdout().lock())?;
        }

        let line = match input::next_line().await {
            InputMessage::Line(line) => line,
            InputMessage::Eof => {
                trace!("end of input");
                break;
            }
            InputMessage::Error(err) => {
                error!("failed to read input: {err}");
                return Err(err.into());
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match state.execute(&line, &mut io::stderr()).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => {
                error!(code = err.code(), "{err}");
                eprintln!("pish: {err}");
            }
        }
    }

    Ok(())
}
