use chrono::Local;
use color_eyre::{eyre::eyre, Result};
use padwatch::{EventKind, GilrsSource, InputConfig, InputStateMachine};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = load_config()?;
    info!("Starting input loop with config: {:?}", config);

    let source = GilrsSource::new().map_err(|e| eyre!("Failed to start gamepad backend: {}", e))?;
    let mut input = InputStateMachine::new(source, config.clone());

    for kind in EventKind::ALL {
        input.subscribe(kind.as_str(), move |event| {
            info!(
                "[{}] player {} {} {} = {:.3}",
                Local::now().format("%H:%M:%S.%3f"),
                event.player,
                kind,
                event.control,
                event.value
            );
        });
    }

    let mut ticker = tokio::time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => input.update(),
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down input loop");
                break;
            }
        }
    }

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Config path from the first argument, else the platform default location.
fn load_config() -> Result<InputConfig> {
    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        return Ok(InputConfig::load(&path)?);
    }

    match InputConfig::default_path() {
        Ok(path) => match path.parent() {
            Some(dir) => Ok(InputConfig::load_or_default(dir)?),
            None => Ok(InputConfig::default()),
        },
        Err(e) => {
            warn!("{}, using default input config", e);
            Ok(InputConfig::default())
        }
    }
}
