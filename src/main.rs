use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use tokio_util::sync::CancellationToken;

use vigil::client::HttpRemoteClient;
use vigil::config::{Config, SinkKind, CONFIG_TEMPLATE};
use vigil::sinks::{Dispatcher, LogSink, Sink, TelegramSink};
use vigil::Watcher;

const DEFAULT_CONFIG: &str = "vigil.json";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => {
            tracing::info!("finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);

    if let Some(arg) = args.next() {
        match arg.as_str() {
            // `vigil init [path]` writes a starter config and exits.
            "init" => {
                let path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
                let mut file = std::fs::File::create(&path)?;
                file.write_all(CONFIG_TEMPLATE.as_bytes())?;
                println!("{path} generated.");
                return Ok(());
            }
            other => config_path = PathBuf::from(other),
        }
    }

    let config = Config::load(&config_path)?;

    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    for kind in &config.output_sinks {
        match kind {
            SinkKind::Logfile => sinks.push(Box::new(LogSink::new())),
            SinkKind::Telegram => {
                // Presence was validated with the rest of the config.
                let tg = config
                    .telegram
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("telegram sink selected but unconfigured"))?;
                sinks.push(Box::new(TelegramSink::new(tg.token.clone(), tg.chat_id)));
            }
        }
    }

    let client = HttpRemoteClient::new(
        config.remote.base_url.clone(),
        config.credentials.username.clone(),
        config.credentials.password.clone(),
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, shutting down");
            signal_cancel.cancel();
        }
    });

    let mut watcher = Watcher::new(client, Dispatcher::new(sinks), &config);
    watcher.run(cancel).await?;

    Ok(())
}
