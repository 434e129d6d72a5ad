mod cli;
mod session;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tunerelay::{InputEventKind, ParamMap, RelayConfig, input_channel, start_playback_relay};

use cli::Cli;
use session::LoggingSession;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let (sender, channel) = input_channel();
    let (proxy, monitor) = start_playback_relay(
        LoggingSession::default(),
        Some(channel),
        RelayConfig::default(),
    )?;

    let mut params = ParamMap::new();
    params.insert(
        "audio_only".to_string(),
        serde_json::Value::Bool(false),
    );
    proxy.tune(cli.channel_uri.clone(), params);
    proxy.set_stream_volume(cli.volume);
    proxy.set_caption_enabled(cli.captions);

    for offset in 0..cli.key_events {
        let kind = InputEventKind::Key {
            code: 19 + offset,
            pressed: true,
        };
        if sender.send(kind).is_none() {
            warn!("input transport disposed early");
            break;
        }
        match sender.recv_receipt(Duration::from_millis(500)) {
            Some(receipt) => {
                info!(seq = receipt.seq, handled = receipt.handled, "input acknowledged");
            },
            None => warn!("no acknowledgment within 500ms"),
        }
    }

    proxy.release();
    drop(proxy);
    let exit = monitor.join();
    info!(?exit, "relay exited");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
