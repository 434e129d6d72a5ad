use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(name = "tunerelay-demo")]
#[command(about = "Drives a logging playback session through the relay")]
pub struct Cli {
    /// Channel uri to tune to.
    #[arg(long, default_value = "service://demo/1")]
    pub channel_uri: String,

    /// Stream volume applied after tuning.
    #[arg(long, default_value_t = 0.8)]
    pub volume: f32,

    /// Enable captions on the session.
    #[arg(long)]
    pub captions: bool,

    /// Number of key events pushed through the input transport.
    #[arg(long, default_value_t = 3)]
    pub key_events: u32,
}
