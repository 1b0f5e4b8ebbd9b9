use clap::Parser;
use nikmessenger::core::config::{self, CliOverrides};
use nikmessenger::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nikmessenger", about = "Terminal messenger mockup")]
struct Args {
    /// Disable the synthetic "Получено: ..." reply
    #[arg(long)]
    no_auto_reply: bool,

    /// Delay before the synthetic reply arrives
    #[arg(long, value_name = "MS")]
    reply_delay_ms: Option<u64>,

    /// Seed for contact presence flags (reproducible runs)
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the built-in demo contacts
    #[arg(long)]
    demo: bool,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            no_auto_reply: self.no_auto_reply,
            reply_delay_ms: self.reply_delay_ms,
            presence_seed: self.seed,
            demo: self.demo,
            log_file: self.log_file.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let resolved = config::resolve(&file_config, &args.overrides());

    // File logger: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    for notice in &resolved.notices {
        notice.replay();
    }

    log::info!(
        "NikMessenger starting up (auto_reply={:?}, contacts={})",
        resolved.auto_reply,
        resolved.contacts.len()
    );

    tui::run(resolved)
}
