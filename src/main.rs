use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io::{Error, ErrorKind};
use std::path::PathBuf;

use todolist::core::config::{self, CliOverrides, ConfigError, ResolvedConfig};
use todolist::core::store::KeyAllocation;

#[derive(Parser)]
#[command(name = "todolist", about = "Keyboard and mouse driven to-do list for the terminal")]
struct Args {
    /// Config file to read instead of ~/.todolist/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// How keys for new items are chosen
    #[arg(long, value_enum)]
    key_allocation: Option<KeyAllocation>,

    /// Refuse to add items whose text is blank
    #[arg(long)]
    reject_empty: bool,

    /// Let Esc and [Cancel] leave edit mode without saving
    #[arg(long)]
    allow_cancel_edit: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            key_allocation: self.key_allocation,
            reject_empty: self.reject_empty,
            allow_cancel_edit: self.allow_cancel_edit,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

/// Start the file logger. A failure is returned for the caller to report.
fn init_logging(config: &ResolvedConfig) -> Result<(), String> {
    let log_file = File::create(&config.log_file).map_err(|e| {
        format!("cannot create log file {}: {e}", config.log_file.display())
    })?;
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(config.log_level, log_config, log_file).map_err(|e| e.to_string())
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config(args.config.as_deref()).map_err(|e| match e {
        ConfigError::Io(io) => io,
        parse @ ConfigError::Parse(_) => Error::new(ErrorKind::InvalidData, parse),
    })?;
    let config = config::resolve(&file_config, &args.overrides());

    // Initialize file logger; the terminal belongs to the UI
    if let Err(e) = init_logging(&config) {
        eprintln!("warning: {e}; logging disabled");
    }

    log::info!(
        "todolist starting up (keys: {}, empty submissions: {:?}, cancel edit: {})",
        config.key_allocation.label(),
        config.empty_submissions,
        config.allow_cancel_edit
    );

    todolist::tui::run(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use todolist::core::config::TodoConfig;

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let cli = CliOverrides {
            log_file: Some(PathBuf::from("/nonexistent-todolist-dir/sub/todolist.log")),
            ..Default::default()
        };
        let config = config::resolve_with_env(&TodoConfig::default(), &cli, |_| None);

        let err = init_logging(&config).unwrap_err();
        assert!(err.starts_with("cannot create log file /nonexistent-todolist-dir/sub/todolist.log"));
    }
}
