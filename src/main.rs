use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use inkwell::core::config::{CliOverrides, load_config, resolve};
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "inkwell", version, about = "Terminal notebook: books of rich-text notes")]
struct Args {
    /// Config file to use instead of ~/.inkwell/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with no books instead of the sample library
    #[arg(long)]
    empty: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = load_config(args.config.as_deref())?;
    let config = resolve(
        &file_config,
        &CliOverrides {
            empty: args.empty,
            log_level: args.log_level,
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&config.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(config.log_level, log_config, log_file);
        }
        Err(e) => eprintln!("Could not open log file {}: {}", config.log_file.display(), e),
    }

    log::info!(
        "Inkwell starting up (sample library: {}, log level: {})",
        config.sample_library,
        config.log_level
    );

    inkwell::tui::run(config)?;
    Ok(())
}
