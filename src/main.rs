use anyhow::Result;
use clap::Parser;
use regionfonts::cli::{self, Cli};

fn main() -> Result<()> {
    let args = Cli::parse();
    // Flag and RUST_LOG levels first; the config file's level is applied once loaded.
    regionfonts::debug::init_log_bridge(args.log_level);
    log::info!("Starting regionfonts");

    let result = cli::load_config(&args).and_then(|config| {
        regionfonts::debug::apply_config_level(config.log_level);
        cli::run(args, &config)
    });

    match result {
        Ok(_) => Ok(()),
        Err(ref e) => {
            log::error!("{e:#}");
            eprintln!("{}", cli::error_line(e));
            result
        }
    }
}
