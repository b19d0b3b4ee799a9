use std::process;

use clap::Parser;
use log::{error, info};

use dayplan::{App, Cli, Config, JsonFileStore, Result};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let store = JsonFileStore::from_config(&config)?;
    info!("Using event file {}", store.path().display());

    let mut app = App::new(store, cli.verbose);
    app.run(cli.command)
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    if let Err(e) = run(cli) {
        match e.as_validation() {
            Some(rejection) => eprintln!("{}", console::style(rejection).red()),
            None => {
                error!("{}", e);
                eprintln!("Error: {}", e);
            }
        }
        process::exit(1);
    }
}
