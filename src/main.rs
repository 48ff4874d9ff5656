use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use notekeep::{
    handle_config, App, Cli, Commands, Config, ConsoleNotifier, NotesRepository, NotesShell,
    RestNoteStore, Result,
};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if let Commands::Config { show, set, reset } = cli.command {
        return handle_config(&config_path, show, set, reset);
    }

    let mut config = Config::load(&config_path)?;
    if let Some(url) = cli.store_url {
        config.store_url = url;
        config.validate()?;
    }

    let store = RestNoteStore::new(&config)?;
    let repository = NotesRepository::new(store, ConsoleNotifier);
    let mut app = App::new(NotesShell::new(repository), config);
    app.run(cli.command).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", console::style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
