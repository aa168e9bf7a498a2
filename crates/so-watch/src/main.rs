use anyhow::Result;
use clap::Parser;
use so_client::{Query, UreqFetcher};
use so_config::{capture_pipe_path, AppConfig, ConfigFile, ConfigOverrides};
use so_render::{color_enabled, PostRenderer};
use std::io::{self, Stdin, StdinLock, Stdout};
use std::time::Duration;
use traceback_parser::LanguageProfile;

mod capture;
mod cli;
mod decision;
mod logger;
mod session;
mod setup;

use cli::{Cli, Commands, ConfigAction};
use session::SessionController;

type TerminalSession = SessionController<UreqFetcher, StdinLock<'static>, Stdout>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logger::init() {
        eprintln!("Logging disabled: {:#}", e);
    }
    log::info!("Starting so-watch");

    let result = run(cli.command);
    if let Err(e) = &result {
        log::error!("{:#}", e);
    }

    log::info!("Exiting so-watch");
    result
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Capture => capture::capture(&capture_pipe_path()),
        Commands::Display { overrides } => display(load_config(overrides.into())?),
        Commands::Query { text, overrides } => {
            let config = load_config(overrides.into())?;
            let mut session = terminal_session(&config, io::stdin())?;
            session.run_query(Query::from_text(&text.join(" ")))
        }
        Commands::Config { global, action } => {
            let file = ConfigFile::for_scope(cli::scope(global))?;
            edit_config(&file, action)
        }
        Commands::Init { global, default } => {
            let file = ConfigFile::for_scope(cli::scope(global))?;
            let config = if default {
                AppConfig::default()
            } else {
                setup::ask_config(&mut io::stdin().lock(), &mut io::stdout())?
            };
            file.create(&config)?;
            println!("Wrote configuration to {}", file.path().display());
            Ok(())
        }
    }
}

fn display(config: AppConfig) -> Result<()> {
    let pipe = capture_pipe_path();
    if !pipe.exists() {
        println!("Execute \"so-watch capture\" in another terminal window first.");
        return Ok(());
    }

    println!("Waiting on \"so-watch capture\" to be executed...");
    let stream = capture::open_pipe(&pipe)?;

    let mut session = terminal_session(&config, io::stdin())?;
    session.listen(stream)
}

fn edit_config(file: &ConfigFile, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => println!("{}", file.get(&key)?),
        ConfigAction::Set { key, value } => {
            file.set(&key, &value)?;
            println!("{} = {}", key, file.get(&key)?);
        }
        ConfigAction::List => {
            for (key, value) in file.list()? {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            file.reset()?;
            println!("Reset {}", file.path().display());
        }
    }
    Ok(())
}

fn load_config(overrides: ConfigOverrides) -> Result<AppConfig> {
    let config = AppConfig::load()?.with_overrides(overrides);
    config.validate()?;
    log::debug!("Effective config: {:?}", config);
    Ok(config)
}

fn terminal_session(config: &AppConfig, stdin: Stdin) -> Result<TerminalSession> {
    let profile = LanguageProfile::for_language(&config.language)?;
    let http = UreqFetcher::new(Duration::from_secs(config.fetch_timeout_secs));
    let renderer = PostRenderer::new(io::stdout(), &config.language, color_enabled())
        .with_max_comments(config.max_comments);

    Ok(SessionController::new(
        http,
        config,
        profile,
        stdin.lock(),
        renderer,
    ))
}
