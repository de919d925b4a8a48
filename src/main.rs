//! Binary entrypoint for the partybot CLI.
//!
//! Commands:
//! - `run` - authenticate, apply the default loadout, and start the console
//! - `init` - create a starter `partybot.toml`
//!
//! See the library crate docs for module-level details: `partybot::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use partybot::bot::auth;
use partybot::bot::catalog::CatalogClient;
use partybot::bot::command::CommandParser;
use partybot::bot::console::{CommandInterpreter, LoopEnd};
use partybot::bot::dispatcher::CommandDispatcher;
use partybot::bot::session::apply_default_loadout;
use partybot::config::Config;

#[derive(Parser)]
#[command(name = "partybot")]
#[command(about = "An interactive console bot for driving a game-account party session")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "partybot.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console session
    Run,
    /// Initialize a new configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            // A missing or invalid config file is fatal before any session exists.
            let config = Config::load(&cli.config).await?;
            config.validate()?;
            init_logging(Some(&config), cli.verbose);
            info!("Starting partybot v{}", env!("CARGO_PKG_VERSION"));

            let mut session = auth::build_session(&config)?;
            println!("Logged in as {}", session.display_name());
            apply_default_loadout(&mut session, &config.defaults).await?;

            let catalog = CatalogClient::new(config.catalog.clone());
            let parser = CommandParser::new(config.bot.marker_char());
            let dispatcher = CommandDispatcher::new(catalog, session, config.bot.marker_char());
            let mut console =
                CommandInterpreter::new(parser, dispatcher, &config.bot.status_message);

            match console.run().await? {
                LoopEnd::ExitRequested => info!("exit command received"),
                LoopEnd::Interrupted => info!("interrupted, shutting down"),
                LoopEnd::SessionEnded => info!("party session ended"),
            }
        }
        Commands::Init => {
            init_logging(None, cli.verbose);
            info!("Initializing new partybot configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            println!("Wrote {}", cli.config);
        }
    }

    Ok(())
}

fn init_logging(config: Option<&Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .map(|cfg| cfg.logging.level.parse().unwrap_or(log::LevelFilter::Info))
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    if let Some(file) = config.and_then(|cfg| cfg.logging.file.clone()) {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));

            // If stdout is a terminal the log lines are echoed to the console
            // as well; with redirected output only the file sink is used.
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        } else {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
