use clap::{Args, Parser, Subcommand};
use facets::{fold_descriptors, read_descriptors, StartingSet};
use facets_core::config::Config;
use facets_core::Filter;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "facets", about = "Typed search filters rendered to query strings")]
struct Cli {
    /// Write debug logs to $TMPDIR/facets-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Read configuration from this file instead of ~/.config/facets/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fold filter descriptors into a list and print the query string.
    Query {
        #[command(flatten)]
        start: StartArgs,

        /// Print the resulting filters as descriptor JSON instead.
        #[arg(long)]
        json: bool,

        /// Descriptor JSON (object or array). Read from stdin when absent.
        descriptors: Vec<String>,
    },
    /// Edit filters in the faceted panel; prints the final query on exit.
    Tui {
        /// Descriptor JSON applied on top of the default filters.
        descriptors: Vec<String>,

        /// Leave the date filter out of the defaults.
        #[arg(long)]
        no_date: bool,
    },
}

#[derive(Args)]
struct StartArgs {
    /// Start from the default filters instead of an empty list.
    #[arg(long)]
    defaults: bool,

    /// Leave the date filter out of the defaults.
    #[arg(long)]
    no_date: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("facets-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "facets debug log started");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to built-in config");
            Config::defaults()
        }),
    };

    match cli.command {
        Command::Query {
            start,
            json,
            descriptors,
        } => {
            let stdin = if descriptors.is_empty() && !std::io::stdin().is_terminal() {
                Some(std::io::read_to_string(std::io::stdin())?)
            } else {
                None
            };
            let descriptors = read_descriptors(&descriptors, stdin.as_deref())?;
            let start = StartingSet {
                defaults: start.defaults,
                no_date: start.no_date,
            };
            let store = fold_descriptors(&config, start, &descriptors)?;

            if json {
                let out: Vec<_> = store.filters().iter().map(Filter::to_descriptor).collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", store.query());
            }
        }
        Command::Tui {
            descriptors,
            no_date,
        } => {
            let descriptors = read_descriptors(&descriptors, None)?;
            let start = StartingSet {
                defaults: true,
                no_date,
            };
            let store = fold_descriptors(&config, start, &descriptors)?;
            let query = facets_tui::run_with_store(store, config)?;
            println!("{query}");
        }
    }

    Ok(())
}
