//! willow.camp CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use willow_camp::cli::commands;
use willow_camp::cli::{Cli, Commands};
use willow_camp::config::Settings;
use willow_camp::error::Error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if let Some(hint) = e.hint() {
                eprintln!("Error: {e}\n  Hint: {hint}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,hyper_util=info,reqwest=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let settings = Settings::resolve(cli.token.as_deref(), cli.api_url.as_deref(), cli.dry_run);
    if cli.command.requires_token() {
        settings.require_token()?;
    }

    let verbose = cli.verbose > 0;
    let json = cli.json;

    match &cli.command {
        // Single posts
        Commands::List => commands::posts::list(&settings, json),
        Commands::Show { slug } => commands::posts::show(slug, &settings, verbose, json),
        Commands::Create { file } => commands::posts::create(file, &settings, verbose, json),
        Commands::Update { slug, file } => {
            commands::posts::update(slug, file, &settings, verbose, json)
        }
        Commands::Delete { slug } => commands::posts::delete(slug, &settings, json),
        Commands::Download { slug, output } => {
            commands::posts::download(slug, output.as_deref(), &settings, json)
        }

        // Batches
        Commands::Upload { directory } => commands::upload::execute(directory, &settings, json),
        Commands::Sync { directory } => {
            commands::sync::execute(directory, &settings, verbose, json)
        }
        Commands::GhostImport {
            ghost_export,
            output_dir,
        } => commands::ghost_import::execute(ghost_export, output_dir, &settings, json),

        // Shell completions
        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
