use clap::{Parser, Subcommand};
use folio::catalog::Catalog;
use folio::session::{self, ReplayOptions};
use folio::{config, generate, logging, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Single-page portfolio generator with a headless view-state coordinator")]
#[command(long_about = "\
Single-page portfolio generator with a headless view-state coordinator

Content structure:

  content/
  ├── config.toml        # Site identity, timings, colors, content blocks (optional)
  ├── projects.toml      # Project catalog, one [[project]] table per card
  └── assets/            # Copied verbatim to the output root

Sessions are JSON files of events and waits, replayed against the page's
interactive behaviour on a virtual clock:

  { \"steps\": [ { \"event\": \"load\" }, { \"wait\": 2500 },
               { \"event\": \"select_filter\", \"filter\": \"payment\" } ] }

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate config and catalog without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Replay a recorded session and print the view state after each step
    Replay {
        /// Session file (JSON)
        session: PathBuf,
        /// Print step reports as JSON
        #[arg(long)]
        json: bool,
        /// Make every contact form submission fail
        #[arg(long)]
        fail_submissions: bool,
        /// Persist the theme preference to this JSON file
        #[arg(long)]
        theme_store: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            println!("==> Building {}", cli.source.display());
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_build_report(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let catalog = Catalog::load(&cli.source)?;
            output::print_check_output(&catalog, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Replay {
            session,
            json,
            fail_submissions,
            theme_store,
        } => {
            let options = ReplayOptions {
                fail_submissions,
                theme_store,
            };
            let reports = session::replay_file(&cli.source, &session, &options)?;
            if json {
                println!("{}", output::format_replay_json(&reports)?);
            } else {
                output::print_replay_output(&reports);
            }
        }
    }

    Ok(())
}
