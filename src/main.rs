use clap::{Parser, Subcommand};
use daybook::config::{self, ConfigError, SiteConfig};
use daybook::output;
use daybook::pipeline::{self, BuildError, Paths};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Static site generator for a dated diary")]
#[command(long_about = "\
Static site generator for a dated diary

Every file in the diary directory is one entry, named by its date. The first
level-1 heading is the title; without one, the date is the title.

Site structure:

  .
  ├── config.toml                  # Site config (optional)
  └── diaries/
      ├── 2024-01-05.md
      ├── 2024-01-20.md
      └── 2024-02-01.md

Output:

  dist/
  ├── 2024/01/05/index.html        # One page per entry
  ├── archive/index.html           # Newest month
  ├── archive/2024-01/index.html   # Calendar + entries per month
  ├── diaries.js                   # const DIARY_DATA = [...]
  ├── sitemap.xml, robots.txt
  └── style.css, nav.js

No home page is generated: the site root index.html, which the header's
'Home' link and the sitemap point at, is provided by you.

Run 'daybook gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root (holds config.toml and the diary directory)
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Config file to use instead of <source>/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline stages (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: scan → load → index → generate
    Build,
    /// Validate the diary and list its entries without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.kind().exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), BuildError> {
    let paths = Paths::new(&cli.source, &cli.output);

    match cli.command {
        Command::Build => {
            let config = load_site_config(cli)?;
            println!("==> Building {}", paths.source.display());
            let report = pipeline::build(&config, &paths)?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let config = load_site_config(cli)?;
            println!("==> Checking {}", paths.source.display());
            let inventory = pipeline::check(&config, &paths)?;
            output::print_check_output(&inventory);
            println!("==> Diary is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the site config: an explicit `--config` file must exist, while a
/// missing `<source>/config.toml` just means stock defaults.
fn load_site_config(cli: &Cli) -> Result<SiteConfig, ConfigError> {
    match &cli.config {
        Some(path) if !path.exists() => Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("config file not found: {}", path.display()),
        ))),
        Some(path) => config::load_config_file(path),
        None => config::load_config(&cli.source),
    }
}
