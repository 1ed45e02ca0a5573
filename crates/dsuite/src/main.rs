mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dsuite_core::kernel::constants::{APP_NAME, DEFAULT_MANIFEST_VERSION};
use dsuite_core::registry::Platform;
use dsuite_core::storage::ConfigLocator;
use log::error;

/// dsuite: datasource test-suite registry and manifest writer
#[derive(Parser, Debug)]
#[command(name = APP_NAME, author, version, about, long_about = None)]
struct CliArgs {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Root holding the shipped `config/` directory
    #[arg(long, global = true, default_value = ".")]
    config_root: PathBuf,

    /// Root holding local overrides, searched before --config-root
    #[arg(long, global = true)]
    local_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a comma-separated suite expression into datasource names
    Resolve {
        /// Suites and/or datasource names, e.g. `standard,extra`
        expression: String,
        /// Registry to load (defaults to the host platform)
        #[arg(long)]
        platform: Option<Platform>,
        /// Fail if a resolved name has no datasource definition
        #[arg(long)]
        check: bool,
    },
    /// List registered datasources and suites
    List {
        /// Registry to load (defaults to the host platform)
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Build a manifest and write it to a file or stdout
    Manifest {
        /// Value of the Manifest-Version entry
        #[arg(long, default_value = DEFAULT_MANIFEST_VERSION)]
        manifest_version: String,
        /// Main section entry, KEY=VALUE (repeatable)
        #[arg(long = "attr", value_parser = cli::parse_attr)]
        attrs: Vec<(String, String)>,
        /// Sub-section entry, NAME:KEY=VALUE (repeatable)
        #[arg(long = "section", value_parser = cli::parse_section_attr)]
        sections: Vec<(String, String, String)>,
        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let local_root = args.local_root.clone().unwrap_or_else(|| args.config_root.clone());
    let locator = ConfigLocator::from_roots(local_root, args.config_root.clone());

    let outcome = match args.command {
        Commands::Resolve { expression, platform, check } => {
            cli::resolve(&locator, platform.unwrap_or_else(Platform::current), &expression, check)
        }
        Commands::List { platform } => cli::list(&locator, platform.unwrap_or_else(Platform::current)),
        Commands::Manifest { manifest_version, attrs, sections, output } => {
            cli::write_manifest(&manifest_version, &attrs, &sections, output.as_deref())
        }
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
