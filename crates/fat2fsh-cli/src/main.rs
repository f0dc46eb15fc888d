//! fat2fsh CLI
//!
//! Downloads code lists from the FAT API and converts them to FHIR
//! Shorthand CodeSystems

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use commands::ConvertOptions;
use fat2fsh_core::{ConfigLoader, init_tracing};
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "fat2fsh")]
#[command(about = "Convert FAT code lists to FHIR Shorthand CodeSystems")]
#[command(version = fat2fsh_core::VERSION)]
#[command(
    long_about = "fat2fsh downloads code systems from the FAT API and converts them to FHIR\n\
CodeSystems in FHIR Shorthand (FSH) notation.\n\
\n\
Examples:\n  \
fat2fsh convert -c 7010 -c 9151          # Convert two code systems into ./fat and ./fsh\n  \
fat2fsh convert -c 7010 -o out -v        # Write under out/ with progress logging\n  \
fat2fsh check                            # Verify API access and output directory"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        long,
        global = true,
        help = "Path to configuration file (.fat2fshrc.json/.fat2fshrc.toml/fat2fsh.yaml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download code systems and write JSON and FSH files
    Convert {
        /// Code system identifiers to download
        #[arg(
            short = 'c',
            long = "code-system",
            alias = "code-systems",
            required = true,
            help = "Code system ID to download (can be specified multiple times)"
        )]
        code_systems: Vec<String>,

        /// Output directory
        #[arg(
            short,
            long,
            default_value = ".",
            help = "Output directory (default: current directory)"
        )]
        output_dir: PathBuf,

        /// Include inactive codes
        #[arg(long, help = "Ask the API to include inactive codes")]
        include_inactive: bool,

        /// Override the API base URL
        #[arg(long, env = "FAT2FSH_BASE_URL", help = "Base URL of the FAT API")]
        base_url: Option<String>,

        /// Exit with non-zero code if any code system failed
        #[arg(long, help = "Exit with non-zero code if any code system failed")]
        strict: bool,
    },

    /// Check API connectivity and output directory permissions
    Check {
        /// Output directory to probe
        #[arg(
            short,
            long,
            default_value = ".",
            help = "Output directory to probe (default: current directory)"
        )]
        output_dir: PathBuf,

        /// Override the API base URL
        #[arg(long, env = "FAT2FSH_BASE_URL", help = "Base URL of the FAT API")]
        base_url: Option<String>,
    },
}

fn main() {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    runtime.block_on(async_main())
}

async fn async_main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "fat2fsh=error", // Only errors by default
        1 => "fat2fsh=info",  // Progress details on -v
        2 => "fat2fsh=debug", // Requests and counts on -vv
        _ => "fat2fsh=trace",
    };
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    if let Err(e) = run_command(cli).await {
        error!("fat2fsh failed: {:#}", e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Convert {
            code_systems,
            output_dir,
            include_inactive,
            base_url,
            strict,
        }) => {
            let config = ConfigLoader::load(cli.config.as_deref(), None)?;
            let options = ConvertOptions {
                code_systems,
                output_dir,
                include_inactive,
                base_url,
                strict,
            };
            commands::convert_command(options, config).await
        }

        Some(Commands::Check {
            output_dir,
            base_url,
        }) => {
            let config = ConfigLoader::load(cli.config.as_deref(), None)?;
            commands::check_command(&output_dir, base_url, config).await
        }

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
