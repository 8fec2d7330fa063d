mod generate;
mod view;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sheetcodec::FormatType;
use tracing_subscriber::EnvFilter;

use crate::{
    generate::{GenerateOptions, run_generate_command},
    view::{ViewOptions, run_view_command},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Which catalogs to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Android strings.xml
    Android,
    /// Apple string catalog JSON
    Ios,
    /// Both formats
    All,
}

impl FormatArg {
    pub fn formats(self) -> Vec<FormatType> {
        match self {
            FormatArg::Android => vec![FormatType::AndroidXml],
            FormatArg::Ios => vec![FormatType::StringCatalog],
            FormatArg::All => FormatType::ALL.to_vec(),
        }
    }
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate localization catalogs from translation sheets.
    Generate {
        /// CSV/TSV sheet exports, or directories holding them
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Root directory the catalogs are written under
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Catalog format to generate
        #[arg(short, long, value_enum, default_value_t = FormatArg::All)]
        format: FormatArg,

        /// Configuration file (defaults to sheetcodec.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the catalogs instead of writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the parsed contents of translation sheets.
    View {
        /// CSV/TSV sheet exports, or directories holding them
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Only show the column with this language code
        #[arg(short, long)]
        lang: Option<String>,

        /// Print the parsed sheets as JSON
        #[arg(long)]
        json: bool,

        /// Configuration file (defaults to sheetcodec.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.commands {
        Commands::Generate {
            input,
            output,
            format,
            config,
            dry_run,
        } => run_generate_command(GenerateOptions {
            input,
            output,
            formats: format.formats(),
            config,
            dry_run,
        }),
        Commands::View {
            input,
            lang,
            json,
            config,
        } => run_view_command(ViewOptions {
            input,
            lang,
            json,
            config,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error ({}): {}", e.stage(), e);
        std::process::exit(1);
    }
}
