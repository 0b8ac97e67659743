use clap::{Args, Parser, Subcommand};

use shuangpin_cli::commands::build_ops::{self, Overrides};
use shuangpin_cli::commands::config_ops;
use shuangpin_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "dictgen", about = "Shuangpin character table generator")]
struct Cli {
    /// Log debug output (per-key glyph counts)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SourceArgs {
    /// Settings TOML file (default: built-in settings)
    #[arg(long)]
    config: Option<String>,
    /// Directory holding the pinyin source files
    #[arg(long)]
    source_dir: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Build all tables and splice them into the target file
    Build {
        #[command(flatten)]
        source: SourceArgs,
        /// Target file (overrides settings)
        #[arg(long)]
        target: Option<String>,
    },
    /// Print the rendered tables to stdout without touching the target
    Render {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the key ↔ initial table
    Initials,
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build { source, target } => build_ops::build(&Overrides {
            config: source.config.as_deref(),
            source_dir: source.source_dir.as_deref(),
            target: target.as_deref(),
        }),
        Command::Render { source } => build_ops::render(&Overrides {
            config: source.config.as_deref(),
            source_dir: source.source_dir.as_deref(),
            target: None,
        }),
        Command::Initials => config_ops::initials(),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
