mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use commands::ProjectArgs;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "metamap")]
#[command(version, about = "Generate static html pages for a bundled app", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate one html page per page metadata record
    Build {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Check every page without writing anything
    Validate {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Print the entry chunks found in a bundle description
    Chunks {
        /// JSON dump of the bundler's output bundle
        #[arg(short, long)]
        bundle: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build { project } => commands::build::run(project),
        Command::Validate { project } => commands::validate::run(project),
        Command::Chunks { bundle } => commands::chunks::run(bundle),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "metamap", &mut io::stdout());
            Ok(())
        }
    }
}
