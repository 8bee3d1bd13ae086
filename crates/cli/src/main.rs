mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geo-compare")]
#[command(version, about = "Pairwise AI platform comparison generator", long_about = None)]
struct Cli {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new project with the bundled platform catalog
    Init {
        /// Path to create project directory
        path: PathBuf,
    },

    /// Lint the platform catalog
    Validate {
        /// Path to project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List every comparison route
    Routes {
        /// Path to project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the Markdown document for one comparison
    Show {
        /// Path to project directory
        path: PathBuf,

        /// Comparison slug, e.g. gpt-4o-vs-gemini-2-5-pro
        slug: String,
    },

    /// Generate every comparison artifact
    Build {
        /// Path to project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory (overrides [build].output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Audit a build output directory against the current routes
    Check {
        /// Path to project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory (overrides [build].output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Preview comparisons locally with hot reload
    Preview {
        /// Path to project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug"
    } else {
        "warn,geo_compare=info,geo_compare_core=info,geo_compare_generator=info,geo_compare_validator=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Init { path } => commands::init::run(path).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Routes { path } => commands::routes::list(path).await,
        Command::Show { path, slug } => commands::routes::show(path, slug).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Check { path, output } => commands::check::run(path, output).await,
        Command::Preview { path, port } => commands::preview::run(path, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "geo-compare", &mut io::stdout());
            Ok(())
        }
    }
}
