use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use super::Output;

pub mod install;
pub mod run;
pub mod status;
pub mod uninstall;

#[derive(Parser)]
#[command(
    name = "swagger-to-http-hooks",
    version = crate::VERSION,
    about = "Git hooks that keep .http request files in sync with OpenAPI specifications",
    long_about = "Installs pre-commit and post-checkout hooks that run an external \
                  spec-to-HTTP converter on changed OpenAPI / Swagger documents and \
                  stage the generated .http files."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the pre-commit and post-checkout hooks
    Install(install::InstallArgs),
    /// Execute a hook (called by the installed hook scripts)
    Run(run::RunArgs),
    /// Show configuration, converter and hook status
    Status(status::StatusArgs),
    /// Remove the hooks installed by this tool
    Uninstall(uninstall::UninstallArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Some(Commands::Install(args)) => install::execute(args, &output).await,
            Some(Commands::Run(args)) => run::execute(args, self.config.as_deref(), &output).await,
            Some(Commands::Status(args)) => {
                status::execute(args, self.config.as_deref(), &output).await
            }
            Some(Commands::Uninstall(args)) => uninstall::execute(args, &output).await,
            None => {
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout belongs to hook output shown in git's terminal
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
