use anyhow::Result;
use clap::Parser;

use swagger_to_http_hooks::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run().await
}
