use anyhow::Result;
use clap::Parser;
use moodmeal::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    moodmeal::cli::run(Cli::parse()).await
}
