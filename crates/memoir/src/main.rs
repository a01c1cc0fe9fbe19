//! Memoir story generation server.

mod cli;

use clap::Parser;
use cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    let args = Args::parse();
    cli::run(args).await?;
    Ok(())
}
