use anyhow::Result;
use plaipin::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
