//! fraudeye - transaction fraud checks from the command line.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    fraudeye_cli::run().await
}
