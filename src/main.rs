use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    gh_radar::cli::run().await
}
