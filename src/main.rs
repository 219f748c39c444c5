use anyhow::Result;
use scriptdesk::cli::App;

#[tokio::main]
async fn main() -> Result<()> {
    let mut app = App::from_args().await?;
    let args = scriptdesk::cli::Args::parse_args();

    app.run(args).await?;

    Ok(())
}
