use anyhow::Result;
use clap::Parser;

use expense_server::tracing_setup::init_tracing;
use expense_server::ServerArgs;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = ServerArgs::parse();
    init_tracing(args.debug)?;

    expense_server::serve(args).await?;
    Ok(())
}
