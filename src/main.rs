use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    sci_meter::logging::init();
    sci_meter::run().await
}
