#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stock_price_checker::run().await
}
