#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dashboard_client::host::run().await
}
