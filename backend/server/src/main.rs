#[tokio::main]
async fn main() -> anyhow::Result<()> {
    directory::start_server().await
}
