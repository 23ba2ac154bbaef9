use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Store to seed, `memory` or a redis url
    #[arg(long, env = "STORE_URL", default_value = "redis://127.0.0.1:6379")]
    store_url: String,

    /// Skip seeding when fixture rows already exist
    #[arg(long)]
    if_empty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let inserted = seed::seed(&args.store_url, args.if_empty).await?;
    println!("Inserted Listings: {}", inserted);

    Ok(())
}
