use anyhow::Result;

pub async fn handle_version() -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const NAME: &str = env!("CARGO_PKG_NAME");
    const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    println!("{} v{}", NAME, VERSION);
    println!("By: {}", AUTHORS);
    Ok(())
}
