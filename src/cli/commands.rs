use tokio::net::TcpListener;

use crate::app::{AppContext, QuietError, Result};
use crate::web;

pub async fn serve(ctx: &AppContext) -> Result<()> {
    let listener = TcpListener::bind(&ctx.config.bind).await?;
    web::serve(ctx, listener).await
}

pub async fn refresh(ctx: &AppContext, json: bool) -> Result<()> {
    ctx.pipeline.refresh(&ctx.cache).await?;
    let snapshot = ctx.cache.read();

    if json {
        let out = serde_json::to_string_pretty(snapshot.as_ref())
            .map_err(|e| QuietError::Other(format!("Failed to serialize stories: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("No stories");
        return Ok(());
    }

    for (rank, story) in snapshot.stories().iter().enumerate() {
        println!("{:>2}. {} ({})", rank + 1, story.title(), story.host());
        println!("    {}", story.url());
    }

    println!(
        "{} stories from {} ranked ids",
        snapshot.len(),
        snapshot.scanned()
    );
    Ok(())
}
