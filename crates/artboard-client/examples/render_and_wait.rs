//! Render a design to PNG and wait for the job to finish
//!
//! Requires `ARTBOARD_API_KEY` and a design id argument:
//! `cargo run --example render_and_wait -- des_123`

use artboard_client::resources::{RenderFormat, RenderRequest};
use artboard_client::{ArtboardClient, WaitOptions};
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("ARTBOARD_API_KEY")?;
    let design_id = std::env::args()
        .nth(1)
        .ok_or("usage: render_and_wait <design_id>")?;

    let client = ArtboardClient::new(api_key)?;

    info!("Queueing a 2x PNG render for {}", design_id);
    let job = client
        .renders()
        .create(&RenderRequest::new(design_id.as_str(), RenderFormat::Png).with_scale(2.0))
        .await?;
    info!("Job {} queued", job.id);

    let options = WaitOptions::job().with_timeout(Duration::from_secs(120));
    match client.renders().wait(&job.id, &options).await {
        Ok(done) => {
            info!("✓ Render complete");
            if let Some(url) = done.output_url {
                info!("Output: {}", url);
            }
        }
        Err(e) => {
            error!("✗ Render did not complete: {}", e);
        }
    }

    Ok(())
}
