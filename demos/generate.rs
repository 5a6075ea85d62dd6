//! Basic image generation example.
//!
//! Run with: `cargo run --example generate`
//!
//! Requires `OPENAI_API_KEY` environment variable.

use imagegen::{DallEClient, GenerationRequest, ImageQuality, ImageSize};

#[tokio::main]
async fn main() -> imagegen::Result<()> {
    let client = DallEClient::builder().build()?;

    let request = GenerationRequest::new("A golden retriever puppy playing in snow")
        .with_size(ImageSize::Landscape)
        .with_quality(ImageQuality::Hd);
    let bytes = client.generate(&request).await?;

    let path = imagegen::persist(&bytes, "images", "image")?;
    println!("Generated image: {} ({} bytes)", path.display(), bytes.len());

    Ok(())
}
