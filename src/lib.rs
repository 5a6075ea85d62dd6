#![warn(missing_docs)]
//! imagegen - DALL-E 3 image generation.
//!
//! This crate wraps the OpenAI image generation endpoint in a stateless
//! three-step pipeline: submit a prompt, download the rendered image, and
//! persist it under a timestamped filename. All terminal interaction lives
//! in the `imagegen` binary; the library itself performs no terminal I/O.
//!
//! # Quick Start
//!
//! ```no_run
//! use imagegen::{DallEClient, GenerationRequest, ImageSize};
//!
//! #[tokio::main]
//! async fn main() -> imagegen::Result<()> {
//!     let client = DallEClient::builder().build()?;
//!     let request = GenerationRequest::new("A golden retriever puppy")
//!         .with_size(ImageSize::Landscape);
//!     let bytes = client.generate(&request).await?;
//!     let path = imagegen::persist(&bytes, "images", "image")?;
//!     println!("saved {}", path.display());
//!     Ok(())
//! }
//! ```

mod error;
pub mod image;

pub use error::{ImageGenError, Result};
pub use image::{
    persist, DallEClient, DallEClientBuilder, GenerationPhase, GenerationRequest, ImageQuality,
    ImageSize, ImageStyle,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{ImageGenError, Result};
    pub use crate::image::{
        persist, DallEClient, GenerationPhase, GenerationRequest, ImageQuality, ImageSize,
        ImageStyle,
    };
}
