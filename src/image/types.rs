//! Core types for image generation.

use crate::error::{ImageGenError, Result};
use serde::{Deserialize, Serialize};

/// Image sizes supported by DALL-E 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    /// 1024x1024 square.
    #[default]
    #[serde(rename = "1024x1024")]
    Square,
    /// 1792x1024 landscape.
    #[serde(rename = "1792x1024")]
    Landscape,
    /// 1024x1792 portrait.
    #[serde(rename = "1024x1792")]
    Portrait,
}

impl ImageSize {
    /// Returns the API size string (e.g., "1024x1024").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Landscape => "1792x1024",
            Self::Portrait => "1024x1792",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendering quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    /// Standard quality.
    #[default]
    Standard,
    /// HD quality (finer detail, higher cost).
    Hd,
}

impl ImageQuality {
    /// Returns the API quality string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hd => "hd",
        }
    }
}

impl std::fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    /// Hyper-real, dramatic renderings.
    #[default]
    Vivid,
    /// More natural, less saturated renderings.
    Natural,
}

impl ImageStyle {
    /// Returns the API style string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vivid => "vivid",
            Self::Natural => "natural",
        }
    }
}

impl std::fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to generate an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Image size.
    pub size: ImageSize,
    /// Rendering quality.
    pub quality: ImageQuality,
    /// Rendering style.
    pub style: ImageStyle,
}

impl GenerationRequest {
    /// Creates a new request with the given prompt and default parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: ImageSize::default(),
            quality: ImageQuality::default(),
            style: ImageStyle::default(),
        }
    }

    /// Sets the image size.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    /// Sets the rendering quality.
    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Sets the rendering style.
    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = style;
        self
    }

    /// Checks that the request is well-formed.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("prompt is empty".into()));
        }
        Ok(())
    }
}

/// Pipeline phase reported through the optional progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    /// The generation request is in flight.
    Submitting,
    /// The rendered image is being downloaded.
    Downloading,
}
