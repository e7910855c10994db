//! Configuration types and loading.

mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

use crate::captions;
use crate::logging::LoggingConfig;
use crate::tree::walker::WalkerConfig;

/// Caption-matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionConfig {
    /// Recognized video extension, matched case-insensitively.
    #[serde(default = "default_video_extension")]
    pub video_extension: String,

    /// Caption suffix variants in probe order, most-specific first.
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,
}

fn default_video_extension() -> String {
    captions::VIDEO_EXTENSION.to_string()
}

fn default_variants() -> Vec<String> {
    captions::default_caption_variants()
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            video_extension: default_video_extension(),
            variants: default_variants(),
        }
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub walker: WalkerConfig,

    #[serde(default)]
    pub captions: CaptionConfig,
}
