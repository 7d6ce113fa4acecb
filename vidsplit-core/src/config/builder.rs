//! Builder pattern for [`CoreConfig`].

use std::path::PathBuf;

use super::CoreConfig;

/// Builder for creating [`CoreConfig`] instances.
///
/// # Examples
///
/// ```rust
/// use vidsplit_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .boundary_trim_secs(0.2)
///     .temp_dir(PathBuf::from("/tmp/vidsplit"))
///     .build();
/// assert_eq!(config.boundary_trim_secs, 0.2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds trimmed from the end of every exported segment.
    pub fn boundary_trim_secs(mut self, secs: f64) -> Self {
        self.config.boundary_trim_secs = secs;
        self
    }

    /// Normalization target frame.
    pub fn target_frame(mut self, width: u32, height: u32) -> Self {
        self.config.target_width = width;
        self.config.target_height = height;
        self
    }

    pub fn video_codec(mut self, codec: &str) -> Self {
        self.config.video_codec = codec.to_string();
        self
    }

    pub fn audio_codec(mut self, codec: &str) -> Self {
        self.config.audio_codec = codec.to_string();
        self
    }

    pub fn pixel_format(mut self, format: &str) -> Self {
        self.config.pixel_format = format.to_string();
        self
    }

    pub fn encoder_preset(mut self, preset: &str) -> Self {
        self.config.encoder_preset = preset.to_string();
        self
    }

    pub fn container(mut self, container: &str) -> Self {
        self.config.container = container.to_string();
        self
    }

    pub fn temp_dir(mut self, dir: PathBuf) -> Self {
        self.config.temp_dir = Some(dir);
        self
    }

    pub fn build(self) -> CoreConfig {
        self.config
    }
}
