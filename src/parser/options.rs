//! Parsing options and configuration.

use crate::model::StyleDefaults;
use std::time::Duration;

/// Default font family.
pub const DEFAULT_FONT_NAME: &str = "Calibri";

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: u32 = 11;

/// Options shared by all parsers.
///
/// Passed explicitly to every entry point; nothing here is global.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Font family for text without an explicit override
    pub default_font: String,

    /// Font size for text without an explicit override
    pub default_size: u32,

    /// CSS class that marks one slide's subtree in slide markup
    pub slide_marker_class: String,

    /// Upper bound for a single remote image download
    pub image_timeout: Duration,

    /// Whether batch conversion may use parallel processing
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default font family.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.default_font = name.into();
        self
    }

    /// Set the default font size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.default_size = size;
        self
    }

    /// Set the slide marker class.
    pub fn with_slide_marker(mut self, class: impl Into<String>) -> Self {
        self.slide_marker_class = class.into();
        self
    }

    /// Set the remote image timeout.
    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// The default style derived from these options.
    pub fn style(&self) -> StyleDefaults {
        StyleDefaults::new(self.default_font.clone(), self.default_size)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_font: DEFAULT_FONT_NAME.to_string(),
            default_size: DEFAULT_FONT_SIZE,
            slide_marker_class: "slide".to_string(),
            image_timeout: Duration::from_secs(10),
            parallel: true,
        }
    }
}
