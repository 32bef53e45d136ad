//! Public types for the rendering module.

/// Options shared by the bar and radar renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Locale tag for number labels (`"en"`, `"de"`, ...).
    pub locale: String,
    /// Decimals printed on bar values and grid labels.
    pub decimals: usize,
    /// Text drawn across the chart, e.g. when the source data was empty.
    pub overlay: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            decimals: 1,
            overlay: None,
        }
    }
}

/// Text shown in place of a bar chart with no buckets.
pub const NO_DATA_TEXT: &str = "No data";
