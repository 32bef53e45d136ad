use thiserror::Error;

/// Contract violations detected while computing chart geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("radar needs one label per value (got {values} values, {labels} labels)")]
    LengthMismatch { values: usize, labels: usize },
    #[error("invalid chart dimension {name} = {value}")]
    InvalidDimension { name: &'static str, value: f64 },
}
