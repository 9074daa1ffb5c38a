use crate::shape::ShapeKind;

/// Malformed input detected before any geometry is checked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("boundary {dimension} must be strictly positive, got {value}")]
    InvalidBoundary { dimension: &'static str, value: f64 },
    #[error("shape \"{id}\": {dimension} must be strictly positive, got {value}")]
    InvalidDimension {
        id: String,
        dimension: &'static str,
        value: f64,
    },
    #[error("shape \"{id}\": center must be finite, got ({x}, {y})")]
    NonFiniteCenter { id: String, x: f64, y: f64 },
    #[error("{kind} #{index} has an empty id")]
    EmptyId { kind: ShapeKind, index: usize },
    #[error("shape id \"{id}\" is used more than once")]
    DuplicateId { id: String },
    #[error("grid cell size must be strictly positive and finite, got {value}")]
    InvalidCellSize { value: f64 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
