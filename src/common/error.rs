//! Error types for warehouse_nav

use thiserror::Error;

/// Main error type for warehouse navigation
#[derive(Debug, Error)]
pub enum NavError {
    /// Invalid parameter (grid bounds, cell size, speeds)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Layout configuration could not be parsed or is inconsistent
    #[error("Config error: {0}")]
    Config(String),
    /// Product id not present in the layout
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    /// Rack id not present in the layout
    #[error("Unknown rack: {0}")]
    UnknownRack(String),
    /// gnuplot failed to render or save a figure
    #[error("Plot error: {0}")]
    Plot(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for navigation operations
pub type NavResult<T> = Result<T, NavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavError::UnknownProduct("SKU-999".to_string());
        assert_eq!(format!("{}", err), "Unknown product: SKU-999");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NavError = io_err.into();
        assert!(matches!(err, NavError::Io(_)));
    }
}
