use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Formato no soportado. Usa CSV o Excel.";
pub const TOO_SMALL_MESSAGE: &str = "La tabla resultante es muy pequeña. Asegúrate de incluir solo datos numéricos o que la limpieza no haya borrado todo.";
pub const NEGATIVE_VALUE_MESSAGE: &str = "La prueba Chi-Cuadrada no acepta números negativos.";
pub const MISSING_FILE_MESSAGE: &str = "Falta el archivo en el campo 'file'.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    /// Upload extension is not one of `.csv`, `.xlsx`, `.xls`.
    UnsupportedFormat,
    /// Fewer than 2 rows or 2 columns survived cleaning.
    TooSmall,
    /// A cleaned cell holds a negative count.
    NegativeValue,
    /// The independence test rejected the matrix.
    Computation(String),
    /// The uploaded bytes could not be read as a table.
    Decode(String),
    PayloadTooLarge(usize),
    MissingFile,
    /// Malformed request body (bad JSON, broken multipart framing)
    InvalidRequest(String),
    Config(String),
    Internal(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::UnsupportedFormat => f.write_str(UNSUPPORTED_FORMAT_MESSAGE),
            AppError::TooSmall => f.write_str(TOO_SMALL_MESSAGE),
            AppError::NegativeValue => f.write_str(NEGATIVE_VALUE_MESSAGE),
            AppError::Computation(msg) => f.write_str(msg),
            AppError::Decode(msg) => write!(f, "Decode error: {}", msg),
            AppError::PayloadTooLarge(limit) => write!(
                f,
                "El archivo supera el tamaño máximo permitido ({} bytes).",
                limit
            ),
            AppError::MissingFile => f.write_str(MISSING_FILE_MESSAGE),
            AppError::InvalidRequest(msg) => f.write_str(msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl AppError {
    /// Errors caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::UnsupportedFormat
                | AppError::TooSmall
                | AppError::NegativeValue
                | AppError::Computation(_)
                | AppError::PayloadTooLarge(_)
                | AppError::MissingFile
                | AppError::InvalidRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            AppError::UnsupportedFormat.to_string(),
            "Formato no soportado. Usa CSV o Excel."
        );
        assert_eq!(
            AppError::NegativeValue.to_string(),
            "La prueba Chi-Cuadrada no acepta números negativos."
        );
        assert!(AppError::TooSmall.to_string().starts_with("La tabla resultante es muy pequeña"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AppError::TooSmall.is_client_error());
        assert!(AppError::Computation("bad".into()).is_client_error());
        assert!(!AppError::Decode("broken".into()).is_client_error());
        assert!(!AppError::Internal("boom".into()).is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(err, AppError::IoError("disk".to_string()));
    }
}
