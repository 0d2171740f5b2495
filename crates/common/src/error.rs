// crates/common/src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Input problems the caller can fix by correcting a data file
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::Serialization(_) | Error::InvalidData(_) | Error::NotFound(_)
        )
    }
}

/// Reject NaN and infinite inputs before they reach the ratio pipeline.
pub fn ensure_finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidData(format!("{} is not a finite number: {}", field, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("pe_ratio", 18.5).unwrap(), 18.5);
        assert!(matches!(ensure_finite("rsi", f64::NAN), Err(Error::InvalidData(_))));

        let err = ensure_finite("beta", f64::INFINITY).unwrap_err();
        assert!(err.to_string().contains("beta"));
        assert!(err.is_data_error());
    }
}
