//! Error types for the removable bloom filter

use thiserror::Error;

/// Errors that can occur while building or querying a filter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A construction parameter is outside its valid domain.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A computed bit position or hash index fell outside its valid
    /// range, or a base hash could not be computed.  This always
    /// indicates a defect in the hash family.
    #[error("Internal error: {detail}")]
    InternalError { detail: String },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Error {
        Error::InvalidParameter { name, reason: reason.into() }
    }

    /// `what` names the quantity, e.g. "bit position" or "hash index".
    pub(crate) fn out_of_range(what: &'static str, value: u64, bound: u64) -> Error {
        tracing::error!(what, value, bound, "value out of range");
        Error::InternalError {
            detail: format!("{} {} out of range [0, {})", what, value, bound),
        }
    }

    pub(crate) fn internal(detail: impl Into<String>) -> Error {
        let detail = detail.into();
        tracing::error!(%detail, "internal error");
        Error::InternalError { detail }
    }
}

/// Result alias used throughout this crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display() {
        let e = Error::invalid("p", "must be in (0,1), got 1.5");
        assert_eq!(e.to_string(), "Invalid parameter `p`: must be in (0,1), got 1.5");
        let e = Error::out_of_range("bit position", 50, 48);
        assert_eq!(e.to_string(), "Internal error: bit position 50 out of range [0, 48)");
        let e = Error::out_of_range("hash index", 3, 3);
        assert_eq!(e.to_string(), "Internal error: hash index 3 out of range [0, 3)");
        let e = Error::internal("murmur3 failed: early eof");
        assert_eq!(e.to_string(), "Internal error: murmur3 failed: early eof");
    }
}
