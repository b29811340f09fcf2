use starter_core::DecodeError;
use thiserror::Error;

use crate::ServiceError;

/// Failure of an invoice lookup.
///
/// `Validation` and `Decode` reject malformed input before any service call;
/// `Upstream` wraps a failed service call. When a QR code attempt fails and
/// the barcode fallback fails too, the discarded QR error rides along in
/// `suppressed`.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    Validation(String),

    #[error("{source}")]
    Decode {
        source: DecodeError,
        suppressed: Option<Box<LookupError>>,
    },

    #[error("invoice service failed: {source}")]
    Upstream {
        source: ServiceError,
        suppressed: Option<Box<LookupError>>,
    },
}

impl LookupError {
    pub fn upstream(source: ServiceError) -> Self {
        Self::Upstream {
            source,
            suppressed: None,
        }
    }

    /// True for malformed input (no service call was made for it).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Decode { .. })
    }

    /// The earlier attempt's error discarded by the fallback, if any.
    pub fn suppressed(&self) -> Option<&LookupError> {
        match self {
            Self::Validation(_) => None,
            Self::Decode { suppressed, .. } | Self::Upstream { suppressed, .. } => {
                suppressed.as_deref()
            }
        }
    }

    pub(crate) fn with_suppressed(self, earlier: LookupError) -> Self {
        match self {
            Self::Validation(_) => self,
            Self::Decode { source, .. } => Self::Decode {
                source,
                suppressed: Some(Box::new(earlier)),
            },
            Self::Upstream { source, .. } => Self::Upstream {
                source,
                suppressed: Some(Box::new(earlier)),
            },
        }
    }
}

impl From<DecodeError> for LookupError {
    fn from(source: DecodeError) -> Self {
        Self::Decode {
            source,
            suppressed: None,
        }
    }
}
