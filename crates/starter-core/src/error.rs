use thiserror::Error;

/// Malformed invoice code input. Raised before any field is extracted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Barcode length should be 19 characters.")]
    BarcodeLength { actual: usize },

    #[error("QR code length should be at least 77 characters.")]
    QrCodeLength { actual: usize },
}
