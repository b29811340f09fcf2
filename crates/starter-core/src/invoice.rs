//! Invoice code fields and the verification-service invoice shape.

use serde::{Deserialize, Serialize};

use crate::decode::{decode_barcode, decode_qrcode};
use crate::error::DecodeError;

/// Fields of the 19-character one-dimensional invoice barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    /// Lottery period, `yyyMM` in ROC years (5 chars).
    pub period: String,
    /// Invoice number (10 chars).
    pub invoice_number: String,
    /// Random check number (4 chars).
    pub random_number: String,
}

/// Fields of the left-hand two-dimensional invoice QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    /// Invoice number (10 chars).
    pub invoice_number: String,
    /// Issue date, `yyyMMdd` in ROC years (7 chars).
    pub invoice_date: String,
    /// Random check number (4 chars).
    pub random_number: String,
    /// Sales amount, hex (8 chars).
    pub amount1: String,
    /// Total amount, hex (8 chars).
    pub amount2: String,
    /// Buyer business ID (8 chars).
    pub buyer_tax_id: String,
    /// Seller business ID (8 chars).
    pub seller_tax_id: String,
    /// Encrypted verification digest (24 chars).
    pub encrypted_digest: String,
}

/// Which wire format an encoded invoice string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeKind {
    Barcode,
    #[serde(rename = "QRCode")]
    QrCode,
}

impl CodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Barcode => "Barcode",
            Self::QrCode => "QRCode",
        }
    }
}

/// A decoded invoice code, tagged by the format it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncodedCode {
    Barcode(Barcode),
    #[serde(rename = "QRCode")]
    QrCode(QrCode),
}

impl EncodedCode {
    pub fn decode(kind: CodeKind, input: &str) -> Result<Self, DecodeError> {
        match kind {
            CodeKind::Barcode => decode_barcode(input).map(Self::Barcode),
            CodeKind::QrCode => decode_qrcode(input).map(Self::QrCode),
        }
    }

    pub fn kind(&self) -> CodeKind {
        match self {
            Self::Barcode(_) => CodeKind::Barcode,
            Self::QrCode(_) => CodeKind::QrCode,
        }
    }

    pub fn invoice_number(&self) -> &str {
        match self {
            Self::Barcode(b) => &b.invoice_number,
            Self::QrCode(q) => &q.invoice_number,
        }
    }
}

/// Invoice record returned by the verification service.
///
/// Every field defaults so partial responses still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    pub inv_num: String,
    /// `yyyyMMdd`
    pub inv_date: String,
    pub inv_status: String,
    pub inv_period: String,
    pub seller_name: String,
    pub seller_ban: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_address: Option<String>,
    /// `HH:mm:ss`
    pub invoice_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_ban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<InvoiceDetail>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDetail {
    pub row_num: String,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub amount: String,
}
