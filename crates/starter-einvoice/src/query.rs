//! Verification-service query parameters, one builder per format and action.

use serde::Serialize;
use starter_core::{Barcode, CodeKind, QrCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QueryAction {
    #[serde(rename = "qryInvHeader")]
    Header,
    #[serde(rename = "qryInvDetail")]
    Detail,
}

impl QueryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "qryInvHeader",
            Self::Detail => "qryInvDetail",
        }
    }

    fn api_version(&self) -> &'static str {
        match self {
            Self::Header => "0.5",
            Self::Detail => "0.6",
        }
    }
}

/// A normalized request to the verification service.
///
/// Parameters keep the order the platform documents. The application ID is
/// not part of the query; the client appends its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceQuery {
    kind: CodeKind,
    action: QueryAction,
    params: Vec<(&'static str, String)>,
}

impl InvoiceQuery {
    fn base(kind: CodeKind, action: QueryAction) -> Self {
        let params = vec![
            ("version", action.api_version().to_string()),
            ("type", kind.as_str().to_string()),
            ("action", action.as_str().to_string()),
        ];
        Self {
            kind,
            action,
            params,
        }
    }

    fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    pub fn header_from_barcode(code: &Barcode) -> Self {
        Self::base(CodeKind::Barcode, QueryAction::Header)
            .with("invNum", &code.invoice_number)
            .with("generation", "V2")
            .with("UUID", "")
    }

    pub fn header_from_qrcode(code: &QrCode) -> Self {
        Self::base(CodeKind::QrCode, QueryAction::Header)
            .with("invNum", &code.invoice_number)
            .with("generation", "V2")
            .with("UUID", "")
    }

    pub fn detail_from_barcode(code: &Barcode) -> Self {
        Self::base(CodeKind::Barcode, QueryAction::Detail)
            .with("invNum", &code.invoice_number)
            .with("generation", "V2")
            .with("invTerm", &code.period)
            .with("UUID", "")
            .with("randomNumber", &code.random_number)
    }

    pub fn detail_from_qrcode(code: &QrCode) -> Self {
        Self::base(CodeKind::QrCode, QueryAction::Detail)
            .with("invNum", &code.invoice_number)
            .with("generation", "V2")
            .with("invDate", &code.invoice_date)
            .with("encrypt", &code.encrypted_digest)
            .with("sellerID", &code.seller_tax_id)
            .with("UUID", "")
    }

    pub fn kind(&self) -> CodeKind {
        self.kind
    }

    pub fn action(&self) -> QueryAction {
        self.action
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Value of a single parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}
