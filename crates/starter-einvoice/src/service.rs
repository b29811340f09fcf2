use async_trait::async_trait;
use starter_core::Invoice;
use thiserror::Error;

use crate::InvoiceQuery;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("service rejected query with code {code}: {message}")]
    Rejected { code: String, message: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// The external invoice-verification service.
#[async_trait]
pub trait InvoiceService: Send + Sync {
    async fn query(&self, query: &InvoiceQuery) -> Result<Invoice, ServiceError>;
}
