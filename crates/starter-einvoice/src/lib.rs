//! E-invoice layer: verification-service queries, dual-format lookups, and the
//! HTTP client for the Ministry of Finance e-invoice platform.

mod error;
pub mod lookup;
pub mod query;
pub mod service;

pub use error::LookupError;
pub use lookup::{MISSING_CODE, lookup_invoice_detail, lookup_invoice_header};
pub use query::{InvoiceQuery, QueryAction};
pub use service::{InvoiceService, ServiceError};

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::EInvoiceClient;
