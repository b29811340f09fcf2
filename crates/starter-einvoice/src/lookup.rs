//! Invoice lookups from a scanned barcode and/or QR code.
//!
//! When both codes are supplied the QR code is tried first, since it carries
//! the richer query. Any failure on that path (bad length or a failed service
//! call) falls back to the barcode. A single supplied code is used alone.

use starter_core::{Invoice, decode_barcode, decode_qrcode};
use tracing::{info, warn};

use crate::{InvoiceQuery, InvoiceService, LookupError, QueryAction};

pub const MISSING_CODE: &str = "Provide at least one of barcode or qrcode.";

/// Look up an invoice header.
pub async fn lookup_invoice_header<S: InvoiceService + ?Sized>(
    service: &S,
    barcode: Option<&str>,
    qrcode: Option<&str>,
) -> Result<Invoice, LookupError> {
    lookup(service, QueryAction::Header, barcode, qrcode).await
}

/// Look up an invoice with its line items.
pub async fn lookup_invoice_detail<S: InvoiceService + ?Sized>(
    service: &S,
    barcode: Option<&str>,
    qrcode: Option<&str>,
) -> Result<Invoice, LookupError> {
    lookup(service, QueryAction::Detail, barcode, qrcode).await
}

async fn lookup<S: InvoiceService + ?Sized>(
    service: &S,
    action: QueryAction,
    barcode: Option<&str>,
    qrcode: Option<&str>,
) -> Result<Invoice, LookupError> {
    // Empty strings count as absent.
    let barcode = barcode.filter(|s| !s.is_empty());
    let qrcode = qrcode.filter(|s| !s.is_empty());
    info!(
        action = action.as_str(),
        barcode = barcode.is_some(),
        qrcode = qrcode.is_some(),
        "invoice lookup"
    );

    match (barcode, qrcode) {
        (Some(barcode), Some(qrcode)) => match by_qrcode(service, action, qrcode).await {
            Ok(invoice) => Ok(invoice),
            Err(qr_err) => {
                warn!(error = %qr_err, "QR code lookup failed, falling back to barcode");
                by_barcode(service, action, barcode)
                    .await
                    .map_err(|e| e.with_suppressed(qr_err))
            }
        },
        (None, Some(qrcode)) => by_qrcode(service, action, qrcode).await,
        (Some(barcode), None) => by_barcode(service, action, barcode).await,
        (None, None) => Err(LookupError::Validation(MISSING_CODE.to_string())),
    }
}

async fn by_barcode<S: InvoiceService + ?Sized>(
    service: &S,
    action: QueryAction,
    input: &str,
) -> Result<Invoice, LookupError> {
    let code = decode_barcode(input)?;
    let query = match action {
        QueryAction::Header => InvoiceQuery::header_from_barcode(&code),
        QueryAction::Detail => InvoiceQuery::detail_from_barcode(&code),
    };
    service.query(&query).await.map_err(LookupError::upstream)
}

async fn by_qrcode<S: InvoiceService + ?Sized>(
    service: &S,
    action: QueryAction,
    input: &str,
) -> Result<Invoice, LookupError> {
    let code = decode_qrcode(input)?;
    let query = match action {
        QueryAction::Header => InvoiceQuery::header_from_qrcode(&code),
        QueryAction::Detail => InvoiceQuery::detail_from_qrcode(&code),
    };
    service.query(&query).await.map_err(LookupError::upstream)
}
