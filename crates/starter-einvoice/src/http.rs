//! HTTP client for the e-invoice platform's `InvApp` endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use starter_core::Invoice;
use tracing::info;

use crate::{InvoiceQuery, InvoiceService, ServiceError};

/// Production host of the e-invoice platform.
pub const DEFAULT_BASE_URL: &str = "https://api.einvoice.nat.gov.tw";

const INV_APP_PATH: &str = "/PB2CAPIVAN/invapp/InvApp";

/// Client for the e-invoice verification API.
pub struct EInvoiceClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
}

/// Status envelope the platform wraps around every response.
#[derive(Deserialize)]
struct Status {
    code: Option<serde_json::Value>,
    msg: Option<String>,
}

impl EInvoiceClient {
    /// Create a client for `base_url` (no trailing slash needed) and application ID.
    pub fn new(base_url: String, app_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, INV_APP_PATH)
    }
}

#[async_trait]
impl InvoiceService for EInvoiceClient {
    async fn query(&self, query: &InvoiceQuery) -> Result<Invoice, ServiceError> {
        let url = self.endpoint();
        let mut params: Vec<(&str, &str)> = query
            .params()
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();
        params.push(("appID", self.app_id.as_str()));

        info!(
            url = %url,
            action = query.action().as_str(),
            kind = query.kind().as_str(),
            "querying e-invoice platform"
        );
        let resp = self.client.post(&url).query(&params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = resp.json().await?;
        check_status(&body)?;
        let invoice: Invoice = serde_json::from_value(body)?;
        info!(inv_num = %invoice.inv_num, "invoice received");
        Ok(invoice)
    }
}

/// Reject payloads whose `code` is present and not 200.
fn check_status(body: &serde_json::Value) -> Result<(), ServiceError> {
    let status = Status::deserialize(body)?;
    let code = match status.code {
        None => return Ok(()),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    };
    if code == "200" {
        return Ok(());
    }
    Err(ServiceError::Rejected {
        code,
        message: status.msg.unwrap_or_default(),
    })
}
