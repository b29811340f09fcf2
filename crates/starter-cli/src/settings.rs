//! Runtime settings shared by every subcommand: flags with environment fallbacks.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use starter_einvoice::EInvoiceClient;
use starter_einvoice::http::DEFAULT_BASE_URL;
use starter_store::{LocalStore, ObjectStore, S3Store};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Serve objects from a local directory instead of S3.
    #[arg(long, env = "STARTER_STORE_DIR", global = true)]
    pub store_dir: Option<PathBuf>,

    /// S3 bucket holding the configuration files.
    #[arg(long, env = "BUCKET_NAME", global = true)]
    pub bucket: Option<String>,

    #[arg(long, env = "AWS_REGION", global = true)]
    pub region: Option<String>,

    /// Base URL of the e-invoice platform.
    #[arg(long, env = "EINVOICE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub einvoice_url: String,

    #[arg(long, env = "EINVOICE_APP_ID", default_value = "", global = true)]
    pub einvoice_app_id: String,
}

impl Settings {
    /// Open the configured object store. A local directory wins over a bucket.
    pub async fn open_store(&self) -> anyhow::Result<Box<dyn ObjectStore>> {
        if let Some(dir) = &self.store_dir {
            info!(dir = %dir.display(), "using local object store");
            let store = LocalStore::open(dir)
                .with_context(|| format!("opening local store at {}", dir.display()))?;
            return Ok(Box::new(store));
        }

        if let Some(bucket) = &self.bucket {
            let region = self.region.as_deref().unwrap_or_default();
            info!(bucket = %bucket, region, "using s3 object store");
            let store = S3Store::connect(region, bucket)
                .await
                .context("connecting to s3")?;
            return Ok(Box::new(store));
        }

        bail!("no object store configured: pass --store-dir or --bucket (BUCKET_NAME)")
    }

    pub fn einvoice_client(&self) -> EInvoiceClient {
        EInvoiceClient::new(self.einvoice_url.clone(), self.einvoice_app_id.clone())
    }
}
