mod settings;

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use starter_core::{CodeKind, EmployeeConnection, EncodedCode, ProbabilityGroup, select_employees};
use starter_einvoice::{LookupError, lookup_invoice_detail, lookup_invoice_header};
use starter_store::{download_probabilities, list_configurations};
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "starter", version, about = "Employee draws, invoice lookups and configuration listings")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw weighted random employees from a configuration version's catalog.
    Select {
        #[arg(long)]
        version: String,
        #[arg(long, default_value_t = 1)]
        limit: usize,
        #[arg(long, value_enum, default_value_t = Group::GoldCoin)]
        group: Group,
        /// Seed for a reproducible draw.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decode an invoice code into its fields.
    Decode {
        #[arg(value_enum)]
        kind: Kind,
        code: String,
    },
    /// Look up an invoice on the e-invoice platform.
    Invoice {
        #[arg(value_enum)]
        action: Action,
        #[arg(long)]
        barcode: Option<String>,
        #[arg(long)]
        qrcode: Option<String>,
    },
    /// List the files of a configuration version with download URLs.
    Configurations {
        #[arg(long)]
        version: String,
        /// Presigned URL lifetime in seconds.
        #[arg(long, default_value_t = 60)]
        expires_in: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Group {
    GoldCoin,
    IsCoin,
}

impl From<Group> for ProbabilityGroup {
    fn from(group: Group) -> Self {
        match group {
            Group::GoldCoin => ProbabilityGroup::GoldCoin,
            Group::IsCoin => ProbabilityGroup::IsCoin,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Barcode,
    Qrcode,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Header,
    Detail,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("starter v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Select {
            version,
            limit,
            group,
            seed,
        } => {
            let group = ProbabilityGroup::from(group);
            let store = cli.settings.open_store().await?;
            let catalog = download_probabilities(store.as_ref(), &version, group)
                .await
                .with_context(|| format!("loading catalog for version {version}"))?;

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let items = select_employees(&catalog, limit, group, &mut rng);
            print_json(&EmployeeConnection { items, version })
        }
        Command::Decode { kind, code } => {
            let kind = match kind {
                Kind::Barcode => CodeKind::Barcode,
                Kind::Qrcode => CodeKind::QrCode,
            };
            let decoded = EncodedCode::decode(kind, &code)?;
            print_json(&decoded)
        }
        Command::Invoice {
            action,
            barcode,
            qrcode,
        } => {
            let client = cli.settings.einvoice_client();
            let result = match action {
                Action::Header => {
                    lookup_invoice_header(&client, barcode.as_deref(), qrcode.as_deref()).await
                }
                Action::Detail => {
                    lookup_invoice_detail(&client, barcode.as_deref(), qrcode.as_deref()).await
                }
            };
            let invoice = result.inspect_err(log_suppressed)?;
            print_json(&invoice)
        }
        Command::Configurations {
            version,
            expires_in,
        } => {
            let store = cli.settings.open_store().await?;
            let listing =
                list_configurations(store.as_ref(), &version, Duration::from_secs(expires_in))
                    .await
                    .with_context(|| format!("listing configurations for version {version}"))?;
            print_json(&listing)
        }
    }
}

fn log_suppressed(err: &LookupError) {
    if let Some(earlier) = err.suppressed() {
        tracing::warn!(error = %earlier, "earlier QR code attempt also failed");
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
