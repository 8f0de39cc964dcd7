//! Store reachability probe behind `GET /test`.
//!
//! Every outcome is a value; nothing here returns an error.

use crate::config::Config;
use crate::db_storage::LeadStorage;
use crate::errors::truncate_chars;
use crate::models::DiagnosticsResponse;

/// Most collection names reported by the probe.
pub const MAX_COLLECTIONS: usize = 10;

/// Longest store error excerpt shown in the `database` field.
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProbe {
    /// Store answered a collection listing.
    ConnectedAndWorking { collections: Vec<String> },
    /// A store handle exists but the listing failed.
    ConnectedWithError(String),
    /// `DATABASE_URL` is set but no store handle could be built from it.
    Uninitialized,
    /// No store configured at all.
    NotAvailable,
}

impl StoreProbe {
    pub async fn run(storage: Option<&LeadStorage>, config: &Config) -> Self {
        let Some(storage) = storage else {
            return if config.database_url.is_some() {
                StoreProbe::Uninitialized
            } else {
                StoreProbe::NotAvailable
            };
        };

        tracing::debug!("Probing document store '{}'", storage.store().name());
        match storage.list_collections(MAX_COLLECTIONS).await {
            Ok(mut collections) => {
                collections.truncate(MAX_COLLECTIONS);
                StoreProbe::ConnectedAndWorking { collections }
            }
            Err(e) => {
                tracing::warn!("Store probe failed: {}", e);
                StoreProbe::ConnectedWithError(e.to_string())
            }
        }
    }

    pub fn database_status(&self) -> String {
        match self {
            StoreProbe::ConnectedAndWorking { .. } => "✅ Connected & Working".to_string(),
            StoreProbe::ConnectedWithError(msg) => format!(
                "⚠️  Connected but Error: {}",
                truncate_chars(msg, MAX_ERROR_CHARS)
            ),
            StoreProbe::Uninitialized => "⚠️  Available but not initialized".to_string(),
            StoreProbe::NotAvailable => "❌ Not Available".to_string(),
        }
    }

    pub fn connection_status(&self) -> &'static str {
        match self {
            StoreProbe::ConnectedAndWorking { .. } | StoreProbe::ConnectedWithError(_) => {
                "Connected"
            }
            StoreProbe::Uninitialized | StoreProbe::NotAvailable => "Not Connected",
        }
    }

    /// Renders the probe together with environment presence flags.
    pub fn into_response(self, config: &Config) -> DiagnosticsResponse {
        DiagnosticsResponse {
            backend: "✅ Running".to_string(),
            database: self.database_status(),
            database_url: presence(config.database_url.is_some()),
            database_name: presence(config.database_name.is_some()),
            connection_status: self.connection_status().to_string(),
            collections: match self {
                StoreProbe::ConnectedAndWorking { collections } => collections,
                _ => Vec::new(),
            },
        }
    }
}

fn presence(set: bool) -> String {
    let label = if set { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}
