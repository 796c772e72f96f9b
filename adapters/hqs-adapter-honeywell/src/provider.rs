//! Provider: entry point that hands out backends sharing one client.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::HoneywellBackend;
use crate::client::HoneywellClient;
use crate::error::HoneywellResult;

/// Source of [`HoneywellBackend`]s bound to one client session.
#[derive(Debug, Clone)]
pub struct HoneywellProvider {
    client: Arc<HoneywellClient>,
}

impl HoneywellProvider {
    /// Provider over an existing client.
    pub fn new(client: HoneywellClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Provider sharing an already wrapped client.
    pub fn from_shared(client: Arc<HoneywellClient>) -> Self {
        Self { client }
    }

    /// The shared client.
    pub fn client(&self) -> &Arc<HoneywellClient> {
        &self.client
    }

    /// All machines the service reports, in service order.
    ///
    /// Entries without a string `name` field are skipped.
    pub async fn backends(&self) -> HoneywellResult<Vec<HoneywellBackend>> {
        let machines = self.client.list_backends().await?;
        debug!("Service reported {} machines", machines.len());

        Ok(machines
            .iter()
            .filter_map(|m| match m.get("name").and_then(|n| n.as_str()) {
                Some(name) => Some(self.get_backend(name)),
                None => {
                    warn!("Skipping machine entry without a name: {:?}", m);
                    None
                }
            })
            .collect())
    }

    /// Backend for machine `name`, without contacting the service.
    pub fn get_backend(&self, name: &str) -> HoneywellBackend {
        HoneywellBackend::new(name, Arc::clone(&self.client))
    }
}
