use std::time::Duration;

use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use tracing::debug;

use crate::types::AnalyzerError;

/// Result of opening a connection to a venue's chain endpoint. The handle is
/// only held for the duration of one per-venue computation.
#[derive(Debug, Clone)]
pub struct VenueConnection {
    pub endpoint: String,
    pub head_block: u64,
}

/// The single boundary to live chain infrastructure. Swapped for a fake in
/// tests so refreshes never touch the network.
#[async_trait]
pub trait VenueConnector: Send + Sync {
    async fn connect(&self, endpoint: &str) -> Result<VenueConnection, AnalyzerError>;
}

/// Connects over JSON-RPC and probes the endpoint with a block-number call
/// so dead endpoints fail inside the per-venue fault boundary.
pub struct RpcVenueConnector {
    probe_timeout: Duration,
}

impl RpcVenueConnector {
    pub fn new() -> Self {
        Self {
            probe_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(probe_timeout: Duration) -> Self {
        Self { probe_timeout }
    }
}

impl Default for RpcVenueConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueConnector for RpcVenueConnector {
    async fn connect(&self, endpoint: &str) -> Result<VenueConnection, AnalyzerError> {
        let url = endpoint.parse().map_err(|e| {
            AnalyzerError::ConfigError(format!("Invalid RPC URL {}: {}", endpoint, e))
        })?;
        let provider = ProviderBuilder::new().on_http(url);

        match tokio::time::timeout(self.probe_timeout, provider.get_block_number()).await {
            Ok(Ok(head_block)) => {
                debug!("connected to {} at block {}", endpoint, head_block);
                Ok(VenueConnection {
                    endpoint: endpoint.to_string(),
                    head_block,
                })
            }
            Ok(Err(e)) => Err(AnalyzerError::ConnectionFailed {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(AnalyzerError::Timeout(endpoint.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_rejected() {
        let connector = RpcVenueConnector::new();
        let result = connector.connect("not a url").await;
        assert!(matches!(result, Err(AnalyzerError::ConfigError(_))));
    }
}
