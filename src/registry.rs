use std::collections::HashSet;

use crate::types::{AnalyzerError, VenueConfig};

/// Ordered, read-only catalog of DEX venues. Duplicate names are a
/// configuration error and fail at load rather than silently shadowing.
#[derive(Debug, Clone)]
pub struct VenueRegistry {
    venues: Vec<VenueConfig>,
}

impl VenueRegistry {
    pub fn new(venues: Vec<VenueConfig>) -> Result<Self, AnalyzerError> {
        let mut seen = HashSet::new();
        for venue in &venues {
            if !seen.insert(venue.name.clone()) {
                return Err(AnalyzerError::ConfigError(format!(
                    "duplicate venue name in registry: {}",
                    venue.name
                )));
            }
        }
        Ok(Self { venues })
    }

    /// Built-in mainnet catalog. RPC endpoints can be overridden per chain
    /// through environment variables.
    pub fn mainnet() -> Result<Self, AnalyzerError> {
        let bsc_rpc = std::env::var("BSC_RPC_URL")
            .unwrap_or_else(|_| "https://bsc-dataseed1.binance.org".to_string());
        let eth_rpc = std::env::var("ETHEREUM_RPC_URL")
            .unwrap_or_else(|_| "https://cloudflare-eth.com".to_string());

        Self::new(vec![
            VenueConfig {
                name: "PancakeSwap".to_string(),
                router_address: "0x10ED43C718714eb63d5aA57B78B54704E256024E".to_string(),
                factory_address: "0xcA143Ce32Fe78f1f7019d7d551a6402fC5350c73".to_string(),
                endpoint: bsc_rpc.clone(),
                chain_id: 56,
                active: true,
            },
            VenueConfig {
                name: "Biswap".to_string(),
                router_address: "0x3a6d8cA21D1CF76F653A67577FA0D27453350dD8".to_string(),
                factory_address: "0x858E3312ed3A876947EA49d572A7C42DE08af7EE".to_string(),
                endpoint: bsc_rpc.clone(),
                chain_id: 56,
                active: true,
            },
            VenueConfig {
                name: "ApeSwap".to_string(),
                router_address: "0xcF0feBd3f17CEf5b47b0cD257aCf6025c5BFf3b7".to_string(),
                factory_address: "0x0841BD0B734E4F5853f0dD8d7Ea041c241fb0Da6".to_string(),
                endpoint: bsc_rpc.clone(),
                chain_id: 56,
                active: true,
            },
            VenueConfig {
                name: "BakerySwap".to_string(),
                router_address: "0xCDe540d7eAFE93aC5fE6233Bee57E1270D3E330F".to_string(),
                factory_address: "0x01bF7C66c6BD861915CdaaE475042d3c4BaE16A7".to_string(),
                endpoint: bsc_rpc.clone(),
                chain_id: 56,
                active: true,
            },
            VenueConfig {
                name: "Uniswap".to_string(),
                router_address: "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D".to_string(),
                factory_address: "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f".to_string(),
                endpoint: eth_rpc,
                chain_id: 1,
                active: true,
            },
            // Delisted pending liquidity migration, kept for the record.
            VenueConfig {
                name: "MDEX".to_string(),
                router_address: "0x7DAe51BD3E3376B8c7c4900E9107f12Be3AF1bA8".to_string(),
                factory_address: "0x3CD1C46068dAEa5Ebb0d3f55F6915B10648062B8".to_string(),
                endpoint: bsc_rpc,
                chain_id: 56,
                active: false,
            },
        ])
    }

    pub fn venues(&self) -> &[VenueConfig] {
        &self.venues
    }

    /// Point lookup by venue name, active or not.
    pub fn get(&self, name: &str) -> Result<&VenueConfig, AnalyzerError> {
        self.venues
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| AnalyzerError::VenueNotFound(name.to_string()))
    }

    /// Venues eligible for analysis and rotation.
    pub fn active_venues(&self) -> Vec<VenueConfig> {
        self.venues.iter().filter(|v| v.active).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(name: &str, active: bool) -> VenueConfig {
        VenueConfig {
            name: name.to_string(),
            router_address: "0x0000000000000000000000000000000000000001".to_string(),
            factory_address: "0x0000000000000000000000000000000000000002".to_string(),
            endpoint: "https://rpc.example.org".to_string(),
            chain_id: 56,
            active,
        }
    }

    #[test]
    fn test_duplicate_names_fail_fast() {
        let result = VenueRegistry::new(vec![venue("PancakeSwap", true), venue("PancakeSwap", true)]);
        assert!(matches!(result, Err(AnalyzerError::ConfigError(_))));
    }

    #[test]
    fn test_active_filtering() {
        let registry =
            VenueRegistry::new(vec![venue("A", true), venue("B", false), venue("C", true)])
                .unwrap();
        let active = registry.active_venues();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|v| v.active));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_point_lookup() {
        let registry = VenueRegistry::new(vec![venue("A", true), venue("B", false)]).unwrap();
        assert_eq!(registry.get("B").unwrap().name, "B");
        assert!(matches!(
            registry.get("Z"),
            Err(AnalyzerError::VenueNotFound(_))
        ));
    }

    #[test]
    fn test_mainnet_catalog() {
        let registry = VenueRegistry::mainnet().unwrap();
        assert!(!registry.is_empty());
        // Catalog must carry at least one inactive venue and one non-BSC venue
        assert!(registry.venues().iter().any(|v| !v.active));
        assert!(registry.active_venues().iter().any(|v| v.chain_id != 56));
    }
}
