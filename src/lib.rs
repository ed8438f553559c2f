pub mod analyzer;
pub mod api;
pub mod connector;
pub mod registry;
pub mod scheduler;
pub mod scoring;
pub mod store;
pub mod types;

pub use analyzer::{AnalyzerConfig, DexAnalyzer};
pub use connector::{RpcVenueConnector, VenueConnection, VenueConnector};
pub use registry::VenueRegistry;
pub use scheduler::RefreshScheduler;
pub use store::AnalysisStore;
pub use types::{AnalysisRecord, AnalyzerError, VenueConfig};
