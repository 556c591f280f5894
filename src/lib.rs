//! Prometheus exporter for blockchain chain metadata.
//!
//! On every scrape of the `/metrics` endpoint the exporter fetches one
//! chain-metadata snapshot from the configured node over gRPC, maps it onto
//! a fixed set of seven gauges, and renders them in Prometheus text
//! exposition format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │   Chain Node    │<────│    Collector    │<────│   HTTP Server   │
//! │  (gRPC API)     │     │ (one fetch per  │     │   (/metrics)    │
//! │                 │     │     scrape)     │     │                 │
//! └─────────────────┘     └─────────────────┘     └─────────────────┘
//! ```
//!
//! # Usage
//!
//! Run the exporter binary with a configuration file:
//!
//! ```bash
//! chainmeta-exporter --config config.json5
//! ```
//!
//! # Configuration
//!
//! See [`config::ExporterConfig`] for configuration options.

pub mod chainmeta;
pub mod client;
pub mod collector;
pub mod config;
pub mod http;
pub mod registry;

// Include the generated protobuf code
pub mod proto {
    tonic::include_proto!("chainapi");
}

pub use chainmeta::{ChainMetaSnapshot, EpochMeta};
pub use client::{FetchError, NodeClient};
pub use collector::{ChainMetaCollector, MetricSample, ScrapeError, SharedCollector};
pub use config::ExporterConfig;
pub use http::HttpServer;
pub use registry::{DescriptorRegistry, MetricDescriptor};
