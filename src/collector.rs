//! Collector: one fetch per scrape, mapped onto the fixed descriptor set.

use std::io::Write;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::chainmeta::ChainMetaSnapshot;
use crate::client::{FetchError, NodeClient};
use crate::registry::{DescriptorRegistry, LABEL_ENDPOINT, MetricDescriptor};

/// A scrape failed because the underlying fetch failed. The hosting
/// process keeps serving; a failed scrape emits no samples at all.
#[derive(Debug, Error)]
#[error("scrape of {endpoint} failed: {source}")]
pub struct ScrapeError {
    /// The endpoint the scrape targeted.
    pub endpoint: String,
    /// The fetch failure behind the scrape failure.
    #[source]
    pub source: FetchError,
}

/// One emitted metric value.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    /// Fully qualified metric name.
    pub name: String,
    /// Sample value.
    pub value: f64,
    /// Value of the `endpoint` label.
    pub endpoint: String,
}

/// Snapshot fields in descriptor order.
///
/// This is the whole field→metric mapping: integers widened to `f64`
/// (chain heights and epoch numbers are far below 2^53, so exactly),
/// `tps_float` passed through unchanged.
pub fn snapshot_values(snapshot: &ChainMetaSnapshot) -> [f64; 7] {
    [
        snapshot.height as f64,
        snapshot.num_actions as f64,
        snapshot.tps as f64,
        snapshot.epoch.num as f64,
        snapshot.epoch.height as f64,
        snapshot.epoch.gravity_chain_start_height as f64,
        snapshot.tps_float,
    ]
}

/// Collector for chain-metadata gauges.
///
/// Holds only immutable state (the descriptor registry and the client
/// configuration), so concurrent scrapes need no locking and share no
/// fetch state.
pub struct ChainMetaCollector {
    registry: DescriptorRegistry,
    client: NodeClient,
}

/// Shareable collector handle for the HTTP layer.
pub type SharedCollector = Arc<ChainMetaCollector>;

impl ChainMetaCollector {
    /// Create a collector over a descriptor registry and node client.
    pub fn new(registry: DescriptorRegistry, client: NodeClient) -> Self {
        Self { registry, client }
    }

    /// The fixed descriptor set. Never touches the network.
    pub fn describe(&self) -> &[MetricDescriptor] {
        self.registry.descriptors()
    }

    /// Perform one fetch and map the snapshot onto the seven descriptors.
    ///
    /// Every sample of a successful scrape originates from the single
    /// snapshot fetched here; a failed fetch yields a [`ScrapeError`] and
    /// no samples.
    pub async fn collect(&self) -> Result<Vec<MetricSample>, ScrapeError> {
        let snapshot =
            self.client
                .fetch_chain_meta()
                .await
                .map_err(|source| ScrapeError {
                    endpoint: self.client.endpoint().to_string(),
                    source,
                })?;

        let samples = self.samples_from_snapshot(&snapshot);
        debug!(
            endpoint = %self.client.endpoint(),
            height = snapshot.height,
            "Collected chain metadata samples"
        );
        Ok(samples)
    }

    /// Pure mapping from one snapshot to the seven samples.
    pub fn samples_from_snapshot(&self, snapshot: &ChainMetaSnapshot) -> Vec<MetricSample> {
        let endpoint = self.client.endpoint();

        self.registry
            .descriptors()
            .iter()
            .zip(snapshot_values(snapshot))
            .map(|(descriptor, value)| MetricSample {
                name: descriptor.fq_name.clone(),
                value,
                endpoint: endpoint.to_string(),
            })
            .collect()
    }

    /// Render samples in Prometheus text exposition format.
    ///
    /// All seven metrics are gauges; HELP and TYPE lines come from the
    /// descriptor registry.
    pub fn render(&self, samples: &[MetricSample]) -> String {
        let mut output = Vec::with_capacity(samples.len() * 100);

        for (descriptor, sample) in self.registry.descriptors().iter().zip(samples) {
            writeln!(output, "# HELP {} {}", descriptor.fq_name, descriptor.help).ok();
            writeln!(output, "# TYPE {} gauge", descriptor.fq_name).ok();
            writeln!(
                output,
                "{}{{{}=\"{}\"}} {}",
                sample.name,
                LABEL_ENDPOINT,
                escape_label_value(&sample.endpoint),
                format_value(sample.value)
            )
            .ok();
        }

        String::from_utf8(output).unwrap_or_default()
    }
}

/// Escape special characters in label values.
fn escape_label_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a floating point value for Prometheus.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
