//! Static registry of the exported metric descriptors.

/// Label attached to every sample: the configured node endpoint.
pub const LABEL_ENDPOINT: &str = "endpoint";

/// The label schema shared by all descriptors.
pub const LABELS: &[&str] = &[LABEL_ENDPOINT];

pub const HEIGHT: &str = "height";
pub const NUM_ACTIONS: &str = "num_actions";
pub const TPS: &str = "tps";
pub const EPOCH_NUM: &str = "epoch_num";
pub const EPOCH_HEIGHT: &str = "epoch_height";
pub const EPOCH_GRAVITY_CHAIN_START_HEIGHT: &str = "epoch_gravity_chain_start_height";
pub const TPS_FLOAT: &str = "tps_float";

/// Static metadata for one exported gauge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDescriptor {
    /// Bare metric name, without the namespace.
    pub name: &'static str,

    /// Fully qualified name, `{namespace}_{name}`.
    pub fq_name: String,

    /// Help text for the exposition format.
    pub help: String,

    /// Label names; exactly `["endpoint"]` for every descriptor.
    pub label_names: &'static [&'static str],
}

impl MetricDescriptor {
    fn new(namespace: &str, name: &'static str, field: &str) -> Self {
        Self {
            name,
            fq_name: format!("{}_{}", namespace, name),
            help: format!("Gauge for chain metadata {}", field),
            label_names: LABELS,
        }
    }
}

/// The fixed set of seven descriptors, built once at startup and never
/// mutated. Repeated calls to [`descriptors`](DescriptorRegistry::descriptors)
/// return the same ordered slice and touch no live data.
#[derive(Debug, Clone)]
pub struct DescriptorRegistry {
    descriptors: Vec<MetricDescriptor>,
}

impl DescriptorRegistry {
    /// Build the registry for a metric namespace.
    ///
    /// The order here is the order samples are emitted in and must stay
    /// aligned with [`crate::collector::snapshot_values`].
    pub fn new(namespace: &str) -> Self {
        let descriptors = vec![
            MetricDescriptor::new(namespace, HEIGHT, "Height"),
            MetricDescriptor::new(namespace, NUM_ACTIONS, "NumActions"),
            MetricDescriptor::new(namespace, TPS, "Tps"),
            MetricDescriptor::new(namespace, EPOCH_NUM, "EpochNum"),
            MetricDescriptor::new(namespace, EPOCH_HEIGHT, "EpochHeight"),
            MetricDescriptor::new(
                namespace,
                EPOCH_GRAVITY_CHAIN_START_HEIGHT,
                "EpochGravityChainStartHeight",
            ),
            MetricDescriptor::new(namespace, TPS_FLOAT, "TpsFloat"),
        ];

        Self { descriptors }
    }

    /// The ordered descriptor set.
    pub fn descriptors(&self) -> &[MetricDescriptor] {
        &self.descriptors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_seven_descriptors() {
        let registry = DescriptorRegistry::new("chainmeta");
        assert_eq!(registry.descriptors().len(), 7);
    }

    #[test]
    fn test_descriptor_names_and_order() {
        let registry = DescriptorRegistry::new("chainmeta");
        let names: Vec<&str> = registry.descriptors().iter().map(|d| d.name).collect();

        assert_eq!(
            names,
            vec![
                "height",
                "num_actions",
                "tps",
                "epoch_num",
                "epoch_height",
                "epoch_gravity_chain_start_height",
                "tps_float",
            ]
        );
    }

    #[test]
    fn test_fq_names_carry_namespace() {
        let registry = DescriptorRegistry::new("mychain");

        assert_eq!(registry.descriptors()[0].fq_name, "mychain_height");
        assert_eq!(
            registry.descriptors()[5].fq_name,
            "mychain_epoch_gravity_chain_start_height"
        );
    }

    #[test]
    fn test_label_schema_is_endpoint_only() {
        let registry = DescriptorRegistry::new("chainmeta");

        for descriptor in registry.descriptors() {
            assert_eq!(descriptor.label_names, &["endpoint"]);
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let registry = DescriptorRegistry::new("chainmeta");

        assert_eq!(registry.descriptors(), registry.descriptors());
    }
}
