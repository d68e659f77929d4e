//! Auto-scaling policies of mesh services.
//!
//! A policy pairs a trigger (when to scale) with a mechanism (how to scale).
//! Triggers, mechanisms and the metrics triggers observe are tagged unions on
//! `kind`; each currently has a single variant.

use std::sync::OnceLock;

use clusterapi_codec::{wire_enum, wire_value, NameMatch, ObjectCodec, ObjectModel, UnionCodec, UnionModel};

wire_enum! {
    /// Resource observed by an [`AutoScalingResourceMetric`].
    pub enum AutoScalingResourceMetricName: IgnoreCase {
        Cpu = "cpu",
        MemoryInGb = "memoryInGB",
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AutoScalingResourceMetric {
    pub name: AutoScalingResourceMetricName,
}

impl AutoScalingResourceMetric {
    pub const KIND: &'static str = "Resource";
}

#[derive(Clone, Debug, PartialEq)]
pub enum AutoScalingMetric {
    Resource(AutoScalingResourceMetric),
}

/// Scale when the average load of a metric across replicas leaves
/// `[lower_load_threshold, upper_load_threshold]`.
#[derive(Clone, Debug, PartialEq)]
pub struct AverageLoadScalingTrigger {
    pub metric: AutoScalingMetric,
    pub lower_load_threshold: f64,
    pub upper_load_threshold: f64,
    pub scale_interval_in_seconds: i32,
}

impl AverageLoadScalingTrigger {
    pub const KIND: &'static str = "AverageLoad";
}

#[derive(Clone, Debug, PartialEq)]
pub enum AutoScalingTrigger {
    AverageLoad(AverageLoadScalingTrigger),
}

/// Scale by adding or removing replicas, `scale_increment` at a time, within
/// `[min_count, max_count]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddRemoveReplicaScalingMechanism {
    pub min_count: i32,
    pub max_count: i32,
    pub scale_increment: i32,
}

impl AddRemoveReplicaScalingMechanism {
    pub const KIND: &'static str = "AddRemoveReplica";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AutoScalingMechanism {
    AddRemoveReplica(AddRemoveReplicaScalingMechanism),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AutoScalingPolicy {
    pub name: String,
    pub trigger: AutoScalingTrigger,
    pub mechanism: AutoScalingMechanism,
}

impl ObjectModel for AutoScalingResourceMetric {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<AutoScalingResourceMetric>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("AutoScalingResourceMetric", NameMatch::IgnoreCase)
                .tag("kind", Self::KIND)
                .defaulted("name", |m| &m.name)
                .build(|slots| {
                    Ok(AutoScalingResourceMetric {
                        name: slots.take_or_default("name")?,
                    })
                })
        })
    }
}

impl UnionModel for AutoScalingMetric {
    fn codec() -> &'static UnionCodec<Self> {
        static CODEC: OnceLock<UnionCodec<AutoScalingMetric>> = OnceLock::new();
        CODEC.get_or_init(|| {
            UnionCodec::<Self>::builder("AutoScalingMetric", "kind", NameMatch::IgnoreCase)
                .variant(AutoScalingResourceMetric::KIND, Self::Resource, |m| match m {
                    Self::Resource(inner) => Some(inner),
                })
                .build()
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::Resource(_) => AutoScalingResourceMetric::KIND,
        }
    }
}

impl ObjectModel for AverageLoadScalingTrigger {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<AverageLoadScalingTrigger>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("AverageLoadScalingTrigger", NameMatch::IgnoreCase)
                .tag("kind", Self::KIND)
                .required("metric", |t| &t.metric)
                .defaulted("lowerLoadThreshold", |t| &t.lower_load_threshold)
                .defaulted("upperLoadThreshold", |t| &t.upper_load_threshold)
                .defaulted("scaleIntervalInSeconds", |t| &t.scale_interval_in_seconds)
                .build(|slots| {
                    Ok(AverageLoadScalingTrigger {
                        metric: slots.take("metric")?,
                        lower_load_threshold: slots.take_or_default("lowerLoadThreshold")?,
                        upper_load_threshold: slots.take_or_default("upperLoadThreshold")?,
                        scale_interval_in_seconds: slots.take_or_default("scaleIntervalInSeconds")?,
                    })
                })
        })
    }
}

impl UnionModel for AutoScalingTrigger {
    fn codec() -> &'static UnionCodec<Self> {
        static CODEC: OnceLock<UnionCodec<AutoScalingTrigger>> = OnceLock::new();
        CODEC.get_or_init(|| {
            UnionCodec::<Self>::builder("AutoScalingTrigger", "kind", NameMatch::IgnoreCase)
                .variant(AverageLoadScalingTrigger::KIND, Self::AverageLoad, |t| match t {
                    Self::AverageLoad(inner) => Some(inner),
                })
                .build()
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::AverageLoad(_) => AverageLoadScalingTrigger::KIND,
        }
    }
}

impl ObjectModel for AddRemoveReplicaScalingMechanism {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<AddRemoveReplicaScalingMechanism>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("AddRemoveReplicaScalingMechanism", NameMatch::IgnoreCase)
                .tag("kind", Self::KIND)
                .defaulted("minCount", |m| &m.min_count)
                .defaulted("maxCount", |m| &m.max_count)
                .defaulted("scaleIncrement", |m| &m.scale_increment)
                .build(|slots| {
                    Ok(AddRemoveReplicaScalingMechanism {
                        min_count: slots.take_or_default("minCount")?,
                        max_count: slots.take_or_default("maxCount")?,
                        scale_increment: slots.take_or_default("scaleIncrement")?,
                    })
                })
        })
    }
}

impl UnionModel for AutoScalingMechanism {
    fn codec() -> &'static UnionCodec<Self> {
        static CODEC: OnceLock<UnionCodec<AutoScalingMechanism>> = OnceLock::new();
        CODEC.get_or_init(|| {
            UnionCodec::<Self>::builder("AutoScalingMechanism", "kind", NameMatch::IgnoreCase)
                .variant(AddRemoveReplicaScalingMechanism::KIND, Self::AddRemoveReplica, |m| match m {
                    Self::AddRemoveReplica(inner) => Some(inner),
                })
                .build()
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::AddRemoveReplica(_) => AddRemoveReplicaScalingMechanism::KIND,
        }
    }
}

impl ObjectModel for AutoScalingPolicy {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<AutoScalingPolicy>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("AutoScalingPolicy", NameMatch::IgnoreCase)
                .defaulted("name", |p| &p.name)
                .required("trigger", |p| &p.trigger)
                .required("mechanism", |p| &p.mechanism)
                .build(|slots| {
                    Ok(AutoScalingPolicy {
                        name: slots.take_or_default("name")?,
                        trigger: slots.take("trigger")?,
                        mechanism: slots.take("mechanism")?,
                    })
                })
        })
    }
}

wire_value!(
    object AutoScalingResourceMetric,
    AverageLoadScalingTrigger,
    AddRemoveReplicaScalingMechanism,
    AutoScalingPolicy,
);
wire_value!(union AutoScalingMetric, AutoScalingTrigger, AutoScalingMechanism);

#[cfg(test)]
mod tests {
    use clusterapi_codec::{from_str, to_string};

    use super::*;

    #[test]
    fn metric_names_use_their_wire_spelling() {
        assert_eq!(AutoScalingResourceMetricName::MemoryInGb.as_wire_str(), "memoryInGB");
        let metric: AutoScalingMetric = from_str(r#"{"kind": "Resource", "name": "MEMORYINGB"}"#).unwrap();
        assert_eq!(
            metric,
            AutoScalingMetric::Resource(AutoScalingResourceMetric {
                name: AutoScalingResourceMetricName::MemoryInGb
            })
        );
    }

    #[test]
    fn trigger_nests_a_metric_union() {
        let trigger = AutoScalingTrigger::AverageLoad(AverageLoadScalingTrigger {
            metric: AutoScalingMetric::Resource(AutoScalingResourceMetric::default()),
            lower_load_threshold: 0.25,
            upper_load_threshold: 0.75,
            scale_interval_in_seconds: 60,
        });
        let text = to_string(&trigger).unwrap();
        assert_eq!(
            text,
            r#"{"kind":"AverageLoad","metric":{"kind":"Resource","name":"cpu"},"lowerLoadThreshold":0.25,"upperLoadThreshold":0.75,"scaleIntervalInSeconds":60}"#
        );
        assert_eq!(from_str::<AutoScalingTrigger>(&text).unwrap(), trigger);
    }

    #[test]
    fn policy_requires_its_unions() {
        let err = from_str::<AutoScalingPolicy>(r#"{"name": "p"}"#).unwrap_err();
        assert_eq!(err.code(), "MISSING_PROPERTY");
    }
}
