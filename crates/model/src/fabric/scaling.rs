//! Scaling policies of cluster services: a trigger union and a mechanism
//! union, both tagged on `Kind`.

use std::sync::OnceLock;

use clusterapi_codec::{wire_value, NameMatch, ObjectCodec, ObjectModel, UnionCodec, UnionModel};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AveragePartitionLoadScalingTrigger {
    pub metric_name: String,
    pub lower_load_threshold: f64,
    pub upper_load_threshold: f64,
    pub scale_interval_in_seconds: i64,
}

impl AveragePartitionLoadScalingTrigger {
    pub const KIND: &'static str = "AveragePartitionLoad";
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AverageServiceLoadScalingTrigger {
    pub metric_name: String,
    pub lower_load_threshold: f64,
    pub upper_load_threshold: f64,
    pub scale_interval_in_seconds: i64,
    /// Average the load of primary replicas only.
    pub use_only_primary_load: bool,
}

impl AverageServiceLoadScalingTrigger {
    pub const KIND: &'static str = "AverageServiceLoad";
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScalingTriggerDescription {
    AveragePartitionLoad(AveragePartitionLoadScalingTrigger),
    AverageServiceLoad(AverageServiceLoadScalingTrigger),
}

/// Scale a stateless service by changing the instance count of each partition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionInstanceCountScaleMechanism {
    pub min_instance_count: i32,
    pub max_instance_count: i32,
    pub scale_increment: i32,
}

impl PartitionInstanceCountScaleMechanism {
    pub const KIND: &'static str = "PartitionInstanceCount";
}

/// Scale by adding or removing named partitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddRemoveIncrementalNamedPartitionScalingMechanism {
    pub min_partition_count: i32,
    pub max_partition_count: i32,
    pub scale_increment: i32,
}

impl AddRemoveIncrementalNamedPartitionScalingMechanism {
    pub const KIND: &'static str = "AddRemoveIncrementalNamedPartition";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScalingMechanismDescription {
    PartitionInstanceCount(PartitionInstanceCountScaleMechanism),
    AddRemoveIncrementalNamedPartition(AddRemoveIncrementalNamedPartitionScalingMechanism),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalingPolicyDescription {
    pub scaling_trigger: ScalingTriggerDescription,
    pub scaling_mechanism: ScalingMechanismDescription,
}

impl ObjectModel for AveragePartitionLoadScalingTrigger {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<AveragePartitionLoadScalingTrigger>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("AveragePartitionLoadScalingTrigger", NameMatch::Ordinal)
                .tag("Kind", Self::KIND)
                .defaulted("MetricName", |t| &t.metric_name)
                .defaulted("LowerLoadThreshold", |t| &t.lower_load_threshold)
                .defaulted("UpperLoadThreshold", |t| &t.upper_load_threshold)
                .defaulted("ScaleIntervalInSeconds", |t| &t.scale_interval_in_seconds)
                .build(|slots| {
                    Ok(AveragePartitionLoadScalingTrigger {
                        metric_name: slots.take_or_default("MetricName")?,
                        lower_load_threshold: slots.take_or_default("LowerLoadThreshold")?,
                        upper_load_threshold: slots.take_or_default("UpperLoadThreshold")?,
                        scale_interval_in_seconds: slots.take_or_default("ScaleIntervalInSeconds")?,
                    })
                })
        })
    }
}

impl ObjectModel for AverageServiceLoadScalingTrigger {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<AverageServiceLoadScalingTrigger>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("AverageServiceLoadScalingTrigger", NameMatch::Ordinal)
                .tag("Kind", Self::KIND)
                .defaulted("MetricName", |t| &t.metric_name)
                .defaulted("LowerLoadThreshold", |t| &t.lower_load_threshold)
                .defaulted("UpperLoadThreshold", |t| &t.upper_load_threshold)
                .defaulted("ScaleIntervalInSeconds", |t| &t.scale_interval_in_seconds)
                .defaulted("UseOnlyPrimaryLoad", |t| &t.use_only_primary_load)
                .build(|slots| {
                    Ok(AverageServiceLoadScalingTrigger {
                        metric_name: slots.take_or_default("MetricName")?,
                        lower_load_threshold: slots.take_or_default("LowerLoadThreshold")?,
                        upper_load_threshold: slots.take_or_default("UpperLoadThreshold")?,
                        scale_interval_in_seconds: slots.take_or_default("ScaleIntervalInSeconds")?,
                        use_only_primary_load: slots.take_or_default("UseOnlyPrimaryLoad")?,
                    })
                })
        })
    }
}

impl UnionModel for ScalingTriggerDescription {
    fn codec() -> &'static UnionCodec<Self> {
        static CODEC: OnceLock<UnionCodec<ScalingTriggerDescription>> = OnceLock::new();
        CODEC.get_or_init(|| {
            UnionCodec::<Self>::builder("ScalingTriggerDescription", "Kind", NameMatch::Ordinal)
                .variant(AveragePartitionLoadScalingTrigger::KIND, Self::AveragePartitionLoad, |t| match t {
                    Self::AveragePartitionLoad(inner) => Some(inner),
                    _ => None,
                })
                .variant(AverageServiceLoadScalingTrigger::KIND, Self::AverageServiceLoad, |t| match t {
                    Self::AverageServiceLoad(inner) => Some(inner),
                    _ => None,
                })
                .build()
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::AveragePartitionLoad(_) => AveragePartitionLoadScalingTrigger::KIND,
            Self::AverageServiceLoad(_) => AverageServiceLoadScalingTrigger::KIND,
        }
    }
}

impl ObjectModel for PartitionInstanceCountScaleMechanism {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<PartitionInstanceCountScaleMechanism>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("PartitionInstanceCountScaleMechanism", NameMatch::Ordinal)
                .tag("Kind", Self::KIND)
                .defaulted("MinInstanceCount", |m| &m.min_instance_count)
                .defaulted("MaxInstanceCount", |m| &m.max_instance_count)
                .defaulted("ScaleIncrement", |m| &m.scale_increment)
                .build(|slots| {
                    Ok(PartitionInstanceCountScaleMechanism {
                        min_instance_count: slots.take_or_default("MinInstanceCount")?,
                        max_instance_count: slots.take_or_default("MaxInstanceCount")?,
                        scale_increment: slots.take_or_default("ScaleIncrement")?,
                    })
                })
        })
    }
}

impl ObjectModel for AddRemoveIncrementalNamedPartitionScalingMechanism {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<AddRemoveIncrementalNamedPartitionScalingMechanism>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("AddRemoveIncrementalNamedPartitionScalingMechanism", NameMatch::Ordinal)
                .tag("Kind", Self::KIND)
                .defaulted("MinPartitionCount", |m| &m.min_partition_count)
                .defaulted("MaxPartitionCount", |m| &m.max_partition_count)
                .defaulted("ScaleIncrement", |m| &m.scale_increment)
                .build(|slots| {
                    Ok(AddRemoveIncrementalNamedPartitionScalingMechanism {
                        min_partition_count: slots.take_or_default("MinPartitionCount")?,
                        max_partition_count: slots.take_or_default("MaxPartitionCount")?,
                        scale_increment: slots.take_or_default("ScaleIncrement")?,
                    })
                })
        })
    }
}

impl UnionModel for ScalingMechanismDescription {
    fn codec() -> &'static UnionCodec<Self> {
        static CODEC: OnceLock<UnionCodec<ScalingMechanismDescription>> = OnceLock::new();
        CODEC.get_or_init(|| {
            UnionCodec::<Self>::builder("ScalingMechanismDescription", "Kind", NameMatch::Ordinal)
                .variant(PartitionInstanceCountScaleMechanism::KIND, Self::PartitionInstanceCount, |m| match m {
                    Self::PartitionInstanceCount(inner) => Some(inner),
                    _ => None,
                })
                .variant(
                    AddRemoveIncrementalNamedPartitionScalingMechanism::KIND,
                    Self::AddRemoveIncrementalNamedPartition,
                    |m| match m {
                        Self::AddRemoveIncrementalNamedPartition(inner) => Some(inner),
                        _ => None,
                    },
                )
                .build()
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::PartitionInstanceCount(_) => PartitionInstanceCountScaleMechanism::KIND,
            Self::AddRemoveIncrementalNamedPartition(_) => AddRemoveIncrementalNamedPartitionScalingMechanism::KIND,
        }
    }
}

impl ObjectModel for ScalingPolicyDescription {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<ScalingPolicyDescription>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("ScalingPolicyDescription", NameMatch::Ordinal)
                .required("ScalingTrigger", |p| &p.scaling_trigger)
                .required("ScalingMechanism", |p| &p.scaling_mechanism)
                .build(|slots| {
                    Ok(ScalingPolicyDescription {
                        scaling_trigger: slots.take("ScalingTrigger")?,
                        scaling_mechanism: slots.take("ScalingMechanism")?,
                    })
                })
        })
    }
}

wire_value!(
    object AveragePartitionLoadScalingTrigger,
    AverageServiceLoadScalingTrigger,
    PartitionInstanceCountScaleMechanism,
    AddRemoveIncrementalNamedPartitionScalingMechanism,
    ScalingPolicyDescription,
);
wire_value!(union ScalingTriggerDescription, ScalingMechanismDescription);

#[cfg(test)]
mod tests {
    use clusterapi_codec::{from_str, to_string, CodecError};

    use super::*;

    #[test]
    fn names_are_matched_exactly() {
        let mechanism: PartitionInstanceCountScaleMechanism =
            from_str(r#"{"minInstanceCount": 3, "MaxInstanceCount": 4}"#).unwrap();
        assert_eq!(mechanism.min_instance_count, 0);
        assert_eq!(mechanism.max_instance_count, 4);

        let err = from_str::<ScalingMechanismDescription>(r#"{"kind": "PartitionInstanceCount"}"#).unwrap_err();
        assert!(matches!(err, CodecError::SchemaViolation { expected: "Kind", .. }));
    }

    #[test]
    fn service_load_trigger_writes_every_field() {
        let trigger = ScalingTriggerDescription::AverageServiceLoad(AverageServiceLoadScalingTrigger {
            metric_name: "servicefabric:/_CpuCores".into(),
            lower_load_threshold: 0.5,
            upper_load_threshold: 1.5,
            scale_interval_in_seconds: 600,
            use_only_primary_load: false,
        });
        let text = to_string(&trigger).unwrap();
        assert_eq!(
            text,
            r#"{"Kind":"AverageServiceLoad","MetricName":"servicefabric:/_CpuCores","LowerLoadThreshold":0.5,"UpperLoadThreshold":1.5,"ScaleIntervalInSeconds":600,"UseOnlyPrimaryLoad":false}"#
        );
        assert_eq!(from_str::<ScalingTriggerDescription>(&text).unwrap(), trigger);
    }

    #[test]
    fn policy_decodes_both_unions() {
        let policy: ScalingPolicyDescription = from_str(
            r#"{
                "ScalingTrigger": {"Kind": "AveragePartitionLoad", "MetricName": "m", "ScaleIntervalInSeconds": 30},
                "ScalingMechanism": {"Kind": "AddRemoveIncrementalNamedPartition", "MinPartitionCount": 1, "MaxPartitionCount": 8, "ScaleIncrement": 2}
            }"#,
        )
        .unwrap();
        assert_eq!(
            policy.scaling_trigger,
            ScalingTriggerDescription::AveragePartitionLoad(AveragePartitionLoadScalingTrigger {
                metric_name: "m".into(),
                scale_interval_in_seconds: 30,
                ..Default::default()
            })
        );
        assert_eq!(
            policy.scaling_mechanism,
            ScalingMechanismDescription::AddRemoveIncrementalNamedPartition(
                AddRemoveIncrementalNamedPartitionScalingMechanism {
                    min_partition_count: 1,
                    max_partition_count: 8,
                    scale_increment: 2,
                }
            )
        );
    }
}
