//! Cluster ("fabric") types: PascalCase wire names matched exactly.

mod health;
mod partition;
mod scaling;

pub use health::HealthEvent;
pub use partition::{
    Int64RangePartitionInformation, NamedPartitionInformation, PartitionInformation, SingletonPartitionInformation,
};
pub use scaling::{
    AddRemoveIncrementalNamedPartitionScalingMechanism, AveragePartitionLoadScalingTrigger, AverageServiceLoadScalingTrigger,
    PartitionInstanceCountScaleMechanism, ScalingMechanismDescription,
    ScalingPolicyDescription, ScalingTriggerDescription,
};
