//! Resource-model ("mesh") types.
//!
//! Wire names are camelCase and matched case-insensitively, as are the enums
//! declared here. [`HealthState`](crate::HealthState) is shared with the
//! fabric family and keeps its exact matching.

mod auto_scaling;
mod execution;
mod service;

pub use auto_scaling::{
    AddRemoveReplicaScalingMechanism, AutoScalingMechanism, AutoScalingMetric, AutoScalingPolicy,
    AutoScalingResourceMetric, AutoScalingResourceMetricName, AutoScalingTrigger, AverageLoadScalingTrigger,
};
pub use execution::{DefaultExecutionPolicy, ExecutionPolicy, RestartPolicy, RunToCompletionExecutionPolicy};
pub use service::{OperatingSystemType, ResourceStatus, ServiceResourceDescription};
