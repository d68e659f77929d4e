use std::sync::OnceLock;

use clusterapi_codec::{wire_enum, wire_value, NameMatch, ObjectCodec, ObjectModel};

use crate::mesh::{AutoScalingPolicy, ExecutionPolicy};
use crate::HealthState;

wire_enum! {
    pub enum OperatingSystemType: IgnoreCase {
        Linux = "Linux",
        Windows = "Windows",
    }
}

wire_enum! {
    /// Provisioning status of a mesh resource.
    pub enum ResourceStatus: IgnoreCase {
        Unknown = "Unknown",
        Ready = "Ready",
        Upgrading = "Upgrading",
        Creating = "Creating",
        Deleting = "Deleting",
        Failed = "Failed",
    }
}

/// A service of a mesh application. `status`, `status_details` and
/// `health_state` are reported by the cluster and never need to be set by
/// callers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceResourceDescription {
    pub name: String,
    pub os_type: OperatingSystemType,
    pub description: Option<String>,
    pub replica_count: Option<i32>,
    pub execution_policy: Option<ExecutionPolicy>,
    pub auto_scaling_policies: Option<Vec<AutoScalingPolicy>>,
    pub dns_name: Option<String>,
    pub status: Option<ResourceStatus>,
    pub status_details: Option<String>,
    pub health_state: Option<HealthState>,
}

impl ObjectModel for ServiceResourceDescription {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<ServiceResourceDescription>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("ServiceResourceDescription", NameMatch::IgnoreCase)
                .defaulted("name", |s| &s.name)
                .defaulted("osType", |s| &s.os_type)
                .optional("description", |s| &s.description)
                .optional("replicaCount", |s| &s.replica_count)
                .optional("executionPolicy", |s| &s.execution_policy)
                .optional("autoScalingPolicies", |s| &s.auto_scaling_policies)
                .optional("dnsName", |s| &s.dns_name)
                .optional("status", |s| &s.status)
                .optional("statusDetails", |s| &s.status_details)
                .optional("healthState", |s| &s.health_state)
                .build(|slots| {
                    Ok(ServiceResourceDescription {
                        name: slots.take_or_default("name")?,
                        os_type: slots.take_or_default("osType")?,
                        description: slots.take_optional("description")?,
                        replica_count: slots.take_optional("replicaCount")?,
                        execution_policy: slots.take_optional("executionPolicy")?,
                        auto_scaling_policies: slots.take_optional("autoScalingPolicies")?,
                        dns_name: slots.take_optional("dnsName")?,
                        status: slots.take_optional("status")?,
                        status_details: slots.take_optional("statusDetails")?,
                        health_state: slots.take_optional("healthState")?,
                    })
                })
        })
    }
}

wire_value!(object ServiceResourceDescription);
