//! Execution policies, a tagged union on `type`.

use std::sync::OnceLock;

use clusterapi_codec::{wire_enum, wire_value, NameMatch, ObjectCodec, ObjectModel, UnionCodec, UnionModel};

wire_enum! {
    pub enum RestartPolicy: IgnoreCase {
        OnFailure = "OnFailure",
        Never = "Never",
    }
}

/// Run forever, restarting on exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultExecutionPolicy;

impl DefaultExecutionPolicy {
    pub const TYPE: &'static str = "Default";
}

/// Run until the code packages exit successfully.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunToCompletionExecutionPolicy {
    pub restart: RestartPolicy,
}

impl RunToCompletionExecutionPolicy {
    pub const TYPE: &'static str = "RunToCompletion";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionPolicy {
    Default(DefaultExecutionPolicy),
    RunToCompletion(RunToCompletionExecutionPolicy),
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self::Default(DefaultExecutionPolicy)
    }
}

impl ObjectModel for DefaultExecutionPolicy {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<DefaultExecutionPolicy>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("DefaultExecutionPolicy", NameMatch::IgnoreCase)
                .tag("type", Self::TYPE)
                .build(|_| Ok(DefaultExecutionPolicy))
        })
    }
}

impl ObjectModel for RunToCompletionExecutionPolicy {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<RunToCompletionExecutionPolicy>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("RunToCompletionExecutionPolicy", NameMatch::IgnoreCase)
                .tag("type", Self::TYPE)
                .defaulted("restart", |p| &p.restart)
                .build(|slots| {
                    Ok(RunToCompletionExecutionPolicy {
                        restart: slots.take_or_default("restart")?,
                    })
                })
        })
    }
}

impl UnionModel for ExecutionPolicy {
    fn codec() -> &'static UnionCodec<Self> {
        static CODEC: OnceLock<UnionCodec<ExecutionPolicy>> = OnceLock::new();
        CODEC.get_or_init(|| {
            UnionCodec::<Self>::builder("ExecutionPolicy", "type", NameMatch::IgnoreCase)
                .variant(DefaultExecutionPolicy::TYPE, Self::Default, |p| match p {
                    Self::Default(inner) => Some(inner),
                    _ => None,
                })
                .variant(RunToCompletionExecutionPolicy::TYPE, Self::RunToCompletion, |p| match p {
                    Self::RunToCompletion(inner) => Some(inner),
                    _ => None,
                })
                .build()
        })
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::Default(_) => DefaultExecutionPolicy::TYPE,
            Self::RunToCompletion(_) => RunToCompletionExecutionPolicy::TYPE,
        }
    }
}

wire_value!(object DefaultExecutionPolicy, RunToCompletionExecutionPolicy);
wire_value!(union ExecutionPolicy);

#[cfg(test)]
mod tests {
    use clusterapi_codec::{from_str, to_string};

    use super::*;

    #[test]
    fn dispatches_on_type() {
        assert_eq!(from_str::<ExecutionPolicy>(r#"{"type": "Default"}"#).unwrap(), ExecutionPolicy::default());
        assert_eq!(
            from_str::<ExecutionPolicy>(r#"{"type": "RunToCompletion", "restart": "never"}"#).unwrap(),
            ExecutionPolicy::RunToCompletion(RunToCompletionExecutionPolicy {
                restart: RestartPolicy::Never
            })
        );
    }

    #[test]
    fn unit_variant_writes_only_its_tag() {
        assert_eq!(to_string(&ExecutionPolicy::default()).unwrap(), r#"{"type":"Default"}"#);
    }

    #[test]
    fn restart_policy_defaults_to_its_first_member() {
        let policy: RunToCompletionExecutionPolicy = from_str(r#"{"restart": "Sometimes"}"#).unwrap();
        assert_eq!(policy.restart, RestartPolicy::OnFailure);
    }
}
