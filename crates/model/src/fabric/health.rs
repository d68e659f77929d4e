use std::sync::OnceLock;

use clusterapi_codec::{wire_value, NameMatch, ObjectCodec, ObjectModel};
use time::{Duration, OffsetDateTime};

use crate::HealthState;

/// A health report stored by the health store, plus the store's view of it.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthEvent {
    pub source_id: String,
    pub property: String,
    pub health_state: HealthState,
    /// Time span after which the report expires.
    pub time_to_live: Duration,
    pub description: Option<String>,
    pub sequence_number: Option<i64>,
    pub remove_when_expired: Option<bool>,
    pub health_report_id: Option<String>,
    pub is_expired: bool,
    pub source_utc_timestamp: OffsetDateTime,
    pub last_modified_utc_timestamp: Option<OffsetDateTime>,
}

impl HealthEvent {
    /// Whether this event should weigh on the aggregated health of its entity.
    pub fn is_reportable(&self) -> bool {
        !self.is_expired && matches!(self.health_state, HealthState::Warning | HealthState::Error)
    }
}

impl ObjectModel for HealthEvent {
    fn codec() -> &'static ObjectCodec<Self> {
        static CODEC: OnceLock<ObjectCodec<HealthEvent>> = OnceLock::new();
        CODEC.get_or_init(|| {
            ObjectCodec::<Self>::builder("HealthEvent", NameMatch::Ordinal)
                .defaulted("SourceId", |e| &e.source_id)
                .defaulted("Property", |e| &e.property)
                .defaulted("HealthState", |e| &e.health_state)
                .defaulted("TimeToLiveInMilliSeconds", |e| &e.time_to_live)
                .optional("Description", |e| &e.description)
                .optional("SequenceNumber", |e| &e.sequence_number)
                .optional("RemoveWhenExpired", |e| &e.remove_when_expired)
                .optional("HealthReportId", |e| &e.health_report_id)
                .defaulted("IsExpired", |e| &e.is_expired)
                .required("SourceUtcTimestamp", |e| &e.source_utc_timestamp)
                .optional("LastModifiedUtcTimestamp", |e| &e.last_modified_utc_timestamp)
                .build(|slots| {
                    Ok(HealthEvent {
                        source_id: slots.take_or_default("SourceId")?,
                        property: slots.take_or_default("Property")?,
                        health_state: slots.take_or_default("HealthState")?,
                        time_to_live: slots.take_or_default("TimeToLiveInMilliSeconds")?,
                        description: slots.take_optional("Description")?,
                        sequence_number: slots.take_optional("SequenceNumber")?,
                        remove_when_expired: slots.take_optional("RemoveWhenExpired")?,
                        health_report_id: slots.take_optional("HealthReportId")?,
                        is_expired: slots.take_or_default("IsExpired")?,
                        source_utc_timestamp: slots.take("SourceUtcTimestamp")?,
                        last_modified_utc_timestamp: slots.take_optional("LastModifiedUtcTimestamp")?,
                    })
                })
        })
    }
}

wire_value!(object HealthEvent);
