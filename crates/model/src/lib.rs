//! `clusterapi-model`: wire types of the cluster management REST API.
//!
//! Two families share this crate and keep their own conventions:
//!
//! - [`mesh`]: resource-model types, camelCase names matched case-insensitively;
//! - [`fabric`]: cluster types, PascalCase names matched exactly.
//!
//! Every type implements [`WireValue`](clusterapi_codec::WireValue), so the
//! `clusterapi_codec::{from_slice, to_vec}` helpers work on all of them.

pub mod fabric;
mod health_state;
pub mod mesh;

pub use health_state::HealthState;
