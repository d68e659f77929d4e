use clusterapi_codec::wire_enum;

wire_enum! {
    /// Aggregated health of an entity, as reported by the health store.
    pub enum HealthState: Ordinal {
        Invalid = "Invalid",
        Ok = "Ok",
        Warning = "Warning",
        Error = "Error",
        Unknown = "Unknown",
    }
}
