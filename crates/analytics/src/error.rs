use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportMergeError {
    /// Two metric groups produced the same key. Merging would silently drop
    /// one of the values, so the caller has to fix the group selection.
    #[error("Metric '{key}' from group '{incoming_group}' collides with group '{existing_group}'")]
    DuplicateKey {
        key: String,
        existing_group: &'static str,
        incoming_group: &'static str,
    },
}
