use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identity of one select instance, stored in the root's `data-select`.
///
/// Creation time in milliseconds plus a process-wide sequence number, so
/// selects created within the same millisecond still differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceTag(String);

impl InstanceTag {
    pub(crate) fn new() -> Self {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}-{}", Utc::now().timestamp_millis(), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstanceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
