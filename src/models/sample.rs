use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// One usage record returned by the usage-stats provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForegroundSample {
    pub package_name: String,
    /// Milliseconds since the Unix epoch
    pub last_time_used: i64,
}

impl ForegroundSample {
    pub fn new(package_name: impl Into<String>, last_time_used: i64) -> Self {
        Self {
            package_name: package_name.into(),
            last_time_used,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
/// A clock set before 1970 reads as 0.
pub fn current_timestamp_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

/// Pick the package that was used most recently.
///
/// Samples are keyed by their timestamp, so when two share a timestamp the
/// one that comes later in the input overwrites the earlier one.
pub fn resolve_foreground<I>(samples: I) -> Option<String>
where
    I: IntoIterator<Item = ForegroundSample>,
{
    let mut by_time = BTreeMap::new();
    for sample in samples {
        by_time.insert(sample.last_time_used, sample.package_name);
    }
    by_time.pop_last().map(|(_, package)| package)
}
