use super::UsageStatsSource;
use crate::error::AppError;
use crate::models::ForegroundSample;
use log::debug;
use memchr::{memchr, memmem};
use std::process::Command;

const DUMPSYS: &str = "/system/bin/dumpsys";

/// Reads the resumed activity from `dumpsys activity activities`.
pub struct DumpsysUsageSource {
    program: String,
}

impl Default for DumpsysUsageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DumpsysUsageSource {
    pub fn new() -> Self {
        Self {
            program: DUMPSYS.to_string(),
        }
    }
}

impl UsageStatsSource for DumpsysUsageSource {
    fn query_usage(&self, _begin_ms: i64, end_ms: i64) -> Result<Vec<ForegroundSample>, AppError> {
        let output = Command::new(&self.program)
            .args(["activity", "activities"])
            .output()
            .map_err(|e| {
                debug!("dumpsys unavailable: {e}");
                AppError::UsageStatsUnavailable
            })?;

        if !output.status.success() {
            debug!("dumpsys exited with {}", output.status);
            return Err(AppError::UsageStatsUnavailable);
        }

        Ok(parse_resumed_package(&output.stdout)
            .map(|package| ForegroundSample::new(package, end_ms))
            .into_iter()
            .collect())
    }
}

/// First package named on a `...ResumedActivity` line.
pub(crate) fn parse_resumed_package(data: &[u8]) -> Option<String> {
    let finder = memmem::Finder::new(b"ResumedActivity");
    let mut pos = 0;

    while let Some(offset) = data.get(pos..).and_then(|rest| finder.find(rest)) {
        pos += offset;

        let line_start = data
            .get(..pos)?
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |p| p + 1);
        let line_end = data
            .get(pos..)
            .and_then(|rest| memchr(b'\n', rest))
            .map_or(data.len(), |p| pos + p);

        if let Some(package) = data.get(line_start..line_end).and_then(extract_package) {
            return Some(package);
        }
        pos = line_end + 1;
    }
    None
}

// Lines look like: "mResumedActivity: ActivityRecord{5a3c u0 com.example/.MainActivity t12}"
// where `u0` is the Android user, `u10` and up for secondary users and work profiles.
fn extract_package(line: &[u8]) -> Option<String> {
    let mut tokens = line.split(|&b| b == b' ').filter(|token| !token.is_empty());
    tokens.find(|token| is_user_tag(token))?;
    let component = tokens.next()?;
    let package = component.get(..memchr(b'/', component)?)?;
    if memchr(b'.', package).is_some() {
        Some(String::from_utf8_lossy(package).trim().to_string())
    } else {
        None
    }
}

fn is_user_tag(token: &[u8]) -> bool {
    match token.split_first() {
        Some((b'u', digits)) => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
        Some(_) | None => false,
    }
}
