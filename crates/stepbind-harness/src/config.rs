//! Runtime configuration for the harness.
//!
//! The module exposes the `fail_on_skipped` flag controlling whether a run
//! with skipped scenarios counts as a failure.

use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable consulted when no in-process override is set.
pub const FAIL_ON_SKIPPED_ENV: &str = "STEPBIND_FAIL_ON_SKIPPED";

const OVERRIDE_UNSET: u8 = 0;
const OVERRIDE_FALSE: u8 = 1;
const OVERRIDE_TRUE: u8 = 2;

static FAIL_ON_SKIPPED_OVERRIDE: AtomicU8 = AtomicU8::new(OVERRIDE_UNSET);

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_fail_on_skipped() -> Option<bool> {
    let raw = std::env::var(FAIL_ON_SKIPPED_ENV).ok()?;
    let parsed = parse_env_bool(&raw);
    if parsed.is_none() {
        log::warn!("ignoring unrecognised {FAIL_ON_SKIPPED_ENV} value {raw:?}");
    }
    parsed
}

fn override_state() -> Option<bool> {
    match FAIL_ON_SKIPPED_OVERRIDE.load(Ordering::Relaxed) {
        OVERRIDE_FALSE => Some(false),
        OVERRIDE_TRUE => Some(true),
        _ => None,
    }
}

/// Determine whether skipped scenarios fail the run.
#[must_use]
pub fn fail_on_skipped() -> bool {
    override_state()
        .or_else(env_fail_on_skipped)
        .unwrap_or(false)
}

/// Override the `fail_on_skipped` flag for the current process.
///
/// Tests may call [`clear_fail_on_skipped_override`] to restore environment
/// driven behaviour after toggling the override.
pub fn set_fail_on_skipped(enabled: bool) {
    let value = if enabled {
        OVERRIDE_TRUE
    } else {
        OVERRIDE_FALSE
    };
    FAIL_ON_SKIPPED_OVERRIDE.store(value, Ordering::Relaxed);
}

/// Remove any in-process override for the `fail_on_skipped` flag.
pub fn clear_fail_on_skipped_override() {
    FAIL_ON_SKIPPED_OVERRIDE.store(OVERRIDE_UNSET, Ordering::Relaxed);
}
