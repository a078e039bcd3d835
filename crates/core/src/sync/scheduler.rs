//! Core scheduler constants for the recurring sync pass.

/// Default pass cadence in seconds. The remote catalog changes slowly, so
/// the job runs hourly unless configured otherwise.
pub const SYNC_INTERVAL_SECS: u64 = 60 * 60;

/// Maximum jitter (seconds) added to each cycle interval.
pub const SYNC_INTERVAL_JITTER_SECS: u64 = 60;
