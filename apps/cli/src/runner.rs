//! Recurring sync loop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{info, warn};

use hotsync_core::sync::{SyncEngine, SyncReport, SYNC_INTERVAL_JITTER_SECS};

/// Run sync passes forever, one per interval plus a small jitter so a fleet
/// of stores does not hit the APIs on the same second.
pub async fn run_forever(engine: Arc<SyncEngine>, interval_secs: u64) {
    loop {
        let report = engine.run_cycle().await;
        log_report(&report);

        let delay_ms = interval_secs.saturating_mul(1000)
            + jitter_ms(Utc::now().timestamp_millis(), SYNC_INTERVAL_JITTER_SECS);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

pub fn log_report(report: &SyncReport) {
    if report.succeeded() {
        info!(
            "cycle complete status={} created={} updated={} skipped={} duration_ms={}",
            report.status, report.created, report.updated, report.skipped, report.duration_ms
        );
    } else {
        warn!(
            "cycle ended status={} error={}",
            report.status,
            report.error.as_deref().unwrap_or("unknown")
        );
    }
}

fn jitter_ms(now_millis: i64, jitter_secs: u64) -> u64 {
    let bound = jitter_secs.saturating_mul(1000);
    if bound == 0 {
        return 0;
    }
    now_millis.unsigned_abs() % bound
}
