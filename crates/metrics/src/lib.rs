//! Metrics facade for bondset.
//!
//! Provides a [`MetricsRecorder`] trait with domain-specific methods and default
//! no-op implementations. A global singleton recorder is accessed via [`recorder()`],
//! and convenience free functions delegate to it.
//!
//! # Usage
//!
//! Callers record metrics via free functions:
//! ```ignore
//! bondset_metrics::record_storage_batch_size(writes);
//! bondset_metrics::record_validator_updates(updates.len());
//! ```
//!
//! A host exporting to a metrics backend installs its recorder once at
//! startup. Without one, every call is a no-op:
//! ```ignore
//! bondset_metrics::set_global_recorder(Box::new(MyPrometheusRecorder::new()));
//! ```

use std::sync::OnceLock;

// ═══════════════════════════════════════════════════════════════════════
// Trait
// ═══════════════════════════════════════════════════════════════════════

/// Backend-agnostic metrics sink. All methods default to no-ops.
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    // ── Storage ──────────────────────────────────────────────────────

    fn record_storage_batch_size(&self, size: usize) {}

    // ── Validator set ────────────────────────────────────────────────

    fn record_validator_written(&self) {}

    fn record_validator_removed(&self) {}

    fn record_validator_rejected(&self, reason: &str) {}

    fn set_active_validators(&self, count: usize) {}

    // ── Consensus updates ────────────────────────────────────────────

    fn record_validator_updates(&self, count: usize) {}

    fn set_pending_updates(&self, count: usize) {}

    fn record_updates_cleared(&self, count: usize) {}
}

// ═══════════════════════════════════════════════════════════════════════
// Global singleton
// ═══════════════════════════════════════════════════════════════════════

struct NoopRecorder;
impl MetricsRecorder for NoopRecorder {}

static RECORDER: OnceLock<Box<dyn MetricsRecorder>> = OnceLock::new();

/// Install the global recorder. Only the first call takes effect.
pub fn set_global_recorder(recorder: Box<dyn MetricsRecorder>) {
    let _ = RECORDER.set(recorder);
}

/// The installed recorder, or a no-op one.
#[inline]
pub fn recorder() -> &'static dyn MetricsRecorder {
    RECORDER.get().map(|r| r.as_ref()).unwrap_or(&NoopRecorder)
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience free functions
// ═══════════════════════════════════════════════════════════════════════

// ── Storage ──────────────────────────────────────────────────────────

#[inline]
pub fn record_storage_batch_size(size: usize) {
    recorder().record_storage_batch_size(size);
}

// ── Validator set ────────────────────────────────────────────────────

#[inline]
pub fn record_validator_written() {
    recorder().record_validator_written();
}

#[inline]
pub fn record_validator_removed() {
    recorder().record_validator_removed();
}

#[inline]
pub fn record_validator_rejected(reason: &str) {
    recorder().record_validator_rejected(reason);
}

#[inline]
pub fn set_active_validators(count: usize) {
    recorder().set_active_validators(count);
}

// ── Consensus updates ────────────────────────────────────────────────

#[inline]
pub fn record_validator_updates(count: usize) {
    recorder().record_validator_updates(count);
}

#[inline]
pub fn set_pending_updates(count: usize) {
    recorder().set_pending_updates(count);
}

#[inline]
pub fn record_updates_cleared(count: usize) {
    recorder().record_updates_cleared(count);
}
