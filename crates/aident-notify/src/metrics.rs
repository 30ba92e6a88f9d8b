//! Notification metrics.
//!
//! Counters are recorded through the `metrics` facade; they are no-ops
//! unless the host installs a recorder.

use metrics::counter;

/// Metric name constants for consistency.
pub mod names {
    /// Delivered notifications by channel.
    pub const DELIVERED_TOTAL: &str = "aident_notifications_delivered_total";

    /// Failed notification attempts by channel.
    pub const FAILED_TOTAL: &str = "aident_notifications_failed_total";
}

pub const CHANNEL_SNS: &str = "sns";
pub const CHANNEL_MESSENGER: &str = "messenger";

pub fn record_delivered(channel: &'static str) {
    counter!(names::DELIVERED_TOTAL, "channel" => channel).increment(1);
}

pub fn record_failed(channel: &'static str) {
    counter!(names::FAILED_TOTAL, "channel" => channel).increment(1);
}
