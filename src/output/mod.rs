//! Writing metrics files

pub mod metrics_log;

pub use metrics_log::MetricsLog;
