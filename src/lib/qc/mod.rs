//! Quality-control report post-processing.

pub mod failed;

pub use failed::{
    combine_failed_samples, discover_failed_lists, failed_fastqc_dirs, failed_samples_by_metric,
    find_failed_samples, FailedMetric,
};
