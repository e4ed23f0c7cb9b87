//! Samples failing FastQC metrics in a MultiQC report.
//!
//! MultiQC summarises FastQC in `multiqc_fastqc.txt`, one row per sample
//! and one `pass`/`warn`/`fail` column per metric. The helpers here pull
//! out the failing samples per metric, combine those lists and locate the
//! FastQC output directories to feed a second, failures-only MultiQC run.

use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::io::{BufRead, Read, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::core::error::{OcmsError, Result};
use crate::core::fs::{file_name_str, list_matching};
use crate::core::io::{create_text, get_reader, open_text};

/// MultiQC FastQC table relative to the pipeline directory.
pub const MULTIQC_FASTQC: &str = "multiqc_data/multiqc_fastqc.txt";
/// Directory receiving one `failed_<metric>.txt` per failing metric.
pub const FAILED_METRICS_DIR: &str = "multiqc_data/failed_qc_metrics";
/// Name of the combined failed-sample list.
pub const COMBINED_FAILED: &str = "failed_combined_samples.txt";
/// Glob selecting per-metric lists.
pub const FAILED_LIST_GLOB: &str = "failed_*.txt";
/// Directory holding per-read FastQC output.
pub const FASTQC_DIR: &str = "fastqc.dir";

/// Zero-based columns of `multiqc_fastqc.txt` holding FastQC module statuses.
pub const METRIC_COLUMNS: Range<usize> = 12..23;

const SAMPLE_COLUMN: &str = "Sample";

/// Samples failing one metric, in report order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedMetric {
    pub metric: String,
    pub samples: Vec<String>,
}

impl FailedMetric {
    pub fn file_name(&self) -> String {
        format!("failed_{}.txt", self.metric)
    }
}

/// Collect the failing samples of every metric column. Metrics without
/// failures are left out.
pub fn failed_samples_by_metric<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<FailedMetric>> {
    let headers = reader.headers()?.clone();
    let sample_idx = headers
        .iter()
        .position(|h| h == SAMPLE_COLUMN)
        .ok_or_else(|| OcmsError::Parse(format!("no {} column in MultiQC table", SAMPLE_COLUMN)))?;

    let columns = METRIC_COLUMNS.start.min(headers.len())..METRIC_COLUMNS.end.min(headers.len());
    let mut metrics: Vec<FailedMetric> = columns
        .clone()
        .map(|idx| FailedMetric {
            metric: headers[idx].to_string(),
            samples: Vec::new(),
        })
        .collect();

    for result in reader.records() {
        let record = result?;
        let sample = match record.get(sample_idx) {
            Some(sample) => sample,
            None => continue,
        };
        for (metric, idx) in metrics.iter_mut().zip(columns.clone()) {
            let failed = record
                .get(idx)
                .map(|status| status.to_lowercase().contains("fail"))
                .unwrap_or(false);
            if failed {
                metric.samples.push(sample.to_string());
            }
        }
    }

    metrics.retain(|m| !m.samples.is_empty());
    Ok(metrics)
}

/// Write `failed_<metric>.txt` for every failing metric of the MultiQC
/// table at `input`. Returns the files written.
pub fn find_failed_samples(input: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let reader = get_reader(&Some(input), true)?;
    let metrics = failed_samples_by_metric(reader)?;
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(metrics.len());
    for metric in metrics {
        let path = out_dir.join(metric.file_name());
        let mut writer = create_text(&Some(&path))?;
        for sample in &metric.samples {
            writeln!(writer, "{}", sample)?;
        }
        writer.flush()?;
        info!(
            "{} samples failed {} -> {}",
            metric.samples.len(),
            metric.metric,
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}

/// Per-metric lists in `dir`, excluding the combined list itself.
pub fn discover_failed_lists(dir: &Path, output: &Path) -> Result<Vec<PathBuf>> {
    let output_name = file_name_str(output);
    Ok(list_matching(dir, FAILED_LIST_GLOB)?
        .into_iter()
        .filter(|p| file_name_str(p) != output_name)
        .collect())
}

fn read_samples(path: &Path, samples: &mut BTreeSet<String>) -> Result<()> {
    for line in open_text(&Some(path))?.lines() {
        let line = line?;
        let sample = line.trim();
        if !sample.is_empty() {
            samples.insert(sample.to_string());
        }
    }
    Ok(())
}

/// Union the samples of `inputs` into a sorted, de-duplicated list at
/// `output`. Missing inputs are skipped: no file means no failures.
pub fn combine_failed_samples(inputs: &[PathBuf], output: &Path) -> Result<usize> {
    let mut samples = BTreeSet::new();
    for input in inputs {
        if !input.is_file() {
            info!("File not found: {}, skipping", input.display());
            continue;
        }
        debug!("Reading failed samples from {}", input.display());
        read_samples(input, &mut samples)?;
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = create_text(&Some(output))?;
    for sample in &samples {
        writeln!(writer, "{}", sample)?;
    }
    writer.flush()?;
    Ok(samples.len())
}

/// FastQC directory name of a failed sample, e.g. `s1.fastq.1.gz` → `s1_1`.
pub fn fastqc_dir_name(sample: &str) -> String {
    sample.replace(".fastq.", "_").replace(".gz", "")
}

/// Existing `<fastqc_dir>/<name>.fastqc` directories of the samples listed
/// in `combined`, sorted.
pub fn failed_fastqc_dirs(combined: &Path, fastqc_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut samples = BTreeSet::new();
    read_samples(combined, &mut samples)?;

    let names: BTreeSet<String> = samples.iter().map(|s| fastqc_dir_name(s)).collect();
    let mut dirs = Vec::new();
    for name in names {
        let dir = fastqc_dir.join(format!("{}.fastqc", name));
        if dir.exists() {
            dirs.push(dir);
        } else {
            warn!("Directory does not exist: {}", dir.display());
        }
    }

    if dirs.is_empty() {
        return Err(OcmsError::NoFastqcDirectories);
    }
    Ok(dirs)
}
