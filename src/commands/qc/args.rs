use ocmsrnaseq_lib::qc::failed::{COMBINED_FAILED, FAILED_METRICS_DIR, FASTQC_DIR, MULTIQC_FASTQC};
use std::path::PathBuf;
use structopt::StructOpt;

/// CLI arguments for the `find-failed` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "find-failed")]
pub struct FindFailedArgs {
    /// MultiQC FastQC table.
    #[structopt(long, short = "i", default_value = MULTIQC_FASTQC, parse(from_os_str))]
    pub input: PathBuf,

    /// Directory receiving one `failed_<metric>.txt` per failing metric.
    #[structopt(long, short = "o", default_value = FAILED_METRICS_DIR, parse(from_os_str))]
    pub outdir: PathBuf,
}

/// CLI arguments for the `combine-failed` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "combine-failed")]
pub struct CombineFailedArgs {
    /// Per-metric lists to combine. Defaults to every `failed_*.txt` in `--dir`.
    #[structopt(parse(from_os_str))]
    pub inputs: Vec<PathBuf>,

    /// Directory holding the per-metric lists.
    #[structopt(long, short = "d", default_value = FAILED_METRICS_DIR, parse(from_os_str))]
    pub dir: PathBuf,

    /// Combined list. Defaults to `failed_combined_samples.txt` in `--dir`.
    #[structopt(long, short = "o", parse(from_os_str))]
    pub output: Option<PathBuf>,
}

/// CLI arguments for the `failed-dirs` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "failed-dirs")]
pub struct FailedDirsArgs {
    /// Combined failed-sample list. Defaults to the one written by `combine-failed`.
    #[structopt(long, short = "c", parse(from_os_str))]
    pub combined: Option<PathBuf>,

    /// Directory holding FastQC output.
    #[structopt(long, short = "f", default_value = FASTQC_DIR, parse(from_os_str))]
    pub fastqc_dir: PathBuf,
}

/// Normalised configuration derived from [`CombineFailedArgs`].
#[derive(Debug, Clone)]
pub struct CombineFailedConfig {
    pub inputs: Option<Vec<PathBuf>>,
    pub dir: PathBuf,
    pub output: PathBuf,
}

impl From<CombineFailedArgs> for CombineFailedConfig {
    fn from(args: CombineFailedArgs) -> CombineFailedConfig {
        let output = args
            .output
            .unwrap_or_else(|| args.dir.join(COMBINED_FAILED));
        CombineFailedConfig {
            inputs: if args.inputs.is_empty() {
                None
            } else {
                Some(args.inputs)
            },
            dir: args.dir,
            output,
        }
    }
}

impl FailedDirsArgs {
    /// Path of the combined failed-sample list.
    pub fn combined_path(&self) -> PathBuf {
        self.combined
            .clone()
            .unwrap_or_else(|| PathBuf::from(FAILED_METRICS_DIR).join(COMBINED_FAILED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_output_defaults_into_dir() {
        let args = CombineFailedArgs::from_iter_safe(&["combine-failed", "-d", "qc"]).unwrap();
        let config = CombineFailedConfig::from(args);
        assert_eq!(config.output, PathBuf::from("qc/failed_combined_samples.txt"));
        assert!(config.inputs.is_none());
    }

    #[test]
    fn explicit_inputs_are_kept() {
        let args =
            CombineFailedArgs::from_iter_safe(&["combine-failed", "failed_a.txt", "failed_b.txt"])
                .unwrap();
        let config = CombineFailedConfig::from(args);
        assert_eq!(config.inputs.map(|v| v.len()), Some(2));
    }
}
