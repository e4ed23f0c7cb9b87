//! MultiQC failed-sample commands.

mod args;

use anyhow::{Context, Result};
use log::info;
use ocmsrnaseq_lib::qc::{
    combine_failed_samples, discover_failed_lists, failed_fastqc_dirs, find_failed_samples,
};

use crate::commands::common;

pub use args::{CombineFailedArgs, CombineFailedConfig, FailedDirsArgs, FindFailedArgs};

/// Execute the `find-failed` command end-to-end.
pub fn run_find_failed(args: FindFailedArgs) -> Result<()> {
    info!("Reading MultiQC table {}", args.input.display());
    let written = find_failed_samples(&args.input, &args.outdir)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;
    if written.is_empty() {
        info!("No sample failed any FastQC metric");
    }
    Ok(())
}

/// Execute the `combine-failed` command end-to-end.
pub fn run_combine_failed(args: CombineFailedArgs) -> Result<()> {
    let config: CombineFailedConfig = args.into();

    let inputs = match config.inputs {
        Some(inputs) => inputs,
        None if config.dir.is_dir() => discover_failed_lists(&config.dir, &config.output)?,
        None => {
            info!("{} not found, no failed samples to combine", config.dir.display());
            Vec::new()
        }
    };

    let n = combine_failed_samples(&inputs, &config.output)?;
    info!(
        "{} unique failed samples from {} lists -> {}",
        n,
        inputs.len(),
        config.output.display()
    );
    Ok(())
}

/// Execute the `failed-dirs` command end-to-end.
pub fn run_failed_dirs(args: FailedDirsArgs) -> Result<()> {
    let combined = args.combined_path();
    let dirs = failed_fastqc_dirs(&combined, &args.fastqc_dir)
        .with_context(|| format!("Failed to resolve FastQC directories from {}", combined.display()))?;
    info!("{} FastQC directories for failed samples", dirs.len());
    common::print_paths(&dirs)
}
