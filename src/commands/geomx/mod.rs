//! GeoMx configuration commands: merging DSP configurations, writing
//! single-AOI configurations and merging run summaries.

mod args;

use anyhow::{Context, Result};
use log::info;
use ocmsrnaseq_lib::config::{GeomxConfig, AOI_LIST, PROCESSING};
use ocmsrnaseq_lib::geomx::{discover_configs, merge_config_files, merge_summaries, single_aoi_config};
use ocmsrnaseq_lib::utils;
use std::io::Write;

use crate::commands::common;

pub use args::{AoiConfigArgs, Inis2IniArgs, MergeSummariesArgs};

/// Execute the `inis2ini` command end-to-end.
pub fn run_inis2ini(args: Inis2IniArgs) -> Result<()> {
    let output = common::resolve_in(&args.dir, &args.output);

    let inputs = if args.inputs.is_empty() {
        common::require_dir(&args.dir)?;
        discover_configs(&args.dir, &output)?
    } else {
        args.inputs.clone()
    };
    if inputs.is_empty() {
        anyhow::bail!("No .ini files found in {}", args.dir.display());
    }
    for input in &inputs {
        info!("Merging {}", input.display());
    }

    let combined = merge_config_files(&inputs)?;

    utils::make_parent_dirs(&output)?;
    combined
        .write_path(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Combined {} configurations into {}",
        inputs.len(),
        output.display()
    );
    Ok(())
}

/// Execute the `aoi-config` command end-to-end.
pub fn run_aoi_config(args: AoiConfigArgs) -> Result<()> {
    let config = GeomxConfig::load(&args.config, &[AOI_LIST, PROCESSING])
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let document = single_aoi_config(config, &args.aoi)?;

    let mut writer = utils::create_text(&Some(&args.output))?;
    document.write_to(&mut writer)?;
    writer.flush()?;
    info!("Configuration for AOI {} -> {}", args.aoi, args.output.display());
    Ok(())
}

/// Execute the `merge-summaries` command end-to-end.
pub fn run_merge_summaries(args: MergeSummariesArgs) -> Result<()> {
    common::require_dir(&args.dir)?;
    merge_summaries(&args.dir, &args.output)?;
    Ok(())
}
