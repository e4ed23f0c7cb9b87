//! FASTQ renaming for geomxngspipeline.
//!
//! `ini2fastq` names samples through the AOI list of a DSP configuration,
//! `novogene2geomx` keeps the sample names found in the file names.

mod args;

use anyhow::{Context, Result};
use log::{info, warn};
use ocmsrnaseq_lib::config::{GeomxConfig, WellMap, AOI_LIST};
use ocmsrnaseq_lib::geomx::{
    apply_renames, discover_fastqs, plan_renames, write_mapping, NovogeneScheme, RenameScheme,
    WellMapScheme,
};
use std::path::Path;

use crate::commands::common;

pub use args::{Ini2FastqArgs, Novogene2GeomxArgs, RenameConfig};

/// Execute the `ini2fastq` command end-to-end.
pub fn run_ini2fastq(args: Ini2FastqArgs) -> Result<()> {
    info!("Loading AOI list from {}", args.config.display());
    let geomx = GeomxConfig::load(&args.config, &[AOI_LIST])
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let wells = WellMap::from_config(&geomx)?;
    info!("{} wells mapped to samples", wells.len());

    execute(args.common.into(), &WellMapScheme::new(&wells))
}

/// Execute the `novogene2geomx` command end-to-end.
pub fn run_novogene2geomx(args: Novogene2GeomxArgs) -> Result<()> {
    execute(args.common.into(), &NovogeneScheme)
}

fn execute<S: RenameScheme>(config: RenameConfig, scheme: &S) -> Result<()> {
    common::require_dir(&config.dir)?;

    let fastqs = discover_fastqs(&config.dir)?;
    if fastqs.is_empty() {
        warn!("No Novogene FASTQ files found in {}", config.dir.display());
    }
    info!("Found {} FASTQ files in {}", fastqs.len(), config.dir.display());

    let records = plan_renames(&fastqs, scheme)?;

    if config.dry_run {
        write_mapping(&records, Path::new("-"))?;
        info!("Dry run: {} renames planned, nothing written", records.len());
        return Ok(());
    }

    apply_renames(&records, &config.dir, &config.map, config.force)
        .with_context(|| format!("Failed to link renamed files in {}", config.dir.display()))?;
    Ok(())
}
