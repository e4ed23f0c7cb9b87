//! GeoMx NGS pipeline input preparation.
//!
//! - [`rename`]: Novogene FASTQ names to the GeoMx/Illumina convention
//! - [`merge`]: combining several DSP configuration files
//! - [`aoi`]: single-AOI configurations and summary merging

pub mod aoi;
pub mod merge;
pub mod rename;

pub use aoi::{merge_summaries, single_aoi_config};
pub use merge::{discover_configs, merge_config_files, merge_configs, COMBINED_CONFIG};
pub use rename::{
    apply_renames, discover_fastqs, plan_renames, write_mapping, NovogeneFastq, NovogeneScheme,
    RenameRecord, RenameScheme, WellMapScheme, MAPPING_LOG,
};
