pub mod annotation;
pub mod common;
pub mod geomx;
pub mod qc;
pub mod rename;

pub use annotation::{
    run_gtf2gene_names, run_gtf2genes, run_transcripts2genes, Gtf2GeneNamesArgs, Gtf2GenesArgs,
    Transcripts2GenesArgs,
};
pub use geomx::{
    run_aoi_config, run_inis2ini, run_merge_summaries, AoiConfigArgs, Inis2IniArgs,
    MergeSummariesArgs,
};
pub use qc::{
    run_combine_failed, run_failed_dirs, run_find_failed, CombineFailedArgs, FailedDirsArgs,
    FindFailedArgs,
};
pub use rename::{run_ini2fastq, run_novogene2geomx, Ini2FastqArgs, Novogene2GeomxArgs};
