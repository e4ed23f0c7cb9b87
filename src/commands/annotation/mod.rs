//! Lookup tables for tximport built from GTF and cDNA FASTA files.

mod args;

use anyhow::{Context, Result};
use log::info;
use ocmsrnaseq_lib::annotation::{
    fasta, gtf, sort_unique, write_table, GENE_NAME_HEADER, TX2GENE_HEADER,
};
use ocmsrnaseq_lib::utils::{get_writer, open_text};
use std::path::PathBuf;

pub use args::{Gtf2GeneNamesArgs, Gtf2GenesArgs, Transcripts2GenesArgs};

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    }
}

/// Execute the `gtf2genes` command end-to-end.
pub fn run_gtf2genes(args: Gtf2GenesArgs) -> Result<()> {
    let reader = open_text(&args.input)?;
    let mut pairs = gtf::transcripts_to_genes(reader)
        .with_context(|| format!("Failed to parse GTF {}", describe(&args.input)))?;
    if args.unique {
        pairs = sort_unique(pairs);
    }
    info!("{} transcript/gene rows", pairs.len());

    let mut writer = get_writer(&args.output, false)?;
    write_table(&mut writer, &TX2GENE_HEADER, &pairs)?;
    Ok(())
}

/// Execute the `gtf2gene-names` command end-to-end.
pub fn run_gtf2gene_names(args: Gtf2GeneNamesArgs) -> Result<()> {
    let reader = open_text(&args.input)?;
    let names = gtf::gene_names(reader)
        .with_context(|| format!("Failed to parse GTF {}", describe(&args.input)))?;
    info!("{} genes", names.len());

    let mut writer = get_writer(&args.output, false)?;
    write_table(&mut writer, &GENE_NAME_HEADER, &names)?;
    Ok(())
}

/// Execute the `transcripts2genes` command end-to-end.
pub fn run_transcripts2genes(args: Transcripts2GenesArgs) -> Result<()> {
    let reader = open_text(&args.input)?;
    let pairs = fasta::transcripts_to_genes(reader)
        .with_context(|| format!("Failed to parse FASTA {}", describe(&args.input)))?;
    info!("{} transcripts", pairs.len());

    let mut writer = get_writer(&args.output, false)?;
    write_table(&mut writer, &TX2GENE_HEADER, &pairs)?;
    Ok(())
}
