//! ocmsrnaseq - helper tools for the OCMS RNA-seq and GeoMx pipelines
//!
//! Small command line utilities that sit between sequencing providers,
//! the NanoString GeoMx NGS pipeline, MultiQC and tximport.
//!
//! # Tools
//!
//! - `ini2fastq`: link Novogene FASTQ files under names taken from a DSP configuration
//! - `novogene2geomx`: link Novogene FASTQ files under geomxngspipeline names
//! - `inis2ini`: merge several DSP configurations into one
//! - `aoi-config`: write a configuration restricted to a single AOI
//! - `merge-summaries`: concatenate per-AOI pipeline summaries
//! - `find-failed`: list samples failing each FastQC metric in a MultiQC report
//! - `combine-failed`: combine per-metric failed-sample lists
//! - `failed-dirs`: print the FastQC directories of failed samples
//! - `gtf2genes`: transcript-to-gene table from a GTF
//! - `gtf2gene-names`: gene-to-name table from a GTF
//! - `transcripts2genes`: transcript-to-gene table from an Ensembl cDNA FASTA
//!
//! # Usage
//!
//! ```bash
//! # Rename FASTQs in the current directory using the AOI list of config.ini
//! ocmsrnaseq ini2fastq config.ini
//!
//! # Merge every .ini of a directory
//! ocmsrnaseq inis2ini --dir configs
//!
//! # Build a tximport lookup table
//! ocmsrnaseq gtf2genes Homo_sapiens.GRCh38.gtf.gz --unique -o tx2gene.tsv
//! ```

extern crate ocmsrnaseq_lib;
pub mod commands;
use anyhow::Result;
use env_logger::Env;
use log::*;
use ocmsrnaseq_lib::utils;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case", author, about)]
/// Helper tools for the OCMS RNA-seq and GeoMx pipelines
struct Args {
    #[structopt(subcommand)]
    subcommand: Subcommand,
}

#[derive(StructOpt)]
enum Subcommand {
    /// Link FASTQ files under sample names taken from a DSP configuration
    #[structopt(name = "ini2fastq")]
    Ini2Fastq(commands::Ini2FastqArgs),
    /// Link Novogene FASTQ files under geomxngspipeline names
    #[structopt(name = "novogene2geomx")]
    Novogene2Geomx(commands::Novogene2GeomxArgs),
    /// Merge DSP configuration files into one
    #[structopt(name = "inis2ini")]
    Inis2Ini(commands::Inis2IniArgs),
    /// Write a configuration restricted to a single AOI
    #[structopt(name = "aoi-config")]
    AoiConfig(commands::AoiConfigArgs),
    /// Concatenate per-AOI pipeline summaries
    #[structopt(name = "merge-summaries")]
    MergeSummaries(commands::MergeSummariesArgs),
    /// List samples failing each FastQC metric of a MultiQC report
    #[structopt(name = "find-failed")]
    FindFailed(commands::FindFailedArgs),
    /// Combine per-metric failed-sample lists
    #[structopt(name = "combine-failed")]
    CombineFailed(commands::CombineFailedArgs),
    /// Print the FastQC directories of failed samples
    #[structopt(name = "failed-dirs")]
    FailedDirs(commands::FailedDirsArgs),
    /// Transcript-to-gene table from a GTF
    #[structopt(name = "gtf2genes")]
    Gtf2Genes(commands::Gtf2GenesArgs),
    /// Gene-to-name table from a GTF
    #[structopt(name = "gtf2gene-names")]
    Gtf2GeneNames(commands::Gtf2GeneNamesArgs),
    /// Transcript-to-gene table from an Ensembl cDNA FASTA
    #[structopt(name = "transcripts2genes")]
    Transcripts2Genes(commands::Transcripts2GenesArgs),
}

impl Subcommand {
    fn run(self) -> Result<()> {
        match self {
            Subcommand::Ini2Fastq(args) => commands::run_ini2fastq(args)?,
            Subcommand::Novogene2Geomx(args) => commands::run_novogene2geomx(args)?,
            Subcommand::Inis2Ini(args) => commands::run_inis2ini(args)?,
            Subcommand::AoiConfig(args) => commands::run_aoi_config(args)?,
            Subcommand::MergeSummaries(args) => commands::run_merge_summaries(args)?,
            Subcommand::FindFailed(args) => commands::run_find_failed(args)?,
            Subcommand::CombineFailed(args) => commands::run_combine_failed(args)?,
            Subcommand::FailedDirs(args) => commands::run_failed_dirs(args)?,
            Subcommand::Gtf2Genes(args) => commands::run_gtf2genes(args)?,
            Subcommand::Gtf2GeneNames(args) => commands::run_gtf2gene_names(args)?,
            Subcommand::Transcripts2Genes(args) => commands::run_transcripts2genes(args)?,
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = Args::from_args().subcommand.run() {
        if utils::is_broken_pipe(&err) {
            std::process::exit(0);
        }
        error!("{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
