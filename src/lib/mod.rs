//! ocmsrnaseq: file preparation for RNA-seq and GeoMx pipelines
//!
//! The library holds the data-munging steps that sit between the external
//! tools of the OCMS RNA-seq pipelines (FastQC, MultiQC, kallisto,
//! geomxngspipeline):
//! 1. Renaming Novogene FASTQ deliveries to the GeoMx/Illumina convention
//! 2. Merging and splitting GeoMx DSP configuration files
//! 3. Extracting failed samples from MultiQC FastQC reports
//! 4. Building transcript/gene lookup tables from GTF and FASTA annotations
//!
//! # Modules
//!
//! - [`annotation`]: tximport lookup tables
//! - [`config`]: `.ini` documents and typed GeoMx configurations
//! - [`core`]: errors, filesystem and IO helpers
//! - [`geomx`]: FASTQ renaming, configuration merging, per-AOI helpers
//! - [`qc`]: MultiQC failed-sample handling
//! - [`utils`]: shortcuts to the most used [`core`] helpers

pub mod annotation;
pub mod config;
pub mod core;
pub mod geomx;
pub mod qc;
pub mod utils;
