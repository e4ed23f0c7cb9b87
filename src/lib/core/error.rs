//! Error types for the ocmsrnaseq library

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcmsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Unknown well {well} in {file}: no matching AOI in the configuration")]
    UnknownWell { well: String, file: String },

    #[error("Targets in {other} do not match targets in {base}")]
    TargetMismatch { base: String, other: String },

    #[error("Unknown configuration key [{section}] {key} in {file}")]
    UnknownConfigKey {
        section: String,
        key: String,
        file: String,
    },

    #[error("Missing section [{section}] in {file}")]
    MissingSection { section: String, file: String },

    #[error("Invalid AOI key {0}: expected at least 4 hyphen-delimited fields")]
    InvalidAoiKey(String),

    #[error("Well {well} is assigned to more than one AOI")]
    DuplicateWell { well: String },

    #[error("Sample {sample} has several lanes tied for lowest lane: {lanes}")]
    LaneTie { sample: String, lanes: String },

    #[error("More than one input file would be renamed to {name}")]
    DuplicateTarget { name: String },

    #[error("{file}:{line}: {message}")]
    IniParse {
        file: String,
        line: usize,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("No valid FastQC directories found for the failed samples")]
    NoFastqcDirectories,

    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, OcmsError>;

impl From<glob::GlobError> for OcmsError {
    fn from(err: glob::GlobError) -> Self {
        OcmsError::Io(err.into_error())
    }
}
