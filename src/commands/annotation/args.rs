use std::path::PathBuf;
use structopt::StructOpt;

/// CLI arguments for the `gtf2genes` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "gtf2genes")]
pub struct Gtf2GenesArgs {
    /// GTF annotation, optionally gzipped. Reads stdin when omitted or `-`.
    #[structopt(parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Output table. Writes stdout when omitted or `-`.
    #[structopt(long, short = "o", parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Sort rows and drop duplicate transcript/gene pairs.
    #[structopt(long, short = "u")]
    pub unique: bool,
}

/// CLI arguments for the `gtf2gene-names` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "gtf2gene-names")]
pub struct Gtf2GeneNamesArgs {
    /// GTF annotation, optionally gzipped. Reads stdin when omitted or `-`.
    #[structopt(parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Output table. Writes stdout when omitted or `-`.
    #[structopt(long, short = "o", parse(from_os_str))]
    pub output: Option<PathBuf>,
}

/// CLI arguments for the `transcripts2genes` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "transcripts2genes")]
pub struct Transcripts2GenesArgs {
    /// Ensembl cDNA FASTA, optionally gzipped. Reads stdin when omitted or `-`.
    #[structopt(parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Output table. Writes stdout when omitted or `-`.
    #[structopt(long, short = "o", parse(from_os_str))]
    pub output: Option<PathBuf>,
}
