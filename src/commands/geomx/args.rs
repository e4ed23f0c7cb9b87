use ocmsrnaseq_lib::geomx::COMBINED_CONFIG;
use std::path::PathBuf;
use structopt::StructOpt;

/// CLI arguments for the `inis2ini` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "inis2ini")]
pub struct Inis2IniArgs {
    /// Configurations to merge, in order. Defaults to every `*.ini` in `--dir`.
    #[structopt(parse(from_os_str))]
    pub inputs: Vec<PathBuf>,

    /// Directory searched for `*.ini` files when no inputs are given.
    #[structopt(long, short = "d", default_value = ".", parse(from_os_str))]
    pub dir: PathBuf,

    /// Combined configuration, relative to `--dir` unless absolute.
    #[structopt(long, short = "o", default_value = COMBINED_CONFIG, parse(from_os_str))]
    pub output: PathBuf,
}

/// CLI arguments for the `aoi-config` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "aoi-config")]
pub struct AoiConfigArgs {
    /// GeoMx DSP configuration to restrict.
    #[structopt(parse(from_os_str))]
    pub config: PathBuf,

    /// AOI key to keep in [AOI_List].
    #[structopt(long, short = "a")]
    pub aoi: String,

    /// Output configuration (`-` for stdout).
    #[structopt(long, short = "o", default_value = "-", parse(from_os_str))]
    pub output: PathBuf,
}

/// CLI arguments for the `merge-summaries` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "merge-summaries")]
pub struct MergeSummariesArgs {
    /// Directory holding per-AOI `*summary.txt` files.
    #[structopt(long, short = "d", default_value = "dcc.dir", parse(from_os_str))]
    pub dir: PathBuf,

    /// Merged summary.
    #[structopt(long, short = "o", default_value = "summary.dir/summary.txt", parse(from_os_str))]
    pub output: PathBuf,
}
