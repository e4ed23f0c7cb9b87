use ocmsrnaseq_lib::geomx::MAPPING_LOG;
use std::path::PathBuf;
use structopt::StructOpt;

use crate::commands::common::resolve_in;

/// CLI arguments for the `ini2fastq` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "ini2fastq")]
pub struct Ini2FastqArgs {
    /// GeoMx DSP configuration whose [AOI_List] maps wells to samples.
    #[structopt(parse(from_os_str))]
    pub config: PathBuf,

    #[structopt(flatten)]
    pub common: RenameArgs,
}

/// CLI arguments for the `novogene2geomx` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "novogene2geomx")]
pub struct Novogene2GeomxArgs {
    #[structopt(flatten)]
    pub common: RenameArgs,
}

/// Options shared by both rename subcommands.
#[derive(Debug, Clone, StructOpt)]
pub struct RenameArgs {
    /// Directory holding the Novogene `*.fq.gz` files; links are created here.
    #[structopt(long, short = "d", default_value = ".", parse(from_os_str))]
    pub dir: PathBuf,

    /// Mapping log of `old<TAB>new` names, relative to `--dir` unless absolute.
    #[structopt(long, short = "m", default_value = MAPPING_LOG, parse(from_os_str))]
    pub map: PathBuf,

    /// Replace symlinks left by a previous run.
    #[structopt(long, short = "f")]
    pub force: bool,

    /// Print the planned mapping without writing anything.
    #[structopt(long, short = "n")]
    pub dry_run: bool,
}

/// Normalised configuration derived from [`RenameArgs`].
#[derive(Debug, Clone)]
pub struct RenameConfig {
    pub dir: PathBuf,
    pub map: PathBuf,
    pub force: bool,
    pub dry_run: bool,
}

impl From<RenameArgs> for RenameConfig {
    fn from(args: RenameArgs) -> RenameConfig {
        RenameConfig {
            map: resolve_in(&args.dir, &args.map),
            dir: args.dir,
            force: args.force,
            dry_run: args.dry_run,
        }
    }
}
