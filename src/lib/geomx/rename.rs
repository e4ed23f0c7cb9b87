//! Renaming of Novogene FASTQ deliveries into GeoMx/Illumina file names.
//!
//! Novogene delivers reads as `<well>_<...>_L<lane>_<read>.fq.gz`, while
//! geomxngspipeline expects bcl2fastq-style names and locates every sample
//! through its `L001` R1 file. Renaming therefore happens in two steps:
//!
//! 1. [`plan_renames`] parses the listing, resolves sample names through a
//!    [`RenameScheme`] and relabels the lowest lane of every sample `L001`.
//!    Nothing touches the filesystem, and every error is raised here.
//! 2. [`apply_renames`] writes the `old<TAB>new` mapping log and creates the
//!    symbolic links.

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::WellMap;
use crate::core::error::{OcmsError, Result};
use crate::core::fs::{absolute_path, file_name_str, list_matching, symlink_absolute};
use crate::core::io::get_writer;

lazy_static! {
    static ref NOVOGENE_FASTQ_REGEX: Regex =
        Regex::new(r"^([^_]+)_(?:.*_)?(L(\d+))_([12])\.fq\.gz$").unwrap();
}

/// Glob matching raw Novogene read files.
pub const NOVOGENE_FASTQ_GLOB: &str = "*.fq.gz";
/// Default name of the rename mapping log.
pub const MAPPING_LOG: &str = "file_map.txt";
/// Label given to the lowest lane of every sample.
pub const FIRST_LANE: &str = "L001";

/// A parsed Novogene read file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovogeneFastq {
    pub path: PathBuf,
    /// Leading field of the file name: the plate well for GeoMx runs.
    pub sample: String,
    pub lane: u32,
    /// Lane exactly as written, e.g. `L1` or `L01`.
    pub lane_label: String,
    pub read: u8,
}

impl NovogeneFastq {
    /// Attempt to parse `path` as a Novogene FASTQ name.
    pub fn new(path: impl AsRef<Path>) -> Option<NovogeneFastq> {
        let path = path.as_ref();
        let cap = NOVOGENE_FASTQ_REGEX.captures(file_name_str(path))?;
        Some(NovogeneFastq {
            path: path.to_path_buf(),
            sample: cap[1].to_string(),
            lane_label: cap[2].to_string(),
            lane: cap[3].parse().ok()?,
            read: cap[4].parse().ok()?,
        })
    }

    pub fn file_name(&self) -> &str {
        file_name_str(&self.path)
    }
}

/// Decides the sample name and file name layout of renamed reads.
pub trait RenameScheme {
    /// Canonical sample name for a read file.
    fn sample_name(&self, fastq: &NovogeneFastq) -> Result<String>;

    /// New file name from the canonical sample, the relabelled lane and the
    /// read index.
    fn file_name(&self, sample: &str, lane: &str, read: u8) -> String;
}

/// Names samples through the AOI list of a GeoMx configuration and appends
/// the bcl2fastq `_001` chunk suffix.
pub struct WellMapScheme<'a> {
    wells: &'a WellMap,
}

impl<'a> WellMapScheme<'a> {
    pub fn new(wells: &'a WellMap) -> Self {
        Self { wells }
    }
}

impl RenameScheme for WellMapScheme<'_> {
    fn sample_name(&self, fastq: &NovogeneFastq) -> Result<String> {
        self.wells
            .sample_for(&fastq.sample)
            .map(str::to_string)
            .ok_or_else(|| OcmsError::UnknownWell {
                well: fastq.sample.clone(),
                file: fastq.file_name().to_string(),
            })
    }

    fn file_name(&self, sample: &str, lane: &str, read: u8) -> String {
        format!("{}_{}_R{}_001.fastq.gz", sample, lane, read)
    }
}

/// Keeps the sample name from the file name as is.
pub struct NovogeneScheme;

impl RenameScheme for NovogeneScheme {
    fn sample_name(&self, fastq: &NovogeneFastq) -> Result<String> {
        Ok(fastq.sample.clone())
    }

    fn file_name(&self, sample: &str, lane: &str, read: u8) -> String {
        format!("{}_{}_R{}.fastq.gz", sample, lane, read)
    }
}

/// One planned rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    #[serde(skip)]
    pub source: PathBuf,
    pub old_name: String,
    pub new_name: String,
}

/// Find and parse the Novogene read files in `dir`, sorted by name.
/// Files that match the glob but not the naming convention are skipped.
pub fn discover_fastqs<P: AsRef<Path>>(dir: P) -> Result<Vec<NovogeneFastq>> {
    let mut fastqs = Vec::new();
    for path in list_matching(dir, NOVOGENE_FASTQ_GLOB)? {
        match NovogeneFastq::new(&path) {
            Some(fastq) => fastqs.push(fastq),
            None => warn!("Skipping {}: not a <sample>_L<lane>_<read>.fq.gz name", path.display()),
        }
    }
    Ok(fastqs)
}

/// Lane label for `lane` given the lowest lane of its sample.
fn relabel_lane(lane: u32, lowest: u32) -> String {
    if lane == lowest {
        FIRST_LANE.to_string()
    } else {
        format!("L{:03}", lane)
    }
}

/// Plan the renames of `fastqs` without touching the filesystem.
///
/// Records come out grouped by sample in sorted order, keeping the input
/// order within a sample.
pub fn plan_renames<S: RenameScheme + ?Sized>(
    fastqs: &[NovogeneFastq],
    scheme: &S,
) -> Result<Vec<RenameRecord>> {
    let mut groups: BTreeMap<&str, Vec<(&NovogeneFastq, String)>> = BTreeMap::new();
    for fastq in fastqs {
        let sample_name = scheme.sample_name(fastq)?;
        groups
            .entry(fastq.sample.as_str())
            .or_default()
            .push((fastq, sample_name));
    }

    let mut seen = FxHashSet::default();
    let mut records = Vec::with_capacity(fastqs.len());
    for (sample, members) in groups {
        let lowest = match members.iter().map(|(f, _)| f.lane).min() {
            Some(lane) => lane,
            None => continue,
        };

        let tied: BTreeSet<&str> = members
            .iter()
            .filter(|(f, _)| f.lane == lowest)
            .map(|(f, _)| f.lane_label.as_str())
            .collect();
        if tied.len() > 1 {
            return Err(OcmsError::LaneTie {
                sample: sample.to_string(),
                lanes: tied.into_iter().collect::<Vec<_>>().join(", "),
            });
        }

        for (fastq, sample_name) in members {
            let lane = relabel_lane(fastq.lane, lowest);
            let new_name = scheme.file_name(&sample_name, &lane, fastq.read);
            if !seen.insert(new_name.clone()) {
                return Err(OcmsError::DuplicateTarget { name: new_name });
            }
            debug!("{} -> {}", fastq.file_name(), new_name);
            records.push(RenameRecord {
                source: fastq.path.clone(),
                old_name: fastq.file_name().to_string(),
                new_name,
            });
        }
    }

    Ok(records)
}

/// Write the `old<TAB>new` mapping log.
pub fn write_mapping<P: AsRef<Path>>(records: &[RenameRecord], path: P) -> Result<()> {
    let mut writer = get_writer(&Some(path.as_ref()), false)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the mapping log to `map_path` and create a symlink in `dir` for
/// every record.
///
/// Sources and destinations are checked before anything is written so a
/// missing source or an existing destination leaves no partial output behind.
pub fn apply_renames(
    records: &[RenameRecord],
    dir: &Path,
    map_path: &Path,
    force: bool,
) -> Result<()> {
    let mut sources = Vec::with_capacity(records.len());
    for record in records {
        let source = absolute_path(&record.source)?;
        fs::metadata(&source)?;
        sources.push(source);

        let link = dir.join(&record.new_name);
        if let Ok(meta) = fs::symlink_metadata(&link) {
            if !force || !meta.file_type().is_symlink() {
                return Err(OcmsError::DestinationExists(link));
            }
        }
    }

    write_mapping(records, map_path)?;
    for (record, source) in records.iter().zip(&sources) {
        symlink_absolute(source, &dir.join(&record.new_name), force)?;
    }
    info!(
        "Linked {} files; mapping written to {}",
        records.len(),
        map_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fastq(name: &str) -> NovogeneFastq {
        NovogeneFastq::new(name).unwrap()
    }

    fn wells(pairs: &[(&str, &str)]) -> WellMap {
        let mut map = WellMap::default();
        for (well, sample) in pairs {
            map.insert(*well, *sample);
        }
        map
    }

    fn new_names(records: &[RenameRecord]) -> Vec<&str> {
        records.iter().map(|r| r.new_name.as_str()).collect()
    }

    #[test]
    fn parses_novogene_names() {
        let f = fastq("A01_CKDL230001234-1A_HXXXXDSX5_L3_2.fq.gz");
        assert_eq!(f.sample, "A01");
        assert_eq!(f.lane, 3);
        assert_eq!(f.lane_label, "L3");
        assert_eq!(f.read, 2);

        assert!(NovogeneFastq::new("A01_L1_3.fq.gz").is_none());
        assert!(NovogeneFastq::new("A01_L1_1.fastq.gz").is_none());
        assert!(NovogeneFastq::new("A01_1.fq.gz").is_none());
    }

    #[test]
    fn single_lane_becomes_l001() {
        let map = wells(&[("A01", "S1-T1-R1-1")]);
        let records = plan_renames(&[fastq("A01_L1_1.fq.gz")], &WellMapScheme::new(&map)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].old_name, "A01_L1_1.fq.gz");
        assert_eq!(records[0].new_name, "S1-T1-R1-1_L001_R1_001.fastq.gz");
    }

    #[test]
    fn lowest_lane_is_relabelled_per_sample() {
        let map = wells(&[("A01", "DSP-1-A-A01"), ("B02", "DSP-1-A-B02")]);
        let input = [
            fastq("A01_L10_1.fq.gz"),
            fastq("A01_L2_1.fq.gz"),
            fastq("A01_L2_2.fq.gz"),
            fastq("B02_L4_1.fq.gz"),
        ];
        let records = plan_renames(&input, &WellMapScheme::new(&map)).unwrap();
        assert_eq!(
            new_names(&records),
            vec![
                "DSP-1-A-A01_L010_R1_001.fastq.gz",
                "DSP-1-A-A01_L001_R1_001.fastq.gz",
                "DSP-1-A-A01_L001_R2_001.fastq.gz",
                "DSP-1-A-B02_L001_R1_001.fastq.gz",
            ]
        );
    }

    #[test]
    fn novogene_scheme_keeps_sample_and_drops_chunk() {
        let input = [fastq("S7_L1_1.fq.gz"), fastq("S7_L2_1.fq.gz")];
        let records = plan_renames(&input, &NovogeneScheme).unwrap();
        assert_eq!(
            new_names(&records),
            vec!["S7_L001_R1.fastq.gz", "S7_L002_R1.fastq.gz"]
        );
    }

    #[test]
    fn unknown_well_names_the_file() {
        let map = wells(&[("A01", "DSP-1-A-A01")]);
        let input = [fastq("A01_L1_1.fq.gz"), fastq("H12_L1_1.fq.gz")];
        let err = plan_renames(&input, &WellMapScheme::new(&map)).unwrap_err();
        match err {
            OcmsError::UnknownWell { well, file } => {
                assert_eq!(well, "H12");
                assert_eq!(file, "H12_L1_1.fq.gz");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn tied_lowest_lanes_are_an_error() {
        let input = [fastq("S1_L1_1.fq.gz"), fastq("S1_L01_1.fq.gz")];
        let err = plan_renames(&input, &NovogeneScheme).unwrap_err();
        assert!(matches!(err, OcmsError::LaneTie { ref sample, .. } if sample == "S1"));
    }

    #[test]
    fn colliding_targets_are_an_error() {
        let input = [fastq("S1_L0_1.fq.gz"), fastq("S1_L1_1.fq.gz")];
        let err = plan_renames(&input, &NovogeneScheme).unwrap_err();
        assert!(matches!(err, OcmsError::DuplicateTarget { .. }));
    }

    #[test]
    fn replanning_gives_the_same_mapping() {
        let input = [
            fastq("S1_L1_1.fq.gz"),
            fastq("S1_L1_2.fq.gz"),
            fastq("S1_L3_1.fq.gz"),
        ];
        let first = plan_renames(&input, &NovogeneScheme).unwrap();
        let second = plan_renames(&input, &NovogeneScheme).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].new_name, "S1_L001_R1.fastq.gz");
    }

    #[test]
    fn relabelling_keeps_existing_l001_labels() {
        let input = [
            fastq("S1_L001_1.fq.gz"),
            fastq("S1_L001_2.fq.gz"),
            fastq("S1_L002_1.fq.gz"),
        ];
        let records = plan_renames(&input, &NovogeneScheme).unwrap();
        assert_eq!(
            new_names(&records),
            vec![
                "S1_L001_R1.fastq.gz",
                "S1_L001_R2.fastq.gz",
                "S1_L002_R1.fastq.gz",
            ]
        );

        let renamed: Vec<_> = records
            .iter()
            .map(|r| fastq(&r.new_name.replace("_R", "_").replace(".fastq.gz", ".fq.gz")))
            .collect();
        let again = plan_renames(&renamed, &NovogeneScheme).unwrap();
        assert_eq!(new_names(&again), new_names(&records));
    }

    proptest! {
        #[test]
        fn distinct_reads_never_collide(
            triples in prop::collection::btree_set((0usize..6, 1u32..9, 1u8..3), 1..40)
        ) {
            let well_names = ["A01", "A02", "B01", "B02", "C11", "H12"];
            let map = wells(&[
                ("A01", "DSP-1-A-A01"),
                ("A02", "DSP-1-A-A02"),
                ("B01", "DSP-1-B-B01"),
                ("B02", "DSP-1-B-B02"),
                ("C11", "DSP-2-C-C11"),
                ("H12", "DSP-2-H-H12"),
            ]);
            let input: Vec<_> = triples
                .iter()
                .map(|(w, lane, read)| fastq(&format!("{}_L{}_{}.fq.gz", well_names[*w], lane, read)))
                .collect();

            let records = plan_renames(&input, &WellMapScheme::new(&map)).unwrap();
            prop_assert_eq!(records.len(), input.len());
            let unique: FxHashSet<_> = records.iter().map(|r| r.new_name.clone()).collect();
            prop_assert_eq!(unique.len(), records.len());
        }
    }
}
