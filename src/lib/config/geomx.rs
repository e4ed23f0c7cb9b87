//! Typed access to GeoMx NGS pipeline configuration files.
//!
//! A [`GeomxConfig`] checks the sections a caller needs once, when the file
//! is loaded. Entries are then read through accessors that report an absent
//! key as [`OcmsError::UnknownConfigKey`].

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::ini::{IniDocument, IniSection};
use crate::core::error::{OcmsError, Result};

/// Per-AOI rows, keyed by AOI identifier.
pub const AOI_LIST: &str = "AOI_List";
/// Probe/target definitions shared by every AOI of a run.
pub const TARGETS: &str = "Targets";
/// Processing options read by geomxngspipeline.
pub const PROCESSING: &str = "Processing_v2";

/// A GeoMx `.ini` file with validated sections.
#[derive(Debug, Clone)]
pub struct GeomxConfig {
    path: PathBuf,
    document: IniDocument,
}

impl GeomxConfig {
    /// Load `path`, failing with [`OcmsError::MissingSection`] when any of
    /// `required` is absent.
    pub fn load<P: AsRef<Path>>(path: P, required: &[&str]) -> Result<Self> {
        let path = path.as_ref();
        let document = IniDocument::from_path(path)?;
        Self::from_document(path, document, required)
    }

    pub fn from_document<P: AsRef<Path>>(
        path: P,
        document: IniDocument,
        required: &[&str],
    ) -> Result<Self> {
        let config = GeomxConfig {
            path: path.as_ref().to_path_buf(),
            document,
        };
        for name in required {
            config.section(name)?;
        }
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    pub fn document(&self) -> &IniDocument {
        &self.document
    }

    pub fn into_document(self) -> IniDocument {
        self.document
    }

    pub fn section(&self, name: &str) -> Result<&IniSection> {
        self.document
            .section(name)
            .ok_or_else(|| OcmsError::MissingSection {
                section: name.to_string(),
                file: self.origin(),
            })
    }

    pub fn section_mut(&mut self, name: &str) -> Result<&mut IniSection> {
        let origin = self.origin();
        self.document
            .section_mut(name)
            .ok_or(OcmsError::MissingSection {
                section: name.to_string(),
                file: origin,
            })
    }

    /// Read one entry, reporting an absent key as a typed error.
    pub fn value(&self, section: &str, key: &str) -> Result<&str> {
        self.section(section)?
            .get(key)
            .ok_or_else(|| OcmsError::UnknownConfigKey {
                section: section.to_string(),
                key: key.to_string(),
                file: self.origin(),
            })
    }

    pub fn aoi_list(&self) -> Result<&IniSection> {
        self.section(AOI_LIST)
    }

    /// The `[Targets]` section as a set of key/value pairs.
    pub fn target_set(&self) -> Result<BTreeSet<(String, String)>> {
        Ok(self
            .section(TARGETS)?
            .entries()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}

/// Plate well to canonical sample name lookup built from `[AOI_List]`.
#[derive(Debug, Clone, Default)]
pub struct WellMap {
    wells: FxHashMap<String, String>,
}

impl WellMap {
    /// Build the map from AOI keys such as `dsp-1001660012345-a-a01`.
    ///
    /// The sample name is the first four hyphen-delimited fields in upper
    /// case, the well is the last field in upper case.
    pub fn from_config(config: &GeomxConfig) -> Result<Self> {
        Self::from_aoi_keys(config.aoi_list()?.keys())
    }

    pub fn from_aoi_keys<'a, I>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut wells = FxHashMap::default();
        for key in keys {
            let (well, sample) = parse_aoi_key(key)?;
            if wells.insert(well.clone(), sample).is_some() {
                return Err(OcmsError::DuplicateWell { well });
            }
        }
        Ok(WellMap { wells })
    }

    pub fn insert<W: Into<String>, S: Into<String>>(&mut self, well: W, sample: S) {
        self.wells.insert(well.into().to_uppercase(), sample.into());
    }

    /// Case-insensitive lookup of a well.
    pub fn sample_for(&self, well: &str) -> Option<&str> {
        self.wells.get(&well.to_uppercase()).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

/// Split an AOI key into `(well, sample)`.
fn parse_aoi_key(key: &str) -> Result<(String, String)> {
    let fields: Vec<&str> = key.trim().split('-').collect();
    if fields.len() < 4 || fields.iter().any(|f| f.is_empty()) {
        return Err(OcmsError::InvalidAoiKey(key.to_string()));
    }
    let sample = fields[..4]
        .iter()
        .map(|f| f.to_uppercase())
        .collect::<Vec<_>>()
        .join("-");
    let well = fields[fields.len() - 1].to_uppercase();
    Ok((well, sample))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str, required: &[&str]) -> Result<GeomxConfig> {
        let doc = IniDocument::parse(text, "test.ini")?;
        GeomxConfig::from_document("test.ini", doc, required)
    }

    #[test]
    fn aoi_keys_map_wells_to_samples() {
        let map = WellMap::from_aoi_keys(["dsp-1001660012345-a-a01", "DSP-1001660012345-A-B02"])
            .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.sample_for("A01"), Some("DSP-1001660012345-A-A01"));
        assert_eq!(map.sample_for("b02"), Some("DSP-1001660012345-A-B02"));
        assert_eq!(map.sample_for("C03"), None);
    }

    #[test]
    fn short_aoi_keys_are_rejected() {
        let err = WellMap::from_aoi_keys(["dsp-a01"]).unwrap_err();
        assert!(matches!(err, OcmsError::InvalidAoiKey(_)));
    }

    #[test]
    fn duplicate_wells_are_rejected() {
        let err = WellMap::from_aoi_keys(["dsp-1-a-a01", "dsp-2-b-A01"]).unwrap_err();
        assert!(matches!(err, OcmsError::DuplicateWell { ref well } if well == "A01"));
    }

    #[test]
    fn missing_required_section_fails_at_load() {
        let err = config("[AOI_List]\nx-y-z-a01 = 1\n", &[AOI_LIST, TARGETS]).unwrap_err();
        assert!(matches!(err, OcmsError::MissingSection { ref section, .. } if section == TARGETS));
    }

    #[test]
    fn absent_key_is_a_typed_error() {
        let cfg = config("[Processing_v2]\nthreads = 4\n", &[PROCESSING]).unwrap();
        assert_eq!(cfg.value(PROCESSING, "threads").unwrap(), "4");
        let err = cfg.value(PROCESSING, "trimming").unwrap_err();
        assert!(matches!(err, OcmsError::UnknownConfigKey { ref key, .. } if key == "trimming"));
    }

    #[test]
    fn target_sets_ignore_order() {
        let a = config("[Targets]\nRTS1 = ACTB\nRTS2 = GAPDH\n", &[TARGETS]).unwrap();
        let b = config("[Targets]\nRTS2 = GAPDH\nRTS1 = ACTB\n", &[TARGETS]).unwrap();
        assert_eq!(a.target_set().unwrap(), b.target_set().unwrap());
    }
}
