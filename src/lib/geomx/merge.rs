//! Combining several GeoMx configurations into one.
//!
//! geomxngspipeline processes one `.ini` at a time. When a run is split over
//! several DSP configuration files, their AOI lists are unioned under the
//! first file's settings. All files must describe the same probe panel: the
//! `[Targets]` sections are compared as sets and any difference aborts the
//! merge before output is written.

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::{GeomxConfig, IniDocument, AOI_LIST, TARGETS};
use crate::core::error::{OcmsError, Result};
use crate::core::fs::{file_name_str, list_matching};

/// Glob selecting the configurations to merge.
pub const CONFIG_GLOB: &str = "*.ini";
/// Default name of the merged configuration.
pub const COMBINED_CONFIG: &str = "combined_config.ini";

/// List the `.ini` files of `dir` in name order, leaving out `output` so a
/// rerun does not merge its own previous result.
pub fn discover_configs(dir: &Path, output: &Path) -> Result<Vec<PathBuf>> {
    let output_name = file_name_str(output);
    let output_in_dir = output.parent().map_or(true, |p| {
        p.as_os_str().is_empty() || same_dir(p, dir)
    });

    Ok(list_matching(dir, CONFIG_GLOB)?
        .into_iter()
        .filter(|path| !(output_in_dir && file_name_str(path) == output_name))
        .collect())
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Load every file with both `[Targets]` and `[AOI_List]` required, then merge.
pub fn merge_config_files<P: AsRef<Path>>(paths: &[P]) -> Result<IniDocument> {
    let configs = paths
        .iter()
        .map(|p| GeomxConfig::load(p, &[TARGETS, AOI_LIST]))
        .collect::<Result<Vec<_>>>()?;
    merge_configs(configs)
}

/// Merge configurations into the first one.
///
/// AOI entries of later files overwrite earlier entries with the same key.
/// A single configuration comes back unchanged.
pub fn merge_configs(configs: Vec<GeomxConfig>) -> Result<IniDocument> {
    let mut configs = configs.into_iter();
    let mut base = configs
        .next()
        .ok_or_else(|| OcmsError::EmptyInput("no configuration files to merge".to_string()))?;
    let base_targets = base.target_set()?;

    for config in configs {
        if config.target_set()? != base_targets {
            return Err(OcmsError::TargetMismatch {
                base: base.path().display().to_string(),
                other: config.path().display().to_string(),
            });
        }

        let aoi = config.aoi_list()?;
        debug!("Adding {} AOIs from {}", aoi.len(), config.path().display());
        let merged = base.section_mut(AOI_LIST)?;
        for (key, value) in aoi.entries() {
            merged.set(key, value);
        }
    }

    info!(
        "Combined configuration holds {} AOIs",
        base.aoi_list()?.len()
    );
    Ok(base.into_document())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, text: &str) -> GeomxConfig {
        let doc = IniDocument::parse(text, name).unwrap();
        GeomxConfig::from_document(name, doc, &[TARGETS, AOI_LIST]).unwrap()
    }

    const TARGETS_A: &str = "[Targets]\nRTS1 = ACTB\nRTS2 = GAPDH\n";

    #[test]
    fn aoi_lists_are_unioned() {
        let cfg1 = config("cfg1.ini", &format!("[AOI_List]\nS1 = x\n{}", TARGETS_A));
        let cfg2 = config("cfg2.ini", &format!("[AOI_List]\nS2 = y\n{}", TARGETS_A));
        let merged = merge_configs(vec![cfg1, cfg2]).unwrap();

        let aoi: Vec<_> = merged.section(AOI_LIST).unwrap().entries().collect();
        assert_eq!(aoi, vec![("S1", "x"), ("S2", "y")]);
    }

    #[test]
    fn later_files_overwrite_colliding_aois() {
        let cfg1 = config("cfg1.ini", &format!("[AOI_List]\nS1 = x\nS2 = old\n{}", TARGETS_A));
        let cfg2 = config("cfg2.ini", &format!("[AOI_List]\nS2 = new\n{}", TARGETS_A));
        let merged = merge_configs(vec![cfg1, cfg2]).unwrap();
        assert_eq!(merged.section(AOI_LIST).unwrap().get("S2"), Some("new"));
        assert_eq!(merged.section(AOI_LIST).unwrap().len(), 2);
    }

    #[test]
    fn merging_with_itself_matches_single_file() {
        let text = format!("[Sequencing]\nrun = 1\n\n[AOI_List]\nS1 = x\n{}", TARGETS_A);
        let single = merge_configs(vec![config("a.ini", &text)]).unwrap();
        let doubled = merge_configs(vec![config("a.ini", &text), config("a.ini", &text)]).unwrap();
        assert_eq!(single, doubled);
        assert_eq!(single, IniDocument::parse(&text, "a.ini").unwrap());
    }

    #[test]
    fn one_differing_target_fails() {
        let cfg1 = config("cfg1.ini", &format!("[AOI_List]\nS1 = x\n{}", TARGETS_A));
        let cfg2 = config(
            "cfg2.ini",
            "[AOI_List]\nS2 = y\n[Targets]\nRTS1 = ACTB\nRTS2 = GAPDH\nRTS3 = B2M\n",
        );
        let err = merge_configs(vec![cfg1, cfg2]).unwrap_err();
        assert!(matches!(err, OcmsError::TargetMismatch { ref other, .. } if other == "cfg2.ini"));
    }

    #[test]
    fn partially_overlapping_targets_fail() {
        let cfg1 = config("cfg1.ini", &format!("[AOI_List]\nS1 = x\n{}", TARGETS_A));
        let cfg2 = config("cfg2.ini", "[AOI_List]\nS2 = y\n[Targets]\nRTS1 = ACTB\nRTS2 = B2M\n");
        assert!(merge_configs(vec![cfg1, cfg2]).is_err());
    }

    #[test]
    fn nothing_to_merge_is_an_error() {
        let err = merge_configs(Vec::new()).unwrap_err();
        assert!(matches!(err, OcmsError::EmptyInput(_)));
    }
}
