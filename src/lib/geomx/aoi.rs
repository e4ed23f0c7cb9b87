//! Per-AOI helpers around geomxngspipeline runs.

use log::{info, warn};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use crate::config::{GeomxConfig, IniDocument, AOI_LIST, PROCESSING};
use crate::core::error::Result;
use crate::core::fs::{list_matching, make_parent_dirs};
use crate::core::io::create_text;

/// Glob selecting per-AOI summary files in the DCC directory.
pub const SUMMARY_GLOB: &str = "*summary.txt";

/// Restrict `config` to a single AOI for a standalone pipeline invocation.
///
/// `[Processing_v2] threads` is forced to 1 so geomxngspipeline never asks
/// for console input, and `[AOI_List]` keeps only `aoi`.
pub fn single_aoi_config(mut config: GeomxConfig, aoi: &str) -> Result<IniDocument> {
    config.value(AOI_LIST, aoi)?;
    config.section_mut(PROCESSING)?.set("threads", "1");
    config.section_mut(AOI_LIST)?.retain(|key| key == aoi);
    Ok(config.into_document())
}

/// Concatenate every summary file of `dir` into `output`, in name order.
/// Returns the number of files merged.
pub fn merge_summaries(dir: &Path, output: &Path) -> Result<usize> {
    let inputs: Vec<_> = list_matching(dir, SUMMARY_GLOB)?
        .into_iter()
        .filter(|p| p.as_path() != output)
        .collect();
    if inputs.is_empty() {
        warn!("No {} files found in {}", SUMMARY_GLOB, dir.display());
    }

    make_parent_dirs(output)?;
    let mut writer = create_text(&Some(output))?;
    for input in &inputs {
        let mut reader = BufReader::new(File::open(input)?);
        io::copy(&mut reader, &mut writer)?;
    }
    writer.flush()?;

    info!(
        "Merged {} summaries into {}",
        inputs.len(),
        output.display()
    );
    Ok(inputs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::OcmsError;
    use std::fs;
    use tempfile::tempdir;

    const CONFIG: &str = "\
[Processing_v2]
threads = 8
trimming = true

[AOI_List]
DSP-1-A-A01 = a
DSP-1-A-B02 = b
";

    fn config() -> GeomxConfig {
        let doc = IniDocument::parse(CONFIG, "config.ini").unwrap();
        GeomxConfig::from_document("config.ini", doc, &[PROCESSING, AOI_LIST]).unwrap()
    }

    #[test]
    fn keeps_only_requested_aoi() {
        let doc = single_aoi_config(config(), "DSP-1-A-B02").unwrap();
        let aoi: Vec<_> = doc.section(AOI_LIST).unwrap().entries().collect();
        assert_eq!(aoi, vec![("DSP-1-A-B02", "b")]);

        let processing = doc.section(PROCESSING).unwrap();
        assert_eq!(processing.get("threads"), Some("1"));
        assert_eq!(processing.get("trimming"), Some("true"));
    }

    #[test]
    fn unknown_aoi_is_a_config_key_error() {
        let err = single_aoi_config(config(), "DSP-1-A-C03").unwrap_err();
        assert!(matches!(err, OcmsError::UnknownConfigKey { ref key, .. } if key == "DSP-1-A-C03"));
    }

    #[test]
    fn summaries_are_concatenated_in_name_order() {
        let dir = tempdir().unwrap();
        let dcc = dir.path().join("dcc.dir");
        fs::create_dir(&dcc).unwrap();
        fs::write(dcc.join("B02_summary.txt"), "b\n").unwrap();
        fs::write(dcc.join("A01_summary.txt"), "a\n").unwrap();
        fs::write(dcc.join("A01.dcc"), "ignored\n").unwrap();

        let output = dir.path().join("summary.dir").join("summary.txt");
        assert_eq!(merge_summaries(&dcc, &output).unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "a\nb\n");
    }
}
