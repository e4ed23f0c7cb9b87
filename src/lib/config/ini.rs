//! Reading and writing of `.ini` configuration files.
//!
//! GeoMx NGS pipeline configurations are written in the Python `configparser`
//! dialect. [`IniDocument`] keeps sections and entries in file order and
//! preserves the case of keys, so a document that is read and written again
//! only changes in whitespace.
//!
//! Accepted syntax:
//! - `[section]` headers
//! - `key = value` or `key: value` entries (the first delimiter wins)
//! - full-line comments starting with `#` or `;`
//! - indented lines continuing the previous value, also across blank lines,
//!   which are kept in the value

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::error::{OcmsError, Result};

/// One `[name]` block of an [`IniDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl IniSection {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite an entry. Overwritten entries keep their position.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Drop every entry whose key fails the predicate.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.entries.retain(|(k, _)| keep(k));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An ordered, case-preserving `.ini` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse an `.ini` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse `.ini` text. `origin` names the source in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        let mut doc = IniDocument::new();
        let mut last_key: Option<String> = None;
        let mut blank_run = 0;

        let error = |line: usize, message: String| OcmsError::IniParse {
            file: origin.to_string(),
            line,
            message,
        };

        for (idx, raw) in text.lines().enumerate() {
            let lineno = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                blank_run += 1;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = raw.starts_with(|c: char| c.is_whitespace());
            if indented {
                if let (Some(key), Some(section)) = (&last_key, doc.sections.last_mut()) {
                    if let Some(entry) = section.entries.iter_mut().find(|(k, _)| k == key) {
                        if !entry.1.is_empty() {
                            entry.1.push_str(&"\n".repeat(blank_run + 1));
                        }
                        entry.1.push_str(trimmed);
                        blank_run = 0;
                        continue;
                    }
                }
            }
            blank_run = 0;

            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                let name = trimmed[1..trimmed.len() - 1].trim();
                if doc.section(name).is_some() {
                    return Err(error(lineno, format!("duplicate section [{}]", name)));
                }
                doc.sections.push(IniSection::new(name));
                last_key = None;
                continue;
            }

            let split_at = trimmed
                .find(|c| c == '=' || c == ':')
                .ok_or_else(|| error(lineno, format!("expected `key = value`, got `{}`", trimmed)))?;
            let key = trimmed[..split_at].trim();
            let value = trimmed[split_at + 1..].trim();
            if key.is_empty() {
                return Err(error(lineno, "entry without a key".to_string()));
            }

            let section = doc
                .sections
                .last_mut()
                .ok_or_else(|| error(lineno, "entry before the first section header".to_string()))?;
            if section.contains_key(key) {
                return Err(error(
                    lineno,
                    format!("duplicate key {} in section [{}]", key, section.name),
                ));
            }
            section.entries.push((key.to_string(), value.to_string()));
            last_key = Some(key.to_string());
        }

        Ok(doc)
    }

    pub fn sections(&self) -> impl Iterator<Item = &IniSection> {
        self.sections.iter()
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut IniSection> {
        self.sections.iter_mut().find(|s| s.name == name)
    }

    /// Return the named section, appending an empty one when absent.
    pub fn section_or_insert(&mut self, name: &str) -> &mut IniSection {
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(IniSection::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "{}", self)?;
        Ok(())
    }

    /// Serialise the document to `path`, replacing any existing file.
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = fs::File::create(path.as_ref())?;
        self.write_to(&mut file)?;
        file.flush()?;
        Ok(())
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{} = {}", key, value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "\
[Sequencing]
seqsetid = VH00121:3
# instrument run
Date: 2023-03-01

[AOI_List]
DSP-1001660012345-A-A01 = aoi_a01
DSP-1001660012345-A-B02 = aoi_b02

[Targets]
RTS0020877 = ACTB
RTS0020878 = GAPDH
";

    #[test]
    fn parses_sections_in_order() {
        let doc = IniDocument::parse(CONFIG, "config.ini").unwrap();
        let names: Vec<_> = doc.sections().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Sequencing", "AOI_List", "Targets"]);

        let seq = doc.section("Sequencing").unwrap();
        assert_eq!(seq.get("seqsetid"), Some("VH00121:3"));
        assert_eq!(seq.get("Date"), Some("2023-03-01"));
        assert_eq!(doc.section("Targets").unwrap().len(), 2);
    }

    #[test]
    fn keys_keep_their_case() {
        let doc = IniDocument::parse(CONFIG, "config.ini").unwrap();
        let aoi = doc.section("AOI_List").unwrap();
        assert!(aoi.contains_key("DSP-1001660012345-A-A01"));
        assert!(!aoi.contains_key("dsp-1001660012345-a-a01"));
    }

    #[test]
    fn serialised_document_parses_back_identically() {
        let doc = IniDocument::parse(CONFIG, "config.ini").unwrap();
        let text = doc.to_string();
        assert!(text.starts_with("[Sequencing]\nseqsetid = VH00121:3\nDate = 2023-03-01\n\n"));
        assert_eq!(IniDocument::parse(&text, "again").unwrap(), doc);
    }

    #[test]
    fn continuation_lines_join_values() {
        let doc = IniDocument::parse("[a]\nkey = one\n  two\n", "multi.ini").unwrap();
        assert_eq!(doc.section("a").unwrap().get("key"), Some("one\ntwo"));
        assert!(doc.to_string().contains("key = one\n\ttwo\n"));
    }

    #[test]
    fn rejects_entries_outside_sections() {
        let err = IniDocument::parse("key = value\n", "bad.ini").unwrap_err();
        assert!(matches!(err, OcmsError::IniParse { line: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = IniDocument::parse("[a]\nx = 1\nx = 2\n", "dup.ini").unwrap_err();
        assert!(matches!(err, OcmsError::IniParse { line: 3, .. }));
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut section = IniSection::new("Processing_v2");
        section.set("threads", "8");
        section.set("trimming", "true");
        section.set("threads", "1");
        let entries: Vec<_> = section.entries().collect();
        assert_eq!(entries, vec![("threads", "1"), ("trimming", "true")]);
    }

    #[test]
    fn blank_lines_inside_values_are_kept() {
        let doc = IniDocument::parse("[a]\nkey = one\n\n  two\nnext = 2\n", "blank.ini").unwrap();
        let section = doc.section("a").unwrap();
        assert_eq!(section.get("key"), Some("one\n\ntwo"));
        assert_eq!(section.get("next"), Some("2"));
        assert_eq!(IniDocument::parse(&doc.to_string(), "again").unwrap(), doc);
    }

    #[test]
    fn rejects_duplicate_sections() {
        let err = IniDocument::parse("[a]\n[a]\n", "dup.ini").unwrap_err();
        assert!(matches!(err, OcmsError::IniParse { line: 2, .. }));
    }
}
