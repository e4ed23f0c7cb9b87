//! Minimal GTF reader for building tximport lookup tables.

use rustc_hash::FxHashSet;
use std::io::Read;

use super::{GeneName, TranscriptGene};
use crate::core::error::{OcmsError, Result};

const GTF_FIELDS: usize = 9;

/// One GTF line reduced to what the lookup tables need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtfRecord {
    pub seqname: String,
    pub feature: String,
    pub attributes: Vec<(String, String)>,
}

impl GtfRecord {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Split a GTF attribute column (`gene_id "G1"; transcript_id "T1";`) into
/// key/value pairs with the quotes removed.
pub fn parse_attributes(field: &str) -> Vec<(String, String)> {
    field
        .split(';')
        .filter_map(|attr| {
            let attr = attr.trim();
            let (key, value) = attr.split_once(char::is_whitespace)?;
            Some((key.to_string(), value.trim().trim_matches('"').to_string()))
        })
        .collect()
}

fn parse_record(row: csv::StringRecord) -> Result<GtfRecord> {
    if row.len() < GTF_FIELDS {
        let line = row.position().map_or(0, |p| p.line());
        return Err(OcmsError::Parse(format!(
            "GTF line {} has {} columns, expected {}",
            line,
            row.len(),
            GTF_FIELDS
        )));
    }
    Ok(GtfRecord {
        seqname: row[0].to_string(),
        feature: row[2].to_string(),
        attributes: parse_attributes(&row[8]),
    })
}

/// Stream the records of a GTF file one line at a time. `#` lines are
/// comments.
pub fn read_gtf<R: Read>(reader: R) -> impl Iterator<Item = Result<GtfRecord>> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .quoting(false)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .map(|result| parse_record(result?))
}

/// One transcript/gene pair per record carrying both identifiers.
/// Gene-level records have no transcript and are skipped.
pub fn transcripts_to_genes<R: Read>(reader: R) -> Result<Vec<TranscriptGene>> {
    let mut pairs = Vec::new();
    for record in read_gtf(reader) {
        let record = record?;
        if let (Some(transcript), Some(gene)) =
            (record.attribute("transcript_id"), record.attribute("gene_id"))
        {
            pairs.push(TranscriptGene {
                transcript: transcript.to_string(),
                gene: gene.to_string(),
            });
        }
    }
    Ok(pairs)
}

/// One row per distinct `gene_id` in first-seen order; a missing
/// `gene_name` becomes an empty string.
pub fn gene_names<R: Read>(reader: R) -> Result<Vec<GeneName>> {
    let mut seen = FxHashSet::default();
    let mut names = Vec::new();
    for record in read_gtf(reader) {
        let record = record?;
        let gene_id = match record.attribute("gene_id") {
            Some(id) => id,
            None => continue,
        };
        if !seen.insert(gene_id.to_string()) {
            continue;
        }
        names.push(GeneName {
            gene_id: gene_id.to_string(),
            gene_name: record.attribute("gene_name").unwrap_or_default().to_string(),
        });
    }
    Ok(names)
}
