//! Transcript and gene lookup tables for importing kallisto quantifications
//! with tximport.

pub mod fasta;
pub mod gtf;

use itertools::Itertools;
use serde::Serialize;
use std::io::Write;

use crate::core::error::Result;

/// Header of transcript-to-gene tables, as expected by tximport.
pub const TX2GENE_HEADER: [&str; 2] = ["TXNAME", "GENEID"];
/// Header of gene-to-name tables.
pub const GENE_NAME_HEADER: [&str; 2] = ["gene_id", "gene_name"];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TranscriptGene {
    pub transcript: String,
    pub gene: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneName {
    pub gene_id: String,
    pub gene_name: String,
}

/// Sort rows and drop duplicates.
pub fn sort_unique(pairs: Vec<TranscriptGene>) -> Vec<TranscriptGene> {
    pairs.into_iter().sorted().dedup().collect()
}

/// Write `rows` under `header` to a headerless tab-delimited writer.
pub fn write_table<W, T>(
    writer: &mut csv::Writer<W>,
    header: &[&str],
    rows: &[T],
) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(t: &str, g: &str) -> TranscriptGene {
        TranscriptGene {
            transcript: t.to_string(),
            gene: g.to_string(),
        }
    }

    #[test]
    fn unique_rows_are_sorted() {
        let rows = sort_unique(vec![pair("T2", "G1"), pair("T1", "G1"), pair("T2", "G1")]);
        assert_eq!(rows, vec![pair("T1", "G1"), pair("T2", "G1")]);
    }

    #[test]
    fn header_written_even_without_rows() {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(Vec::new());
        write_table::<_, TranscriptGene>(&mut writer, &TX2GENE_HEADER, &[]).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "TXNAME\tGENEID\n");
    }

    #[test]
    fn rows_follow_the_header() {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(Vec::new());
        write_table(&mut writer, &TX2GENE_HEADER, &[pair("T1", "G1")]).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "TXNAME\tGENEID\nT1\tG1\n");
    }
}
