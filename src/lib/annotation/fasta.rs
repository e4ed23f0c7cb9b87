//! Transcript-to-gene pairs from Ensembl cDNA FASTA headers.

use bio::io::fasta;
use std::io::Read;

use super::TranscriptGene;
use crate::core::error::{OcmsError, Result};

const GENE_TAG: &str = "gene:";

/// Read `>ENST... cdna ... gene:ENSG... ...` headers into transcript/gene
/// pairs. A header without a `gene:` token is a parse error.
pub fn transcripts_to_genes<R: Read>(reader: R) -> Result<Vec<TranscriptGene>> {
    let mut pairs = Vec::new();
    for result in fasta::Reader::new(reader).records() {
        let record = result?;
        let transcript = record.id();
        let gene = std::iter::once(transcript)
            .chain(record.desc().unwrap_or_default().split(' '))
            .find(|token| token.contains(GENE_TAG))
            .map(|token| token.replace(GENE_TAG, ""))
            .ok_or_else(|| {
                OcmsError::Parse(format!("no {} token in header of {}", GENE_TAG, transcript))
            })?;
        pairs.push(TranscriptGene {
            transcript: transcript.to_string(),
            gene,
        });
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gene_taken_from_header_token() {
        let fa = ">ENST00000632684.1 cdna chromosome:GRCh38:7:142786213:142786224:1 gene:ENSG00000282431.1 gene_biotype:TR_D_gene\nACGT\n\
>ENST00000434970.2 cdna chromosome:GRCh38:14:22439007:22439015:1 gene:ENSG00000237235.2\nGGCC\n";
        let pairs = transcripts_to_genes(fa.as_bytes()).unwrap();
        assert_eq!(
            pairs,
            vec![
                TranscriptGene {
                    transcript: "ENST00000632684.1".to_string(),
                    gene: "ENSG00000282431.1".to_string(),
                },
                TranscriptGene {
                    transcript: "ENST00000434970.2".to_string(),
                    gene: "ENSG00000237235.2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn header_without_gene_is_an_error() {
        let err = transcripts_to_genes(">T1 cdna\nACGT\n".as_bytes()).unwrap_err();
        assert!(matches!(err, OcmsError::Parse(_)));
    }
}
