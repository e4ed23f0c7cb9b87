use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::error::Result;
use super::fs::is_gzipped;

fn is_stdio<P: AsRef<Path>>(path: &Option<P>) -> bool {
    match path {
        Some(path) => path.as_ref().as_os_str() == "-",
        None => true,
    }
}

/// Open a text source for line-oriented reading. `None` or `-` reads stdin;
/// files with a gzip extension are decompressed transparently.
pub fn open_text<P: AsRef<Path>>(path: &Option<P>) -> Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = match path {
        Some(path) if !is_stdio(&Some(path)) => {
            let file = File::open(path.as_ref())?;
            if is_gzipped(path) {
                Box::new(BufReader::with_capacity(
                    256 * 1024,
                    MultiGzDecoder::new(file),
                ))
            } else {
                Box::new(BufReader::with_capacity(256 * 1024, file))
            }
        }
        _ => Box::new(BufReader::new(io::stdin())),
    };
    Ok(reader)
}

/// Open a text sink. `None` or `-` writes to stdout; a gzip extension
/// compresses the output.
pub fn create_text<P: AsRef<Path>>(path: &Option<P>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(path) if !is_stdio(&Some(path)) => {
            let writer = BufWriter::new(File::create(path.as_ref())?);
            if is_gzipped(path) {
                Box::new(GzEncoder::new(writer, Compression::default()))
            } else {
                Box::new(writer)
            }
        }
        _ => Box::new(BufWriter::new(io::stdout())),
    };
    Ok(writer)
}

/// Build a tab-delimited reader for optional file/stdin sources.
pub fn get_reader<P: AsRef<Path>>(
    path: &Option<P>,
    has_headers: bool,
) -> Result<csv::Reader<Box<dyn BufRead>>> {
    Ok(csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(open_text(path)?))
}

/// Build a tab-delimited writer targeting a file or stdout.
pub fn get_writer<P: AsRef<Path>>(
    path: &Option<P>,
    write_headers: bool,
) -> Result<csv::Writer<Box<dyn Write>>> {
    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(write_headers)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(create_text(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn gzip_round_trip_through_text_helpers() {
        let dir = tempdir().unwrap();
        let path = Some(dir.path().join("table.tsv.gz"));
        {
            let mut writer = get_writer(&path, false).unwrap();
            writer.write_record(["ENST1", "ENSG1"]).unwrap();
            writer.flush().unwrap();
        }

        let mut text = String::new();
        open_text(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "ENST1\tENSG1\n");
    }
}
