//! Offline dataset loading.
//!
//! Reads the CSV named by the configuration with a sniffed delimiter and an
//! optional UTF-8 byte-order mark. The interactive predictor never calls into
//! this module; it exists for data preparation done outside the app.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::DatasetError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];
const SNIFF_LINES: usize = 20;

/// Reader overrides.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Skip sniffing and use this delimiter.
    pub delimiter: Option<u8>,
    /// Stop after this many data rows.
    pub max_rows: Option<usize>,
}

/// A CSV file held as strings, header row separated.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    delimiter: u8,
}

impl Table {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    /// All values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(
            self.rows
                .iter()
                .map(|r| r.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}

/// Creates the processed-data and models directories if they are missing.
pub fn ensure_dirs(cfg: &Config) -> Result<(), DatasetError> {
    let abs = cfg.abs_paths();
    for dir in [&abs.data_processed_dir, &abs.models_dir] {
        fs::create_dir_all(dir).map_err(|source| DatasetError::Io {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Loads the configured dataset into a [`Table`].
pub fn load_dataset(cfg: &Config, opts: &LoadOptions) -> Result<Table, DatasetError> {
    ensure_dirs(cfg)?;
    let path = &cfg.abs_paths().dataset;
    let (text, delimiter) = read_text(path, opts)?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let csv_err = |source| DatasetError::Csv {
        path: path.clone(),
        source,
    };

    let headers = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records().take(opts.max_rows.unwrap_or(usize::MAX)) {
        let record = result.map_err(csv_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let table = Table {
        headers,
        rows,
        delimiter,
    };
    info!(
        "Loaded dataset {} ({} rows x {} columns)",
        path.display(),
        table.n_rows(),
        table.n_cols()
    );
    Ok(table)
}

/// Loads the configured dataset, deserializing each row into `T` by header name.
pub fn load_records<T>(cfg: &Config, opts: &LoadOptions) -> Result<Vec<T>, DatasetError>
where
    T: DeserializeOwned,
{
    ensure_dirs(cfg)?;
    let path = &cfg.abs_paths().dataset;
    let (text, delimiter) = read_text(path, opts)?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    rdr.deserialize()
        .take(opts.max_rows.unwrap_or(usize::MAX))
        .map(|r| {
            r.map_err(|source| DatasetError::Csv {
                path: path.clone(),
                source,
            })
        })
        .collect()
}

fn read_text(path: &Path, opts: &LoadOptions) -> Result<(String, u8), DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    let text = String::from_utf8(body.to_vec()).map_err(|e| DatasetError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;

    let delimiter = opts.delimiter.unwrap_or_else(|| sniff_delimiter(&text));
    debug!(
        "Reading {} with delimiter {:?}",
        path.display(),
        delimiter as char
    );
    Ok((text, delimiter))
}

/// Picks the candidate that splits the leading lines into the same number of
/// fields, preferring more fields. Defaults to a comma.
pub fn sniff_delimiter(sample: &str) -> u8 {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    let mut best: Option<(bool, usize, u8)> = None;
    for &delim in &CANDIDATE_DELIMITERS {
        let counts: Vec<usize> = lines.iter().map(|l| count_unquoted(l, delim)).collect();
        let Some(&first) = counts.first() else {
            break;
        };
        if first == 0 {
            continue;
        }
        let consistent = counts.iter().all(|&c| c == first);
        let candidate = (consistent, first, delim);
        if best.is_none_or(|(bc, bn, _)| (consistent, first) > (bc, bn)) {
            best = Some(candidate);
        }
    }
    best.map_or(b',', |(_, _, d)| d)
}

fn count_unquoted(line: &str, delim: u8) -> usize {
    let mut in_quotes = false;
    let mut n = 0;
    for b in line.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delim && !in_quotes {
            n += 1;
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_delimiters() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3\n"), b',');
        assert_eq!(sniff_delimiter("a;b;c\n1,5;2;3\n"), b';');
        assert_eq!(sniff_delimiter("a\tb\n1\t2\n"), b'\t');
        assert_eq!(sniff_delimiter("a|b|c\n1|2|3\n"), b'|');
    }

    #[test]
    fn quoted_delimiters_are_ignored() {
        assert_eq!(sniff_delimiter("name;note\n\"x;y;z\";1\nw;2\n"), b';');
    }

    #[test]
    fn single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter("score\n10\n20\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }
}
