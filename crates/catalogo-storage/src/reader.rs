//! CSV loading.
//!
//! Every call opens the file again; nothing is cached between requests.
//! The first record is the header row. Rows shorter than the header only
//! carry the columns they have, longer rows name the overflow `_<index>`.

use catalogo_core::util::strip_bom;
use catalogo_core::{CatalogError, Result, RowRecord};
use csv::{ByteRecord, ReaderBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Parses `path` on the blocking pool.
pub async fn read_rows(path: impl Into<PathBuf>, separator: u8) -> Result<Vec<RowRecord>> {
    let path = path.into();
    let p = path.clone();
    tokio::task::spawn_blocking(move || read_rows_blocking(&p, separator))
        .await
        .map_err(|e| CatalogError::io(path, std::io::Error::other(e)))?
}

pub fn read_rows_blocking(path: &Path, separator: u8) -> Result<Vec<RowRecord>> {
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
    parse_rows(file, separator).map_err(|e| match e.into_kind() {
        csv::ErrorKind::Io(io) => CatalogError::io(path, io),
        other => CatalogError::Csv {
            path: path.to_path_buf(),
            message: format!("{other:?}"),
        },
    })
}

fn parse_rows<R: Read>(reader: R, separator: u8) -> csv::Result<Vec<RowRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(separator)
        .flexible(true)
        .from_reader(reader);

    let mut records = rdr.byte_records();
    let headers: Vec<String> = match records.next() {
        Some(first) => first?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = String::from_utf8_lossy(h);
                if i == 0 {
                    strip_bom(&h).to_string()
                } else {
                    h.into_owned()
                }
            })
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::new();
    for rec in records {
        out.push(to_row(&headers, &rec?));
    }
    Ok(out)
}

fn to_row(headers: &[String], rec: &ByteRecord) -> RowRecord {
    let mut row = RowRecord::with_capacity(rec.len());
    for (i, field) in rec.iter().enumerate() {
        let value = String::from_utf8_lossy(field).into_owned();
        match headers.get(i) {
            Some(h) => row.push(h.as_str(), value),
            None => row.push(format!("_{i}"), value),
        }
    }
    row
}

/// First `n` raw lines of a file.
pub fn preview_lines(path: &Path, n: usize) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
    BufReader::new(file)
        .lines()
        .take(n)
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| CatalogError::io(path, e))
}
