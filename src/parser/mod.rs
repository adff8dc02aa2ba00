//! Input CSV reader with byte-order-mark detection.
//!
//! Reads the "Excel CSV" dialect (comma-delimited, double-quoted,
//! CRLF-terminated) that eDAM asset exports come in. Excel encodes
//! these files as UTF-8 with a BOM, so the encoding is probed from the
//! first 3 bytes before any CSV parsing starts, and the same choice is
//! mirrored on output.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// UTF-8 byte-order mark.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encoding detected on the input file.
///
/// Both variants decode as UTF-8; the distinction is whether a BOM is
/// stripped on read and written back on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf8Bom,
}

impl Encoding {
    /// Probe the first 3 bytes for a UTF-8 BOM.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&UTF8_BOM) {
            Encoding::Utf8Bom
        } else {
            Encoding::Utf8
        }
    }

    /// The byte prefix to emit when mirroring this encoding on output.
    pub fn bom(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[],
            Encoding::Utf8Bom => &UTF8_BOM,
        }
    }

    /// Strip the BOM from the start of `bytes` if this encoding carries one.
    fn strip<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        match self {
            Encoding::Utf8 => bytes,
            Encoding::Utf8Bom => &bytes[UTF8_BOM.len()..],
        }
    }
}

/// Result of parsing the input file.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Data rows as column-name → value mappings.
    pub rows: Vec<Map<String, Value>>,
    /// Column headers, in original file order.
    pub headers: Vec<String>,
    /// Detected encoding, to be mirrored by the output writer.
    pub encoding: Encoding,
}

/// Parse a CSV file, probing the encoding first.
///
/// Fails with [`CsvError::InputFileMissing`] if the path does not
/// exist; the caller turns that into a fatal exit.
pub fn parse_csv_file<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CsvError::InputFileMissing(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes)
}

/// Parse raw CSV bytes, probing the encoding first.
pub fn parse_bytes(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = Encoding::detect(bytes);
    let (content, _, _) = encoding_rs::UTF_8.decode(encoding.strip(bytes));

    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("");
            obj.insert(header.clone(), json!(value));
        }
        rows.push(obj);
    }

    Ok(ParseResult {
        rows,
        headers,
        encoding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_bom() {
        assert_eq!(Encoding::detect(b"\xEF\xBB\xBFa,b\r\n"), Encoding::Utf8Bom);
        assert_eq!(Encoding::detect(b"a,b\r\n"), Encoding::Utf8);
    }

    #[test]
    fn test_detect_short_input() {
        assert_eq!(Encoding::detect(b"\xEF\xBB"), Encoding::Utf8);
        assert_eq!(Encoding::detect(b""), Encoding::Utf8);
    }

    #[test]
    fn test_parse_simple() {
        let result = parse_bytes(b"name,url\r\nAlice,http://a\r\nBob,http://b\r\n").unwrap();

        assert_eq!(result.encoding, Encoding::Utf8);
        assert_eq!(result.headers, vec!["name", "url"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0]["name"], "Alice");
        assert_eq!(result.rows[1]["url"], "http://b");
    }

    #[test]
    fn test_parse_strips_bom() {
        let result = parse_bytes(b"\xEF\xBB\xBFname,url\r\nAlice,http://a\r\n").unwrap();

        assert_eq!(result.encoding, Encoding::Utf8Bom);
        // BOM must not leak into the first header name
        assert_eq!(result.headers[0], "name");
    }

    #[test]
    fn test_parse_quoted_values() {
        let result = parse_bytes(b"name,note\r\n\"Doe, Jane\",\"said \"\"hi\"\"\"\r\n").unwrap();

        assert_eq!(result.rows[0]["name"], "Doe, Jane");
        assert_eq!(result.rows[0]["note"], "said \"hi\"");
    }

    #[test]
    fn test_parse_short_row_padded() {
        let result = parse_bytes(b"a,b,c\r\n1,2\r\n").unwrap();

        assert_eq!(result.rows[0]["a"], "1");
        assert_eq!(result.rows[0]["b"], "2");
        assert_eq!(result.rows[0]["c"], "");
    }

    #[test]
    fn test_header_order_preserved() {
        let result = parse_bytes(b"z,m,a\r\n1,2,3\r\n").unwrap();
        assert_eq!(result.headers, vec!["z", "m", "a"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_bytes(b""), Err(CsvError::EmptyFile)));
        assert!(matches!(parse_bytes(b"  \r\n"), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_csv_file("definitely-not-here.csv").unwrap_err();
        assert!(matches!(err, CsvError::InputFileMissing(_)));
    }

    #[test]
    fn test_parse_from_disk_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"\xEF\xBB\xBFp_internalurl\r\nhttp://a\r\n").unwrap();
        drop(f);

        let result = parse_csv_file(&path).unwrap();
        assert_eq!(result.encoding, Encoding::Utf8Bom);
        assert_eq!(result.headers, vec!["p_internalurl"]);
        assert_eq!(result.rows[0]["p_internalurl"], "http://a");
    }
}
