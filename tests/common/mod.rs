//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const FIELD_NAMES: [&str; 4] = ["Id", "First Name", "Last Name", "Mailing Address"];

/// Path to a checked-in fixture under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Builder for CSV files written into a temporary directory
pub struct CsvFileBuilder {
    temp_dir: TempDir,
    file_name: String,
    header: Option<Vec<String>>,
    rows: Vec<String>,
    line_ending: &'static str,
    prefix: Vec<u8>,
}

impl CsvFileBuilder {
    /// Create a new builder for `data.csv` with no header and no rows
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            file_name: "data.csv".to_string(),
            header: None,
            rows: Vec::new(),
            line_ending: "\n",
            prefix: Vec::new(),
        }
    }

    /// Set the header line
    pub fn header(mut self, names: &[&str]) -> Self {
        self.header = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Add a row whose fields are joined with commas as-is
    pub fn row(mut self, fields: &[&str]) -> Self {
        self.rows.push(fields.join(","));
        self
    }

    /// Add a raw line verbatim
    pub fn raw_line(mut self, line: &str) -> Self {
        self.rows.push(line.to_string());
        self
    }

    /// Use CRLF line endings
    pub fn crlf(mut self) -> Self {
        self.line_ending = "\r\n";
        self
    }

    /// Use bare CR line endings
    pub fn cr(mut self) -> Self {
        self.line_ending = "\r";
        self
    }

    /// Start the file with a UTF-8 byte order mark
    pub fn with_bom(mut self) -> Self {
        self.prefix = vec![0xEF, 0xBB, 0xBF];
        self
    }

    /// Write the file and return the temp dir (which owns it) and its path
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join(&self.file_name);
        let mut file = fs::File::create(&path).expect("Failed to create CSV file");
        file.write_all(&self.prefix).expect("Failed to write CSV prefix");

        let mut lines = Vec::new();
        if let Some(header) = &self.header {
            lines.push(header.join(","));
        }
        lines.extend(self.rows.iter().cloned());

        for line in lines {
            file.write_all(line.as_bytes()).expect("Failed to write CSV line");
            file.write_all(self.line_ending.as_bytes()).expect("Failed to write line ending");
        }

        (self.temp_dir, path)
    }
}

impl Default for CsvFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A named CSV with `rows` generated records
pub fn generated_named_csv(rows: usize) -> (TempDir, PathBuf) {
    let mut builder = CsvFileBuilder::new().header(&FIELD_NAMES);
    for i in 0..rows {
        builder = builder.raw_line(&format!(
            "{},First {},Last {},\"{} Main Street, Springfield\"",
            i, i, i, i
        ));
    }
    builder.build()
}
