use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use crate::models::CsvCollection;
use crate::parsers::CsvStreamReader;
use crate::utils::{max_file_bytes, open_csv_file, resolve_encoding};

#[derive(Parser)]
#[command(name = "csv-records")]
#[command(version = "0.1.0")]
#[command(about = "Read CSV files into named or unnamed record collections", long_about = None)]
pub struct Cli {
    /// Text encoding label (defaults to $CSV_RECORDS_ENCODING, then utf-8)
    #[arg(long, global = true)]
    pub encoding: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// How the reader decides field names
#[derive(Args, Debug, Clone, Default)]
pub struct ShapeArgs {
    /// Comma separated field names; line 1 is then read as data
    #[arg(long, value_delimiter = ',', conflicts_with = "no_header")]
    pub fields: Option<Vec<String>>,

    /// Treat the file as unnamed: no field names, line 1 is data
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the shape of a CSV file
    Stats {
        file: PathBuf,
        #[command(flatten)]
        shape: ShapeArgs,
    },
    /// Print a single field value
    Get {
        file: PathBuf,
        /// Zero-based record index
        #[arg(long)]
        record: usize,
        /// Field name, or zero-based field index
        #[arg(long)]
        field: String,
        #[command(flatten)]
        shape: ShapeArgs,
    },
    /// Print every record
    Dump {
        file: PathBuf,
        /// Print the collection as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        shape: ShapeArgs,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let encoding = cli.encoding.as_deref();

    match &cli.command {
        Some(Commands::Stats { file, shape }) => {
            let collection = read_collection(file, shape, encoding)?;
            show_stats(file, &collection);
        }
        Some(Commands::Get { file, record, field, shape }) => {
            let collection = read_collection(file, shape, encoding)?;
            println!("{}", lookup(&collection, *record, field)?);
        }
        Some(Commands::Dump { file, json, shape }) => {
            let collection = read_collection(file, shape, encoding)?;
            if *json {
                let rendered = serde_json::to_string_pretty(&collection)
                    .context("Failed to serialize collection")?;
                println!("{}", rendered);
            } else {
                dump_records(&collection);
            }
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Open `path` and read it to completion using the requested shape and encoding
pub fn read_collection(
    path: &Path,
    shape: &ShapeArgs,
    encoding: Option<&str>,
) -> Result<CsvCollection> {
    let encoding = resolve_encoding(encoding)?;
    let file = open_csv_file(path, max_file_bytes()?)?;

    let reader = match (&shape.fields, shape.no_header) {
        (Some(fields), _) => CsvStreamReader::with_field_names(file, fields.as_slice())?,
        (None, true) => CsvStreamReader::unnamed(file),
        (None, false) => CsvStreamReader::new(file),
    };
    let mut reader = reader.with_encoding(encoding);

    let collection = reader
        .read_to_end()
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
    reader.close();

    Ok(collection)
}

/// Resolve `field` as a name first, then as a zero-based index
fn lookup<'a>(collection: &'a CsvCollection, record: usize, field: &str) -> Result<&'a str> {
    if let Some(named) = collection.as_named()
        && named.field_index(field).is_some()
    {
        return Ok(named.get_by_name(record, field)?);
    }

    match field.parse::<usize>() {
        Ok(field_index) => Ok(collection.get(record, field_index)?),
        Err(_) if collection.is_named() => bail!("Unknown field name: {}", field),
        Err(_) => bail!("Unnamed collections only accept a numeric field index, got '{}'", field),
    }
}

fn show_stats(path: &Path, collection: &CsvCollection) {
    println!("CSV Statistics");
    println!("==============");
    println!("File: {}", path.display());
    println!("Mode: {}", if collection.is_named() { "named" } else { "unnamed" });
    println!("Fields per record: {}", collection.expected_field_count());
    println!("Records: {}", collection.len());

    if let Some(names) = collection.field_names() {
        println!();
        println!("Field names:");
        for (index, name) in names.iter().enumerate() {
            println!("  [{}] {}", index, name);
        }
    }
}

fn dump_records(collection: &CsvCollection) {
    if let Some(names) = collection.field_names() {
        println!("{}", names.join("\t"));
    }
    for values in collection.records() {
        println!("{}", values.join("\t"));
    }
}
