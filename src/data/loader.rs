use std::collections::HashSet;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, Float64Array, LargeStringArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{RawCell, RawTable, RecordTable, StrainRecord};
use crate::config::ColumnNames;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("cannot read parquet file {}: {message}", .path.display())]
    Parquet { path: PathBuf, message: String },
    #[error("{} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("{}: expected leading columns {expected:?}, found {found:?}", .path.display())]
    Layout {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`         – comma separated, header row
/// * `.tsv`, `.tab` – tab separated, header row
/// * `.parquet`     – one column per header, any numeric or string types
///
/// Whatever the format, the cells go through [`clean`], so the coercion
/// rules for `id`/`is_type_strain` and the `strain_number` drop are shared.
pub fn load_file(path: &Path, columns: &ColumnNames) -> Result<RecordTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => read_delimited(path, b',')?,
        "tsv" | "tab" => read_delimited(path, b'\t')?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let table = clean(path, raw, columns)?;
    if table.is_empty() {
        log::warn!("{} has a header but no records", path.display());
    }
    log::debug!("{} schema: {:?}", path.display(), table.schema());
    log::info!(
        "Loaded {} records with {} metabolite columns from {}",
        table.len(),
        table.metabolite_columns.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Cleaning: raw cells → RecordTable
// ---------------------------------------------------------------------------

/// Apply the schema rules to a raw table:
///
/// 0. repeated headers get `.1`, `.2`, ... suffixes so no column is lost;
/// 1. every required column must be present in the header;
/// 2. `strain_number` is dropped by name;
/// 3. the remaining leading four columns must be the fixed columns, in order;
/// 4. `id`/`is_type_strain` are read as floats, missing → 0, truncated to int;
/// 5. every later column is a metabolite column, missing/non-numeric → 0.
pub fn clean(
    path: &Path,
    mut raw: RawTable,
    columns: &ColumnNames,
) -> Result<RecordTable, LoadError> {
    let renamed = dedup_headers(&mut raw.headers);
    if renamed > 0 {
        log::warn!("{}: {renamed} repeated column names suffixed", path.display());
    }

    for required in columns.required() {
        if !raw.headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: required.to_string(),
            });
        }
    }

    // Indices of the working schema, `strain_number` removed.
    let kept: Vec<usize> = (0..raw.headers.len())
        .filter(|&i| raw.headers[i] != columns.strain_number)
        .collect();

    let expected = [
        &columns.id,
        &columns.species,
        &columns.is_type_strain,
        &columns.designation,
    ];
    let leading: Vec<&String> = kept.iter().take(4).map(|&i| &raw.headers[i]).collect();
    if leading.len() < 4 || leading.iter().zip(expected.iter()).any(|(a, b)| a != b) {
        return Err(LoadError::Layout {
            path: path.to_path_buf(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found: leading.iter().map(|s| s.to_string()).collect(),
        });
    }

    let (fixed_idx, metabolite_idx) = kept.split_at(4);
    let metabolite_columns: Vec<String> = metabolite_idx
        .iter()
        .map(|&i| raw.headers[i].clone())
        .collect();

    let mut zero_filled = 0usize;
    let mut records = Vec::with_capacity(raw.rows.len());

    for mut row in raw.rows {
        // Short rows are padded with missing cells.
        row.resize(raw.headers.len(), RawCell::Null);
        let mut take = |i: usize| std::mem::replace(&mut row[i], RawCell::Null);

        let id = integer_or_zero(&take(fixed_idx[0]));
        let species = take(fixed_idx[1]).into_text();
        let is_type_strain = integer_or_zero(&take(fixed_idx[2]));
        let designation = take(fixed_idx[3]).into_text();

        let metabolites = metabolite_idx
            .iter()
            .map(|&i| {
                take(i).as_f64().unwrap_or_else(|| {
                    zero_filled += 1;
                    0.0
                })
            })
            .collect();

        records.push(StrainRecord {
            id,
            species,
            is_type_strain,
            designation,
            metabolites,
        });
    }

    if zero_filled > 0 {
        log::warn!(
            "{}: {zero_filled} blank or non-numeric metabolite cells read as 0",
            path.display()
        );
    }

    let fixed_columns = [
        columns.id.clone(),
        columns.species.clone(),
        columns.is_type_strain.clone(),
        columns.designation.clone(),
    ];
    Ok(RecordTable::new(fixed_columns, metabolite_columns, records))
}

/// Rename repeated headers to `name.1`, `name.2`, ... skipping any name
/// already taken. Returns how many headers were renamed.
fn dedup_headers(headers: &mut [String]) -> usize {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut renamed = 0;
    for header in headers.iter_mut() {
        if seen.contains(header.as_str()) {
            let base = header.clone();
            let mut suffix = 1;
            while seen.contains(&format!("{base}.{suffix}")) {
                suffix += 1;
            }
            *header = format!("{base}.{suffix}");
            renamed += 1;
        }
        seen.insert(header.clone());
    }
    renamed
}

/// Float read, missing → 0, then truncation towards zero.
fn integer_or_zero(cell: &RawCell) -> i64 {
    cell.as_f64().map(|v| v as i64).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Delimited text reader
// ---------------------------------------------------------------------------

fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        rows.push(record.iter().map(RawCell::from_text).collect());
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Read a Parquet file into raw cells. String columns become `Text`,
/// anything castable to Float64 becomes `Number`; nulls become `Null`.
fn read_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let parquet_err = |message: String| LoadError::Parquet {
        path: path.to_path_buf(),
        message,
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| parquet_err(e.to_string()))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().map_err(|e| parquet_err(e.to_string()))?;

    let mut rows: Vec<Vec<RawCell>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|e| parquet_err(e.to_string()))?;
        let columns = batch
            .columns()
            .iter()
            .map(column_cells)
            .collect::<Result<Vec<_>, String>>()
            .map_err(parquet_err)?;

        for row in 0..batch.num_rows() {
            rows.push(columns.iter().map(|col| col[row].clone()).collect());
        }
    }

    Ok(RawTable { headers, rows })
}

fn column_cells(col: &ArrayRef) -> Result<Vec<RawCell>, String> {
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or("expected StringArray")?;
            Ok(arr
                .iter()
                .map(|v| v.map(RawCell::from_text).unwrap_or(RawCell::Null))
                .collect())
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .ok_or("expected LargeStringArray")?;
            Ok(arr
                .iter()
                .map(|v| v.map(RawCell::from_text).unwrap_or(RawCell::Null))
                .collect())
        }
        other => {
            let floats = cast(col, &DataType::Float64)
                .map_err(|e| format!("cannot read {other:?} column as numbers: {e}"))?;
            let arr = floats
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or("expected Float64Array")?;
            Ok(arr
                .iter()
                .map(|v| v.map(RawCell::Number).unwrap_or(RawCell::Null))
                .collect())
        }
    }
}
