use std::fs::{self, File};
use std::path::Path;

use log::{debug, info, trace, warn};
use polars::prelude::*;
use polars_io::parquet::ParquetWriter;

use crate::cli::{Args, WriteFormat};
use crate::error::CleanError;
use crate::records::{HeartRecord, COLUMNS, NA_TOKENS, WIDTH};

/// Row and cell counts gathered while cleaning one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanSummary {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub rows_written: usize,
    pub cells_masked: usize,
}

pub async fn read_raw<P: AsRef<Path>>(path: P) -> Result<DataFrame, CleanError> {
    /* Reads the headerless raw file into string columns named column_1..column_14 */
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CleanError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); WIDTH];
    for result in reader.records() {
        let record = result?;
        // whitespace-only line
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() != WIDTH {
            return Err(CleanError::ColumnCount {
                line: record.position().map_or(0, |pos| pos.line()),
                expected: WIDTH,
                found: record.len(),
            });
        }
        for (column, cell) in cells.iter_mut().zip(record.iter()) {
            column.push(cell.to_owned());
        }
    }

    let columns: Vec<Series> = cells
        .into_iter()
        .enumerate()
        .map(|(i, values)| Series::new(&format!("column_{}", i + 1), values))
        .collect();
    let df = DataFrame::new(columns)?;
    debug!("read {} raw rows from {:?}", df.height(), path);

    Ok(df)
}

pub fn apply_schema(df: &mut DataFrame) -> Result<(), CleanError> {
    if df.width() != WIDTH {
        return Err(CleanError::Width {
            expected: WIDTH,
            found: df.width(),
        });
    }
    df.set_column_names(COLUMNS.as_slice())?;

    Ok(())
}

/// Turns every cell equal to `sentinel`, every empty cell and every
/// [`NA_TOKENS`] entry into a null, and returns how many cells were masked.
/// Columns that are no longer text are left alone.
pub fn mask_sentinel(df: &mut DataFrame, sentinel: &str) -> Result<usize, CleanError> {
    let mut masked = 0;

    for name in COLUMNS {
        let column = df.column(name)?;
        if column.dtype() != &DataType::Utf8 {
            continue;
        }
        let before = column.null_count();
        let mut replaced = column
            .utf8()?
            .into_iter()
            .map(|cell| cell.filter(|cell| !is_missing(cell, sentinel)))
            .collect::<Utf8Chunked>()
            .into_series();
        replaced.rename(name);

        let found = replaced.null_count() - before;
        if found > 0 {
            trace!("masked {} {:?} cells in {}", found, sentinel, name);
        }
        masked += found;
        df.with_column(replaced)?;
    }

    Ok(masked)
}

fn is_missing(cell: &str, sentinel: &str) -> bool {
    cell == sentinel || cell.is_empty() || NA_TOKENS.contains(&cell)
}

pub fn drop_missing(df: &DataFrame) -> Result<DataFrame, CleanError> {
    Ok(df.drop_nulls::<String>(None)?)
}

/// Casts every schema column to Float64. Cells that do not parse, or parse
/// to NaN or infinity, are fatal.
pub fn cast_numeric(df: &mut DataFrame) -> Result<(), CleanError> {
    for (name, dtype) in HeartRecord::clean_schema().iter() {
        let cast = df
            .column(name.as_str())?
            .strict_cast(dtype)
            .map_err(|source| CleanError::Cast {
                column: name.to_string(),
                source,
            })?;
        if cast.f64()?.into_iter().flatten().any(|v| !v.is_finite()) {
            return Err(CleanError::NonFinite {
                column: name.to_string(),
            });
        }
        df.with_column(cast)?;
    }

    Ok(())
}

fn create_output(path: &Path) -> Result<File, CleanError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    File::create(path).map_err(|source| CleanError::Create {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn write_csv<P: AsRef<Path>>(path: P, df: &mut DataFrame) -> Result<(), CleanError> {
    let mut file = create_output(path.as_ref())?;

    CsvWriter::new(&mut file).has_header(true).finish(df)?;

    Ok(())
}

pub async fn write_parquet<P: AsRef<Path>>(path: P, df: &mut DataFrame) -> Result<(), CleanError> {
    let mut file = create_output(path.as_ref())?;

    ParquetWriter::new(&mut file).finish(df)?;

    Ok(())
}

/// Reads a cleaned CSV back, checking the header, every value and the row
/// count. Returns the number of rows read.
pub async fn verify_csv<P: AsRef<Path>>(path: P, expected_rows: usize) -> Result<usize, CleanError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|source| CleanError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let header: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    if header != COLUMNS {
        return Err(CleanError::Header { found: header });
    }

    let mut rows = 0;
    for result in reader.deserialize::<HeartRecord>() {
        let record = result?;
        if let Some((column, _)) = COLUMNS
            .iter()
            .zip(record.values())
            .find(|(_, v)| !v.is_finite())
        {
            return Err(CleanError::NonFinite {
                column: column.to_string(),
            });
        }
        rows += 1;
    }

    if rows != expected_rows {
        return Err(CleanError::RowCount {
            expected: expected_rows,
            found: rows,
        });
    }

    Ok(rows)
}

pub async fn clean(args: &Args) -> Result<CleanSummary, CleanError> {
    let mut df = read_raw(&args.input).await?;
    let rows_read = df.height();
    info!("Loaded {} rows from {:?}", rows_read, args.input);

    apply_schema(&mut df)?;
    let cells_masked = mask_sentinel(&mut df, &args.sentinel)?;

    let mut df = drop_missing(&df)?;
    let rows_dropped = rows_read - df.height();
    info!(
        "Dropped {} rows holding {} missing cells",
        rows_dropped, cells_masked
    );

    cast_numeric(&mut df)?;
    trace!("{}", df.head(Some(5)));

    match args.format {
        WriteFormat::Csv => write_csv(&args.output, &mut df).await?,
        WriteFormat::Parquet => write_parquet(&args.output, &mut df).await?,
    }
    let rows_written = df.height();
    info!("Wrote {} rows to {:?}", rows_written, args.output);

    if args.verify {
        match args.format {
            WriteFormat::Csv => {
                verify_csv(&args.output, rows_written).await?;
                debug!("verified {:?}", args.output);
            }
            WriteFormat::Parquet => warn!("--verify only checks csv output, skipping"),
        }
    }

    Ok(CleanSummary {
        rows_read,
        rows_dropped,
        rows_written,
        cells_masked,
    })
}
