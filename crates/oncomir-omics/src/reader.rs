//! Delimited matrix reader.
//!
//! Layout: a header row whose first cell names the sample column and whose
//! remaining cells are entity names, then one row per sample. Empty cells,
//! `NA`, `NaN` and anything that does not parse as a number become `NaN`.

use std::io::Read;
use std::path::Path;

use oncomir_common::{OncomirError, Result};
use tracing::{debug, info, warn};

use crate::table::CohortTable;

/// Read a samples × entities matrix from any reader.
pub fn read_matrix<R: Read>(reader: R, delimiter: u8) -> Result<CohortTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // First column is the sample id, rest are entity measurements
    let headers = reader.headers()?.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    if headers.is_empty() {
        return Err(OncomirError::InvalidTable("missing header row".to_string()));
    }
    let columns: Vec<String> = headers.iter().skip(1).cloned().collect();

    let mut samples = Vec::new();
    let mut rows = Vec::new();
    let mut unparsable = 0usize;

    for result in reader.records() {
        let record = result?;

        let sample = match record.get(0) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                debug!("Skipping row without sample id");
                continue;
            }
        };

        let row: Vec<f64> = record
            .iter()
            .skip(1)
            .map(|cell| match parse_cell(cell) {
                Some(v) => v,
                None => {
                    unparsable += 1;
                    f64::NAN
                }
            })
            .collect();

        samples.push(sample);
        rows.push(row);
    }

    if unparsable > 0 {
        warn!("{} unparsable cells read as missing", unparsable);
    }

    CohortTable::from_rows(samples, columns, rows)
}

/// Read a matrix file from disk.
pub fn read_matrix_file<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<CohortTable> {
    let path = path.as_ref();
    debug!("Loading matrix from {:?}", path);

    let file = std::fs::File::open(path)?;
    let table = read_matrix(std::io::BufReader::new(file), delimiter)?;

    info!(
        "Loaded {:?}: {} samples, {} entities",
        path,
        table.n_samples(),
        table.n_columns()
    );
    Ok(table)
}

/// Convert a config delimiter to the byte the csv reader expects.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(OncomirError::Config(format!(
            "delimiter {delimiter:?} is not a single-byte character"
        )))
    }
}

/// `None` means the cell is present but not a number.
fn parse_cell(cell: &str) -> Option<f64> {
    match cell {
        "" | "NA" | "NaN" | "nan" | "null" => Some(f64::NAN),
        _ => cell.parse::<f64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_tab_matrix() {
        let raw = "sample\thsa-mir-21\thsa-mir-155\n\
                   TCGA-AA-0001-01A\t1.5\t2.0\n\
                   TCGA-AA-0001-11A\t0.5\tNA\n";
        let t = read_matrix(raw.as_bytes(), b'\t').unwrap();
        assert_eq!(t.n_samples(), 2);
        assert_eq!(t.columns(), &["hsa-mir-21".to_string(), "hsa-mir-155".to_string()]);
        assert_eq!(t.column("hsa-mir-21").unwrap(), &[1.5, 0.5]);
        let mir155 = t.column("hsa-mir-155").unwrap();
        assert_eq!(mir155[0], 2.0);
        assert!(mir155[1].is_nan());
    }

    #[test]
    fn test_unparsable_cells_become_nan() {
        let raw = "id,a,b\ns1,abc,\ns2,3,4\n";
        let t = read_matrix(raw.as_bytes(), b',').unwrap();
        assert!(t.column("a").unwrap()[0].is_nan());
        assert!(t.column("b").unwrap()[0].is_nan());
        assert_eq!(t.value("s2", "b"), Some(4.0));
    }

    #[test]
    fn test_ragged_file_is_an_error() {
        let raw = "id,a,b\ns1,1\n";
        assert!(matches!(read_matrix(raw.as_bytes(), b','), Err(OncomirError::Csv(_))));
    }

    #[test]
    fn test_duplicate_sample_is_an_error() {
        let raw = "id,a\ns1,1\ns1,2\n";
        assert!(matches!(
            read_matrix(raw.as_bytes(), b','),
            Err(OncomirError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('§').is_err());
    }
}
