use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, RegionRow, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Import error taxonomy
// ---------------------------------------------------------------------------

/// Terminal failures of a single import attempt. The previous dataset (if
/// any) is left untouched by the caller on every variant.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The header is missing one or more required columns.
    #[error("missing required columns: {}", .0.join(", "))]
    Schema(Vec<String>),

    /// The delimited text itself is malformed; carries the first reader error.
    #[error("malformed CSV: {0}")]
    Parse(String),

    /// Reading the input file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<Dataset, ImportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Dataset::parse(&text)
}

impl Dataset {
    /// Parse comma-delimited text with a header row into a [`Dataset`].
    ///
    /// Pure function: either a full dataset is produced or none is. The
    /// schema check is on header names only; short rows are padded with
    /// empty strings rather than rejected, and fully empty lines are
    /// skipped.
    pub fn parse(text: &str) -> Result<Dataset, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::Parse(e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !columns.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::Schema(missing));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| ImportError::Parse(e.to_string()))?;

            // The csv reader already drops blank lines; also skip records
            // whose every cell is empty so they are not counted as data.
            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }

            let mut fields = BTreeMap::new();
            for (idx, name) in columns.iter().enumerate() {
                let value = record.get(idx).unwrap_or("");
                fields.insert(name.clone(), value.to_string());
            }
            rows.push(RegionRow { fields });
        }

        Ok(Dataset { columns, rows })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "RegionID,SizeRank,RegionName,RegionType,StateName,State,City,Metro,CountyName,2020-01-31,2020-02-29";

    #[test]
    fn parses_valid_csv() {
        let text = format!(
            "{HEADER}\n\
             1,10,Los Angeles,city,California,CA,Los Angeles,LA Metro,LA County,100,110\n\
             2,20,Austin,city,Texas,TX,Austin,Austin Metro,Travis County,200,210\n"
        );
        let ds = Dataset::parse(&text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns.len(), 11);
        assert_eq!(ds.rows[0].region_name(), "Los Angeles");
        assert_eq!(ds.rows[1].get("2020-02-29"), "210");
    }

    #[test]
    fn row_count_ignores_empty_lines() {
        let text = format!(
            "{HEADER}\n\
             1,10,LA,city,California,CA,,,,100,110\n\
             \n\
             2,20,Austin,city,Texas,TX,,,,200,210\n\
             \n"
        );
        let ds = Dataset::parse(&text).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn missing_required_columns_reported_exactly() {
        let text = "RegionID,StateName,2020-01-31\n1,California,100\n";
        let err = Dataset::parse(text).unwrap_err();
        match err {
            ImportError::Schema(missing) => {
                assert_eq!(missing, vec!["RegionName".to_string(), "RegionType".to_string()]);
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn schema_check_is_case_sensitive() {
        let text = "regionid,RegionName,RegionType,StateName\n1,LA,city,California\n";
        let err = Dataset::parse(text).unwrap_err();
        match err {
            ImportError::Schema(missing) => assert_eq!(missing, vec!["RegionID".to_string()]),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_pad_with_empty_strings() {
        let text = format!("{HEADER}\n1,10,LA,city,California\n");
        let ds = Dataset::parse(&text).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows[0].get("Metro"), "");
        assert_eq!(ds.rows[0].get("2020-01-31"), "");
    }

    #[test]
    fn quoted_cells_keep_embedded_commas() {
        let text = format!("{HEADER}\n1,10,\"Nashville, TN\",msa,Tennessee,TN,,,,300,310\n");
        let ds = Dataset::parse(&text).unwrap();
        assert_eq!(ds.rows[0].region_name(), "Nashville, TN");
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
