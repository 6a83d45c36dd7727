use crate::error::DataError;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Named-column access to a tabular dataset.
///
/// The trace builder only ever talks to datasets through this trait.
pub trait ColumnSource {
    /// Return the values of `name` in row order.
    fn column(&self, name: &str) -> Result<Vec<f64>, DataError>;
}

/// An in-memory table: one header row plus string cells.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Read a CSV table (first record is the header row)
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(DataError::Empty);
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Create a Dataset from a JSON array of objects
    pub fn from_json(value: &Value) -> Result<Self, DataError> {
        let array = value
            .as_array()
            .ok_or_else(|| DataError::Json("input data must be an array of objects".to_string()))?;

        let first_obj = array
            .first()
            .ok_or(DataError::Empty)?
            .as_object()
            .ok_or_else(|| DataError::Json("items in array must be objects".to_string()))?;

        // Headers come from the first object
        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| DataError::Json("items in array must be objects".to_string()))?;

            let mut row = Vec::with_capacity(headers.len());
            for header in &headers {
                let cell = match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) | None => String::new(),
                    _ => {
                        return Err(DataError::Json(format!(
                            "unsupported value type for field '{}'",
                            header
                        )))
                    }
                };
                row.push(cell);
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::ColumnNotFound {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }
}

impl ColumnSource for Dataset {
    fn column(&self, name: &str) -> Result<Vec<f64>, DataError> {
        let idx = self.column_index(name)?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                // Short rows and blank cells are gaps
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                if cell.is_empty() {
                    return Ok(f64::NAN);
                }
                cell.parse::<f64>().map_err(|_| DataError::NotNumeric {
                    column: name.to_string(),
                    row: row_idx + 1,
                    value: cell.to_string(),
                })
            })
            .collect()
    }
}

/// Load a dataset from disk, picking the format from the file extension.
pub fn load_dataset(path: &Path) -> Result<Dataset, DataError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        let file = File::open(path)?;
        let value: Value =
            serde_json::from_reader(file).map_err(|e| DataError::Json(e.to_string()))?;
        Dataset::from_json(&value)
    } else {
        Dataset::from_csv_path(path)
    }
}
