// Column selections for each dataset and their normalization at the boundary

use serde::Deserialize;

/// The x or y column selection for one dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SeriesSpec {
    /// One column, one trace.
    Single(String),
    /// Several columns, one trace each, all drawn from the same dataset.
    Multi(Vec<String>),
}

impl SeriesSpec {
    /// Number of traces this spec contributes.
    pub fn len(&self) -> usize {
        match self {
            SeriesSpec::Single(_) => 1,
            SeriesSpec::Multi(cols) => cols.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column name for sub-series `sub_index`.
    pub fn column(&self, sub_index: usize) -> Option<&str> {
        match self {
            SeriesSpec::Single(col) if sub_index == 0 => Some(col.as_str()),
            SeriesSpec::Single(_) => None,
            SeriesSpec::Multi(cols) => cols.get(sub_index).map(String::as_str),
        }
    }

    /// True when both specs select the same number of columns in the same form.
    pub fn same_shape(&self, other: &SeriesSpec) -> bool {
        match (self, other) {
            (SeriesSpec::Single(_), SeriesSpec::Single(_)) => true,
            (SeriesSpec::Multi(a), SeriesSpec::Multi(b)) => a.len() == b.len(),
            _ => false,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SeriesSpec::Single(_) => "a single column".to_string(),
            SeriesSpec::Multi(cols) => format!("a list of {} columns", cols.len()),
        }
    }
}

impl From<&str> for SeriesSpec {
    fn from(col: &str) -> Self {
        SeriesSpec::Single(col.to_string())
    }
}

impl From<Vec<&str>> for SeriesSpec {
    fn from(cols: Vec<&str>) -> Self {
        SeriesSpec::Multi(cols.into_iter().map(str::to_string).collect())
    }
}

/// A value that may be given alone or as a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Bring x and y specs into the always-per-dataset form the builder expects.
///
/// With exactly one dataset, flat x and y lists of equal length greater than
/// one are read as that dataset's columns rather than one column per dataset.
/// Anything else is returned as-is.
pub fn normalize_columns(
    x: Vec<SeriesSpec>,
    y: Vec<SeriesSpec>,
    datasets: usize,
) -> (Vec<SeriesSpec>, Vec<SeriesSpec>) {
    if datasets != 1 || x.len() <= 1 || x.len() != y.len() {
        return (x, y);
    }

    match (flat_names(&x), flat_names(&y)) {
        (Some(xs), Some(ys)) => {
            log::warn!(
                "treating {} x/y columns as sub-series of the only dataset",
                xs.len()
            );
            (vec![SeriesSpec::Multi(xs)], vec![SeriesSpec::Multi(ys)])
        }
        _ => (x, y),
    }
}

fn flat_names(specs: &[SeriesSpec]) -> Option<Vec<String>> {
    specs
        .iter()
        .map(|spec| match spec {
            SeriesSpec::Single(col) => Some(col.clone()),
            SeriesSpec::Multi(_) => None,
        })
        .collect()
}
