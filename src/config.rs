// JSON job files describing one multi-dataset plot

use crate::data::{load_dataset, Dataset};
use crate::figure::{Figure, Labels};
use crate::series::{normalize_columns, OneOrMany, SeriesSpec};
use crate::style::StyleArgs;
use crate::trace;
use crate::RenderOptions;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A plot job as read from disk.
///
/// ```json
/// {
///   "data": ["charge.csv", "estimate.csv"],
///   "x": [["SOC-Chg", "SOC-Dis"], "SOC"],
///   "y": [["OCV-Chg", "OCV-Dis"], "OCV"],
///   "title": "OCV vs. SOC",
///   "color": [["violet", "lightcoral"], "darkorchid"],
///   "output": {"type": "svg"}
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlotJob {
    pub data: Option<OneOrMany<PathBuf>>,
    pub x: Option<OneOrMany<SeriesSpec>>,
    pub y: Option<OneOrMany<SeriesSpec>>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub title: Option<String>,
    #[serde(flatten)]
    pub style: StyleArgs,
    pub output: RenderOptions,
}

impl PlotJob {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse plot job")
    }

    /// Read a job file; relative data paths are taken from the file's directory
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file '{}'", path.display()))?;
        let mut job = Self::from_json(&text)
            .with_context(|| format!("Invalid job file '{}'", path.display()))?;

        if let Some(base) = path.parent() {
            job.rebase(base);
        }

        Ok(job)
    }

    fn rebase(&mut self, base: &Path) {
        if let Some(data) = self.data.take() {
            let paths = data
                .into_vec()
                .into_iter()
                .map(|p| if p.is_relative() { base.join(p) } else { p })
                .collect();
            self.data = Some(OneOrMany::Many(paths));
        }
    }

    pub fn data_paths(&self) -> Vec<PathBuf> {
        self.data.clone().map(OneOrMany::into_vec).unwrap_or_default()
    }

    pub fn load_datasets(&self) -> Result<Vec<Dataset>> {
        self.data_paths()
            .iter()
            .map(|path| {
                log::info!("loading dataset {}", path.display());
                load_dataset(path).with_context(|| format!("Failed to load '{}'", path.display()))
            })
            .collect()
    }

    pub fn labels(&self) -> Labels {
        Labels::new(self.title.clone(), self.x_title.clone(), self.y_title.clone())
    }

    /// Per-dataset x and y specs for `datasets` datasets
    pub fn series(&self, datasets: usize) -> Result<(Vec<SeriesSpec>, Vec<SeriesSpec>)> {
        let x = self.x.clone().ok_or_else(|| anyhow!("No x columns given"))?;
        let y = self.y.clone().ok_or_else(|| anyhow!("No y columns given"))?;
        Ok(normalize_columns(x.into_vec(), y.into_vec(), datasets))
    }

    /// Build the figure for already-loaded datasets
    pub fn build_figure(&self, datasets: &[Dataset]) -> Result<Figure> {
        let (x, y) = self.series(datasets.len())?;
        let figure = trace::build(datasets, &x, &y, self.labels(), &self.style)?;
        Ok(figure)
    }
}
