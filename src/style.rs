// Style attribute shapes and their per-trace resolution

use serde::Deserialize;

/// One dataset's share of a style attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// Nothing supplied for this dataset.
    Absent,
    /// One value, meaningful for the dataset's first (or only) sub-series.
    Scalar(T),
    /// One value per sub-series.
    List(Vec<T>),
}

/// Pick the value that applies to sub-series `sub_index` of a dataset.
///
/// Never fails: every shape mismatch resolves to `None`, which the renderer
/// reads as "use your default".
pub fn resolve<T: Clone>(slot: &Slot<T>, sub_index: usize) -> Option<T> {
    match slot {
        Slot::Absent => None,
        Slot::List(values) => values.get(sub_index).cloned(),
        Slot::Scalar(value) if sub_index == 0 => Some(value.clone()),
        Slot::Scalar(_) => None,
    }
}

/// A style attribute as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    from = "Option<StyleArgRepr<T>>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub enum StyleArg<T> {
    Absent,
    /// Applies to every trace.
    Scalar(T),
    /// One slot per dataset, in dataset order.
    PerDataset(Vec<Slot<T>>),
}

impl<T> Default for StyleArg<T> {
    fn default() -> Self {
        StyleArg::Absent
    }
}

impl<T: Clone> StyleArg<T> {
    /// Flat form: one value per dataset.
    pub fn per_dataset(values: Vec<T>) -> Self {
        StyleArg::PerDataset(values.into_iter().map(Slot::Scalar).collect())
    }

    /// Nested form: one list of values per dataset.
    pub fn per_subseries(values: Vec<Vec<T>>) -> Self {
        StyleArg::PerDataset(values.into_iter().map(Slot::List).collect())
    }

    /// Number of dataset-level values supplied, if the argument is a sequence.
    pub fn dataset_len(&self) -> Option<usize> {
        match self {
            StyleArg::PerDataset(slots) => Some(slots.len()),
            _ => None,
        }
    }

    pub fn resolve(&self, dataset: usize, sub_index: usize) -> Option<T> {
        match self {
            StyleArg::Absent => None,
            StyleArg::Scalar(value) => Some(value.clone()),
            StyleArg::PerDataset(slots) => slots
                .get(dataset)
                .and_then(|slot| resolve(slot, sub_index)),
        }
    }
}

/// The four broadcastable trace attributes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleArgs {
    pub color: StyleArg<String>,
    pub mode: StyleArg<String>,
    pub name: StyleArg<String>,
    pub size: StyleArg<f64>,
}

impl StyleArgs {
    /// Resolve every attribute for sub-series `sub_index` of dataset `dataset`
    pub fn resolve(&self, dataset: usize, sub_index: usize) -> TraceStyle {
        TraceStyle {
            mode: self.mode.resolve(dataset, sub_index),
            color: self.color.resolve(dataset, sub_index),
            name: self.name.resolve(dataset, sub_index),
            size: self.size.resolve(dataset, sub_index),
        }
    }

    /// Dataset-level lengths, in the order they are validated.
    pub fn dataset_lens(&self) -> [(&'static str, Option<usize>); 4] {
        [
            ("mode", self.mode.dataset_len()),
            ("color", self.color.dataset_len()),
            ("name", self.name.dataset_len()),
            ("size", self.size.dataset_len()),
        ]
    }
}

/// Fully resolved style for a single trace. `None` means renderer default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceStyle {
    pub mode: Option<String>,
    pub color: Option<String>,
    pub name: Option<String>,
    pub size: Option<f64>,
}

// Wire shapes accepted in job files: null, a scalar, or a list whose items
// are null, scalars or lists.

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotRepr<T> {
    List(Vec<T>),
    Scalar(T),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StyleArgRepr<T> {
    PerDataset(Vec<Option<SlotRepr<T>>>),
    Scalar(T),
}

impl<T> From<Option<SlotRepr<T>>> for Slot<T> {
    fn from(repr: Option<SlotRepr<T>>) -> Self {
        match repr {
            None => Slot::Absent,
            Some(SlotRepr::Scalar(v)) => Slot::Scalar(v),
            Some(SlotRepr::List(v)) => Slot::List(v),
        }
    }
}

impl<T> From<Option<StyleArgRepr<T>>> for StyleArg<T> {
    fn from(repr: Option<StyleArgRepr<T>>) -> Self {
        match repr {
            None => StyleArg::Absent,
            Some(StyleArgRepr::Scalar(v)) => StyleArg::Scalar(v),
            Some(StyleArgRepr::PerDataset(slots)) => {
                StyleArg::PerDataset(slots.into_iter().map(Slot::from).collect())
            }
        }
    }
}
