// Trace builder: datasets + column specs + style args -> one multi-trace figure

use crate::data::ColumnSource;
use crate::error::BuildError;
use crate::figure::{Figure, Labels, Scatter};
use crate::series::SeriesSpec;
use crate::style::StyleArgs;

/// Build one figure holding a trace per (dataset, column pair).
///
/// `x[i]` and `y[i]` select the columns of `data[i]`. A [`SeriesSpec::Multi`]
/// entry draws several traces from the same dataset, and style values for
/// those traces come from the matching nested entry of each style argument.
///
/// Count checks run before any column is read. A missing or non-numeric
/// column aborts the whole build.
pub fn build<D: ColumnSource>(
    data: &[D],
    x: &[SeriesSpec],
    y: &[SeriesSpec],
    labels: Labels,
    style: &StyleArgs,
) -> Result<Figure, BuildError> {
    validate(data.len(), x, y, style)?;

    let mut figure = Figure::new(labels);

    for (i, ((dataset, x_spec), y_spec)) in data.iter().zip(x).zip(y).enumerate() {
        for j in 0..x_spec.len() {
            let (Some(x_col), Some(y_col)) = (x_spec.column(j), y_spec.column(j)) else {
                // same_shape() was checked in validate()
                continue;
            };

            let x_values = dataset.column(x_col)?;
            let y_values = dataset.column(y_col)?;
            let trace_style = style.resolve(i, j);

            log::debug!(
                "dataset {} series {}: {} vs {} ({} points) {:?}",
                i,
                j,
                x_col,
                y_col,
                x_values.len(),
                trace_style
            );

            figure.add_trace(Scatter::new(x_values, y_values, trace_style));
        }
    }

    log::info!(
        "built figure with {} traces from {} datasets",
        figure.traces().len(),
        data.len()
    );

    Ok(figure)
}

/// Count and shape checks, first failure wins.
fn validate(
    datasets: usize,
    x: &[SeriesSpec],
    y: &[SeriesSpec],
    style: &StyleArgs,
) -> Result<(), BuildError> {
    if x.len() != datasets || y.len() != datasets {
        return Err(BuildError::Cardinality {
            datasets,
            x: x.len(),
            y: y.len(),
        });
    }

    for (attribute, len) in style.dataset_lens() {
        if let Some(given) = len.filter(|&given| given > datasets) {
            return Err(BuildError::TooManyValues {
                attribute,
                given,
                datasets,
            });
        }
    }

    for (dataset, (x_spec, y_spec)) in x.iter().zip(y).enumerate() {
        if !x_spec.same_shape(y_spec) {
            return Err(BuildError::SeriesShape {
                dataset,
                x: x_spec.describe(),
                y: y_spec.describe(),
            });
        }
    }

    Ok(())
}
