// Figure container and the scatter trace primitive

use crate::style::TraceStyle;
use serde::Serialize;

/// Plot labels (title, axes)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Labels {
    pub title: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

impl Labels {
    pub fn new(title: Option<String>, x: Option<String>, y: Option<String>) -> Self {
        Self { title, x, y }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    pub size: Option<f64>,
    pub color: Option<String>,
}

/// One line/marker trace. Every `None` is left to the renderer's defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    #[serde(rename = "type")]
    kind: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: Option<String>,
    pub marker: Marker,
    pub name: Option<String>,
}

impl Scatter {
    pub fn new(x: Vec<f64>, y: Vec<f64>, style: TraceStyle) -> Self {
        Self {
            kind: "scatter",
            x,
            y,
            mode: style.mode,
            marker: Marker {
                size: style.size,
                color: style.color,
            },
            name: style.name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Layout<'a> {
    title: Option<&'a str>,
    xaxis_title: Option<&'a str>,
    yaxis_title: Option<&'a str>,
    showlegend: bool,
}

/// A single-panel chart holding an ordered list of traces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Figure {
    pub labels: Labels,
    traces: Vec<Scatter>,
}

impl Figure {
    pub fn new(labels: Labels) -> Self {
        Self {
            labels,
            traces: Vec::new(),
        }
    }

    pub fn add_trace(&mut self, trace: Scatter) {
        self.traces.push(trace);
    }

    pub fn traces(&self) -> &[Scatter] {
        &self.traces
    }

    /// Whether the renderer should draw a legend box.
    pub fn show_legend(&self) -> bool {
        self.traces.len() > 1 || self.traces.iter().any(|t| t.name.is_some())
    }

    /// Plotly-style JSON: `{"data": [...], "layout": {...}}`
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Doc<'a> {
            data: &'a [Scatter],
            layout: Layout<'a>,
        }

        serde_json::to_string_pretty(&Doc {
            data: &self.traces,
            layout: Layout {
                title: self.labels.title.as_deref(),
                xaxis_title: self.labels.x.as_deref(),
                yaxis_title: self.labels.y.as_deref(),
                showlegend: self.show_legend(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn trace(name: Option<&str>) -> Scatter {
        Scatter::new(
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            TraceStyle {
                name: name.map(str::to_string),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_traces_keep_insertion_order() {
        let mut fig = Figure::new(Labels::default());
        fig.add_trace(trace(Some("a")));
        fig.add_trace(trace(Some("b")));
        let names: Vec<_> = fig.traces().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec![Some("a".to_string()), Some("b".to_string())]);
    }

    #[test]
    fn test_show_legend() {
        let mut fig = Figure::new(Labels::default());
        fig.add_trace(trace(None));
        assert!(!fig.show_legend());
        fig.add_trace(trace(None));
        assert!(fig.show_legend());

        let mut named = Figure::new(Labels::default());
        named.add_trace(trace(Some("OCV")));
        assert!(named.show_legend());
    }

    #[test]
    fn test_json_keeps_absent_values_as_null() {
        let mut fig = Figure::new(Labels::new(Some("OCV vs SOC".into()), None, Some("V".into())));
        fig.add_trace(trace(None));

        let doc: Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
        let t = &doc["data"][0];
        assert_eq!(t["type"], "scatter");
        assert!(t["mode"].is_null());
        assert!(t["marker"]["color"].is_null());
        assert!(t["marker"]["size"].is_null());
        assert_eq!(doc["layout"]["title"], "OCV vs SOC");
        assert!(doc["layout"]["xaxis_title"].is_null());
        assert_eq!(doc["layout"]["yaxis_title"], "V");
    }
}
