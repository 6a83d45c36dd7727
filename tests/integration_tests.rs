use multiplot::config::PlotJob;
use multiplot::render::render_figure;
use multiplot::{build, BuildError, Dataset, Labels, SeriesSpec, StyleArg, StyleArgs};
use multiplot::{OutputFormat, RenderOptions};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn load(name: &str) -> Dataset {
    Dataset::from_csv_path(fixture(name)).expect("Failed to read test CSV")
}

/// Helper function to run multiplot with arguments and optional stdin
fn run_multiplot(args: &[&str], stdin: Option<&str>) -> Result<Vec<u8>, String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_multiplot"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut handle) = child.stdin.take() {
        if let Some(input) = stdin {
            handle
                .write_all(input.as_bytes())
                .map_err(|e| format!("Failed to write to stdin: {}", e))?;
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

fn parse_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("Output is not valid JSON")
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
}

#[test]
fn test_mixed_nesting_end_to_end() {
    let data = vec![load("ocv_points.csv"), load("ocv_estimate.csv")];
    let x = vec![SeriesSpec::from(vec!["SOC-Chg", "SOC-Dis"]), SeriesSpec::from("SOC")];
    let y = vec![SeriesSpec::from(vec!["OCV-Chg", "OCV-Dis"]), SeriesSpec::from("OCV")];
    let style = StyleArgs {
        color: serde_json::from_str(r#"[["violet", "lightcoral"], "darkorchid"]"#).unwrap(),
        mode: StyleArg::per_subseries(vec![vec!["markers".to_string(), "markers".to_string()]]),
        size: StyleArg::per_subseries(vec![vec![4.5, 4.5]]),
        ..Default::default()
    };

    let fig = build(&data, &x, &y, Labels::default(), &style).unwrap();
    let traces = fig.traces();
    assert_eq!(traces.len(), 3);

    assert_eq!(traces[0].marker.color.as_deref(), Some("violet"));
    assert_eq!(traces[1].marker.color.as_deref(), Some("lightcoral"));
    assert_eq!(traces[2].marker.color.as_deref(), Some("darkorchid"));

    // The estimate dataset has no mode or size entry
    assert_eq!(traces[2].mode, None);
    assert_eq!(traces[2].marker.size, None);
    assert_eq!(traces[1].marker.size, Some(4.5));

    assert_eq!(traces[0].x.len(), 11);
    assert_eq!(traces[2].x, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
}

#[test]
fn test_one_trace_per_dataset_for_flat_specs() {
    let data = vec![load("ocv_points.csv"), load("ocv_estimate.csv")];
    let x = vec![SeriesSpec::from("SOC-Chg"), SeriesSpec::from("SOC")];
    let y = vec![SeriesSpec::from("OCV-Chg"), SeriesSpec::from("OCV")];
    let style = StyleArgs {
        name: StyleArg::per_dataset(vec!["charge".to_string(), "estimate".to_string()]),
        ..Default::default()
    };

    let fig = build(&data, &x, &y, Labels::default(), &style).unwrap();
    let names: Vec<_> = fig.traces().iter().map(|t| t.name.as_deref()).collect();
    assert_eq!(names, vec![Some("charge"), Some("estimate")]);
}

#[test]
fn test_cardinality_and_over_specification_are_distinct() {
    let data = vec![load("ocv_estimate.csv")];

    let cardinality = build(
        &data,
        &[SeriesSpec::from("SOC"), SeriesSpec::from("SOC")],
        &[SeriesSpec::from("OCV")],
        Labels::default(),
        &StyleArgs::default(),
    )
    .unwrap_err();

    let too_many = build(
        &data,
        &[SeriesSpec::from("SOC")],
        &[SeriesSpec::from("OCV")],
        Labels::default(),
        &StyleArgs {
            color: StyleArg::per_dataset(vec!["red".to_string(), "blue".to_string()]),
            ..Default::default()
        },
    )
    .unwrap_err();

    assert!(matches!(cardinality, BuildError::Cardinality { .. }));
    assert!(matches!(too_many, BuildError::TooManyValues { .. }));
    assert_ne!(cardinality.to_string(), too_many.to_string());
}

#[test]
fn test_job_file_to_json() {
    let job = PlotJob::from_path(&fixture("ocv_job.json")).unwrap();
    let datasets = job.load_datasets().unwrap();
    let fig = job.build_figure(&datasets).unwrap();
    let bytes = render_figure(&fig, &job.output).unwrap();

    let doc = parse_json(&bytes);
    let traces = doc["data"].as_array().unwrap();
    assert_eq!(traces.len(), 3);
    assert_eq!(traces[0]["name"], "Charge-OCV");
    assert_eq!(traces[1]["mode"], "markers");
    assert_eq!(traces[2]["name"], "OCV");
    assert!(traces[2]["mode"].is_null());
    assert_eq!(doc["layout"]["title"], "OCV vs. SOC Curve");
    assert_eq!(doc["layout"]["xaxis_title"], "SOC (%)");
}

#[test]
fn test_invalid_mode_fails_at_render() {
    let data = vec![load("ocv_estimate.csv")];
    let style = StyleArgs {
        mode: StyleArg::Scalar("dots".to_string()),
        ..Default::default()
    };

    // The builder forwards the mode untouched
    let fig = build(
        &data,
        &[SeriesSpec::from("SOC")],
        &[SeriesSpec::from("OCV")],
        Labels::default(),
        &style,
    )
    .unwrap();
    assert_eq!(fig.traces()[0].mode.as_deref(), Some("dots"));

    let err = render_figure(&fig, &RenderOptions::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid mode"));
}

#[test]
fn test_cli_flags_to_json() {
    let points = fixture("ocv_points.csv");
    let estimate = fixture("ocv_estimate.csv");
    let result = run_multiplot(
        &[
            "--data",
            points.to_str().unwrap(),
            "--data",
            estimate.to_str().unwrap(),
            "--x",
            r#"[["SOC-Chg","SOC-Dis"], SOC]"#,
            "--y",
            r#"[["OCV-Chg","OCV-Dis"], OCV]"#,
            "--color",
            "[[violet, lightcoral], darkorchid]",
            "--name",
            "[[Charge, Discharge]]",
            "--format",
            "json",
        ],
        None,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());

    let doc = parse_json(&result.unwrap());
    let traces = doc["data"].as_array().unwrap();
    assert_eq!(traces.len(), 3);
    assert_eq!(traces[1]["marker"]["color"], "lightcoral");
    assert_eq!(traces[1]["name"], "Discharge");
    assert!(traces[2]["name"].is_null());
}

#[test]
fn test_cli_stdin_single_dataset() {
    let csv = "A,B,C,D\n1,2,3,4\n5,6,7,8\n";
    let result = run_multiplot(
        &["--x", "[A, B]", "--y", "[C, D]", "--color", "[[red, blue]]", "--format", "json"],
        Some(csv),
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());

    let doc = parse_json(&result.unwrap());
    let traces = doc["data"].as_array().unwrap();
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[0]["marker"]["color"], "red");
    assert_eq!(traces[1]["marker"]["color"], "blue");
    assert_eq!(traces[1]["y"], serde_json::json!([4.0, 8.0]));
}

#[test]
fn test_cli_config_with_override() {
    let job = fixture("ocv_job.json");
    let result = run_multiplot(
        &["--config", job.to_str().unwrap(), "--title", "Override"],
        None,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());

    let doc = parse_json(&result.unwrap());
    assert_eq!(doc["layout"]["title"], "Override");
    assert_eq!(doc["data"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_too_many_colors() {
    let csv = "x,y\n1,10\n2,20\n";
    let result = run_multiplot(
        &["--x", "x", "--y", "y", "--color", "[red, blue]", "--format", "json"],
        Some(csv),
    );
    let err = result.unwrap_err();
    assert!(err.contains("more color values than datasets"), "stderr: {}", err);
}

#[test]
fn test_cli_column_not_found() {
    let csv = "a,b\n1,10\n2,20\n";
    let result = run_multiplot(&["--x", "x", "--y", "y", "--format", "json"], Some(csv));
    let err = result.unwrap_err();
    assert!(err.contains("column 'x' not found"), "stderr: {}", err);
}

#[test]
fn test_cli_invalid_literal() {
    let csv = "x,y\n1,10\n";
    let result = run_multiplot(&["--x", "[x", "--y", "y"], Some(csv));
    assert!(result.is_err());
}

#[test]
#[ignore = "needs a system sans-serif font"]
fn test_png_output() {
    let data = vec![load("ocv_points.csv"), load("ocv_estimate.csv")];
    let fig = build(
        &data,
        &[SeriesSpec::from(vec!["SOC-Chg", "SOC-Dis"]), SeriesSpec::from("SOC")],
        &[SeriesSpec::from(vec!["OCV-Chg", "OCV-Dis"]), SeriesSpec::from("OCV")],
        Labels::new(Some("OCV".into()), Some("SOC (%)".into()), Some("OCV (V)".into())),
        &StyleArgs {
            mode: StyleArg::per_dataset(vec!["lines+markers".to_string()]),
            ..Default::default()
        },
    )
    .unwrap();

    let png = render_figure(&fig, &RenderOptions::default()).unwrap();
    assert!(is_valid_png(&png), "Output is not a valid PNG");
}

#[test]
#[ignore = "needs a system sans-serif font"]
fn test_svg_output() {
    let data = vec![load("ocv_estimate.csv")];
    let fig = build(
        &data,
        &[SeriesSpec::from("SOC")],
        &[SeriesSpec::from("OCV")],
        Labels::default(),
        &StyleArgs::default(),
    )
    .unwrap();

    let options = RenderOptions {
        format: OutputFormat::Svg,
        ..Default::default()
    };
    let svg = String::from_utf8(render_figure(&fig, &options).unwrap()).unwrap();
    assert!(svg.contains("<svg"));
}
