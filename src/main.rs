use anyhow::{bail, Context, Result};
use clap::Parser;
use multiplot::config::PlotJob;
use multiplot::literal::parse_literal;
use multiplot::render::render_figure;
use multiplot::series::OneOrMany;
use multiplot::{Dataset, OutputFormat};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "multiplot")]
#[command(
    about = "Plot column pairs from one or more CSV datasets into a single chart",
    long_about = None
)]
struct Args {
    /// JSON job file; any flag below overrides the matching field
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset file (CSV, or JSON array of objects); repeat for several.
    /// Reads CSV from stdin when absent
    #[arg(short, long)]
    data: Vec<PathBuf>,

    /// X columns, e.g. 'SOC' or '[["SOC-Chg","SOC-Dis"], SOC]'
    #[arg(short, long)]
    x: Option<String>,

    /// Y columns, same shape as --x
    #[arg(short, long)]
    y: Option<String>,

    /// Colors: scalar, per-dataset list, or nested per-series lists.
    /// Quote values containing commas, e.g. '["rgb(255,0,0)", "hsl(0,100%,50%)"]'
    #[arg(long)]
    color: Option<String>,

    /// Modes ("lines", "markers", "lines+markers") in the same shapes as --color
    #[arg(long)]
    mode: Option<String>,

    /// Legend names in the same shapes as --color
    #[arg(long)]
    name: Option<String>,

    /// Marker sizes in the same shapes as --color
    #[arg(long)]
    size: Option<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    x_title: Option<String>,

    #[arg(long)]
    y_title: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// png, svg or json (default: from --output extension, else png)
    #[arg(long)]
    format: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Merge command-line flags over the job file (or an empty job)
fn job_from_args(args: &Args) -> Result<PlotJob> {
    let mut job = match &args.config {
        Some(path) => PlotJob::from_path(path)?,
        None => PlotJob::default(),
    };

    if !args.data.is_empty() {
        job.data = Some(OneOrMany::Many(args.data.clone()));
    }
    if let Some(x) = &args.x {
        job.x = Some(OneOrMany::Many(parse_literal(x)?.into_series().context("--x")?));
    }
    if let Some(y) = &args.y {
        job.y = Some(OneOrMany::Many(parse_literal(y)?.into_series().context("--y")?));
    }
    if let Some(color) = &args.color {
        job.style.color = parse_literal(color)?.into_style().context("--color")?;
    }
    if let Some(mode) = &args.mode {
        job.style.mode = parse_literal(mode)?.into_style().context("--mode")?;
    }
    if let Some(name) = &args.name {
        job.style.name = parse_literal(name)?.into_style().context("--name")?;
    }
    if let Some(size) = &args.size {
        job.style.size = parse_literal(size)?.into_style().context("--size")?;
    }

    if args.title.is_some() {
        job.title = args.title.clone();
    }
    if args.x_title.is_some() {
        job.x_title = args.x_title.clone();
    }
    if args.y_title.is_some() {
        job.y_title = args.y_title.clone();
    }

    if let Some(width) = args.width {
        job.output.width = width;
    }
    if let Some(height) = args.height {
        job.output.height = height;
    }

    let explicit = args.format.as_deref().or_else(|| {
        args.output
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
    });
    if let Some(format) = explicit {
        job.output.format = match OutputFormat::from_extension(format) {
            Some(f) => f,
            None if args.format.is_some() => bail!("Unknown output format '{}'", format),
            // Unrecognised file extension: keep the job's format
            None => job.output.format,
        };
    }

    Ok(job)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let job = job_from_args(&args)?;

    let datasets = if job.data.is_some() {
        job.load_datasets()?
    } else {
        // Read CSV from stdin
        vec![Dataset::from_csv_reader(io::stdin().lock()).context("Failed to read CSV from stdin")?]
    };

    let figure = job.build_figure(&datasets)?;
    let bytes = render_figure(&figure, &job.output).context("Failed to render plot")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&bytes)
                .context("Failed to write output to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
