//! calib-plot: calibration report figures
//!
//! Render one figure from a YAML description:
//!   `calib-plot render thrs_CLS.yaml -o thrs_CLS.svg`
//!
//! Write the four threshold-scan figures of the report:
//!   `calib-plot report --out-dir plots --format both`

use anyhow::{Context, Result};
use calib_plot::config::FigureConfig;
use calib_plot::output::OutputFormat;
use calib_plot::plot::{PlotStyle, ScatterRenderer};
use calib_plot::presets::ThresholdScan;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// calib-plot: detector calibration report figures
#[derive(Parser, Debug)]
#[command(name = "calib-plot")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Scatter plots with error bars for calibration reports", long_about = None)]
struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a figure described by a YAML file
    Render {
        /// Figure description
        config: PathBuf,

        /// Output file; the extension (svg or png) selects the format
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write the threshold-scan figures of the report
    Report {
        /// Output directory (created if missing)
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Svg,
    Png,
    Both,
}

impl Format {
    fn outputs(self) -> &'static [OutputFormat] {
        match self {
            Self::Svg => &[OutputFormat::Svg],
            Self::Png => &[OutputFormat::Png],
            Self::Both => &[OutputFormat::Svg, OutputFormat::Png],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    match cli.command {
        Command::Render { config, output } => render(&config, &output),
        Command::Report { out_dir, format } => report(&out_dir, format),
    }
}

fn render(config_path: &Path, output: &Path) -> Result<()> {
    let config = FigureConfig::load(config_path)
        .with_context(|| format!("failed to load figure config {}", config_path.display()))?;
    let renderer = ScatterRenderer::new(config.style.clone());
    let spec = config.into_spec().with_context(|| format!("invalid figure in {}", config_path.display()))?;

    let figure = renderer.render(&spec)?;
    figure.write(output).with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

fn report(out_dir: &Path, format: Format) -> Result<()> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;

    let renderer = ScatterRenderer::new(PlotStyle::report());
    for scan in ThresholdScan::ALL {
        let figure = renderer.render(&scan.spec()?)?;
        for output in format.outputs() {
            let path = out_dir.join(format!("{}.{}", scan.file_stem(), output.extension()));
            figure.write(&path).with_context(|| format!("failed to write {}", path.display()))?;
        }
    }
    Ok(())
}
