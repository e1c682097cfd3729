// src/main.rs
use std::fmt::Display;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use ndarray::Array2;
use stimslice::config::ExtractionConfig;
use stimslice::extract::{
    condition_responses, extract_natural_scenes, extract_natural_scenes_dff, extract_spontaneous,
    extract_static_gratings, render_condition_responses_png, write_binned_csv, Binned, ConditionTable, Extraction,
    ExtractionSummary, InMemorySession, PlotStyle, Segments, SessionFile,
};
use stimslice::types::{ExtractionMode, StimulusKind, TraceKind};
#[derive(Clone, Copy, Debug, ValueEnum)]
enum StimulusArg {
    Gratings,
    Scenes,
    Spont,
    ScenesDff,
}
impl From<StimulusArg> for StimulusKind {
    fn from(value: StimulusArg) -> Self {
        match value {
            StimulusArg::Gratings => StimulusKind::StaticGratings,
            StimulusArg::Scenes => StimulusKind::NaturalScenes,
            StimulusArg::Spont => StimulusKind::Spontaneous,
            StimulusArg::ScenesDff => StimulusKind::NaturalScenesDff,
        }
    }
}
/// Slice a calcium-imaging session into stimulus-indexed trial tables.
#[derive(Parser, Debug)]
#[command(name = "stimslice", version)]
struct Args {
    /// Session JSON file. A synthetic session is generated when omitted.
    #[arg(long)]
    session: Option<PathBuf>,
    /// JSON run configuration; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    stimulus: Option<StimulusArg>,
    /// Use raw fluorescence instead of dF/F.
    #[arg(long)]
    raw: bool,
    /// Collapse each trial to its mean.
    #[arg(long)]
    binned: bool,
    /// Cell ids for the scenes-dff extraction.
    #[arg(long, value_delimiter = ',')]
    cells: Option<Vec<u64>>,
    #[arg(long)]
    no_plot: bool,
    #[arg(long)]
    out: Option<PathBuf>,
    /// Seed of the synthetic session.
    #[arg(long)]
    seed: Option<u64>,
}
fn resolve_config(args: &Args) -> Result<ExtractionConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractionConfig::load(path)?,
        None => ExtractionConfig::default(),
    };
    if let Some(stimulus) = args.stimulus {
        config.stimulus = stimulus.into();
    }
    if args.raw {
        config.trace = TraceKind::Raw;
    }
    if args.binned {
        config.mode = ExtractionMode::Binned;
    }
    if let Some(cells) = &args.cells {
        config.cells = Some(cells.clone());
    }
    if args.no_plot {
        config.plot = false;
    }
    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
    if let Some(seed) = args.seed {
        config.synthetic.seed = seed;
    }
    Ok(config)
}
fn load_session(path: Option<&Path>, config: &ExtractionConfig) -> Result<InMemorySession> {
    let Some(path) = path else {
        info!("no session file, generating synthetic session (seed {})", config.synthetic.seed);
        return Ok(config.synthetic.build());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading session {}", path.display()))?;
    let file: SessionFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing session {}", path.display()))?;
    Ok(file.into_session()?)
}
fn write_summary(summary: &ExtractionSummary, dir: &Path) -> Result<()> {
    let path = dir.join("summary.json");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)?;
    info!(
        "{} conditions, {} trials -> {}",
        summary.conditions.len(),
        summary.total_trials,
        path.display()
    );
    Ok(())
}
fn write_plot<K: PartialEq + Clone + Display>(
    table: &ConditionTable<K, Array2<f64>>,
    config: &ExtractionConfig,
) -> Result<()> {
    if !config.plot {
        return Ok(());
    }
    let responses = condition_responses(table);
    if responses.is_empty() {
        warn!("no trials to plot");
        return Ok(());
    }
    let style = PlotStyle {
        width: config.plot_width,
        height: config.plot_height,
        ..PlotStyle::default()
    };
    let png = render_condition_responses_png(&responses, &style)?;
    let path = config.output_dir.join("responses.png");
    fs::write(&path, png).with_context(|| format!("writing {}", path.display()))?;
    info!("condition responses -> {}", path.display());
    Ok(())
}
fn emit_segments<K: PartialEq + Clone + Display>(
    extraction: &Extraction<K, Segments>,
    config: &ExtractionConfig,
) -> Result<()> {
    write_summary(&ExtractionSummary::from_extraction(extraction), &config.output_dir)?;
    write_plot(&extraction.tables.fluorescence, config)
}
fn emit_binned<K: PartialEq + Clone + Display>(
    extraction: &Extraction<K, Binned>,
    config: &ExtractionConfig,
) -> Result<()> {
    write_summary(&ExtractionSummary::from_extraction(extraction), &config.output_dir)?;
    let path = config.output_dir.join("trials.csv");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_binned_csv(extraction, BufWriter::new(file))?;
    info!("binned trials -> {}", path.display());
    Ok(())
}
fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;
    let session = load_session(args.session.as_deref(), &config)?;
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let trace = config.trace;
    match (config.stimulus, config.mode) {
        (StimulusKind::StaticGratings, ExtractionMode::Segments) => {
            emit_segments(&extract_static_gratings::<Segments, _>(&session, trace)?, &config)
        }
        (StimulusKind::StaticGratings, ExtractionMode::Binned) => {
            emit_binned(&extract_static_gratings::<Binned, _>(&session, trace)?, &config)
        }
        (StimulusKind::NaturalScenes, ExtractionMode::Segments) => {
            emit_segments(&extract_natural_scenes::<Segments, _>(&session, trace)?, &config)
        }
        (StimulusKind::NaturalScenes, ExtractionMode::Binned) => {
            emit_binned(&extract_natural_scenes::<Binned, _>(&session, trace)?, &config)
        }
        (StimulusKind::Spontaneous, ExtractionMode::Segments) => {
            emit_segments(&extract_spontaneous::<Segments, _>(&session, trace)?, &config)
        }
        (StimulusKind::Spontaneous, ExtractionMode::Binned) => {
            emit_binned(&extract_spontaneous::<Binned, _>(&session, trace)?, &config)
        }
        (StimulusKind::NaturalScenesDff, mode) => {
            if mode == ExtractionMode::Binned || trace == TraceKind::Raw {
                warn!("scenes-dff always keeps full dF/F windows; ignoring --binned/--raw");
            }
            let responses = extract_natural_scenes_dff(&session, config.cells.as_deref())?;
            write_summary(
                &ExtractionSummary::from_scene_responses(&responses),
                &config.output_dir,
            )?;
            write_plot(&responses.fluorescence, &config)
        }
    }
}
fn main() -> Result<()> {
    env_logger::init();
    run(Args::parse())
}
