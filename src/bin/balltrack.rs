use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use balltrack_rs::integration::{OverlayStyle, draw_overlay};
use balltrack_rs::{
    BallDetector, BallPipeline, CsvSink, PipelineConfig, ResultSink, Trajectory,
};

/// Track a ball through a directory of frames exported from a static-camera clip.
#[derive(Parser)]
#[command(name = "balltrack", version)]
pub struct Args {
    /// Directory of frame images, processed in file-name order
    #[arg(long)]
    pub frames: PathBuf,
    /// Output CSV with `frame,x,y,visible` rows
    #[arg(long)]
    pub out_csv: PathBuf,
    /// Optional directory for annotated PNG frames
    #[arg(long)]
    pub out_frames: Option<PathBuf>,
    /// Optional JSON file with `detector` and `tracker` settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tif"];

fn list_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("cannot read {dir:?}"))? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
        if is_image {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    let frames = list_frames(&args.frames)?;
    if frames.is_empty() {
        bail!("no frame images found in {:?}", args.frames);
    }
    if let Some(dir) = &args.out_frames {
        std::fs::create_dir_all(dir).with_context(|| format!("cannot create {dir:?}"))?;
    }

    let detector = BallDetector::new(config.detector)?;
    let mut pipeline = BallPipeline::new(detector, config.tracker)?;
    let mut sink = CsvSink::create(&args.out_csv)
        .with_context(|| format!("cannot create {:?}", args.out_csv))?;
    let mut trajectory = Trajectory::new();
    let style = OverlayStyle::default();

    info!(frames = frames.len(), "processing");
    let mut visible_frames = 0usize;

    for path in &frames {
        let mut frame = image::open(path)
            .with_context(|| format!("cannot decode {path:?}"))?
            .to_rgb8();
        let result = pipeline
            .process_image(&frame)
            .with_context(|| format!("detection failed on {path:?}"))?;
        debug!(
            frame = result.frame,
            detected = result.candidate.is_some(),
            visible = result.output.visible
        );

        sink.record(&result)?;
        trajectory.push(&result.output);
        if result.output.visible {
            visible_frames += 1;
        }

        if let Some(dir) = &args.out_frames {
            draw_overlay(&mut frame, &result.output, &trajectory, &style);
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("frame");
            let out = dir.join(format!("{stem}.png"));
            frame
                .save(&out)
                .with_context(|| format!("cannot write {out:?}"))?;
        }
    }

    sink.finish()?;
    info!(
        frames = pipeline.frames_processed(),
        visible = visible_frames,
        "done"
    );
    Ok(())
}
