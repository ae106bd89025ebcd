//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::recording_player::RecordingPlayer;
use crate::app::container::AppContainer;
use crate::app::export_interactor::ExportSettings;
use crate::app::project_interactor::OpenedSession;
use crate::app::timeline_controller::TimelineController;
use crate::cli::args::{EditArgs, EditOp, ExportArgs, InspectArgs, MediaArgs};
use crate::config::EditorConfig;
use crate::domain::model::*;
use crate::error::RecutError;
use crate::utils::logging::ProgressReporter;
use crate::utils::time::{format_duration, format_frame};

type Controller = TimelineController<RecordingPlayer>;

/// Printable view of an edit session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub media_file: String,
    pub project_file: Option<String>,
    pub frame_rate: f64,
    pub input_duration_seconds: f64,
    pub output_duration_seconds: f64,
    pub total_output_frames: i64,
    pub current_input_frame: i64,
    pub current_output_frame: i64,
    pub freeze_crop_size_mode: bool,
    pub trimming_markers: Vec<TrimMarker>,
    pub disjunct_segments: Vec<(f64, f64)>,
    pub non_disjunct_markers: Vec<f64>,
    pub crop_frames: Vec<CropKeyframe>,
}

impl SessionReport {
    pub fn from_controller(controller: &Controller, session: &OpenedSession) -> Self {
        let timeline = controller.timeline();
        Self {
            media_file: session.media_path.to_string_lossy().into_owned(),
            project_file: session
                .project_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            frame_rate: timeline.frame_rate(),
            input_duration_seconds: timeline.input_duration().as_secs_f64(),
            output_duration_seconds: controller.output_duration().as_secs_f64(),
            total_output_frames: timeline.total_output_frames(),
            current_input_frame: controller.current_input_frame(),
            current_output_frame: controller.current_output_frame(),
            freeze_crop_size_mode: controller.keyframes().is_frozen(),
            trimming_markers: timeline.markers().to_vec(),
            disjunct_segments: controller
                .disjunct_output_trims()
                .iter()
                .map(|s| (s.from.as_secs_f64(), s.to.as_secs_f64()))
                .collect(),
            non_disjunct_markers: controller
                .non_disjunct_output_markers()
                .iter()
                .map(|m| m.position.as_secs_f64())
                .collect(),
            crop_frames: controller.keyframes().keyframes().to_vec(),
        }
    }
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    info!("Inspecting {}", args.path.display());
    let session = container.project_interactor().open(&args.path).await;
    let controller = build_controller(&session, &args.media)?;

    print_session(&controller, &session, args.json)?;
    Ok(())
}

/// Execute the edit command
pub async fn edit(container: &dyn AppContainer, args: EditArgs) -> Result<()> {
    info!("Editing {} ({} operations)", args.path.display(), args.ops.len());
    let session = container.project_interactor().open(&args.path).await;
    let mut controller = build_controller(&session, &args.media)?;

    for op in &args.ops {
        apply_op(&mut controller, op)
            .with_context(|| format!("Edit operation '{}' failed", op))?;
    }

    print_session(&controller, &session, args.json)?;

    if args.dry_run {
        info!("Dry run, project not saved");
        return Ok(());
    }
    let save_path = project_save_path(&session, args.save.as_deref());
    let media_name = session.media_path.to_string_lossy();
    container
        .project_interactor()
        .save(&save_path, &controller.to_project(&media_name))
        .await
        .with_context(|| format!("Failed to save project to {}", save_path.display()))?;
    if !args.json {
        println!("Saved project: {}", save_path.display());
    }
    Ok(())
}

/// Execute the export command
pub async fn export(
    container: &dyn AppContainer,
    config: &EditorConfig,
    args: ExportArgs,
) -> Result<()> {
    info!("Exporting {} to {}", args.path.display(), args.output);
    let session = container.project_interactor().open(&args.path).await;
    let controller = build_controller(&session, &args.media)?;

    let output_type = match &args.output_type {
        Some(value) => Some(VideoOutputType::parse(value).map_err(RecutError::from)?),
        None if Path::new(&args.output).extension().is_some() => None,
        None => Some(config.default_output_type),
    };
    let settings = ExportSettings {
        file_name: args.output.clone(),
        output_type,
        crf: args.crf.unwrap_or(config.default_crf),
        pixel_scale: args.scale,
        frame_rate_multiplier: args.frame_rate_multiplier,
    };

    let interactor = container.export_interactor();
    let media_name = session.media_path.to_string_lossy();
    let job = interactor
        .prepare(&controller, &media_name, &settings)
        .context("Failed to prepare export")?;

    let reporter = ProgressReporter::new(&format!("Exporting {}", job.output.file_name));
    let report = interactor
        .execute(&job, &reporter)
        .await
        .context("Export failed")?;
    reporter.complete(report.success);
    if !report.success {
        return Err(RecutError::ExportFailed {
            frames: report.frames_processed,
        }
        .into());
    }

    println!(
        "Exported {} frames ({}x{}, {}) to {} in {}",
        report.frames_processed,
        job.output.pixel_width,
        job.output.pixel_height,
        job.output.output_type,
        job.output.file_name,
        format_duration(report.elapsed)
    );

    remember_export_settings(container, config, &job.output).await;
    Ok(())
}

fn build_controller(session: &OpenedSession, media: &MediaArgs) -> Result<Controller> {
    let media_info = media
        .media_info()
        .map_err(RecutError::from)
        .context("Invalid media arguments")?;
    let mut controller = TimelineController::new(RecordingPlayer::new());
    controller.load_media(media_info);
    controller.restore(&session.project);
    Ok(controller)
}

fn apply_op(controller: &mut Controller, op: &EditOp) -> Result<(), RecutError> {
    let changed = match *op {
        EditOp::Seek(time) => {
            controller.set_input_position(time.duration);
            true
        }
        EditOp::SeekOut(time) => {
            controller.set_output_position(time.duration)?;
            true
        }
        EditOp::SeekFraction(fraction) => {
            controller.seek_output_fraction(fraction)?;
            true
        }
        EditOp::Marker => controller.add_marker(),
        EditOp::Trim => controller.add_trim(),
        EditOp::TrimAfter(index, trim_after) => controller.set_trim_after(index, trim_after),
        EditOp::Step => controller.frame_step(true),
        EditOp::Back => controller.frame_step(false),
        EditOp::CropNext => {
            controller.crop_frame_step(true)?;
            true
        }
        EditOp::CropPrev => {
            controller.crop_frame_step(false)?;
            true
        }
        EditOp::Home => {
            controller.jump_home()?;
            true
        }
        EditOp::End => {
            controller.jump_end()?;
            true
        }
        EditOp::Freeze(frozen) => controller.set_freeze_crop_size_mode(frozen),
        EditOp::Crop(rect) => controller.set_current_crop_rect(rect),
    };
    if !changed {
        warn!(
            "Operation '{}' had no effect at input frame {}",
            op,
            controller.current_input_frame()
        );
    }
    Ok(())
}

fn project_save_path(session: &OpenedSession, explicit: Option<&Path>) -> PathBuf {
    match (explicit, &session.project_path) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) => path.clone(),
        (None, None) => session.media_path.with_extension("json"),
    }
}

async fn remember_export_settings(
    container: &dyn AppContainer,
    config: &EditorConfig,
    output: &VideoTranscodeOutput,
) {
    if config.default_crf == output.crf && config.default_output_type == output.output_type {
        return;
    }
    // start from the stored file so CLI and environment overrides stay out of it
    let config_port = container.config_port();
    let stored = match config_port.load_config().await {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Could not remember export settings: {}", e);
            return;
        }
    };
    let updated = EditorConfig {
        default_crf: output.crf,
        default_output_type: output.output_type,
        ..stored
    };
    if let Err(e) = config_port.save_config(&updated).await {
        warn!("Could not remember export settings: {}", e);
    }
}

fn print_session(controller: &Controller, session: &OpenedSession, json: bool) -> Result<()> {
    let report = SessionReport::from_controller(controller, session);
    if json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize session to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    let timeline = controller.timeline();
    println!("Media:           {}", report.media_file);
    if let Some(project) = &report.project_file {
        println!("Project:         {}", project);
    }
    println!("Frame rate:      {:.3} fps", report.frame_rate);
    println!(
        "Input duration:  {}",
        format_duration(timeline.input_duration())
    );
    println!(
        "Output duration: {} ({} frames)",
        format_duration(controller.output_duration()),
        report.total_output_frames
    );
    println!(
        "Position:        input {} / output {}",
        format_frame(
            report.current_input_frame,
            controller.input_position()
        ),
        format_frame(report.current_output_frame, controller.output_position())
    );

    println!("Markers:");
    for (index, segment) in timeline.segments().enumerate() {
        println!(
            "  [{}] frames {}..{} {}",
            index,
            segment.start,
            segment.end,
            if segment.trimmed { "trimmed" } else { "kept" }
        );
    }

    println!("Output segments:");
    for segment in controller.disjunct_output_trims() {
        println!(
            "  {} - {}",
            format_duration(segment.from),
            format_duration(segment.to)
        );
    }
    for marker in controller.non_disjunct_output_markers() {
        println!("  marker at {}", format_duration(marker.position));
    }

    println!(
        "Crop keyframes{}:",
        if report.freeze_crop_size_mode {
            " (frozen size)"
        } else {
            ""
        }
    );
    for keyframe in controller.keyframes().keyframes() {
        println!("  frame {}: {}", keyframe.frame_number, keyframe.rect);
    }
    Ok(())
}
