//! Signal processor tab. Runs a cancellable background pass over a synthetic
//! input, reporting progress in frames, and owns one waveform surface.

use super::{BuildContext, TabKindHandler, TabParts, write_yaml};
use crate::shell::SaveTarget;
use crate::tab::fields::{FieldKey, ProcessorFields};
use crate::tab::layout::LayoutDescriptor;
use crate::tab::view::{ButtonAction, Control, RenderSurface, Widget};
use crate::tab::{TabFields, TabId, TabKind, TaskContext, TaskFuture};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct ProcessorHandler;

#[derive(Serialize)]
struct SavedProcessorSettings<'a> {
    tab: TabId,
    source: &'a str,
    sample_rate_hz: u32,
    gain_db: f64,
    duration_secs: f64,
    frames_processed: u64,
    completed: bool,
}

impl ProcessorHandler {
    fn file_name(id: TabId) -> String {
        format!("processor-{id}.yaml")
    }

    /// Frames handled per tick so a run takes roughly `duration_secs` of wall time
    fn frames_per_tick(sample_rate_hz: u32, tick: Duration) -> u64 {
        let per_tick = f64::from(sample_rate_hz) * tick.as_secs_f64();
        (per_tick.round() as u64).max(1)
    }
}

impl TabKindHandler for ProcessorHandler {
    fn kind(&self) -> TabKind {
        TabKind::Processor
    }

    fn build(&self, _ctx: &BuildContext<'_>) -> anyhow::Result<TabParts> {
        let widgets = vec![
            Widget::right_label("sourcelabel", "Input:"),
            Widget::new(
                "source",
                Control::TextEntry {
                    field: FieldKey::Source,
                },
            ),
            Widget::right_label("ratelabel", "Sample rate (Hz):"),
            Widget::new(
                "rate",
                Control::IntSpin {
                    field: FieldKey::SampleRate,
                    min: i64::from(*ProcessorFields::SAMPLE_RATE_RANGE_HZ.start()),
                    max: i64::from(*ProcessorFields::SAMPLE_RATE_RANGE_HZ.end()),
                    step: 100,
                },
            ),
            Widget::right_label("gainlabel", "Gain (dB):"),
            Widget::new(
                "gain",
                Control::FloatSpin {
                    field: FieldKey::Gain,
                    min: *ProcessorFields::GAIN_RANGE_DB.start(),
                    max: *ProcessorFields::GAIN_RANGE_DB.end(),
                    step: 0.5,
                    decimals: 1,
                },
            ),
            Widget::right_label("durationlabel", "Duration (s):"),
            Widget::new(
                "duration",
                Control::FloatSpin {
                    field: FieldKey::Duration,
                    min: *ProcessorFields::DURATION_RANGE_SECS.start(),
                    max: *ProcessorFields::DURATION_RANGE_SECS.end(),
                    step: 1.0,
                    decimals: 0,
                },
            ),
            Widget::button("start", "Start Processing", ButtonAction::StartTask),
            Widget::button("abort", "Abort", ButtonAction::StopTask),
            Widget::new(
                "progress",
                Control::Progress {
                    field: FieldKey::Progress,
                },
            ),
        ];
        let layout = LayoutDescriptor::new()
            .place("sourcelabel", 0, 0)
            .place_span("source", 0, 1, 1, 2)
            .place("ratelabel", 1, 0)
            .place_span("rate", 1, 1, 1, 2)
            .place("gainlabel", 2, 0)
            .place_span("gain", 2, 1, 1, 2)
            .place("durationlabel", 3, 0)
            .place_span("duration", 3, 1, 1, 2)
            .place("start", 4, 1)
            .place("abort", 4, 2)
            .place_span("progress", 5, 0, 1, 3)
            .with_column_stretch([2u32, 1, 1])
            .with_row_stretch([1u32, 1, 1, 1, 1, 1, 10]);

        Ok(
            TabParts::new(widgets, layout, TabFields::defaults(TabKind::Processor))
                .with_surface(RenderSurface::new("waveform", [640, 240]))
                .with_background_task(),
        )
    }

    fn save_target(&self, _id: TabId, _fields: &TabFields) -> SaveTarget {
        SaveTarget::Directory {
            title: "Select Directory to Save Processor Settings".to_string(),
        }
    }

    fn output_path(&self, id: TabId, destination: &Path) -> Option<PathBuf> {
        Some(destination.join(Self::file_name(id)))
    }

    fn serialize(
        &self,
        id: TabId,
        fields: &TabFields,
        destination: &Path,
    ) -> anyhow::Result<PathBuf> {
        let p = fields
            .as_processor()
            .context("processor handler received fields of another kind")?;
        let settings = SavedProcessorSettings {
            tab: id,
            source: &p.source,
            sample_rate_hz: p.sample_rate_hz,
            gain_db: p.gain_db,
            duration_secs: p.duration_secs,
            frames_processed: p.frames_processed,
            completed: p.frames_processed >= p.total_frames(),
        };
        write_yaml(&settings, &destination.join(Self::file_name(id)))
    }

    fn run_task(&self, fields: &TabFields, ctx: TaskContext, tick: Duration) -> Option<TaskFuture> {
        let p = fields.as_processor()?;
        let total = p.total_frames();
        let step = Self::frames_per_tick(p.sample_rate_hz, tick);
        let source = p.source.clone();

        Some(Box::pin(async move {
            log::info!("Processing '{}': {} frames", source, total);
            let mut interval = tokio::time::interval(tick);
            while ctx.progress() < total {
                interval.tick().await;
                if ctx.is_cancelled() {
                    log::info!("Processing '{}' aborted at frame {}", source, ctx.progress());
                    return;
                }
                let remaining = total - ctx.progress();
                ctx.add_progress(step.min(remaining));
            }
            log::info!("Processing '{}' completed", source);
        }))
    }
}
