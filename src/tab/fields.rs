//! Per-kind tab state.
//!
//! [`TabFields`] is a closed variant with one strongly typed struct per
//! [`TabKind`]. Widgets address individual values through [`FieldKey`] so
//! the frontend can edit any kind generically; out-of-range input is clamped
//! on the way in.

use super::TabKind;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Number of free-text entries on a generic tab
pub const GENERIC_ENTRY_COUNT: usize = 5;

/// Addressable value inside a tab's fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Selected source option (generic) or input name (processor)
    Source,
    Count,
    Threshold,
    /// One of the generic free-text entries, 0-based
    Entry(usize),
    Flagged,
    Title,
    Body,
    SampleRate,
    Gain,
    Duration,
    /// Processing progress as a 0..=1 fraction (read-only)
    Progress,
    /// Whether the background run is active (read-only)
    Processing,
}

/// A single field value as seen by widgets
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("field {key:?} does not exist on {kind} tabs")]
    NotApplicable { kind: TabKind, key: FieldKey },
    #[error("field {0:?} received a value of the wrong type")]
    TypeMismatch(FieldKey),
    #[error("field {0:?} is read-only")]
    ReadOnly(FieldKey),
    #[error("'{value}' is not a valid choice for {key:?}")]
    InvalidChoice { key: FieldKey, value: String },
}

/// Kind-specific state of one tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TabFields {
    Generic(GenericFields),
    Editor(EditorFields),
    Processor(ProcessorFields),
}

impl TabFields {
    /// Default fields for a freshly created tab of `kind`
    pub fn defaults(kind: TabKind) -> Self {
        match kind {
            TabKind::Generic => TabFields::Generic(GenericFields::default()),
            TabKind::Editor => TabFields::Editor(EditorFields::default()),
            TabKind::Processor => TabFields::Processor(ProcessorFields::default()),
        }
    }

    pub fn kind(&self) -> TabKind {
        match self {
            TabFields::Generic(_) => TabKind::Generic,
            TabFields::Editor(_) => TabKind::Editor,
            TabFields::Processor(_) => TabKind::Processor,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericFields> {
        match self {
            TabFields::Generic(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_editor(&self) -> Option<&EditorFields> {
        match self {
            TabFields::Editor(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_processor(&self) -> Option<&ProcessorFields> {
        match self {
            TabFields::Processor(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_processor_mut(&mut self) -> Option<&mut ProcessorFields> {
        match self {
            TabFields::Processor(f) => Some(f),
            _ => None,
        }
    }

    /// Read a value, `None` when the key does not apply to this kind
    pub fn get(&self, key: FieldKey) -> Option<FieldValue> {
        match (self, key) {
            (TabFields::Generic(f), FieldKey::Source) => Some(FieldValue::Text(f.source.clone())),
            (TabFields::Generic(f), FieldKey::Count) => Some(FieldValue::Int(f.count.into())),
            (TabFields::Generic(f), FieldKey::Threshold) => Some(FieldValue::Float(f.threshold)),
            (TabFields::Generic(f), FieldKey::Entry(i)) => {
                f.entries.get(i).map(|s| FieldValue::Text(s.clone()))
            }
            (TabFields::Generic(f), FieldKey::Flagged) => Some(FieldValue::Bool(f.flagged)),
            (TabFields::Editor(f), FieldKey::Title) => Some(FieldValue::Text(f.title.clone())),
            (TabFields::Editor(f), FieldKey::Body) => Some(FieldValue::Text(f.body.clone())),
            (TabFields::Processor(f), FieldKey::Source) => {
                Some(FieldValue::Text(f.source.clone()))
            }
            (TabFields::Processor(f), FieldKey::SampleRate) => {
                Some(FieldValue::Int(f.sample_rate_hz.into()))
            }
            (TabFields::Processor(f), FieldKey::Gain) => Some(FieldValue::Float(f.gain_db)),
            (TabFields::Processor(f), FieldKey::Duration) => {
                Some(FieldValue::Float(f.duration_secs))
            }
            (TabFields::Processor(f), FieldKey::Progress) => {
                Some(FieldValue::Float(f.progress_fraction()))
            }
            (TabFields::Processor(f), FieldKey::Processing) => {
                Some(FieldValue::Bool(f.is_processing))
            }
            _ => None,
        }
    }

    /// Write a value, clamping numbers into the field's range
    pub fn set(&mut self, key: FieldKey, value: FieldValue) -> Result<(), FieldError> {
        let kind = self.kind();
        match (self, key, value) {
            (TabFields::Generic(f), FieldKey::Source, FieldValue::Text(s)) => {
                if !GenericFields::SOURCE_OPTIONS.contains(&s.as_str()) {
                    return Err(FieldError::InvalidChoice { key, value: s });
                }
                f.source = s;
            }
            (TabFields::Generic(f), FieldKey::Count, FieldValue::Int(v)) => f.set_count(v),
            (TabFields::Generic(f), FieldKey::Threshold, FieldValue::Float(v)) => {
                f.set_threshold(v)
            }
            (TabFields::Generic(f), FieldKey::Entry(i), FieldValue::Text(s))
                if i < GENERIC_ENTRY_COUNT =>
            {
                f.entries[i] = s
            }
            (TabFields::Generic(f), FieldKey::Flagged, FieldValue::Bool(b)) => f.flagged = b,
            (TabFields::Editor(f), FieldKey::Title, FieldValue::Text(s)) => {
                if f.title != s {
                    f.title = s;
                    f.dirty = true;
                }
            }
            (TabFields::Editor(f), FieldKey::Body, FieldValue::Text(s)) => {
                if f.body != s {
                    f.body = s;
                    f.dirty = true;
                }
            }
            (TabFields::Processor(f), FieldKey::Source, FieldValue::Text(s)) => f.source = s,
            (TabFields::Processor(f), FieldKey::SampleRate, FieldValue::Int(v)) => {
                f.set_sample_rate(v)
            }
            (TabFields::Processor(f), FieldKey::Gain, FieldValue::Float(v)) => {
                f.gain_db = clamp_f64(v, ProcessorFields::GAIN_RANGE_DB)
            }
            (TabFields::Processor(f), FieldKey::Duration, FieldValue::Float(v)) => {
                f.duration_secs = clamp_f64(v, ProcessorFields::DURATION_RANGE_SECS)
            }
            (TabFields::Processor(_), FieldKey::Progress | FieldKey::Processing, _) => {
                return Err(FieldError::ReadOnly(key));
            }
            (fields, key, _) => {
                return if fields.get(key).is_some() {
                    Err(FieldError::TypeMismatch(key))
                } else {
                    Err(FieldError::NotApplicable { kind, key })
                };
            }
        }
        Ok(())
    }

    /// Record a successful save to `path`
    pub fn mark_saved(&mut self, path: &Path) {
        if let TabFields::Editor(f) = self {
            f.path = Some(path.to_path_buf());
            f.dirty = false;
        }
    }
}

/// Fields of the demonstration form tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericFields {
    pub source: String,
    pub count: i32,
    pub threshold: f64,
    pub entries: [String; GENERIC_ENTRY_COUNT],
    pub flagged: bool,
}

impl GenericFields {
    pub const SOURCE_OPTIONS: &'static [&'static str] = &["Item A", "Item B"];
    pub const COUNT_RANGE: RangeInclusive<i32> = 1..=99;
    pub const THRESHOLD_RANGE: RangeInclusive<f64> = 20.0..=30.0;
    pub const THRESHOLD_STEP: f64 = 0.25;

    pub fn set_count(&mut self, value: i64) {
        let (min, max) = (
            i64::from(*Self::COUNT_RANGE.start()),
            i64::from(*Self::COUNT_RANGE.end()),
        );
        // Clamped into the i32 range above, the cast cannot truncate
        self.count = value.clamp(min, max) as i32;
    }

    /// Set the threshold, snapped to the spinbox step
    pub fn set_threshold(&mut self, value: f64) {
        let snapped = (value / Self::THRESHOLD_STEP).round() * Self::THRESHOLD_STEP;
        self.threshold = clamp_f64(snapped, Self::THRESHOLD_RANGE);
    }
}

impl Default for GenericFields {
    fn default() -> Self {
        Self {
            source: Self::SOURCE_OPTIONS[0].to_string(),
            count: 12,
            threshold: 23.5,
            entries: std::array::from_fn(|i| format!("E{} example", i + 1)),
            flagged: false,
        }
    }
}

/// Fields of the text editor tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorFields {
    pub title: String,
    pub body: String,
    /// Where the text was last saved
    pub path: Option<PathBuf>,
    /// Edited since the last save
    pub dirty: bool,
}

/// Fields of the signal processor tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorFields {
    pub source: String,
    pub sample_rate_hz: u32,
    pub gain_db: f64,
    pub duration_secs: f64,
    pub frames_processed: u64,
    pub is_processing: bool,
}

impl ProcessorFields {
    pub const SAMPLE_RATE_RANGE_HZ: RangeInclusive<u32> = 1_000..=192_000;
    pub const GAIN_RANGE_DB: RangeInclusive<f64> = -24.0..=24.0;
    pub const DURATION_RANGE_SECS: RangeInclusive<f64> = 1.0..=600.0;

    pub fn set_sample_rate(&mut self, value: i64) {
        let (min, max) = (
            i64::from(*Self::SAMPLE_RATE_RANGE_HZ.start()),
            i64::from(*Self::SAMPLE_RATE_RANGE_HZ.end()),
        );
        self.sample_rate_hz = value.clamp(min, max) as u32;
    }

    /// Frames a complete run processes
    pub fn total_frames(&self) -> u64 {
        (f64::from(self.sample_rate_hz) * self.duration_secs).round() as u64
    }

    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_frames();
        if total == 0 {
            return 0.0;
        }
        (self.frames_processed as f64 / total as f64).min(1.0)
    }
}

impl Default for ProcessorFields {
    fn default() -> Self {
        Self {
            source: "synthetic sweep".to_string(),
            sample_rate_hz: 44_100,
            gain_db: 0.0,
            duration_secs: 10.0,
            frames_processed: 0,
            is_processing: false,
        }
    }
}

fn clamp_f64(value: f64, range: RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}
