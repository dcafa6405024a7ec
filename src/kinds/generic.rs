//! The demonstration form tab: an option combo, two spinboxes, three buttons
//! and five free-text entries on a stretched grid.

use super::{BuildContext, TabKindHandler, TabParts, write_yaml};
use crate::shell::SaveTarget;
use crate::tab::fields::{FieldKey, GENERIC_ENTRY_COUNT, GenericFields};
use crate::tab::layout::LayoutDescriptor;
use crate::tab::view::{ButtonAction, Control, Widget};
use crate::tab::{TabFields, TabId, TabKind};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

const ENTRY_LABEL_KEYS: [&str; GENERIC_ENTRY_COUNT] = ["t1t", "t2t", "t3t", "t4t", "t5t"];
const ENTRY_KEYS: [&str; GENERIC_ENTRY_COUNT] = ["t1", "t2", "t3", "t4", "t5"];

pub struct GenericHandler;

#[derive(Serialize)]
struct SavedGenericTab<'a> {
    tab: TabId,
    #[serde(flatten)]
    fields: &'a GenericFields,
}

impl GenericHandler {
    fn widgets() -> Vec<Widget> {
        let mut widgets = vec![
            Widget::label("sourcetitle", " Source:"),
            Widget::button("refresh", "Refresh", ButtonAction::Noop),
            Widget::new(
                "options",
                Control::Choice {
                    field: FieldKey::Source,
                    options: GenericFields::SOURCE_OPTIONS
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                },
            ),
            Widget::right_label("sb1title", "Spinbox 1:"),
            Widget::right_label("sb2title", "Spinbox 2:"),
            Widget::new(
                "sb1",
                Control::IntSpin {
                    field: FieldKey::Count,
                    min: i64::from(*GenericFields::COUNT_RANGE.start()),
                    max: i64::from(*GenericFields::COUNT_RANGE.end()),
                    step: 1,
                },
            ),
            Widget::new(
                "sb2",
                Control::FloatSpin {
                    field: FieldKey::Threshold,
                    min: *GenericFields::THRESHOLD_RANGE.start(),
                    max: *GenericFields::THRESHOLD_RANGE.end(),
                    step: GenericFields::THRESHOLD_STEP,
                    decimals: 2,
                },
            ),
            Widget::button("b1", "Button 1", ButtonAction::Noop),
            Widget::button("b2", "Button 2", ButtonAction::Noop),
            Widget::button("b3", "Button 3", ButtonAction::Noop),
            Widget::new(
                "flag",
                Control::Toggle {
                    field: FieldKey::Flagged,
                    text: "Flagged".to_string(),
                },
            ),
        ];

        for i in 0..GENERIC_ENTRY_COUNT {
            widgets.push(Widget::right_label(
                ENTRY_LABEL_KEYS[i],
                format!("Entry {}:", i + 1),
            ));
            widgets.push(Widget::new(
                ENTRY_KEYS[i],
                Control::TextEntry {
                    field: FieldKey::Entry(i),
                },
            ));
        }
        widgets
    }

    fn layout() -> LayoutDescriptor {
        let mut layout = LayoutDescriptor::new()
            .place("sourcetitle", 1, 2)
            .place("refresh", 1, 3)
            .place_span("options", 2, 2, 1, 2)
            .place("sb1title", 3, 2)
            .place("sb1", 3, 3)
            .place("sb2title", 4, 2)
            .place("sb2", 4, 3)
            .place("b1", 5, 2)
            .place("b2", 5, 3)
            .place("flag", 6, 2)
            .place_span("b3", 6, 3, 1, 2);

        // Entries run down columns 4 (label) and 5 (input), one per row
        for i in 0..GENERIC_ENTRY_COUNT {
            layout = layout
                .place(ENTRY_LABEL_KEYS[i], i + 1, 4)
                .place(ENTRY_KEYS[i], i + 1, 5);
        }

        layout
            .with_column_stretch([5u32, 1, 1, 1, 1, 1, 1])
            .with_row_stretch([1u32, 1, 1, 1, 1, 1, 1, 1, 10])
    }

    fn file_name(id: TabId) -> String {
        format!("tab-{id}.yaml")
    }
}

impl TabKindHandler for GenericHandler {
    fn kind(&self) -> TabKind {
        TabKind::Generic
    }

    fn build(&self, _ctx: &BuildContext<'_>) -> anyhow::Result<TabParts> {
        Ok(TabParts::new(
            Self::widgets(),
            Self::layout(),
            TabFields::defaults(TabKind::Generic),
        ))
    }

    fn save_target(&self, _id: TabId, _fields: &TabFields) -> SaveTarget {
        SaveTarget::Directory {
            title: "Select Directory to Save File(s)".to_string(),
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
        let fields = fields
            .as_generic()
            .context("generic handler received fields of another kind")?;
        write_yaml(
            &SavedGenericTab { tab: id, fields },
            &destination.join(Self::file_name(id)),
        )
    }
}
