//! Plain text editor tab. Owns two preview surfaces and saves its body to a
//! single UTF-8 file.

use super::{BuildContext, TabKindHandler, TabParts};
use crate::shell::SaveTarget;
use crate::tab::fields::FieldKey;
use crate::tab::layout::LayoutDescriptor;
use crate::tab::view::{Control, RenderSurface, Widget};
use crate::tab::{TabFields, TabId, TabKind};
use anyhow::Context;
use std::path::{Path, PathBuf};

const PREVIEW_SIZE: [u32; 2] = [480, 360];

pub struct EditorHandler;

impl EditorHandler {
    fn suggested_name(id: TabId, title: &str) -> String {
        let stem: String = title
            .trim()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            format!("tab-{id}.txt")
        } else {
            format!("{stem}.txt")
        }
    }
}

impl TabKindHandler for EditorHandler {
    fn kind(&self) -> TabKind {
        TabKind::Editor
    }

    fn build(&self, _ctx: &BuildContext<'_>) -> anyhow::Result<TabParts> {
        let widgets = vec![
            Widget::right_label("titlelabel", "Title:"),
            Widget::new(
                "title",
                Control::TextEntry {
                    field: FieldKey::Title,
                },
            ),
            Widget::new(
                "body",
                Control::TextArea {
                    field: FieldKey::Body,
                },
            ),
        ];
        let layout = LayoutDescriptor::new()
            .place("titlelabel", 0, 0)
            .place("title", 0, 1)
            .place_span("body", 1, 0, 1, 2)
            .with_column_stretch([1u32, 6])
            .with_row_stretch([1u32, 12]);

        Ok(TabParts::new(widgets, layout, TabFields::defaults(TabKind::Editor))
            .with_surface(RenderSurface::new("profile", PREVIEW_SIZE))
            .with_surface(RenderSurface::new("location", PREVIEW_SIZE)))
    }

    fn save_target(&self, id: TabId, fields: &TabFields) -> SaveTarget {
        let title = fields.as_editor().map(|f| f.title.as_str()).unwrap_or("");
        SaveTarget::File {
            title: "Save Text File".to_string(),
            suggested_name: Self::suggested_name(id, title),
            extension: "txt",
        }
    }

    fn serialize(
        &self,
        _id: TabId,
        fields: &TabFields,
        destination: &Path,
    ) -> anyhow::Result<PathBuf> {
        let editor = fields
            .as_editor()
            .context("editor handler received fields of another kind")?;
        std::fs::write(destination, editor.body.as_bytes())
            .with_context(|| format!("failed to write {}", destination.display()))?;
        Ok(destination.to_path_buf())
    }
}
