//! The visual side of a tab: widget descriptions, grid plan and render surfaces.

use super::fields::FieldKey;
use super::layout::{GridPlan, LayoutDescriptor, LayoutError};

/// Horizontal alignment of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// What a button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Decorative button with no shell-level effect
    Noop,
    StartTask,
    StopTask,
    Save,
}

/// The control a widget renders as, bound to a field where it edits one
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Label {
        text: String,
        align: Align,
    },
    Button {
        text: String,
        action: ButtonAction,
    },
    Choice {
        field: FieldKey,
        options: Vec<String>,
    },
    IntSpin {
        field: FieldKey,
        min: i64,
        max: i64,
        step: i64,
    },
    FloatSpin {
        field: FieldKey,
        min: f64,
        max: f64,
        step: f64,
        decimals: usize,
    },
    TextEntry {
        field: FieldKey,
    },
    TextArea {
        field: FieldKey,
    },
    Toggle {
        field: FieldKey,
        text: String,
    },
    Progress {
        field: FieldKey,
    },
}

/// One widget of a tab view, addressed by its layout key
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub key: &'static str,
    pub control: Control,
}

impl Widget {
    pub fn new(key: &'static str, control: Control) -> Self {
        Self { key, control }
    }

    pub fn label(key: &'static str, text: impl Into<String>) -> Self {
        Self::new(
            key,
            Control::Label {
                text: text.into(),
                align: Align::Left,
            },
        )
    }

    pub fn right_label(key: &'static str, text: impl Into<String>) -> Self {
        Self::new(
            key,
            Control::Label {
                text: text.into(),
                align: Align::Right,
            },
        )
    }

    pub fn button(key: &'static str, text: impl Into<String>, action: ButtonAction) -> Self {
        Self::new(
            key,
            Control::Button {
                text: text.into(),
                action,
            },
        )
    }
}

/// Off-screen drawing resource owned by a tab (a plot canvas, a waveform
/// preview). Must be released when the tab goes away.
#[derive(Debug)]
pub struct RenderSurface {
    name: &'static str,
    size: [u32; 2],
    released: bool,
}

impl RenderSurface {
    pub fn new(name: &'static str, size: [u32; 2]) -> Self {
        log::debug!("Allocated render surface '{}' ({}x{})", name, size[0], size[1]);
        Self {
            name,
            size,
            released: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release the surface. Returns false if it was already released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        log::debug!("Released render surface '{}'", self.name);
        true
    }
}

impl Drop for RenderSurface {
    fn drop(&mut self) {
        if !self.released {
            log::warn!(
                "Render surface '{}' dropped without being released",
                self.name
            );
        }
    }
}

/// Background gradient of a tab page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabTheme {
    pub gradient_top: [u8; 3],
    pub gradient_bottom: [u8; 3],
}

impl Default for TabTheme {
    fn default() -> Self {
        Self {
            gradient_top: [255, 253, 253],
            gradient_bottom: [255, 225, 225],
        }
    }
}

/// Root container of a tab: its widgets laid out on a validated grid, plus
/// any render surfaces. Exclusively owned by the tab's record.
#[derive(Debug)]
pub struct TabView {
    widgets: Vec<Widget>,
    layout: LayoutDescriptor,
    plan: GridPlan,
    surfaces: Vec<RenderSurface>,
    pub theme: TabTheme,
}

impl TabView {
    /// Build a view, validating `layout` against `widgets`
    pub fn new(widgets: Vec<Widget>, layout: LayoutDescriptor) -> Result<Self, LayoutError> {
        let keys: Vec<&'static str> = widgets.iter().map(|w| w.key).collect();
        let plan = layout.plan(&keys)?;
        Ok(Self {
            widgets,
            layout,
            plan,
            surfaces: Vec::new(),
            theme: TabTheme::default(),
        })
    }

    /// A view with no widgets
    pub fn empty() -> Self {
        Self {
            widgets: Vec::new(),
            layout: LayoutDescriptor::new(),
            plan: GridPlan::default(),
            surfaces: Vec::new(),
            theme: TabTheme::default(),
        }
    }

    pub fn with_surface(mut self, surface: RenderSurface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widget(&self, key: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.key == key)
    }

    /// Widget placed by the layout cell at `cell_index`
    pub fn widget_for_cell(&self, cell_index: usize) -> Option<&Widget> {
        let cell = self.layout.cells().get(cell_index)?;
        self.widget(cell.widget)
    }

    pub fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    pub fn plan(&self) -> &GridPlan {
        &self.plan
    }

    pub fn surfaces(&self) -> &[RenderSurface] {
        &self.surfaces
    }

    /// Surfaces not yet released
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.iter().filter(|s| !s.is_released()).count()
    }

    /// Release every surface; returns how many were still live
    pub fn release_surfaces(&mut self) -> usize {
        self.surfaces
            .iter_mut()
            .map(RenderSurface::release)
            .filter(|released| *released)
            .count()
    }
}
