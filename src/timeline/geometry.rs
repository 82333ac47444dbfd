use super::span::SpanIndices;
use serde::{Deserialize, Serialize};

/// Constantes de la grille de rendu (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub department_column_width: f64,
    pub cell_width: f64,
    pub row_height: f64,
    pub task_height: f64,
    pub cell_padding: f64,
    pub span_inset: f64,
    /// Espace vertical entre deux couches empilées.
    pub vertical_spacing: f64,
    /// Largeur plancher : une tâche d'une seule colonne reste visible.
    pub min_span_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            department_column_width: 270.0,
            cell_width: 61.5,
            row_height: 48.0,
            task_height: 24.0,
            cell_padding: 2.0,
            span_inset: 1.0,
            vertical_spacing: 4.0,
            min_span_width: 8.0,
        }
    }
}

impl LayoutConfig {
    fn start_end_margin(&self) -> f64 {
        self.cell_width * 0.75 / 4.0
    }
    fn checkin_gap(&self) -> f64 {
        self.cell_width * 0.1
    }
    fn checkout_overlap(&self) -> f64 {
        self.cell_width * 0.5
    }

    /// Hauteur d'une ligne contenant `layers` couches (au moins `row_height`).
    pub fn row_height_for(&self, layers: usize) -> f64 {
        let n = layers.max(1) as f64;
        (self.row_height - self.task_height) + n * self.task_height + (n - 1.0) * self.vertical_spacing
    }
}

/// Position absolue d'une tâche, en pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpanGeometry {
    pub left: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
}

pub fn compute_span_geometry(
    config: &LayoutConfig,
    span: SpanIndices,
    row_top: f64,
    layer: usize,
) -> SpanGeometry {
    let cell = config.cell_width;
    let cols = span.columns() as f64;

    let left = config.department_column_width
        + span.start_index as f64 * cell
        + config.cell_padding
        + config.span_inset
        + config.start_end_margin()
        + config.checkin_gap();

    let width = cols * cell
        - 2.0 * config.cell_padding
        - 2.0 * config.span_inset
        - 2.0 * config.start_end_margin()
        - config.checkout_overlap()
        - config.checkin_gap();

    // centré dans la ligne, puis décalé d'une bande par couche
    let centered = row_top + (config.row_height - config.task_height) / 2.0;
    let top = centered + layer as f64 * (config.task_height + config.vertical_spacing);

    SpanGeometry {
        left,
        width: width.max(config.min_span_width),
        top,
        height: config.task_height,
    }
}
