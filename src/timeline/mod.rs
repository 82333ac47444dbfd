//! Moteur de disposition de la timeline.
//!
//! Pipeline pur par passe de rendu : normalisation des heures → grille →
//! colonnes de chaque tâche → couches par ligne de ressource → géométrie.
//! Aucun état n'est conservé entre deux appels.

mod geometry;
mod grid;
mod layers;
mod span;
mod time;
mod types;

pub use geometry::{compute_span_geometry, LayoutConfig, SpanGeometry};
pub use grid::{build_time_grid, DisplayFormat, TimeGrid, TimeSlot};
pub use layers::{assign_layer_indices, assign_layers, ranges_overlap, TimedTask};
pub use span::{locate_span, SpanIndices};
pub use time::{normalize_time, ClockTime};
pub(crate) use time::{day_interval, MINUTES_PER_DAY};
pub use types::{LayoutError, LayoutWarning, TimeError};

use crate::model::{Department, TaskRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Tâche positionnée, avec l'enregistrement d'origine pour le libellé.
#[derive(Debug, Clone, Serialize)]
pub struct LaidOutTask {
    pub task: TaskRecord,
    pub span: SpanIndices,
    pub layer: usize,
    pub geometry: SpanGeometry,
}

/// Ligne de ressource (département + élément).
#[derive(Debug, Clone, Serialize)]
pub struct TimelineRow {
    pub department: Department,
    pub resource_name: String,
    pub top: f64,
    pub height: f64,
    pub layers: usize,
    pub tasks: Vec<LaidOutTask>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineLayout {
    pub grid: TimeGrid,
    pub rows: Vec<TimelineRow>,
    pub warnings: Vec<LayoutWarning>,
}

impl TimelineLayout {
    pub fn spans(&self) -> impl Iterator<Item = &LaidOutTask> {
        self.rows.iter().flat_map(|r| r.tasks.iter())
    }

    pub fn total_height(&self) -> f64 {
        self.rows.last().map_or(0.0, |r| r.top + r.height)
    }
}

struct Placed<'a> {
    record: &'a TaskRecord,
    timed: TimedTask,
    span: SpanIndices,
}

/// Dispose un ensemble de tâches (déjà restreint au jour affiché) sur la grille.
///
/// Heure illisible : tâche exclue + avertissement. Hors grille : exclue sans bruit.
pub fn layout_day(records: &[TaskRecord], grid: &TimeGrid, config: &LayoutConfig) -> TimelineLayout {
    let mut warnings = Vec::new();
    let mut rows: BTreeMap<(Department, &str), Vec<Placed<'_>>> = BTreeMap::new();

    for record in records {
        let parsed = ClockTime::parse(&record.start_time)
            .and_then(|s| ClockTime::parse(&record.end_time).map(|e| (s, e)));
        let (start, end) = match parsed {
            Ok(pair) => pair,
            Err(err) => {
                tracing::warn!(task = record.id.as_str(), %err, "task excluded from layout");
                warnings.push(LayoutWarning {
                    task_id: record.id.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        };
        let Some(span) = locate_span(grid, start, end) else {
            continue;
        };
        rows.entry((record.department, record.resource_name.as_str()))
            .or_default()
            .push(Placed {
                record,
                timed: TimedTask::new(record.id.clone(), start, end),
                span,
            });
    }

    let mut out = Vec::with_capacity(rows.len());
    let mut row_top = 0.0;

    for ((department, resource_name), placed) in rows {
        let timed: Vec<TimedTask> = placed.iter().map(|p| p.timed.clone()).collect();
        let layers = assign_layer_indices(&timed);
        let layer_count = layers.iter().max().map_or(0, |m| m + 1);
        let height = config.row_height_for(layer_count);

        let tasks = placed
            .into_iter()
            .zip(layers)
            .map(|(p, layer)| LaidOutTask {
                task: p.record.clone(),
                span: p.span,
                layer,
                geometry: compute_span_geometry(config, p.span, row_top, layer),
            })
            .collect();

        out.push(TimelineRow {
            department,
            resource_name: resource_name.to_owned(),
            top: row_top,
            height,
            layers: layer_count,
            tasks,
        });
        row_top += height;
    }

    TimelineLayout {
        grid: grid.clone(),
        rows: out,
        warnings,
    }
}
