#![forbid(unsafe_code)]
//! Shiftboard : génération des plannings du personnel hôtelier et disposition
//! des tâches sur une timeline (sans BD).
//!
//! - Génération de shifts par département, plafond par personne et par jour.
//! - Shifts de nuit classés au jour où ils se terminent.
//! - Timeline : grille horaire, colonnes, couches sans collision, géométrie en pixels.
//! - Stockage fichiers (JSON/CSV).

pub mod generator;
pub mod io;
pub mod model;
pub mod storage;
pub mod summary;
pub mod template;
pub mod timeline;

pub use generator::{
    select_eligible, DayPlan, GenError, LabelPolicy, ShiftGenerator, StaffLedger, SuffixStyle,
};
pub use model::{Department, StaffId, TaskId, TaskRecord, TaskStatus};
pub use storage::{JsonTaskStore, MemoryTaskStore, TaskQuery, TaskStore};
pub use summary::SeedSummary;
pub use template::{
    export_config_json, load_config_from_file, ConfigError, DepartmentTemplate, SelectionMode,
    ShiftDefinition, StaffingConfig,
};
pub use timeline::{
    assign_layers, build_time_grid, compute_span_geometry, layout_day, locate_span,
    normalize_time, ranges_overlap, ClockTime, LayoutConfig, TimeGrid, TimelineLayout,
};
