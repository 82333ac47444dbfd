use crate::generator::LabelPolicy;
use crate::model::{Department, StaffId, TaskStatus};
use crate::timeline::{day_interval, ClockTime, MINUTES_PER_DAY};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_MAX_SHIFTS_PER_DAY: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0}: staff pool is empty but the template has staffed shifts")]
    EmptyStaffPool(Department),
    #[error("{0}: duplicate staff member {1}")]
    DuplicateStaff(Department, String),
    #[error("{0}: template must list at least one resource")]
    NoResources(Department),
    #[error("{0}: shift {1:?} ends before it starts without rolloverToNextDay")]
    UnflaggedWrap(Department, String),
    #[error("{0}: shift {1:?} is flagged rolloverToNextDay but does not cross midnight")]
    NeedlessRollover(Department, String),
    #[error("{0}: staffed shift {1:?} requests zero staff")]
    ZeroStaffCount(Department, String),
    #[error("{0}: shift {1:?} starts and ends at the same time")]
    EmptyShift(Department, String),
    #[error("{0}: shift {1:?} has an invalid weekday {2} (expected 1..=7)")]
    InvalidWeekday(Department, String, u8),
    #[error("{0}: shifts {1:?} and {2:?} overlap")]
    OverlappingShifts(Department, String, String),
    #[error("{0}: department configured twice")]
    DuplicateDepartment(Department),
    #[error("max shifts per day must be > 0")]
    ZeroCap,
}

/// Mode de choix du personnel pour un département.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    #[default]
    Random,
    /// Rotation reproductible dérivée de la date.
    Rotation,
}

/// Définition d'un shift dans le gabarit d'un département.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDefinition {
    pub name: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default)]
    pub staff_count: u32,
    /// Classé au lendemain de la date de génération.
    #[serde(default)]
    pub rollover_to_next_day: bool,
    /// Bloc fermé : pas de personnel, libellé fixe.
    #[serde(default)]
    pub closed: bool,
    /// Rôle facultatif : un sous-effectif donne `available` et non `understaffed`.
    #[serde(default)]
    pub optional: bool,
    /// Jours ISO (1 = lundi … 7 = dimanche) ; vide = tous les jours.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<u8>,
}

impl ShiftDefinition {
    pub fn staffed(name: &str, start: ClockTime, end: ClockTime, staff_count: u32) -> Self {
        Self {
            name: name.to_string(),
            start_time: start,
            end_time: end,
            staff_count,
            rollover_to_next_day: false,
            closed: false,
            optional: false,
            days: Vec::new(),
        }
    }

    pub fn closed_block(name: &str, start: ClockTime, end: ClockTime) -> Self {
        Self {
            closed: true,
            ..Self::staffed(name, start, end, 0)
        }
    }

    pub fn with_rollover(mut self) -> Self {
        self.rollover_to_next_day = true;
        self
    }

    pub fn on_days(mut self, days: &[u8]) -> Self {
        self.days = days.to_vec();
        self
    }

    /// Passe minuit (une fin à `00:00` signifie « jusqu'à minuit »).
    pub fn wraps_midnight(&self) -> bool {
        self.start_time.crosses_midnight_to(self.end_time)
    }

    pub fn applies_on(&self, iso_weekday: u8) -> bool {
        self.days.is_empty() || self.days.contains(&iso_weekday)
    }

    fn validate(&self, department: Department) -> Result<(), ConfigError> {
        if self.start_time == self.end_time {
            return Err(ConfigError::EmptyShift(department, self.name.clone()));
        }
        if let Some(d) = self.days.iter().find(|d| !(1..=7).contains(*d)) {
            return Err(ConfigError::InvalidWeekday(department, self.name.clone(), *d));
        }
        // un seul classement pour tout ce qui passe minuit : le jour de fin
        match (self.wraps_midnight(), self.rollover_to_next_day) {
            (true, false) => return Err(ConfigError::UnflaggedWrap(department, self.name.clone())),
            (false, true) => {
                return Err(ConfigError::NeedlessRollover(department, self.name.clone()))
            }
            _ => {}
        }
        if !self.closed && self.staff_count == 0 {
            return Err(ConfigError::ZeroStaffCount(department, self.name.clone()));
        }
        Ok(())
    }

    /// Occurrence générée le jour 0, en minutes depuis minuit de ce jour.
    fn occurrence(&self) -> (i64, i64) {
        let (start, end) = day_interval(self.start_time, self.end_time);
        if self.rollover_to_next_day {
            let day = i64::from(MINUTES_PER_DAY);
            (start + day, end + day)
        } else {
            (start, end)
        }
    }

    /// Vrai si `self` est généré un jour et `other` `offset` jours plus tard.
    fn runs_with(&self, other: &ShiftDefinition, offset: i64) -> bool {
        if self.days.is_empty() || other.days.is_empty() {
            return true;
        }
        self.days.iter().any(|&d| {
            let shifted = (i64::from(d) - 1 + offset).rem_euclid(7) + 1;
            other.days.iter().any(|&o| i64::from(o) == shifted)
        })
    }
}

fn default_staffed_status() -> TaskStatus {
    TaskStatus::Scheduled
}

fn default_true() -> bool {
    true
}

/// Gabarit de génération d'un département.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentTemplate {
    pub department: Department,
    pub resources: Vec<String>,
    pub shifts: Vec<ShiftDefinition>,
    #[serde(default)]
    pub staff: Vec<StaffId>,
    #[serde(default)]
    pub selection: SelectionMode,
    #[serde(default = "default_staffed_status")]
    pub staffed_status: TaskStatus,
    /// Exclut du shift suivant le personnel déjà placé sur la même ressource ce jour-là.
    #[serde(default = "default_true")]
    pub exclude_repeat_staff: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shifts_per_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelPolicy>,
}

impl DepartmentTemplate {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dep = self.department;
        if self.resources.is_empty() {
            return Err(ConfigError::NoResources(dep));
        }
        if self.max_shifts_per_day == Some(0) {
            return Err(ConfigError::ZeroCap);
        }
        for shift in &self.shifts {
            shift.validate(dep)?;
        }
        if self.staff.is_empty() && self.shifts.iter().any(|s| !s.closed) {
            return Err(ConfigError::EmptyStaffPool(dep));
        }
        for (i, s) in self.staff.iter().enumerate() {
            if self.staff[..i].contains(s) {
                return Err(ConfigError::DuplicateStaff(dep, s.to_string()));
            }
        }
        validate_shift_overlaps(dep, &self.shifts)
    }
}

/// Deux shifts d'une même ressource ne se chevauchent jamais en temps réel,
/// y compris d'un jour de génération au suivant.
fn validate_shift_overlaps(dep: Department, shifts: &[ShiftDefinition]) -> Result<(), ConfigError> {
    let day = i64::from(MINUTES_PER_DAY);
    for (i, a) in shifts.iter().enumerate() {
        let (a_start, a_end) = a.occurrence();
        for b in shifts.iter().skip(i + 1) {
            let (b_start, b_end) = b.occurrence();
            let clash = (-1..=1).any(|offset: i64| {
                let shift = offset * day;
                a.runs_with(b, offset) && a_start < b_end + shift && b_start + shift < a_end
            });
            if clash {
                return Err(ConfigError::OverlappingShifts(dep, a.name.clone(), b.name.clone()));
            }
        }
    }
    Ok(())
}

fn default_cap() -> u32 {
    DEFAULT_MAX_SHIFTS_PER_DAY
}

/// Configuration complète du personnel, chargée depuis JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingConfig {
    #[serde(default = "default_cap")]
    pub max_shifts_per_day: u32,
    #[serde(default)]
    pub labels: LabelPolicy,
    pub departments: Vec<DepartmentTemplate>,
}

impl StaffingConfig {
    /// Valide la structure globale puis chaque département.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_shifts_per_day == 0 {
            return Err(ConfigError::ZeroCap);
        }
        for (i, t) in self.departments.iter().enumerate() {
            if self.departments[..i].iter().any(|o| o.department == t.department) {
                return Err(ConfigError::DuplicateDepartment(t.department));
            }
            t.validate()?;
        }
        Ok(())
    }

    pub fn department(&self, department: Department) -> Option<&DepartmentTemplate> {
        self.departments.iter().find(|t| t.department == department)
    }

    pub fn cap_for(&self, template: &DepartmentTemplate) -> u32 {
        template.max_shifts_per_day.unwrap_or(self.max_shifts_per_day)
    }

    pub fn labels_for<'a>(&'a self, template: &'a DepartmentTemplate) -> &'a LabelPolicy {
        template.labels.as_ref().unwrap_or(&self.labels)
    }

    /// Configuration de l'hôtel : cinq départements, horaires et équipes par défaut.
    pub fn hotel_default() -> Self {
        Self {
            max_shifts_per_day: DEFAULT_MAX_SHIFTS_PER_DAY,
            labels: LabelPolicy::default(),
            departments: vec![spa(), reception(), restaurant(), bar(), room_services()],
        }
    }
}

fn hm(h: u32, m: u32) -> ClockTime {
    ClockTime::from_minutes(h * 60 + m)
}

fn names(list: &[&str]) -> Vec<StaffId> {
    list.iter().map(StaffId::new).collect()
}

fn spa() -> DepartmentTemplate {
    DepartmentTemplate {
        department: Department::Spa,
        resources: (1..=4).map(|i| format!("Rest Room No: {i:02}")).collect(),
        shifts: vec![
            ShiftDefinition::closed_block("Overnight closure", hm(18, 0), hm(7, 59)).with_rollover(),
            ShiftDefinition::staffed("Morning", hm(8, 0), hm(12, 0), 2),
            ShiftDefinition::closed_block("Lunch break", hm(12, 0), hm(13, 0)),
            ShiftDefinition::staffed("Afternoon", hm(13, 0), hm(17, 0), 2),
        ],
        staff: names(&[
            "Maria Santos", "Juan Cruz", "Ana Reyes", "Carlos Garcia", "Sofia Mendoza",
            "Miguel Torres", "Isabella Flores", "Rafael Morales", "Camila Ramos", "Diego Castillo",
        ]),
        selection: SelectionMode::Random,
        staffed_status: TaskStatus::Booked,
        exclude_repeat_staff: true,
        max_shifts_per_day: None,
        labels: None,
    }
}

fn reception() -> DepartmentTemplate {
    DepartmentTemplate {
        department: Department::Reception,
        resources: vec!["Front Desk".to_string()],
        shifts: vec![
            ShiftDefinition::staffed("Morning", hm(6, 0), hm(12, 0), 2),
            ShiftDefinition::staffed("Noon", hm(12, 0), hm(18, 0), 2),
            ShiftDefinition::staffed("Night", hm(18, 0), hm(0, 0), 2),
            ShiftDefinition::staffed("Midnight", hm(0, 0), hm(6, 0), 2),
        ],
        staff: names(&[
            "Sarah Wilson", "Mark Johnson", "Emily Davis", "James Brown", "Lisa Anderson",
            "Michael Taylor", "Jennifer Martinez", "David Lee", "Amanda White", "Robert Harris",
        ]),
        selection: SelectionMode::Rotation,
        staffed_status: TaskStatus::Scheduled,
        // les binômes se chevauchent d'un shift à l'autre
        exclude_repeat_staff: false,
        max_shifts_per_day: None,
        labels: None,
    }
}

fn restaurant() -> DepartmentTemplate {
    DepartmentTemplate {
        department: Department::Restaurant,
        resources: ["01 & 02", "03 & 04", "05 & 06", "07 & 08"]
            .iter()
            .map(|t| format!("Table No: {t}"))
            .collect(),
        shifts: vec![
            ShiftDefinition::staffed("Breakfast", hm(6, 0), hm(11, 0), 2),
            ShiftDefinition::staffed("Lunch", hm(11, 0), hm(15, 0), 2),
            ShiftDefinition::staffed("Dinner", hm(17, 0), hm(22, 0), 2),
        ],
        staff: names(&[
            "Brooklyn Simons", "Rohit Koli", "Jerome Bell", "Joy Williams", "Kenelli Smith",
            "Kevin Macel", "Dianne Rusel", "Marvin McKiney", "Loren Jenkins", "David Smith",
        ]),
        selection: SelectionMode::Random,
        staffed_status: TaskStatus::Scheduled,
        exclude_repeat_staff: true,
        max_shifts_per_day: Some(3),
        labels: None,
    }
}

fn bar() -> DepartmentTemplate {
    DepartmentTemplate {
        department: Department::Bar,
        resources: vec!["Drink Corner".to_string()],
        shifts: vec![
            ShiftDefinition::staffed("Afternoon", hm(14, 0), hm(18, 0), 2),
            ShiftDefinition::staffed("Evening", hm(18, 0), hm(23, 0), 2),
            ShiftDefinition::staffed("Late night", hm(23, 0), hm(2, 0), 2).with_rollover(),
        ],
        staff: names(&[
            "Kevin Macel", "Alex Thompson", "Sam Rodriguez", "Chris Martinez", "Jordan Lee",
            "Taylor Brown", "Casey Wilson", "Morgan Davis", "Riley Johnson", "Quinn Anderson",
        ]),
        selection: SelectionMode::Random,
        staffed_status: TaskStatus::Scheduled,
        exclude_repeat_staff: true,
        max_shifts_per_day: None,
        labels: Some(LabelPolicy {
            empty_label: "Bar unstaffed".to_string(),
            ..LabelPolicy::default()
        }),
    }
}

fn room_services() -> DepartmentTemplate {
    DepartmentTemplate {
        department: Department::RoomServices,
        resources: ["01, 02, 03", "04, 05, 06", "07, 08, 09", "10, 11, 12"]
            .iter()
            .map(|r| format!("Room No: {r}"))
            .collect(),
        shifts: vec![
            ShiftDefinition::staffed("Morning service", hm(7, 0), hm(12, 0), 2),
            ShiftDefinition::staffed("Afternoon service", hm(12, 0), hm(18, 0), 2),
            ShiftDefinition::staffed("Evening service", hm(18, 0), hm(23, 0), 2),
        ],
        staff: names(&[
            "John Doe", "Jane Smith", "Mike Johnson", "Patricia Garcia", "Robert Martinez",
            "Linda Brown", "William Davis", "Barbara Miller", "Richard Wilson", "Susan Moore",
        ]),
        selection: SelectionMode::Random,
        staffed_status: TaskStatus::Scheduled,
        exclude_repeat_staff: true,
        max_shifts_per_day: Some(3),
        labels: None,
    }
}

/// Charge et valide une configuration JSON.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<StaffingConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: StaffingConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn export_config_json<P: AsRef<Path>>(path: P, config: &StaffingConfig) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(config).context("serializing config")?;
    fs::write(path, json).with_context(|| format!("writing config {}", path.display()))
}
