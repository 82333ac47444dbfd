use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour un membre du personnel (nom affiché dans le seeder).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour une tâche
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Département de l'hôtel. L'ordre des variantes fixe l'ordre des lignes de la timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    Spa,
    Reception,
    Restaurant,
    Bar,
    RoomServices,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Spa,
        Department::Reception,
        Department::Restaurant,
        Department::Bar,
        Department::RoomServices,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Spa => "spa",
            Department::Reception => "reception",
            Department::Restaurant => "restaurant",
            Department::Bar => "bar",
            Department::RoomServices => "room-services",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown department: {s}"))
    }
}

/// Statut d'une tâche (énumération fermée, extensible).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Closed,
    Booked,
    Scheduled,
    InProgress,
    Completed,
    Available,
    Understaffed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 7] = [
        TaskStatus::Closed,
        TaskStatus::Booked,
        TaskStatus::Scheduled,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Available,
        TaskStatus::Understaffed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Closed => "closed",
            TaskStatus::Booked => "booked",
            TaskStatus::Scheduled => "scheduled",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Available => "available",
            TaskStatus::Understaffed => "understaffed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status: {s}"))
    }
}

/// Créneau de tâche / shift, tel qu'il est persisté.
///
/// `start_time` et `end_time` restent des chaînes : elles peuvent venir de la base
/// au format `HH:mm` ou `h:mm AM/PM`. Le générateur émet toujours `HH:mm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    pub department: Department,
    #[serde(rename = "itemName")]
    pub resource_name: String,
    pub start_time: String,
    pub end_time: String,
    /// Jour de classement (voir la règle de bascule dans `generator`).
    pub date: NaiveDate,
    pub status: TaskStatus,
    #[serde(default)]
    pub assigned_staff: Vec<StaffId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TaskRecord {
    pub fn new<T: Into<String>, R: Into<String>>(
        title: T,
        department: Department,
        resource_name: R,
        start_time: &str,
        end_time: &str,
        date: NaiveDate,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: TaskId::random(),
            title: title.into(),
            department,
            resource_name: resource_name.into(),
            start_time: start_time.to_owned(),
            end_time: end_time.to_owned(),
            date,
            status,
            assigned_staff: Vec::new(),
            notes: None,
        }
    }

    /// Clé naturelle utilisée pour ignorer les doublons à l'insertion.
    pub fn natural_key(&self) -> (Department, &str, NaiveDate, &str, &str) {
        (
            self.department,
            self.resource_name.as_str(),
            self.date,
            self.start_time.as_str(),
            self.end_time.as_str(),
        )
    }
}
