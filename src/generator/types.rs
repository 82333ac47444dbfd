use crate::model::{Department, TaskRecord};
use crate::template::ConfigError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no template configured for department {0}")]
    UnknownDepartment(Department),
    #[error("date overflow after {0}")]
    DateOverflow(NaiveDate),
}

/// Échec d'un département ; les autres départements du jour sont générés malgré tout.
#[derive(Debug)]
pub struct DepartmentFailure {
    pub department: Department,
    pub error: GenError,
}

/// Résultat de la génération d'une journée.
#[derive(Debug)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub records: Vec<TaskRecord>,
    pub failures: Vec<DepartmentFailure>,
}

impl DayPlan {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
