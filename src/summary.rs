use crate::model::{Department, TaskRecord, TaskStatus};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

/// Bilan d'une passe de seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub tasks_created: usize,
    pub duplicates_ignored: usize,
    pub department_distribution: BTreeMap<Department, usize>,
    pub status_distribution: BTreeMap<TaskStatus, usize>,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub days_spanned: u32,
}

impl SeedSummary {
    /// `tasks_created` compte les insertions effectives (doublons ignorés exclus).
    pub fn new(records: &[TaskRecord], inserted: usize, first_day: NaiveDate, days: u32) -> Self {
        let mut department_distribution = BTreeMap::new();
        let mut status_distribution = BTreeMap::new();
        for r in records {
            *department_distribution.entry(r.department).or_insert(0) += 1;
            *status_distribution.entry(r.status).or_insert(0) += 1;
        }
        let last_day = first_day
            .checked_add_days(chrono::Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(first_day);
        Self {
            tasks_created: inserted,
            duplicates_ignored: records.len().saturating_sub(inserted),
            department_distribution,
            status_distribution,
            first_day,
            last_day,
            days_spanned: days,
        }
    }

    pub fn understaffed(&self) -> usize {
        self.status_distribution
            .get(&TaskStatus::Understaffed)
            .copied()
            .unwrap_or(0)
    }

    /// Rendu texte pour la console.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Date range: {} to {}", self.first_day, self.last_day);
        let _ = writeln!(out, "Total tasks: {}", self.tasks_created);
        if self.duplicates_ignored > 0 {
            let _ = writeln!(out, "Duplicates ignored: {}", self.duplicates_ignored);
        }
        if self.understaffed() > 0 {
            let _ = writeln!(out, "Understaffed shifts: {}", self.understaffed());
        }
        let _ = writeln!(out, "Department distribution:");
        for (dep, count) in &self.department_distribution {
            let _ = writeln!(out, "  {dep}: {count} tasks");
        }
        let _ = writeln!(out, "Status distribution:");
        for (status, count) in &self.status_distribution {
            let _ = writeln!(out, "  {status}: {count} tasks");
        }
        out
    }

    /// Export CSV : header `kind,key,count`
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut w = WriterBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        w.write_record(["kind", "key", "count"])?;
        let mut buf = itoa::Buffer::new();
        for (dep, count) in &self.department_distribution {
            w.write_record(["department", dep.as_str(), buf.format(*count)])?;
        }
        for (status, count) in &self.status_distribution {
            w.write_record(["status", status.as_str(), buf.format(*count)])?;
        }
        w.write_record(["total", "tasks", buf.format(self.tasks_created)])?;
        w.flush()?;
        Ok(())
    }
}
