use crate::model::{Department, TaskRecord, TaskStatus};
use anyhow::Context;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Filtre de lecture : département, plage de jours de classement (inclusive), statut.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub department: Option<Department>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
}

impl TaskQuery {
    /// Enregistrements à afficher sur la timeline du jour `day`.
    ///
    /// Un shift de nuit est classé au jour où il se termine : il apparaît donc
    /// sur ce jour-là.
    pub fn day(day: NaiveDate) -> Self {
        Self {
            from: Some(day),
            to: Some(day),
            ..Self::default()
        }
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    pub fn matches(&self, record: &TaskRecord) -> bool {
        self.department.map_or(true, |d| record.department == d)
            && self.from.map_or(true, |f| record.date >= f)
            && self.to.map_or(true, |t| record.date <= t)
            && self.status.map_or(true, |s| record.status == s)
    }
}

/// Contrat de persistance des tâches.
pub trait TaskStore {
    /// Insère en ignorant les doublons (clé naturelle). Retourne le nombre d'insertions.
    fn insert_many(&mut self, records: &[TaskRecord]) -> anyhow::Result<usize>;
    /// Lit les tâches correspondant au filtre, triées par jour puis heure de début.
    fn fetch(&self, query: &TaskQuery) -> anyhow::Result<Vec<TaskRecord>>;
    /// Vide le support. Retourne le nombre de tâches supprimées.
    fn clear(&mut self) -> anyhow::Result<usize>;
}

fn merge(existing: &mut Vec<TaskRecord>, records: &[TaskRecord]) -> usize {
    let mut keys: HashSet<(Department, String, NaiveDate, String, String)> =
        existing.iter().map(owned_key).collect();
    let before = existing.len();
    for r in records {
        if keys.insert(owned_key(r)) {
            existing.push(r.clone());
        }
    }
    existing.len() - before
}

fn owned_key(r: &TaskRecord) -> (Department, String, NaiveDate, String, String) {
    let (d, res, date, s, e) = r.natural_key();
    (d, res.to_owned(), date, s.to_owned(), e.to_owned())
}

fn select(records: &[TaskRecord], query: &TaskQuery) -> Vec<TaskRecord> {
    let mut out: Vec<TaskRecord> = records.iter().filter(|r| query.matches(r)).cloned().collect();
    out.sort_by(|a, b| {
        (a.date, a.department, &a.resource_name, &a.start_time)
            .cmp(&(b.date, b.department, &b.resource_name, &b.start_time))
    });
    out
}

/// Stockage en mémoire (tests, rendu ponctuel).
#[derive(Debug, Default, Clone)]
pub struct MemoryTaskStore {
    records: Vec<TaskRecord>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TaskStore for MemoryTaskStore {
    fn insert_many(&mut self, records: &[TaskRecord]) -> anyhow::Result<usize> {
        Ok(merge(&mut self.records, records))
    }

    fn fetch(&self, query: &TaskQuery) -> anyhow::Result<Vec<TaskRecord>> {
        Ok(select(&self.records, query))
    }

    fn clear(&mut self) -> anyhow::Result<usize> {
        let n = self.records.len();
        self.records.clear();
        Ok(n)
    }
}

/// Fichier JSON unique, réécrit de manière atomique.
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fichier absent = stockage vide.
    pub fn load(&self) -> anyhow::Result<Vec<TaskRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let records: Vec<TaskRecord> = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(records)
    }

    fn save(&self, records: &[TaskRecord]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl TaskStore for JsonTaskStore {
    fn insert_many(&mut self, records: &[TaskRecord]) -> anyhow::Result<usize> {
        let mut existing = self.load()?;
        let inserted = merge(&mut existing, records);
        if inserted > 0 {
            self.save(&existing)?;
        }
        tracing::debug!(path = %self.path.display(), inserted, "tasks stored");
        Ok(inserted)
    }

    fn fetch(&self, query: &TaskQuery) -> anyhow::Result<Vec<TaskRecord>> {
        Ok(select(&self.load()?, query))
    }

    fn clear(&mut self) -> anyhow::Result<usize> {
        let n = self.load()?.len();
        self.save(&[])?;
        Ok(n)
    }
}
