use crate::model::{Department, StaffId, TaskId, TaskRecord, TaskStatus};
use crate::timeline::TimelineLayout;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

const TASK_HEADER: [&str; 10] = [
    "id",
    "title",
    "department",
    "itemName",
    "startTime",
    "endTime",
    "date",
    "status",
    "assignedStaff",
    "notes",
];

/// Import de tâches depuis CSV : header `id,title,department,itemName,startTime,endTime,date,status[,assignedStaff][,notes]`
///
/// `id` vide → identifiant généré ; `assignedStaff` séparé par `;`. Les heures
/// sont conservées telles quelles (24h ou 12h), le layout les normalise.
pub fn import_tasks_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<TaskRecord>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let field = |i: usize, name: &str| -> anyhow::Result<String> {
            let v = rec
                .get(i)
                .with_context(|| format!("row {row}: missing {name}"))?
                .trim();
            Ok(v.to_string())
        };
        let title = field(1, "title")?;
        let department: Department = field(2, "department")?
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("row {row}"))?;
        let resource = field(3, "itemName")?;
        let start = field(4, "startTime")?;
        let end = field(5, "endTime")?;
        if start.is_empty() || end.is_empty() || resource.is_empty() {
            bail!("row {row}: empty itemName/startTime/endTime");
        }
        let date = NaiveDate::parse_from_str(&field(6, "date")?, "%Y-%m-%d")
            .with_context(|| format!("row {row}: invalid date"))?;
        let status: TaskStatus = field(7, "status")?
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("row {row}"))?;

        let mut task = TaskRecord::new(title, department, resource, &start, &end, date, status);
        let id = field(0, "id")?;
        if !id.is_empty() {
            task.id = TaskId::new(id);
        }
        if let Some(staff) = rec.get(8) {
            task.assigned_staff = staff
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(StaffId::new)
                .collect();
        }
        task.notes = rec
            .get(9)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned);
        out.push(task);
    }
    Ok(out)
}

/// Export CSV des tâches (même header que l'import).
pub fn export_tasks_csv<P: AsRef<Path>>(path: P, records: &[TaskRecord]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(TASK_HEADER)?;
    for r in records {
        let staff = r
            .assigned_staff
            .iter()
            .map(StaffId::as_str)
            .collect::<Vec<_>>()
            .join(";");
        let date = r.date.format("%Y-%m-%d").to_string();
        w.write_record([
            r.id.as_str(),
            r.title.as_str(),
            r.department.as_str(),
            r.resource_name.as_str(),
            r.start_time.as_str(),
            r.end_time.as_str(),
            date.as_str(),
            r.status.as_str(),
            staff.as_str(),
            r.notes.as_deref().unwrap_or(""),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON des tâches (jolie mise en forme)
pub fn export_tasks_json<P: AsRef<Path>>(path: P, records: &[TaskRecord]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(records).context("serializing tasks")?;
    write_file(path.as_ref(), s)
}

/// Export JSON du layout complet (grille, lignes, géométrie) pour l'UI.
pub fn export_layout_json<P: AsRef<Path>>(path: P, layout: &TimelineLayout) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(layout).context("serializing layout")?;
    write_file(path.as_ref(), s)
}

fn write_file(path: &Path, contents: String) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

/// Export CSV des tâches positionnées : header `task_id,department,itemName,title,start_index,end_index,layer,left,width,top,height`
pub fn export_layout_csv<P: AsRef<Path>>(path: P, layout: &TimelineLayout) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record([
        "task_id",
        "department",
        "itemName",
        "title",
        "start_index",
        "end_index",
        "layer",
        "left",
        "width",
        "top",
        "height",
    ])?;
    let mut idx = itoa::Buffer::new();
    for span in layout.spans() {
        let start_index = idx.format(span.span.start_index).to_owned();
        let end_index = idx.format(span.span.end_index).to_owned();
        let layer = idx.format(span.layer).to_owned();
        let g = &span.geometry;
        let px = |v: f64| format!("{v:.3}");
        w.write_record([
            span.task.id.as_str(),
            span.task.department.as_str(),
            span.task.resource_name.as_str(),
            span.task.title.as_str(),
            start_index.as_str(),
            end_index.as_str(),
            layer.as_str(),
            px(g.left).as_str(),
            px(g.width).as_str(),
            px(g.top).as_str(),
            px(g.height).as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
