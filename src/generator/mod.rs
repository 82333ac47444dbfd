//! Génération des shifts du personnel.
//!
//! Règle de classement : tout shift qui passe minuit est marqué
//! `rolloverToNextDay` (la validation du gabarit l'impose) et classé au
//! lendemain de la date de génération, c'est-à-dire au jour où son intervalle
//! se termine. Tous les autres enregistrements sont classés à la date de
//! génération. La requête par fenêtre de dates et la timeline s'appuient sur ce
//! même jour de classement.

mod label;
mod ledger;
mod selection;
mod types;

pub use label::{LabelPolicy, SuffixStyle};
pub use ledger::StaffLedger;
pub use selection::{rotation_start, select_eligible, select_rotation};
pub use types::{DayPlan, DepartmentFailure, GenError};

use crate::model::{Department, StaffId, TaskRecord, TaskStatus};
use crate::template::{DepartmentTemplate, SelectionMode, ShiftDefinition, StaffingConfig};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Générateur : encapsule une configuration et une source d'aléa.
#[derive(Debug)]
pub struct ShiftGenerator<'c, R = StdRng> {
    config: &'c StaffingConfig,
    rng: R,
}

impl<'c> ShiftGenerator<'c, StdRng> {
    pub fn new(config: &'c StaffingConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Aléa reproductible (tests, régénération à l'identique).
    pub fn seeded(config: &'c StaffingConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<'c, R: Rng> ShiftGenerator<'c, R> {
    pub fn with_rng(config: &'c StaffingConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Génère un département configuré pour `date`.
    pub fn generate(
        &mut self,
        department: Department,
        date: NaiveDate,
        ledger: &mut StaffLedger,
    ) -> Result<Vec<TaskRecord>, GenError> {
        let config = self.config;
        let template = config
            .department(department)
            .ok_or(GenError::UnknownDepartment(department))?;
        self.generate_department(template, date, ledger)
    }

    /// Génère les enregistrements d'un gabarit pour `date`, ressource par ressource.
    ///
    /// Un manque de personnel ne fait jamais échouer la génération : il se
    /// traduit dans le statut. Seules les erreurs de configuration remontent.
    pub fn generate_department(
        &mut self,
        template: &DepartmentTemplate,
        date: NaiveDate,
        ledger: &mut StaffLedger,
    ) -> Result<Vec<TaskRecord>, GenError> {
        template.validate()?;

        if ledger.day() != date {
            tracing::debug!(from = %ledger.day(), to = %date, "ledger reset for new day");
            ledger.reset(date);
        }

        let config = self.config;
        let cap = config.cap_for(template);
        let labels = config.labels_for(template);
        let weekday = date.weekday().number_from_monday() as u8;
        let next_day = date.succ_opt().ok_or(GenError::DateOverflow(date))?;
        let mut out = Vec::new();

        for (resource_index, resource) in template.resources.iter().enumerate() {
            let mut used: Vec<StaffId> = Vec::new();

            for (shift_index, def) in template.shifts.iter().enumerate() {
                if !def.applies_on(weekday) {
                    continue;
                }
                let filed = if def.rollover_to_next_day { next_day } else { date };

                if def.closed {
                    out.push(new_record(
                        template,
                        resource,
                        def,
                        filed,
                        labels.closed_label.clone(),
                        TaskStatus::Closed,
                    ));
                    continue;
                }

                let wanted = def.staff_count as usize;
                let excluded: &[StaffId] = if template.exclude_repeat_staff { &used } else { &[] };
                let picked = match template.selection {
                    SelectionMode::Random => select_eligible(
                        &template.staff,
                        excluded,
                        cap,
                        ledger,
                        wanted,
                        &mut self.rng,
                    ),
                    SelectionMode::Rotation => {
                        let start = rotation_start(
                            date,
                            shift_index + resource_index,
                            template.staff.len(),
                        );
                        select_rotation(&template.staff, excluded, cap, ledger, wanted, start)
                    }
                };
                ledger.record(&picked);

                let status = if picked.len() >= wanted {
                    template.staffed_status
                } else if def.optional {
                    TaskStatus::Available
                } else {
                    TaskStatus::Understaffed
                };
                if picked.len() < wanted {
                    tracing::warn!(
                        department = %template.department,
                        resource = resource.as_str(),
                        shift = def.name.as_str(),
                        wanted,
                        got = picked.len(),
                        "shift short of staff"
                    );
                }

                let mut record = new_record(
                    template,
                    resource,
                    def,
                    filed,
                    labels.format_title(&picked),
                    status,
                );
                used.extend(picked.iter().cloned());
                record.assigned_staff = picked;
                out.push(record);
            }
        }

        tracing::debug!(
            department = %template.department,
            %date,
            records = out.len(),
            "department generated"
        );
        Ok(out)
    }

    /// Génère tous les départements pour une journée, chacun avec son propre registre.
    pub fn generate_day(&mut self, date: NaiveDate) -> DayPlan {
        let config = self.config;
        let mut plan = DayPlan {
            date,
            records: Vec::new(),
            failures: Vec::new(),
        };
        for template in &config.departments {
            let mut ledger = StaffLedger::new(date);
            match self.generate_department(template, date, &mut ledger) {
                Ok(records) => plan.records.extend(records),
                Err(error) => {
                    tracing::error!(department = %template.department, %date, %error, "generation failed");
                    plan.failures.push(DepartmentFailure {
                        department: template.department,
                        error,
                    });
                }
            }
        }
        plan
    }

    /// Génère `days` jours consécutifs à partir de `start`.
    pub fn generate_range(&mut self, start: NaiveDate, days: u32) -> Result<Vec<DayPlan>, GenError> {
        let mut plans = Vec::with_capacity(days as usize);
        let mut current = start;
        for i in 0..days {
            if i > 0 {
                current = current.succ_opt().ok_or(GenError::DateOverflow(current))?;
            }
            plans.push(self.generate_day(current));
        }
        let total: usize = plans.iter().map(|p| p.records.len()).sum();
        tracing::info!(%start, days, total, "generation finished");
        Ok(plans)
    }
}

fn new_record(
    template: &DepartmentTemplate,
    resource: &str,
    def: &ShiftDefinition,
    filed: NaiveDate,
    title: String,
    status: TaskStatus,
) -> TaskRecord {
    TaskRecord::new(
        title,
        template.department,
        resource,
        &def.start_time.to_string(),
        &def.end_time.to_string(),
        filed,
        status,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::ClockTime;

    fn hm(h: u32, m: u32) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap() // lundi
    }

    fn single(template: DepartmentTemplate) -> StaffingConfig {
        StaffingConfig {
            max_shifts_per_day: 2,
            labels: LabelPolicy::default(),
            departments: vec![template],
        }
    }

    fn bar_template(staff: &[&str], shifts: Vec<ShiftDefinition>) -> DepartmentTemplate {
        DepartmentTemplate {
            department: Department::Bar,
            resources: vec!["Drink Corner".into()],
            shifts,
            staff: staff.iter().map(StaffId::new).collect(),
            selection: SelectionMode::Random,
            staffed_status: TaskStatus::Scheduled,
            exclude_repeat_staff: true,
            max_shifts_per_day: None,
            labels: None,
        }
    }

    #[test]
    fn weekday_filter_skips_shift() {
        let cfg = single(bar_template(
            &["A", "B"],
            vec![
                ShiftDefinition::staffed("Daily", hm(14, 0), hm(18, 0), 1),
                ShiftDefinition::staffed("Weekend", hm(23, 0), hm(2, 0), 1)
                    .with_rollover()
                    .on_days(&[6, 7]),
            ],
        ));
        let mut generator = ShiftGenerator::seeded(&cfg, 3);
        let mut ledger = StaffLedger::new(day());
        let monday = generator.generate(Department::Bar, day(), &mut ledger).unwrap();
        assert_eq!(monday.len(), 1);

        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        let weekend = generator.generate(Department::Bar, saturday, &mut ledger).unwrap();
        assert_eq!(weekend.len(), 2);
        assert_eq!(weekend[1].date, NaiveDate::from_ymd_opt(2025, 6, 8).unwrap());
        assert_eq!(ledger.day(), saturday);
    }

    #[test]
    fn optional_shift_short_of_staff_is_available() {
        let mut extra = ShiftDefinition::staffed("Extra", hm(18, 0), hm(20, 0), 3);
        extra.optional = true;
        let cfg = single(bar_template(&["A"], vec![extra]));
        let mut generator = ShiftGenerator::seeded(&cfg, 1);
        let mut ledger = StaffLedger::new(day());
        let out = generator.generate(Department::Bar, day(), &mut ledger).unwrap();
        assert_eq!(out[0].status, TaskStatus::Available);
        assert_eq!(out[0].title, "A");
    }

    #[test]
    fn unknown_department_is_reported() {
        let cfg = single(bar_template(&["A"], vec![]));
        let mut generator = ShiftGenerator::seeded(&cfg, 1);
        let mut ledger = StaffLedger::new(day());
        let err = generator
            .generate(Department::Spa, day(), &mut ledger)
            .unwrap_err();
        assert!(matches!(err, GenError::UnknownDepartment(Department::Spa)));
    }

    #[test]
    fn failing_department_does_not_block_the_day() {
        let mut cfg = StaffingConfig::hotel_default();
        if let Some(bar) = cfg.departments.iter_mut().find(|t| t.department == Department::Bar) {
            bar.staff.clear();
        }
        let mut generator = ShiftGenerator::seeded(&cfg, 9);
        let plan = generator.generate_day(day());
        assert!(!plan.is_complete());
        assert_eq!(plan.failures.len(), 1);
        assert_eq!(plan.failures[0].department, Department::Bar);
        assert!(plan.records.iter().all(|r| r.department != Department::Bar));
        assert!(plan.records.iter().any(|r| r.department == Department::Spa));
    }
}
