use crate::model::StaffId;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Registre des affectations d'une passe de génération : (jour, personne) → nombre de shifts.
///
/// Un registre appartient à une seule passe (un département × un jour) et doit
/// être remis à zéro entre deux jours. Une génération parallèle utilise une
/// instance par jour.
#[derive(Debug, Clone)]
pub struct StaffLedger {
    day: NaiveDate,
    counts: HashMap<(NaiveDate, StaffId), u32>,
}

impl StaffLedger {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            counts: HashMap::new(),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Vide le registre et le rattache à `day`.
    pub fn reset(&mut self, day: NaiveDate) {
        self.day = day;
        self.counts.clear();
    }

    pub fn count(&self, staff: &StaffId) -> u32 {
        self.counts
            .get(&(self.day, staff.clone()))
            .copied()
            .unwrap_or(0)
    }

    pub fn has_capacity(&self, staff: &StaffId, cap: u32) -> bool {
        self.count(staff) < cap
    }

    pub fn record<'a, I>(&mut self, staff: I)
    where
        I: IntoIterator<Item = &'a StaffId>,
    {
        for s in staff {
            *self.counts.entry((self.day, s.clone())).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_reset_between_days() {
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let d2 = d1.succ_opt().unwrap();
        let alice = StaffId::new("Alice");
        let mut ledger = StaffLedger::new(d1);
        ledger.record([&alice, &alice]);
        assert_eq!(ledger.count(&alice), 2);
        assert!(!ledger.has_capacity(&alice, 2));

        ledger.reset(d2);
        assert_eq!(ledger.count(&alice), 0);
        assert_eq!(ledger.day(), d2);
        assert!(ledger.has_capacity(&alice, 2));
    }
}
