use super::ledger::StaffLedger;
use crate::model::StaffId;
use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

fn is_eligible(staff: &StaffId, excluded: &[StaffId], cap: u32, ledger: &StaffLedger) -> bool {
    !excluded.contains(staff) && ledger.has_capacity(staff, cap)
}

/// Tirage aléatoire équitable (mélange puis prise) parmi le personnel éligible.
///
/// Éligible = hors liste d'exclusion et sous le plafond du registre. Retourne
/// moins de `count` personnes (voire aucune) si le vivier ne suffit pas.
pub fn select_eligible<R: Rng + ?Sized>(
    pool: &[StaffId],
    excluded: &[StaffId],
    cap: u32,
    ledger: &StaffLedger,
    count: usize,
    rng: &mut R,
) -> Vec<StaffId> {
    let mut eligible: Vec<&StaffId> = pool
        .iter()
        .filter(|s| is_eligible(s, excluded, cap, ledger))
        .collect();
    eligible.shuffle(rng);
    eligible.into_iter().take(count).cloned().collect()
}

/// Rotation déterministe : parcourt le vivier à partir de `start` en sautant
/// les personnes inéligibles.
pub fn select_rotation(
    pool: &[StaffId],
    excluded: &[StaffId],
    cap: u32,
    ledger: &StaffLedger,
    count: usize,
    start: usize,
) -> Vec<StaffId> {
    let n = pool.len();
    (0..n)
        .map(|k| &pool[(start + k) % n])
        .filter(|s| is_eligible(s, excluded, cap, ledger))
        .take(count)
        .cloned()
        .collect()
}

/// Point de départ de la rotation : jour de l'année (base 0) + décalage du shift.
pub fn rotation_start(date: NaiveDate, offset: usize, pool_len: usize) -> usize {
    if pool_len == 0 {
        return 0;
    }
    (date.ordinal0() as usize + offset) % pool_len
}
