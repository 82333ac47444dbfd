use super::time::{day_interval, ClockTime};
use super::types::TimeError;
use crate::model::TaskId;
use std::collections::BTreeMap;

/// Tâche déjà normalisée, prête pour le calcul des couches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedTask {
    pub id: TaskId,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimedTask {
    pub fn new(id: TaskId, start: ClockTime, end: ClockTime) -> Self {
        Self { id, start, end }
    }

    /// Chevauchement sur le jour de classement (voir [`locate_span`](super::locate_span)) :
    /// une tâche qui passe minuit occupe la fin de la veille et le début du jour.
    pub fn overlaps(&self, other: &TimedTask) -> bool {
        let (s1, e1) = day_interval(self.start, self.end);
        let (s2, e2) = day_interval(other.start, other.end);
        s1 < e2 && s2 < e1
    }
}

/// Chevauchement brut en minutes depuis minuit : `a_start < b_end && b_start < a_end`.
///
/// Ne gère pas le passage de minuit : `23:00–02:00` ne chevauche rien d'après
/// cette fonction. Le calcul des couches utilise [`TimedTask::overlaps`].
pub fn ranges_overlap(
    a_start: &str,
    a_end: &str,
    b_start: &str,
    b_end: &str,
) -> Result<bool, TimeError> {
    let a_start = ClockTime::parse(a_start)?.minutes();
    let a_end = ClockTime::parse(a_end)?.minutes();
    let b_start = ClockTime::parse(b_start)?.minutes();
    let b_end = ClockTime::parse(b_end)?.minutes();
    Ok(a_start < b_end && b_start < a_end)
}

/// Couche de chaque tâche, dans l'ordre d'entrée.
///
/// Tri par (début, fin, ordre d'entrée) puis placement glouton dans la plus
/// basse couche libre ; ouvre une nouvelle couche sinon.
pub fn assign_layer_indices(tasks: &[TimedTask]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    // tri stable : l'ordre d'entrée départage les égalités
    order.sort_by_key(|&i| day_interval(tasks[i].start, tasks[i].end));

    let mut bands: Vec<Vec<usize>> = Vec::new();
    let mut out = vec![0usize; tasks.len()];

    for idx in order {
        let task = &tasks[idx];
        let free = bands
            .iter()
            .position(|band| band.iter().all(|&other| !task.overlaps(&tasks[other])));
        let layer = match free {
            Some(layer) => layer,
            None => {
                bands.push(Vec::new());
                bands.len() - 1
            }
        };
        bands[layer].push(idx);
        out[idx] = layer;
    }

    out
}

/// Couche par identifiant de tâche (0 = bande du haut).
pub fn assign_layers(tasks: &[TimedTask]) -> BTreeMap<TaskId, usize> {
    tasks
        .iter()
        .zip(assign_layer_indices(tasks))
        .map(|(t, layer)| (t.id.clone(), layer))
        .collect()
}
