use super::grid::TimeGrid;
use super::time::{day_interval, ClockTime};
use serde::Serialize;

/// Colonnes (inclusives) couvertes par une tâche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpanIndices {
    pub start_index: usize,
    pub end_index: usize,
}

impl SpanIndices {
    pub fn columns(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Place une tâche `[start, end]` sur les colonnes de la grille.
///
/// Comparaison numérique en minutes sur l'axe de la grille, la tâche étant
/// ancrée à son jour de classement : une tâche qui passe minuit a commencé la
/// veille, seule sa queue du matin peut donc tomber sur la grille. `None` si
/// aucune colonne n'est couverte.
pub fn locate_span(grid: &TimeGrid, start: ClockTime, end: ClockTime) -> Option<SpanIndices> {
    let origin = i64::from(grid.start().minutes());
    let (lo, hi) = day_interval(start, end);
    let (lo, hi) = (lo - origin, hi - origin);

    let slots = grid.slots();
    let first = slots
        .iter()
        .position(|s| i64::from(s.offset_minutes) >= lo)?;
    let last = slots
        .iter()
        .rposition(|s| i64::from(s.offset_minutes) <= hi)?;
    (first <= last).then_some(SpanIndices {
        start_index: first,
        end_index: last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::grid::build_time_grid;

    fn t(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    fn span(a: usize, b: usize) -> Option<SpanIndices> {
        Some(SpanIndices {
            start_index: a,
            end_index: b,
        })
    }

    #[test]
    fn daytime_task_on_hourly_grid() {
        let grid = build_time_grid(6, 60, 18).unwrap();
        assert_eq!(locate_span(&grid, t("08:00"), t("12:00")), span(2, 6));
        assert_eq!(locate_span(&grid, t("08:30"), t("12:00")), span(3, 6));
        assert_eq!(span(3, 6).unwrap().columns(), 4);
    }

    #[test]
    fn task_starting_before_grid_is_clipped() {
        let grid = build_time_grid(6, 60, 18).unwrap();
        assert_eq!(locate_span(&grid, t("05:00"), t("08:00")), span(0, 2));
    }

    #[test]
    fn overnight_task_shows_its_morning_tail() {
        let grid = build_time_grid(6, 60, 18).unwrap();
        assert_eq!(locate_span(&grid, t("23:00"), t("07:00")), span(0, 1));
        assert_eq!(locate_span(&grid, t("18:00"), t("07:59")), span(0, 1));
    }

    #[test]
    fn until_midnight_is_not_a_wrap() {
        let grid = build_time_grid(6, 60, 18).unwrap();
        assert_eq!(locate_span(&grid, t("18:00"), t("00:00")), span(12, 17));
    }

    #[test]
    fn grid_past_midnight_shows_only_the_filing_day() {
        let grid = build_time_grid(20, 60, 10).unwrap();
        assert_eq!(locate_span(&grid, t("21:00"), t("23:00")), span(1, 3));
        // classé ce jour-là, donc commencé la veille à 23:00
        assert_eq!(locate_span(&grid, t("23:00"), t("02:00")), None);
    }

    #[test]
    fn rollover_record_is_not_redrawn_the_next_night() {
        // 06:00 .. 12:00 le lendemain, pas de 2h
        let grid = build_time_grid(6, 120, 16).unwrap();
        assert_eq!(locate_span(&grid, t("08:00"), t("12:00")), span(1, 3));
        assert_eq!(locate_span(&grid, t("23:00"), t("02:00")), None);
        let midnight = build_time_grid(0, 60, 24).unwrap();
        assert_eq!(locate_span(&midnight, t("23:00"), t("02:00")), span(0, 2));
    }

    #[test]
    fn outside_or_between_columns_is_none() {
        let grid = build_time_grid(6, 60, 18).unwrap();
        assert_eq!(locate_span(&grid, t("01:00"), t("05:00")), None);
        assert_eq!(locate_span(&grid, t("07:10"), t("07:50")), None);
        let board = build_time_grid(6, 120, 8).unwrap();
        assert_eq!(locate_span(&board, t("07:00"), t("07:30")), None);
    }
}
