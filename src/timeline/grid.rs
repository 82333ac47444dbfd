use super::time::{ClockTime, MINUTES_PER_DAY};
use super::types::LayoutError;
use serde::Serialize;

/// Écart maximal entre la première et la dernière colonne.
const MAX_GRID_EXTENT_MINUTES: u32 = 7 * MINUTES_PER_DAY;

/// Rendu du libellé d'une colonne de la grille.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DisplayFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

/// Colonne de la grille : clé canonique `HH:mm` + libellé affiché.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub time: ClockTime,
    pub display: String,
    /// Minutes écoulées depuis la première colonne (croissant, même après minuit).
    pub offset_minutes: u32,
}

/// Axe horizontal de la timeline, généré une fois par session de rendu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeGrid {
    start: ClockTime,
    interval_minutes: u32,
    slots: Vec<TimeSlot>,
}

impl TimeGrid {
    pub fn new(
        start: ClockTime,
        interval_minutes: u32,
        slot_count: usize,
        format: DisplayFormat,
    ) -> Result<Self, LayoutError> {
        if interval_minutes == 0 {
            return Err(LayoutError::InvalidGrid("interval must be > 0"));
        }
        if slot_count == 0 {
            return Err(LayoutError::InvalidGrid("slot count must be > 0"));
        }
        let extent = u32::try_from(slot_count - 1)
            .ok()
            .and_then(|last| last.checked_mul(interval_minutes));
        if !extent.is_some_and(|e| e <= MAX_GRID_EXTENT_MINUTES) {
            return Err(LayoutError::InvalidGrid("grid extent exceeds one week"));
        }
        let slots = (0..slot_count)
            .map(|i| {
                let offset_minutes = i as u32 * interval_minutes;
                let time = ClockTime::from_minutes(start.minutes() + offset_minutes);
                let display = match format {
                    DisplayFormat::TwentyFourHour => time.to_string(),
                    DisplayFormat::TwelveHour => time.to_twelve_hour(),
                };
                TimeSlot {
                    time,
                    display,
                    offset_minutes,
                }
            })
            .collect();
        Ok(Self {
            start,
            interval_minutes,
            slots,
        })
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Vrai si la dernière colonne est au-delà de minuit.
    pub fn wraps_midnight(&self) -> bool {
        self.slots
            .last()
            .is_some_and(|s| self.start.minutes() + s.offset_minutes >= MINUTES_PER_DAY)
    }
}

/// Grille par défaut de la timeline : `start_hour` + `i * interval_minutes`, libellés 24h.
pub fn build_time_grid(
    start_hour: u32,
    interval_minutes: u32,
    slot_count: usize,
) -> Result<TimeGrid, LayoutError> {
    let start =
        ClockTime::from_hm(start_hour, 0).ok_or(LayoutError::InvalidGrid("start hour must be < 24"))?;
    TimeGrid::new(start, interval_minutes, slot_count, DisplayFormat::TwentyFourHour)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(grid: &TimeGrid) -> Vec<String> {
        grid.slots().iter().map(|s| s.time.to_string()).collect()
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let start = ClockTime::from_hm(6, 0).unwrap();
        assert_eq!(
            TimeGrid::new(start, u32::MAX, 2, DisplayFormat::TwentyFourHour),
            Err(LayoutError::InvalidGrid("grid extent exceeds one week"))
        );
        assert!(TimeGrid::new(start, 1, usize::MAX, DisplayFormat::TwentyFourHour).is_err());
        assert!(TimeGrid::new(start, 7 * 24 * 60, 2, DisplayFormat::TwelveHour).is_ok());
    }

    #[test]
    fn default_grid_matches_board() {
        let grid = build_time_grid(6, 120, 16).unwrap();
        assert_eq!(grid.len(), 16);
        let k = keys(&grid);
        assert_eq!(k[0], "06:00");
        assert_eq!(k[8], "22:00");
        assert_eq!(k[9], "00:00");
        assert_eq!(k[15], "12:00");
        assert!(grid.wraps_midnight());
    }

    #[test]
    fn offsets_strictly_increase_even_across_midnight() {
        let grid = build_time_grid(20, 90, 12).unwrap();
        assert!(grid
            .slots()
            .windows(2)
            .all(|w| w[0].offset_minutes < w[1].offset_minutes));
        let step_ok = grid.slots().windows(2).all(|w| {
            (w[1].time.minutes() + MINUTES_PER_DAY - w[0].time.minutes()) % MINUTES_PER_DAY == 90
        });
        assert!(step_ok);
    }

    #[test]
    fn hourly_grid_within_a_day_does_not_wrap() {
        let grid = build_time_grid(6, 60, 18).unwrap();
        assert_eq!(keys(&grid).last().map(String::as_str), Some("23:00"));
        assert!(!grid.wraps_midnight());
    }

    #[test]
    fn twelve_hour_labels() {
        let start = ClockTime::from_hm(11, 0).unwrap();
        let grid = TimeGrid::new(start, 60, 3, DisplayFormat::TwelveHour).unwrap();
        let labels: Vec<_> = grid.slots().iter().map(|s| s.display.as_str()).collect();
        assert_eq!(labels, ["11:00 AM", "12:00 PM", "1:00 PM"]);
        assert_eq!(grid.slots()[2].time.to_string(), "13:00");
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(build_time_grid(24, 60, 4).is_err());
        assert!(build_time_grid(6, 0, 4).is_err());
        assert!(build_time_grid(6, 60, 0).is_err());
    }
}
