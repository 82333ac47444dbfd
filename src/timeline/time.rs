use super::types::TimeError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub(crate) const MINUTES_PER_DAY: u32 = 24 * 60;

/// Formats acceptés en entrée, essayés dans l'ordre.
const ACCEPTED_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

/// Heure murale à la minute près, affichée en `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Construit une heure à partir de minutes depuis minuit (modulo 24h).
    pub fn from_minutes(minutes: u32) -> Self {
        let m = minutes % MINUTES_PER_DAY;
        // m < 1440 donc toujours valide
        Self(NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap_or(NaiveTime::MIN))
    }

    /// Accepte `HH:mm`, `H:mm`, `HH:mm:ss` et `h:mm AM/PM`.
    pub fn parse(input: &str) -> Result<Self, TimeError> {
        let raw = input.trim();
        let upper = raw.to_ascii_uppercase();
        ACCEPTED_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(&upper, fmt).ok())
            .map(|t| Self(t.with_second(0).unwrap_or(t)))
            .ok_or_else(|| TimeError::Unparseable(input.to_owned()))
    }

    pub fn minutes(self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Vrai si `[self, end]` passe minuit. Une fin à `00:00` signifie « jusqu'à
    /// minuit » et ne passe pas.
    pub fn crosses_midnight_to(self, end: ClockTime) -> bool {
        end < self && end != Self::MIDNIGHT
    }

    /// Rendu 12h sans zéro initial : `2:00 PM`, `12:00 AM`.
    pub fn to_twelve_hour(self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClockTime::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Intervalle `[début, fin]` en minutes depuis minuit du jour de classement.
///
/// Un intervalle qui passe minuit est classé au jour où il se termine : il a
/// donc commencé la veille et son début est négatif.
pub(crate) fn day_interval(start: ClockTime, end: ClockTime) -> (i64, i64) {
    let s = i64::from(start.minutes());
    let e = i64::from(end.minutes());
    let day = i64::from(MINUTES_PER_DAY);
    if start.crosses_midnight_to(end) {
        (s - day, e)
    } else if end == ClockTime::MIDNIGHT && start != ClockTime::MIDNIGHT {
        (s, day)
    } else {
        (s, e)
    }
}

/// Normalise une heure murale vers la forme canonique `HH:mm`.
pub fn normalize_time(input: &str) -> Result<String, TimeError> {
    ClockTime::parse(input).map(|t| t.to_string())
}
