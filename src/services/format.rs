use std::fmt;

use serde::Serialize;

/// Play time broken into display units. Kept structured so the rendering
/// layer can localize the unit labels; `Display` gives the default English
/// rendering with zero-valued leading units elided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl PlayTime {
    pub fn from_secs(total_secs: u64) -> Self {
        Self {
            hours: total_secs / 3600,
            minutes: total_secs / 60 % 60,
            seconds: total_secs % 60,
        }
    }
}

impl fmt::Display for PlayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 0 {
            write!(f, "{} h {} min {} sec", self.hours, self.minutes, self.seconds)
        } else if self.minutes > 0 {
            write!(f, "{} min {} sec", self.minutes, self.seconds)
        } else {
            write!(f, "{} sec", self.seconds)
        }
    }
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to three decimal places.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
