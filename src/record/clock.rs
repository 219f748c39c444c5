// ABOUTME: Business-timezone clock used to timestamp logged interactions
// ABOUTME: Provides the system clock in a named timezone and a fixed clock for tests

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;

use super::error::{RecordError, Result};

pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

#[derive(Debug, Clone, Copy)]
pub struct BusinessClock {
    timezone: Tz,
}

impl BusinessClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        let timezone = name
            .trim()
            .parse::<Tz>()
            .map_err(|_| RecordError::InvalidTimezone {
                name: name.to_string(),
            })?;
        Ok(Self::new(timezone))
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self::new(chrono_tz::America::Sao_Paulo)
    }
}

impl Clock for BusinessClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Tz>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.0
    }
}

pub fn weekday_pt(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}
