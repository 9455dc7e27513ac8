use chrono_tz::Tz;

use crate::adapter::ical::LiveCalendar;
use crate::core::time::DateTime;
use crate::grid::{self, GridShape, TimeGrid};
use crate::port::{ScheduleError, ScheduleSource};

/// Random but reproducible occupancy, used whenever no live calendar can be consulted.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticSchedule {
    shape: GridShape,
    zone: Tz,
}

impl SyntheticSchedule {
    pub fn new(shape: GridShape, zone: Tz) -> Self {
        Self { shape, zone }
    }

    pub fn grid(&self, now: DateTime) -> TimeGrid {
        grid::generate_synthetic(minute_seed(now), self.shape, now, &self.zone)
    }
}

impl ScheduleSource for SyntheticSchedule {
    async fn schedule(&self, now: DateTime) -> Result<TimeGrid, ScheduleError> {
        Ok(self.grid(now))
    }
}

// same pattern for a whole minute, so a refreshing display does not flicker
fn minute_seed(now: DateTime) -> u64 {
    now.timestamp().div_euclid(60).rem_euclid(60) as u64
}

#[derive(Debug, Clone)]
pub enum ScheduleProvider {
    Live(LiveCalendar),
    Synthetic(SyntheticSchedule),
}

impl ScheduleSource for ScheduleProvider {
    async fn schedule(&self, now: DateTime) -> Result<TimeGrid, ScheduleError> {
        match self {
            ScheduleProvider::Live(calendar) => calendar.schedule(now).await,
            ScheduleProvider::Synthetic(synthetic) => synthetic.schedule(now).await,
        }
    }
}
