#![allow(async_fn_in_trait)]

use derive_more::derive::{Display, Error, From};

use crate::core::time::{DateTime, InvalidTimezone};
use crate::grid::TimeGrid;

/// Something that can tell how booked a display is around `now`.
pub trait ScheduleSource {
    async fn schedule(&self, now: DateTime) -> Result<TimeGrid, ScheduleError>;
}

#[derive(Debug, Display, Error, From)]
pub enum ScheduleError {
    #[display("Calendar unavailable")]
    Upstream(anyhow::Error),

    #[display("{_0}")]
    InvalidTimezone(InvalidTimezone),
}
