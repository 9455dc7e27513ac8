mod client;
mod parse;

pub use client::CalendarClient;
use parse::parse_calendar;

use crate::board::LiveDisplay;
use crate::core::time::{DateTime, parse_timezone};
use crate::grid::{GridBuilder, TimeGrid};
use crate::port::{ScheduleError, ScheduleSource};

/// Occupancy from a remote iCalendar feed
#[derive(Debug, Clone)]
pub struct LiveCalendar {
    display: LiveDisplay,
    client: CalendarClient,
    builder: GridBuilder,
}

impl LiveCalendar {
    pub fn new(display: LiveDisplay, client: CalendarClient, builder: GridBuilder) -> Self {
        Self {
            display,
            client,
            builder,
        }
    }
}

impl ScheduleSource for LiveCalendar {
    async fn schedule(&self, now: DateTime) -> Result<TimeGrid, ScheduleError> {
        // a broken zone is a configuration error, no need to hit the network first
        let target = parse_timezone(&self.display.timezone)?;

        let content = self.client.fetch(&self.display.url).await?;
        let calendar = parse_calendar(&content, &target)?;

        tracing::info!(
            "Loaded {} events for {} from calendar {:?} ({:?})",
            calendar.events.len(),
            self.display.name,
            calendar.name,
            calendar.description
        );

        let grid = self.builder.build(
            &calendar.events,
            now,
            &self.display.timezone,
            self.display.override_timezone.as_deref(),
            &self.display.name,
        )?;

        Ok(grid)
    }
}
