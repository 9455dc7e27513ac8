mod config;
mod source;

use std::collections::HashMap;

use chrono_tz::Tz;
use derive_more::derive::{Display, Error};

pub use config::{DisplayConfig, LiveDisplay, sanitize};
pub use source::{ScheduleProvider, SyntheticSchedule};

use crate::adapter::ical::{CalendarClient, LiveCalendar};
use crate::core::time::{DateTime, InvalidTimezone};
use crate::grid::{GridBuilder, GridShape};
use crate::port::{ScheduleError, ScheduleSource};
use crate::render::Renderer;

#[derive(Debug, Display, Error)]
pub enum BoardError {
    #[display("Invalid display configuration: {_0}")]
    InvalidConfiguration(InvalidTimezone),

    #[display("Error rendering board")]
    Rendering(anyhow::Error),
}

/// The request pipeline: pick a schedule source for a display, build its grid, render it.
#[derive(Debug)]
pub struct BoardService {
    displays: HashMap<String, LiveDisplay>,
    client: CalendarClient,
    synthetic: SyntheticSchedule,
    builder: GridBuilder,
    renderer: Renderer,
}

impl BoardService {
    pub fn new(
        displays: &HashMap<String, DisplayConfig>,
        client: CalendarClient,
        shape: GridShape,
        zone: Tz,
        renderer: Renderer,
    ) -> Self {
        let displays = displays
            .iter()
            .filter_map(|(id, config)| match config.live() {
                Some(display) => Some((sanitize(id), display)),
                None => {
                    tracing::warn!("Display {} is incomplete, it will show synthetic data", id);
                    None
                }
            })
            .collect::<HashMap<_, _>>();

        tracing::info!("Configured displays: {:?}", displays.keys().collect::<Vec<_>>());

        Self {
            displays,
            client,
            synthetic: SyntheticSchedule::new(shape, zone),
            builder: GridBuilder::new(shape),
            renderer,
        }
    }

    pub fn content_type(&self) -> mime::Mime {
        self.renderer.content_type()
    }

    pub fn source_for(&self, display: Option<&str>) -> ScheduleProvider {
        let id = display.map(sanitize).unwrap_or_default();

        match self.displays.get(&id) {
            Some(display) => ScheduleProvider::Live(LiveCalendar::new(
                display.clone(),
                self.client.clone(),
                self.builder,
            )),
            None => {
                tracing::info!("Display {:?} not found, using synthetic schedule", id);
                ScheduleProvider::Synthetic(self.synthetic)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn render(&self, display_id: Option<&str>) -> Result<Vec<u8>, BoardError> {
        let now = DateTime::now();

        let grid = match self.source_for(display_id).schedule(now).await {
            Ok(grid) => grid,
            Err(ScheduleError::Upstream(e)) => {
                tracing::warn!("Calendar unavailable, using synthetic schedule: {:?}", e);
                self.synthetic.grid(now)
            }
            Err(ScheduleError::InvalidTimezone(e)) => {
                tracing::error!("Error building grid: {}", e);
                return Err(BoardError::InvalidConfiguration(e));
            }
        };

        self.renderer.render(&grid).map_err(BoardError::Rendering)
    }
}
