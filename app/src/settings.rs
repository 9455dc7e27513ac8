use std::collections::HashMap;

use anyhow::Context as _;
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use infrastructure::{HttpClientConfig, HttpServerConfig, MonitoringConfig};
use serde::Deserialize;

use crate::adapter::ical::CalendarClient;
use crate::board::{BoardService, DisplayConfig};
use crate::core::time::parse_timezone;
use crate::grid::GridShape;
use crate::render::{FontConfig, Fonts, Layout, Palette, Renderer};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: HttpServerConfig,
    pub monitoring: MonitoringConfig,
    pub calendar: HttpClientConfig,
    pub board: BoardSettings,
    pub display: HashMap<String, DisplayConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub rows: usize,
    pub columns: usize,
    /// Zone of the synthetic board
    pub timezone: String,
    pub fonts: FontConfig,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            rows: 4,
            columns: 12,
            timezone: "UTC".to_owned(),
            fonts: FontConfig::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config.toml").required(false))
            .add_source(environment());

        let s = builder.build()?;
        s.try_deserialize()
    }

    pub fn new_board_service(&self) -> anyhow::Result<BoardService> {
        let shape = GridShape::new(self.board.rows, self.board.columns)?;
        let zone: Tz = parse_timezone(&self.board.timezone)?;
        let fonts = Fonts::load(&self.board.fonts)?;
        let renderer = Renderer::new(Layout::default(), Palette::default(), fonts);
        let client = CalendarClient::new(&self.calendar).context("Error creating calendar client")?;

        Ok(BoardService::new(&self.display, client, shape, zone, renderer))
    }
}

/// `ROOMBOARD_DISPLAY__ROOM1__URL` sets `display.room1.url`. Nesting uses a double underscore
/// so snake_case keys like `service_name` stay intact.
fn environment() -> Environment {
    Environment::with_prefix("ROOMBOARD")
        .prefix_separator("_")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = from_toml("");

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.calendar.timeout, 10);
        assert_eq!(settings.board.rows, 4);
        assert_eq!(settings.board.columns, 12);
        assert!(settings.display.is_empty());
        assert!(settings.new_board_service().is_ok());
    }

    #[test]
    fn test_display_entries() {
        let settings = from_toml(
            r#"
            [display.room1]
            name = "Board Room"
            url = "https://example.com/room1.ics"
            tz = "Europe/Zurich"
            otz = "UTC"
            "#,
        );

        let room = settings.display.get("room1").unwrap().live().unwrap();
        assert_eq!(room.name, "Board Room");
        assert_eq!(room.override_timezone.as_deref(), Some("UTC"));
    }

    #[test]
    fn test_environment_overrides() {
        let vars = [
            ("ROOMBOARD_SERVER__PORT", "9090"),
            ("ROOMBOARD_MONITORING__SERVICE_NAME", "lobby-board"),
            ("ROOMBOARD_MONITORING__LOGS__DEFAULT_LEVEL", "debug"),
            ("ROOMBOARD_BOARD__FONTS__REGULAR", "6x10"),
            ("ROOMBOARD_DISPLAY__ROOM1__NAME", "Board Room, East"),
            ("ROOMBOARD_DISPLAY__ROOM1__URL", "https://example.com/room1.ics?a=1,2"),
            ("ROOMBOARD_DISPLAY__ROOM1__TZ", "Europe/Zurich"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let settings: Settings = Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.monitoring.service_name, "lobby-board");
        assert_eq!(settings.monitoring.logs.default_level, "debug");
        assert_eq!(settings.board.fonts.regular, "6x10");

        let room = settings.display.get("room1").unwrap().live().unwrap();
        assert_eq!(room.name, "Board Room, East");
        assert_eq!(room.url, "https://example.com/room1.ics?a=1,2");
        assert_eq!(room.timezone, "Europe/Zurich");
    }

    #[test]
    fn test_unknown_font_is_fatal() {
        let settings = from_toml(
            r#"
            [board.fonts]
            bold = "comic-sans"
            "#,
        );

        assert!(settings.new_board_service().is_err());
    }

    #[test]
    fn test_zero_columns_is_fatal() {
        let settings = from_toml("[board]\ncolumns = 0");

        assert!(settings.new_board_service().is_err());
    }
}
