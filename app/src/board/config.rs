use serde::Deserialize;

/// One `[display.<id>]` entry. Every field is optional at this level, an incomplete entry
/// simply makes the board fall back to synthetic data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub name: Option<String>,
    pub url: Option<String>,
    pub tz: Option<String>,
    pub otz: Option<String>,
}

/// A display with everything needed to build a live grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveDisplay {
    pub name: String,
    pub url: String,
    pub timezone: String,
    pub override_timezone: Option<String>,
}

impl DisplayConfig {
    pub fn live(&self) -> Option<LiveDisplay> {
        Some(LiveDisplay {
            name: non_empty(&self.name)?,
            url: non_empty(&self.url)?,
            timezone: non_empty(&self.tz)?,
            override_timezone: non_empty(&self.otz),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Display ids are looked up as uppercase alphanumerics only, whatever the client sends.
pub fn sanitize(id: &str) -> String {
    id.chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(name: &str, url: &str, tz: &str, otz: Option<&str>) -> DisplayConfig {
        DisplayConfig {
            name: Some(name.to_owned()),
            url: Some(url.to_owned()),
            tz: Some(tz.to_owned()),
            otz: otz.map(str::to_owned),
        }
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("room1"), "ROOM1");
        assert_eq!(sanitize(" Room-1_a/../"), "ROOM1A");
        assert_eq!(sanitize("Größe"), "GRSSE");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_complete_config_is_live() {
        let display = config("Board Room", "https://example.com/a.ics", "Europe/Zurich", None)
            .live()
            .unwrap();

        assert_eq!(display.name, "Board Room");
        assert_eq!(display.timezone, "Europe/Zurich");
        assert_eq!(display.override_timezone, None);
    }

    #[test]
    fn test_missing_or_blank_field_is_not_live() {
        assert!(config("", "https://example.com/a.ics", "UTC", None).live().is_none());
        assert!(config("Room", "  ", "UTC", None).live().is_none());
        assert!(
            DisplayConfig {
                tz: None,
                ..config("Room", "https://example.com/a.ics", "UTC", None)
            }
            .live()
            .is_none()
        );
    }

    #[test]
    fn test_blank_override_is_dropped() {
        let display = config("Room", "https://example.com/a.ics", "UTC", Some(" "))
            .live()
            .unwrap();

        assert_eq!(display.override_timezone, None);
    }
}
