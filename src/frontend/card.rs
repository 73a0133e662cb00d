//! Presentation of a weather result.
//!
//! Rounding and unit labels live here and nowhere else; the API layer
//! hands out raw values.

use chrono::{DateTime, TimeZone};
use std::fmt;

use crate::types::NormalizedWeather;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    /// `City, CC`, or just the city when the country is unknown.
    pub title: String,
    pub temperature: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub humidity: String,
    pub wind_speed: String,
    pub last_updated: String,
}

impl WeatherCard {
    pub fn new<Tz: TimeZone>(weather: &NormalizedWeather, now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let title = match weather.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {country}", weather.city),
            _ => weather.city.clone(),
        };

        let temperature = match weather.temperature {
            // Halves round toward +∞, as the web page's `Math.round` does.
            Some(t) => format!("{}°C", (t + 0.5).floor() as i64),
            None => format!("{PLACEHOLDER}°C"),
        };

        Self {
            title,
            temperature,
            description: weather.description.clone(),
            icon_url: weather
                .icon
                .as_deref()
                .filter(|i| !i.is_empty())
                .map(|i| format!("{ICON_BASE_URL}/{i}@2x.png")),
            humidity: format!("{}%", display_or_placeholder(weather.humidity)),
            wind_speed: format!("{} m/s", display_or_placeholder(weather.wind_speed)),
            last_updated: now.format("%b %d, %H:%M").to_string(),
        }
    }
}

fn display_or_placeholder(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

impl fmt::Display for WeatherCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  {}", self.temperature)?;
        if let Some(desc) = &self.description {
            writeln!(f, "  {desc}")?;
        }
        writeln!(f, "  Humidity: {}", self.humidity)?;
        writeln!(f, "  Wind Speed: {}", self.wind_speed)?;
        write!(f, "  Last updated: {}", self.last_updated)
    }
}
