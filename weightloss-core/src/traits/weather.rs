//! Current weather lookup

use alloc::string::String;

use chrono::NaiveDateTime;

use super::CollaboratorError;

/// Location and credentials for a weather lookup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeatherQuery {
    pub zip_code: String,
    pub country_code: String,
    pub api_key: String,
}

/// Current conditions at one location
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Air temperature in degrees Celsius
    pub temperature_c: f32,
    /// Human readable location name
    pub city: String,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
}

/// Remote weather service
pub trait WeatherSource {
    /// Fetch current conditions for `query`
    fn fetch_current(&mut self, query: &WeatherQuery)
        -> Result<WeatherSnapshot, CollaboratorError>;
}
