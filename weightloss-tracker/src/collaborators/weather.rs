//! Weather sources
//!
//! `OpenWeatherMap` queries the current-weather endpoint over HTTPS.
//! `OfflineWeather` answers with fixed conditions so the tracker can run
//! without network access or an API key.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime};
use log::{debug, info};
use serde::Deserialize;
use ureq::{Agent, AgentBuilder};
use url::Url;

use weightloss_core::{CollaboratorError, WeatherQuery, WeatherSnapshot, WeatherSource};

const SERVICE: &str = "openweathermap";

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenWeatherMap current-weather client
#[derive(Clone)]
pub struct OpenWeatherMap {
    agent: Agent,
    endpoint: String,
}

impl Default for OpenWeatherMap {
    fn default() -> Self {
        Self {
            agent: AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            endpoint: CURRENT_WEATHER_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: String,
    main: MainReadings,
    sys: SunTimes,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f32,
}

#[derive(Debug, Deserialize)]
struct SunTimes {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

fn local_time(timestamp: Option<i64>) -> Option<NaiveDateTime> {
    let utc = DateTime::from_timestamp(timestamp?, 0)?;
    Some(utc.with_timezone(&Local).naive_local())
}

/// Request URL for `query` against `endpoint`, metric units
pub fn weather_url(endpoint: &str, query: &WeatherQuery) -> Result<Url, url::ParseError> {
    let zip = format!("{},{}", query.zip_code, query.country_code);
    Url::parse_with_params(
        endpoint,
        [
            ("appid", query.api_key.as_str()),
            ("zip", zip.as_str()),
            ("units", "metric"),
        ],
    )
}

/// Decode the JSON body of a current-weather response
pub fn parse_current_weather(body: &[u8]) -> Result<WeatherSnapshot, CollaboratorError> {
    let current: CurrentWeather = serde_json::from_slice(body)
        .map_err(|e| CollaboratorError::invalid_data(SERVICE, e.to_string()))?;
    Ok(WeatherSnapshot {
        temperature_c: current.main.temp,
        city: current.name,
        sunrise: local_time(current.sys.sunrise),
        sunset: local_time(current.sys.sunset),
    })
}

impl OpenWeatherMap {
    fn get(&self, url: &Url) -> Result<String, CollaboratorError> {
        match self.agent.request_url("GET", url).call() {
            Ok(response) => response
                .into_string()
                .map_err(|e| CollaboratorError::unavailable(SERVICE, e.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(CollaboratorError::unavailable(
                SERVICE,
                format!("HTTP status {code}"),
            )),
            Err(e) => Err(CollaboratorError::unavailable(SERVICE, e.to_string())),
        }
    }
}

impl WeatherSource for OpenWeatherMap {
    fn fetch_current(
        &mut self,
        query: &WeatherQuery,
    ) -> Result<WeatherSnapshot, CollaboratorError> {
        if query.api_key.is_empty() {
            return Err(CollaboratorError::unavailable(SERVICE, "api_key is not set"));
        }
        debug!("weather query for {},{}", query.zip_code, query.country_code);
        let url = weather_url(&self.endpoint, query)
            .map_err(|e| CollaboratorError::invalid_data(SERVICE, e.to_string()))?;
        let body = self.get(&url)?;
        let snapshot = parse_current_weather(body.as_bytes())?;
        info!("{}: {:.1} C", snapshot.city, snapshot.temperature_c);
        Ok(snapshot)
    }
}

/// Fixed conditions for demos and offline use
#[derive(Debug, Clone)]
pub struct OfflineWeather {
    pub city: String,
    pub temperature_c: f32,
}

impl Default for OfflineWeather {
    fn default() -> Self {
        Self {
            city: "Offline".to_string(),
            temperature_c: 20.0,
        }
    }
}

impl WeatherSource for OfflineWeather {
    fn fetch_current(
        &mut self,
        query: &WeatherQuery,
    ) -> Result<WeatherSnapshot, CollaboratorError> {
        debug!("offline weather for {},{}", query.zip_code, query.country_code);
        Ok(WeatherSnapshot {
            temperature_c: self.temperature_c,
            city: self.city.clone(),
            sunrise: None,
            sunset: None,
        })
    }
}
