//! Screen registry
//!
//! Maps configuration section names to screen constructors. Section names
//! are the screen type name with an optional numeric suffix, so several
//! screens of one type can be configured (`WeightInputScreen1`,
//! `WeightInputScreen2`).

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;

use crate::config::ScreenSection;
use crate::screens::weight_input::DEFAULT_WEIGHT_KG;
use crate::screens::{
    ChartSeries, IpAddressScreen, Screen, WatchScreen, WeatherScreen, WeightChartScreen,
    WeightInputScreen,
};
use crate::traits::{
    CollaboratorError, SharedClock, SharedHostInfo, SharedWeightStore, WeatherQuery,
    WeatherSource,
};

/// Screen type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenKind {
    Watch,
    IpAddress,
    Weather,
    WeightChart,
    WeightInput,
}

/// External services handed to screen constructors
pub struct Collaborators {
    pub clock: SharedClock,
    pub host: SharedHostInfo,
    pub weather: Box<dyn WeatherSource>,
    pub weight_store: SharedWeightStore,
}

/// Startup failure while building the screen list
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("section [{section}] is missing option `{option}`")]
    MissingOption { section: String, option: &'static str },
    #[error("section [{section}] option `{option}` has invalid value `{value}`")]
    InvalidOption {
        section: String,
        option: &'static str,
        value: String,
    },
    #[error("section [{section}]: {source}")]
    Collaborator {
        section: String,
        #[source]
        source: CollaboratorError,
    },
}

type Constructor = fn(&ScreenSection, &mut Collaborators) -> Result<Screen, BuildError>;

/// One row of the registry
pub struct RegistryEntry {
    pub kind: ScreenKind,
    pub type_name: &'static str,
    construct: Constructor,
}

/// Every known screen type
pub static REGISTRY: [RegistryEntry; 5] = [
    RegistryEntry {
        kind: ScreenKind::Watch,
        type_name: "WatchScreen",
        construct: build_watch,
    },
    RegistryEntry {
        kind: ScreenKind::IpAddress,
        type_name: "IpAddressScreen",
        construct: build_ip_address,
    },
    RegistryEntry {
        kind: ScreenKind::Weather,
        type_name: "WeatherScreen",
        construct: build_weather,
    },
    RegistryEntry {
        kind: ScreenKind::WeightChart,
        type_name: "WeightChartScreen",
        construct: build_weight_chart,
    },
    RegistryEntry {
        kind: ScreenKind::WeightInput,
        type_name: "WeightInputScreen",
        construct: build_weight_input,
    },
];

impl ScreenKind {
    fn entry(self) -> &'static RegistryEntry {
        // rows are in declaration order of the variants
        &REGISTRY[self as usize]
    }

    pub fn type_name(self) -> &'static str {
        self.entry().type_name
    }

    /// Resolve a section name, ignoring a trailing number
    pub fn from_section_name(name: &str) -> Option<Self> {
        let type_name = name.trim_end_matches(|c: char| c.is_ascii_digit());
        REGISTRY
            .iter()
            .find(|e| e.type_name == type_name)
            .map(|e| e.kind)
    }

    /// Build one screen of this kind
    pub fn build(
        self,
        section: &ScreenSection,
        collaborators: &mut Collaborators,
    ) -> Result<Screen, BuildError> {
        (self.entry().construct)(section, collaborators)
    }
}

/// Build the screen list from configuration sections, in order
///
/// Sections that do not name a screen type are skipped.
pub fn build_screens(
    sections: &[ScreenSection],
    collaborators: &mut Collaborators,
) -> Result<Vec<Screen>, BuildError> {
    let mut screens = Vec::with_capacity(sections.len());
    for section in sections {
        let Some(kind) = ScreenKind::from_section_name(&section.name) else {
            log::warn!("skipping unknown screen section [{}]", section.name);
            continue;
        };
        log::info!("building {} from [{}]", kind.type_name(), section.name);
        screens.push(kind.build(section, collaborators)?);
    }
    Ok(screens)
}

fn required<'a>(section: &'a ScreenSection, option: &'static str) -> Result<&'a str, BuildError> {
    section.option(option).ok_or_else(|| BuildError::MissingOption {
        section: section.name.clone(),
        option,
    })
}

fn parsed_or<T: FromStr>(
    section: &ScreenSection,
    option: &'static str,
    default: T,
) -> Result<T, BuildError> {
    match section.option(option) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| BuildError::InvalidOption {
            section: section.name.clone(),
            option,
            value: value.to_string(),
        }),
    }
}

fn collaborator_failed(
    section: &ScreenSection,
) -> impl FnOnce(CollaboratorError) -> BuildError + '_ {
    move |source| BuildError::Collaborator {
        section: section.name.clone(),
        source,
    }
}

fn build_watch(_: &ScreenSection, c: &mut Collaborators) -> Result<Screen, BuildError> {
    Ok(Screen::Watch(WatchScreen::new(c.clock.clone())))
}

fn build_ip_address(_: &ScreenSection, c: &mut Collaborators) -> Result<Screen, BuildError> {
    Ok(Screen::IpAddress(IpAddressScreen::new(c.host.clone())))
}

fn build_weather(section: &ScreenSection, c: &mut Collaborators) -> Result<Screen, BuildError> {
    let query = WeatherQuery {
        zip_code: required(section, "zip_code")?.to_string(),
        country_code: required(section, "country_code")?.to_string(),
        api_key: section.option("api_key").unwrap_or_default().to_string(),
    };
    let screen =
        WeatherScreen::new(&query, c.weather.as_mut()).map_err(collaborator_failed(section))?;
    Ok(Screen::Weather(screen))
}

fn build_weight_chart(
    section: &ScreenSection,
    c: &mut Collaborators,
) -> Result<Screen, BuildError> {
    let person = required(section, "person")?;
    let series = match section.option("series") {
        None => ChartSeries::default(),
        Some(value) => ChartSeries::from_option(value).ok_or_else(|| BuildError::InvalidOption {
            section: section.name.clone(),
            option: "series",
            value: value.to_string(),
        })?,
    };
    let screen = WeightChartScreen::from_store(person, series, c.weight_store.clone())
        .map_err(collaborator_failed(section))?;
    Ok(Screen::WeightChart(screen))
}

fn build_weight_input(
    section: &ScreenSection,
    c: &mut Collaborators,
) -> Result<Screen, BuildError> {
    let person = required(section, "person")?;
    let default_weight = parsed_or(section, "default_weight", DEFAULT_WEIGHT_KG)?;
    let screen = WeightInputScreen::new(
        person,
        default_weight,
        c.weight_store.clone(),
        c.clock.clone(),
    )
    .map_err(collaborator_failed(section))?;
    Ok(Screen::WeightInput(screen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{collaborators, FakeWeather};

    #[test]
    fn test_section_name_suffix_is_ignored() {
        assert_eq!(
            ScreenKind::from_section_name("WeightInputScreen2"),
            Some(ScreenKind::WeightInput)
        );
        assert_eq!(ScreenKind::from_section_name("WatchScreen"), Some(ScreenKind::Watch));
        assert_eq!(ScreenKind::from_section_name("ClockScreen1"), None);
        assert_eq!(ScreenKind::from_section_name("weightloss_gadget"), None);
    }

    #[test]
    fn test_type_names_round_trip() {
        for (index, entry) in REGISTRY.iter().enumerate() {
            assert_eq!(entry.kind as usize, index);
            assert_eq!(ScreenKind::from_section_name(entry.type_name), Some(entry.kind));
            assert_eq!(entry.kind.type_name(), entry.type_name);
        }
    }

    #[test]
    fn test_builds_in_order_and_skips_unknown() {
        let sections = [
            ScreenSection::new("WatchScreen"),
            ScreenSection::new("MysteryScreen"),
            ScreenSection::new("WeightInputScreen1").with_option("person", "Lukas"),
            ScreenSection::new("IpAddressScreen"),
        ];
        let screens = build_screens(&sections, &mut collaborators()).unwrap();
        let kinds: Vec<ScreenKind> = screens.iter().map(Screen::kind).collect();
        assert_eq!(
            kinds,
            vec![ScreenKind::Watch, ScreenKind::WeightInput, ScreenKind::IpAddress]
        );
    }

    #[test]
    fn test_missing_option() {
        let sections = [ScreenSection::new("WeightChartScreen")];
        let err = build_screens(&sections, &mut collaborators()).err().unwrap();
        assert_eq!(
            err,
            BuildError::MissingOption {
                section: "WeightChartScreen".to_string(),
                option: "person"
            }
        );
    }

    #[test]
    fn test_invalid_option() {
        let sections = [ScreenSection::new("WeightChartScreen")
            .with_option("person", "Lukas")
            .with_option("series", "bmi")];
        let err = build_screens(&sections, &mut collaborators()).err().unwrap();
        assert!(matches!(err, BuildError::InvalidOption { option: "series", .. }));

        let sections = [ScreenSection::new("WeightInputScreen")
            .with_option("person", "Lukas")
            .with_option("default_weight", "heavy")];
        let err = build_screens(&sections, &mut collaborators()).err().unwrap();
        assert!(matches!(err, BuildError::InvalidOption { option: "default_weight", .. }));
    }

    #[test]
    fn test_builds_weather_screen() {
        let sections = [ScreenSection::new("WeatherScreen")
            .with_option("zip_code", "80331")
            .with_option("country_code", "de")];
        let screens = build_screens(&sections, &mut collaborators()).unwrap();
        assert_eq!(screens[0].kind(), ScreenKind::Weather);
    }

    #[test]
    fn test_weather_failure_aborts_startup() {
        let mut c = collaborators();
        let mut weather = FakeWeather::default();
        weather.fail = true;
        c.weather = Box::new(weather);

        let sections = [ScreenSection::new("WeatherScreen")
            .with_option("zip_code", "80331")
            .with_option("country_code", "de")];
        let err = build_screens(&sections, &mut c).err().unwrap();
        assert!(matches!(err, BuildError::Collaborator { .. }));
    }
}
