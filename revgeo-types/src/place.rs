use crate::point::LocatedRecord;
use serde::{Deserialize, Serialize};

/// A named place from a gazetteer: a city, town, landmark or any other
/// location worth reverse geocoding to.
///
/// # Examples
///
/// ```
/// use revgeo_types::place::Place;
/// use revgeo_types::point::LocatedRecord;
///
/// let rotterdam = Place::new("Rotterdam", 51.9244, 4.4777)
///     .with_country_code("NL")
///     .with_population(655_468);
///
/// assert_eq!(rotterdam.latitude(), 51.9244);
/// assert_eq!(rotterdam.country_code.as_deref(), Some("NL"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// ISO 3166-1 alpha-2 code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub population: u64,
}

impl Place {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            country_code: None,
            population: 0,
        }
    }

    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }
}

impl LocatedRecord for Place {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_builder() {
        let berlin = Place::new("Berlin", 52.52, 13.405)
            .with_country_code("DE")
            .with_population(3_644_826);

        assert_eq!(berlin.name, "Berlin");
        assert_eq!(berlin.longitude(), 13.405);
        assert_eq!(berlin.population, 3_644_826);
    }

    #[test]
    fn test_place_json_defaults() {
        let json = r#"{"name": "Utrecht", "latitude": 52.0907, "longitude": 5.1214}"#;
        let place: Place = serde_json::from_str(json).unwrap();

        assert_eq!(place, Place::new("Utrecht", 52.0907, 5.1214));
        assert!(!serde_json::to_string(&place).unwrap().contains("country_code"));
    }
}
