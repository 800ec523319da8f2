//! Loosely-shaped geocoder results.
//!
//! Geocoding services disagree on field names (`lat` vs `latitude`,
//! `lng` vs `lon`, nested `location`) and sometimes send numbers as
//! strings. [`GeocodeHit`] accepts all of these and [`GeocodeHit::coords`]
//! normalizes them to a single [`Coords`].

use serde::{Deserialize, Serialize};

use crate::geo::Coords;

/// A number that may arrive as JSON number or numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// The finite numeric value, if there is one.
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for LooseNumber {
    fn from(n: f64) -> Self {
        LooseNumber::Number(n)
    }
}

/// Nested `location` object some geocoders return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeLocation {
    pub lat: Option<LooseNumber>,
    pub lng: Option<LooseNumber>,
    pub lon: Option<LooseNumber>,
}

/// A single geocoder hit with optional coordinate spellings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub lat: Option<LooseNumber>,
    pub latitude: Option<LooseNumber>,
    pub lng: Option<LooseNumber>,
    pub lon: Option<LooseNumber>,
    pub location: Option<GeocodeLocation>,
    pub name: Option<String>,
    pub display_name: Option<String>,
}

impl GeocodeHit {
    /// A hit carrying plain `lat`/`lng` numbers.
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat.into()),
            lng: Some(lng.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Place label from `name`, then `display_name`.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.display_name.as_deref())
    }

    /// Latitude from `lat`, then `latitude`, then `location.lat`.
    pub fn latitude(&self) -> Option<f64> {
        self.lat
            .as_ref()
            .and_then(LooseNumber::value)
            .or_else(|| self.latitude.as_ref().and_then(LooseNumber::value))
            .or_else(|| {
                self.location
                    .as_ref()
                    .and_then(|l| l.lat.as_ref())
                    .and_then(LooseNumber::value)
            })
    }

    /// Longitude from `lng`, then `lon`, then `location.lng`/`location.lon`.
    pub fn longitude(&self) -> Option<f64> {
        self.lng
            .as_ref()
            .and_then(LooseNumber::value)
            .or_else(|| self.lon.as_ref().and_then(LooseNumber::value))
            .or_else(|| {
                let location = self.location.as_ref()?;
                location
                    .lng
                    .as_ref()
                    .and_then(LooseNumber::value)
                    .or_else(|| location.lon.as_ref().and_then(LooseNumber::value))
            })
    }

    /// Canonical coordinates, or `None` unless both components resolve.
    pub fn coords(&self) -> Option<Coords> {
        Coords::checked(self.latitude()?, self.longitude()?)
    }
}
