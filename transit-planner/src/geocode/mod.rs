//! Free-text geocoding.
//!
//! Queries that name neither a station nor a coordinate pair are handed to
//! a [`Geocoder`]. The production implementation talks to Nominatim; tests
//! substitute their own.

mod error;
mod nominatim;
mod provider;
mod types;

pub use error::GeocodeError;
pub use nominatim::{NominatimConfig, NominatimGeocoder};
pub use provider::{Geocoder, NoGeocoder};
pub use types::{GeocodeHit, GeocodeLocation, LooseNumber};
