//! Geocoder abstraction.

use std::future::Future;

use super::error::GeocodeError;
use super::types::GeocodeHit;

/// Turns free text into a location.
///
/// This abstraction lets the station matcher be tested without network
/// access. `Ok(None)` means the service found nothing.
pub trait Geocoder: Send + Sync {
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<GeocodeHit>, GeocodeError>> + Send;
}

/// A geocoder that never finds anything.
///
/// Used when only station names and literal coordinates should resolve.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeocoder;

impl Geocoder for NoGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<GeocodeHit>, GeocodeError> {
        Ok(None)
    }
}

impl<G: Geocoder> Geocoder for std::sync::Arc<G> {
    fn geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<GeocodeHit>, GeocodeError>> + Send {
        (**self).geocode(query)
    }
}
