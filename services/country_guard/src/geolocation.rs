//! Fixed-answer geolocation
//!
//! A [`Geolocator`] that always reports the same country (or the same
//! fault). Used by the replay tool and as a stand-in where the real provider
//! is not wired up.

use crate::traits::Geolocator;
use guard_types::{CountryName, GeolocationError};

#[derive(Debug, Clone)]
pub struct StaticGeolocator {
    answer: Result<CountryName, GeolocationError>,
}

impl StaticGeolocator {
    pub fn new(country: impl Into<CountryName>) -> Self {
        Self {
            answer: Ok(country.into()),
        }
    }

    /// Geolocator whose every lookup fails with `error`
    pub fn failing(error: GeolocationError) -> Self {
        Self { answer: Err(error) }
    }
}

impl Geolocator for StaticGeolocator {
    fn country_name(&self) -> Result<CountryName, GeolocationError> {
        self.answer.clone()
    }
}
