//! HTTP geocoding adapter against a Nominatim-compatible endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::domain::ports::{GeoLocationError, GeoLocationResolver};
use crate::domain::restaurants::{Address, GeoPoint};

/// One search result from the geocoding endpoint. Coordinates arrive as
/// strings in the wire format.
#[derive(Debug, Deserialize)]
struct GeocodePlace {
    lat: String,
    lon: String,
}

/// Resolver adapter calling a Nominatim-compatible `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeoLocationResolver {
    http: reqwest::Client,
    endpoint: Url,
}

impl NominatimGeoLocationResolver {
    /// Build a resolver against the given `/search` endpoint URL.
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    fn search_url(&self, address: &Address) -> Url {
        let street = format!("{} {}", address.street_number, address.street_name);
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1")
            .append_pair("street", &street)
            .append_pair("city", &address.city)
            .append_pair("state", &address.state)
            .append_pair("postalcode", &address.postal_code)
            .append_pair("country", &address.country);
        url
    }
}

#[async_trait]
impl GeoLocationResolver for NominatimGeoLocationResolver {
    async fn geo_locate(&self, address: &Address) -> Result<GeoPoint, GeoLocationError> {
        let url = self.search_url(address);
        debug!(%url, "geocoding address");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|error| GeoLocationError::unavailable(error.to_string()))?
            .error_for_status()
            .map_err(|error| GeoLocationError::unavailable(error.to_string()))?;

        let places: Vec<GeocodePlace> = response
            .json()
            .await
            .map_err(|error| GeoLocationError::unavailable(error.to_string()))?;

        let place = places.into_iter().next().ok_or_else(|| {
            GeoLocationError::unresolved(format!(
                "no geocoding results for {}, {}",
                address.street_name, address.city
            ))
        })?;

        let latitude = place
            .lat
            .parse::<f64>()
            .map_err(|_| GeoLocationError::unresolved("malformed latitude in geocoding result"))?;
        let longitude = place
            .lon
            .parse::<f64>()
            .map_err(|_| GeoLocationError::unresolved("malformed longitude in geocoding result"))?;

        Ok(GeoPoint::new(latitude, longitude))
    }
}
