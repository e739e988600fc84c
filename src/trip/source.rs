use std::time::Duration;

use crate::foundation::error::{TriplogError, TriplogResult};
use crate::trip::model::Trip;

/// Read-only client for the trip data store.
///
/// The store serves trips (with nested stops and logs) at `GET {base}/trips/{id}/`.
#[derive(Clone, Debug)]
pub struct HttpTripSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTripSource {
    /// Build a source for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> TriplogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TriplogError::network(format!("build http client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build a source reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// URL the trip `id` is served at.
    pub fn trip_url(&self, id: u64) -> String {
        format!("{}/trips/{id}/", self.base_url.trim_end_matches('/'))
    }

    /// Fetch one trip by id.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_trip(&self, id: u64) -> TriplogResult<Trip> {
        let url = self.trip_url(id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TriplogError::network(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TriplogError::validation(format!(
                "trip {id} is not available (status {})",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TriplogError::network(format!("read trip {id} body: {e}")))?;
        let trip: Trip = serde_json::from_slice(&body)
            .map_err(|e| TriplogError::decode(format!("trip {id} payload: {e}")))?;
        tracing::debug!(
            stops = trip.stops.len(),
            logs = trip.logs.len(),
            "fetched trip"
        );
        Ok(trip)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trip/source.rs"]
mod tests;
