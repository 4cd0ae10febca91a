use crate::api::traits::RentalApi;
use crate::api::types::Endpoint;
use crate::error::ApiError;
use crate::models::{
    BookingConfirmation, BookingRecord, BookingRequest, BookingsEnvelope, Property,
    PropertiesEnvelope,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Rental service client speaking JSON over HTTP
pub struct HttpRentalApi {
    client: Client,
    base_url: String,
}

impl HttpRentalApi {
    /// Create a client for the service at `base_url`.
    ///
    /// Requests run without a timeout unless one is given.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// Read a response body, turning non-2xx statuses and bad JSON into errors
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    debug!(status = status.as_u16(), bytes = body.len(), "Received response");

    if !status.is_success() {
        warn!("Rental service returned status: {}", status);
        return Err(ApiError::from_status(status.as_u16(), &body));
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl RentalApi for HttpRentalApi {
    async fn fetch_properties(&self) -> Result<Vec<Property>, ApiError> {
        let url = Endpoint::Properties.url(&self.base_url);
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let envelope: PropertiesEnvelope = read_json(response).await?;

        info!("Fetched {} properties", envelope.properties.len());
        Ok(envelope.properties)
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ApiError> {
        let url = Endpoint::CreateBooking.url(&self.base_url);
        debug!(property_id = request.property_id, "Posting booking to {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let echo: serde_json::Value = read_json(response).await?;

        Ok(BookingConfirmation::new(echo))
    }

    async fn fetch_bookings(&self) -> Result<Vec<BookingRecord>, ApiError> {
        let url = Endpoint::Bookings.url(&self.base_url);
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let envelope: BookingsEnvelope = read_json(response).await?;

        Ok(envelope.bookings)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
