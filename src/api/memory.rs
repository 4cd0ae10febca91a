use crate::api::traits::RentalApi;
use crate::error::ApiError;
use crate::models::{BookingConfirmation, BookingRecord, BookingRequest, Property};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// In-process rental service, used for offline demos and tests.
///
/// Follows the same contract as the real backend: every booking field must be
/// present and non-empty, and accepted bookings are echoed back with an id.
pub struct InMemoryRentalApi {
    properties: Vec<Property>,
    bookings: Mutex<Vec<BookingRecord>>,
    received: Mutex<Vec<BookingRequest>>,
    failing: AtomicBool,
}

impl InMemoryRentalApi {
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            properties,
            bookings: Mutex::new(Vec::new()),
            received: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Backend seeded with the demo catalog
    pub fn with_sample_catalog() -> Self {
        Self::new(sample_properties())
    }

    /// Make every call fail as if the network were down
    #[cfg(test)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Booking requests received so far, accepted or not
    #[cfg(test)]
    pub async fn received_requests(&self) -> Vec<BookingRequest> {
        self.received.lock().await.clone()
    }

    fn check_available(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            warn!("Simulated outage, rejecting call");
            return Err(ApiError::Unavailable("simulated network failure".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryRentalApi {
    fn default() -> Self {
        Self::with_sample_catalog()
    }
}

fn missing_field(field: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        message: format!("Missing or empty {}", field),
    }
}

#[async_trait]
impl RentalApi for InMemoryRentalApi {
    async fn fetch_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.check_available()?;
        Ok(self.properties.clone())
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ApiError> {
        self.received.lock().await.push(request.clone());
        self.check_available()?;

        if request.check_in_date.is_empty() {
            return Err(missing_field("check_in_date"));
        }
        if request.check_out_date.is_empty() {
            return Err(missing_field("check_out_date"));
        }

        let image_link = self
            .properties
            .iter()
            .find(|p| p.id == request.property_id)
            .and_then(|p| p.image_link.clone())
            .or_else(|| request.property_image_link.clone());

        let mut bookings = self.bookings.lock().await;
        let id = bookings.len() as i64 + 1;
        bookings.push(BookingRecord {
            id: Some(id),
            user_id: request.user_id,
            property_id: request.property_id,
            property_image_link: image_link,
            check_in_date: request.check_in_date.clone(),
            check_out_date: request.check_out_date.clone(),
        });

        debug!(booking_id = id, property_id = request.property_id, "Stored booking");

        Ok(BookingConfirmation::new(json!({
            "id": id,
            "user_id": request.user_id,
            "property_id": request.property_id,
            "message": "Booking created successfully",
        })))
    }

    async fn fetch_bookings(&self) -> Result<Vec<BookingRecord>, ApiError> {
        self.check_available()?;
        Ok(self.bookings.lock().await.clone())
    }

    fn source_name(&self) -> &'static str {
        "in-memory"
    }
}

/// Demo catalog: thirteen listings, one more than a default page
pub fn sample_properties() -> Vec<Property> {
    info!("📋 Generating demo rental catalog");

    let listings = [
        ("Harbor View Loft", "Seattle, WA", 189.0),
        ("Desert Adobe", "Santa Fe, NM", 142.0),
        ("Lakeside Cabin", "Lake Tahoe, CA", 225.0),
        ("Brownstone Garden Flat", "Brooklyn, NY", 210.0),
        ("Beach Bungalow", "Santa Cruz, CA", 260.0),
        ("Mountain Chalet", "Aspen, CO", 395.0),
        ("French Quarter Studio", "New Orleans, LA", 118.0),
        ("Riverside Cottage", "Asheville, NC", 131.0),
        ("Downtown Penthouse", "Chicago, IL", 340.0),
        ("Ranch House", "Austin, TX", 155.0),
        ("Island Villa", "Maui, HI", 480.0),
        ("Historic Townhouse", "Savannah, GA", 167.0),
        ("Forest Treehouse", "Portland, OR", 99.0),
    ];

    listings
        .iter()
        .enumerate()
        .map(|(i, (title, location, price))| {
            let id = i as i64 + 1;
            Property {
                id,
                title: title.to_string(),
                location: location.to_string(),
                price: *price,
                image_link: Some(format!("https://images.example.com/rentals/{}.jpg", id)),
            }
        })
        .collect()
}
