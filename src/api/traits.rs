use crate::error::ApiError;
use crate::models::{BookingConfirmation, BookingRecord, BookingRequest, Property};
use async_trait::async_trait;

/// Operations the client needs from the rental service
#[async_trait]
pub trait RentalApi: Send + Sync {
    /// Fetch the whole property catalog, in server order
    async fn fetch_properties(&self) -> Result<Vec<Property>, ApiError>;

    /// Submit a booking request
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ApiError>;

    /// Fetch every booking known to the service
    async fn fetch_bookings(&self) -> Result<Vec<BookingRecord>, ApiError>;

    /// Name of the backend, for logs
    fn source_name(&self) -> &'static str;
}
