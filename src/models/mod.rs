use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PropertyId = i64;
pub type UserId = i64;

/// A rentable property as listed by the catalog endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub location: String,
    pub price: f64,
    #[serde(default)]
    pub image_link: Option<String>,
}

/// Body of `POST /create_booking`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub user_id: UserId,
    pub property_id: PropertyId,
    pub check_in_date: String,
    pub check_out_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_image_link: Option<String>,
}

/// A reservation as reported by `GET /get_all_bookings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: UserId,
    pub property_id: PropertyId,
    #[serde(default)]
    pub property_image_link: Option<String>,
    pub check_in_date: String,
    pub check_out_date: String,
}

/// What the server echoed back for an accepted booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub confirmed_at: DateTime<Utc>,
    pub raw_data: serde_json::Value,
}

impl BookingConfirmation {
    pub fn new(raw_data: serde_json::Value) -> Self {
        Self {
            confirmed_at: Utc::now(),
            raw_data,
        }
    }

    /// Server-assigned booking id, when the echo carries one
    pub fn booking_id(&self) -> Option<i64> {
        self.raw_data.get("id").and_then(|id| id.as_i64())
    }
}

#[derive(Debug, Deserialize)]
pub struct PropertiesEnvelope {
    pub properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
pub struct BookingsEnvelope {
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}
