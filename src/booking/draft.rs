use crate::error::BookingError;
use crate::models::PropertyId;
use std::str::FromStr;

/// Check-in and check-out as typed by the user, unparsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StayDates {
    pub check_in_date: String,
    pub check_out_date: String,
}

impl StayDates {
    pub fn is_complete(&self) -> bool {
        !self.check_in_date.is_empty() && !self.check_out_date.is_empty()
    }

    pub fn set(&mut self, field: DateField, value: String) {
        match field {
            DateField::CheckIn => self.check_in_date = value,
            DateField::CheckOut => self.check_out_date = value,
        }
    }
}

/// Editable fields of the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    CheckIn,
    CheckOut,
}

impl DateField {
    pub fn name(&self) -> &'static str {
        match self {
            DateField::CheckIn => "check_in_date",
            DateField::CheckOut => "check_out_date",
        }
    }
}

impl FromStr for DateField {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check_in_date" => Ok(DateField::CheckIn),
            "check_out_date" => Ok(DateField::CheckOut),
            other => Err(BookingError::UnknownField(other.to_string())),
        }
    }
}

/// Booking form state.
///
/// Dates live in both variants: cancelling keeps what was typed, and picking
/// another property reuses it.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingState {
    Idle {
        dates: StayDates,
    },
    Drafting {
        property_id: PropertyId,
        property_image_link: Option<String>,
        dates: StayDates,
    },
}

impl Default for BookingState {
    fn default() -> Self {
        BookingState::Idle {
            dates: StayDates::default(),
        }
    }
}

impl BookingState {
    pub fn dates(&self) -> &StayDates {
        match self {
            BookingState::Idle { dates } | BookingState::Drafting { dates, .. } => dates,
        }
    }

    /// Property being booked; the form is shown only while this is set
    pub fn property_id(&self) -> Option<PropertyId> {
        match self {
            BookingState::Idle { .. } => None,
            BookingState::Drafting { property_id, .. } => Some(*property_id),
        }
    }

    pub fn is_drafting(&self) -> bool {
        matches!(self, BookingState::Drafting { .. })
    }

    pub(crate) fn into_dates(self) -> StayDates {
        match self {
            BookingState::Idle { dates } | BookingState::Drafting { dates, .. } => dates,
        }
    }
}
