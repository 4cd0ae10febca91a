use crate::api::RentalApi;
use crate::booking::draft::{BookingState, DateField};
use crate::booking::signal::SuccessSignal;
use crate::error::BookingError;
use crate::models::{BookingConfirmation, BookingRequest, Property, UserId};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Drives the booking form from property selection to submission.
///
/// Submitting closes the form straight away and sends the request in the
/// background. Only a confirmed booking produces visible feedback, through the
/// shared [`SuccessSignal`]; failures are logged and returned from
/// [`PendingSubmission::outcome`].
pub struct BookingController {
    api: Arc<dyn RentalApi>,
    user_id: UserId,
    state: BookingState,
    feedback: SuccessSignal,
    submissions: u64,
}

/// A booking request that has been handed to the runtime
pub struct PendingSubmission {
    pub seq: u64,
    pub request: BookingRequest,
    handle: JoinHandle<Result<BookingConfirmation, BookingError>>,
}

impl PendingSubmission {
    /// Wait for the service's answer
    pub async fn outcome(self) -> Result<BookingConfirmation, BookingError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => {
                error!(seq = self.seq, error = %e, "Booking task did not complete");
                Err(BookingError::Aborted)
            }
        }
    }
}

impl BookingController {
    pub fn new(api: Arc<dyn RentalApi>, user_id: UserId, feedback: SuccessSignal) -> Self {
        Self {
            api,
            user_id,
            state: BookingState::default(),
            feedback,
            submissions: 0,
        }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn feedback(&self) -> &SuccessSignal {
        &self.feedback
    }

    /// Open the form for `property`, keeping any dates already typed
    pub fn select_property(&mut self, property: &Property) {
        let dates = std::mem::take(&mut self.state).into_dates();
        debug!(property_id = property.id, "Drafting booking");

        self.state = BookingState::Drafting {
            property_id: property.id,
            property_image_link: property.image_link.clone(),
            dates,
        };
    }

    /// Update one date field of the open form
    pub fn change_field(
        &mut self,
        field: DateField,
        value: impl Into<String>,
    ) -> Result<(), BookingError> {
        match &mut self.state {
            BookingState::Drafting { dates, .. } => {
                dates.set(field, value.into());
                Ok(())
            }
            BookingState::Idle { .. } => Err(BookingError::NotDrafting),
        }
    }

    /// Close the form; typed dates are kept
    pub fn cancel(&mut self) {
        if self.state.is_drafting() {
            let dates = std::mem::take(&mut self.state).into_dates();
            self.state = BookingState::Idle { dates };
        }
    }

    /// Send the open draft and reset the form without waiting for the answer.
    ///
    /// Dates are sent as typed; checking that they are filled in belongs to
    /// whoever collects the input. Nothing stops a second submission while an
    /// earlier one is in flight. Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> Result<PendingSubmission, BookingError> {
        let request = match &self.state {
            BookingState::Drafting {
                property_id,
                property_image_link,
                dates,
            } => BookingRequest {
                user_id: self.user_id,
                property_id: *property_id,
                check_in_date: dates.check_in_date.clone(),
                check_out_date: dates.check_out_date.clone(),
                property_image_link: property_image_link.clone(),
            },
            BookingState::Idle { .. } => return Err(BookingError::NotDrafting),
        };

        self.state = BookingState::default();
        self.submissions += 1;
        let seq = self.submissions;

        info!(seq, property_id = request.property_id, "Submitting booking");

        let api = Arc::clone(&self.api);
        let feedback = self.feedback.clone();
        let body = request.clone();
        let handle = tokio::spawn(async move {
            match api.create_booking(&body).await {
                Ok(confirmation) => {
                    info!(
                        seq,
                        property_id = body.property_id,
                        booking_id = ?confirmation.booking_id(),
                        "Booking created successfully"
                    );
                    feedback.show();
                    Ok(confirmation)
                }
                Err(e) => {
                    error!(
                        seq,
                        property_id = body.property_id,
                        error = %e,
                        "Error creating booking"
                    );
                    Err(BookingError::from(e))
                }
            }
        });

        Ok(PendingSubmission {
            seq,
            request,
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryRentalApi;
    use crate::booking::draft::StayDates;
    use crate::error::ApiError;
    use std::time::Duration;
    use tokio::time::advance;

    fn property(id: i64) -> Property {
        Property {
            id,
            title: format!("Listing {}", id),
            location: "Springfield".to_string(),
            price: 150.0,
            image_link: None,
        }
    }

    fn controller(api: Arc<InMemoryRentalApi>) -> BookingController {
        BookingController::new(api, 1, SuccessSignal::default())
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn full_draft_is_posted_and_form_resets_immediately() {
        let api = Arc::new(InMemoryRentalApi::new(vec![property(5)]));
        let mut booking = controller(Arc::clone(&api));

        booking.select_property(&property(5));
        assert_eq!(booking.state().property_id(), Some(5));
        assert_eq!(booking.state().dates(), &StayDates::default());

        booking
            .change_field("check_in_date".parse().unwrap(), "2024-01-10")
            .unwrap();
        booking
            .change_field("check_out_date".parse().unwrap(), "2024-01-12")
            .unwrap();

        let pending = booking.submit().unwrap();
        assert_eq!(booking.state(), &BookingState::default());

        assert_eq!(
            serde_json::to_value(&pending.request).unwrap(),
            serde_json::json!({
                "user_id": 1,
                "property_id": 5,
                "check_in_date": "2024-01-10",
                "check_out_date": "2024-01-12"
            })
        );

        pending.outcome().await.unwrap();
        assert_eq!(api.received_requests().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn success_banner_shows_for_three_seconds() {
        let api = Arc::new(InMemoryRentalApi::new(vec![property(2)]));
        let mut booking = controller(api);

        booking.select_property(&property(2));
        booking.change_field(DateField::CheckIn, "2024-05-01").unwrap();
        booking.change_field(DateField::CheckOut, "2024-05-03").unwrap();

        let pending = booking.submit().unwrap();
        pending.outcome().await.unwrap();
        settle().await;
        assert!(booking.feedback().is_visible());

        advance(Duration::from_millis(2999)).await;
        settle().await;
        assert!(booking.feedback().is_visible());

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert!(!booking.feedback().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submission_resets_form_without_banner() {
        let api = Arc::new(InMemoryRentalApi::new(vec![property(2)]));
        api.set_failing(true);
        let mut booking = controller(Arc::clone(&api));

        booking.select_property(&property(2));
        booking.change_field(DateField::CheckIn, "2024-05-01").unwrap();
        booking.change_field(DateField::CheckOut, "2024-05-03").unwrap();

        let pending = booking.submit().unwrap();
        assert_eq!(booking.state(), &BookingState::default());

        let err = pending.outcome().await.unwrap_err();
        assert!(matches!(err, BookingError::Api(ApiError::Unavailable(_))));

        settle().await;
        assert!(!booking.feedback().is_visible());
        advance(Duration::from_millis(5000)).await;
        settle().await;
        assert!(!booking.feedback().is_visible());
    }

    #[tokio::test]
    async fn rejected_submission_still_resets_form() {
        let api = Arc::new(InMemoryRentalApi::new(vec![property(4)]));
        let mut booking = controller(api);

        booking.select_property(&property(4));
        let pending = booking.submit().unwrap();
        assert_eq!(booking.state(), &BookingState::default());

        let err = pending.outcome().await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::Api(ApiError::Status { status: 400, .. })
        ));
        assert!(!booking.feedback().is_visible());
    }

    #[tokio::test]
    async fn cancel_keeps_typed_dates() {
        let api = Arc::new(InMemoryRentalApi::new(vec![property(1)]));
        let mut booking = controller(api);

        booking.select_property(&property(1));
        booking.change_field(DateField::CheckIn, "2024-02-01").unwrap();
        booking.change_field(DateField::CheckOut, "2024-02-05").unwrap();
        booking.cancel();

        assert_eq!(booking.state().property_id(), None);
        assert_eq!(booking.state().dates().check_in_date, "2024-02-01");
        assert_eq!(booking.state().dates().check_out_date, "2024-02-05");
    }

    #[tokio::test]
    async fn selecting_again_reuses_stale_dates() {
        let api = Arc::new(InMemoryRentalApi::new(vec![property(1), property(9)]));
        let mut booking = controller(api);

        booking.select_property(&property(1));
        booking.change_field(DateField::CheckIn, "2024-02-01").unwrap();
        booking.cancel();
        booking.select_property(&property(9));

        assert_eq!(booking.state().property_id(), Some(9));
        assert_eq!(booking.state().dates().check_in_date, "2024-02-01");
        assert_eq!(booking.state().dates().check_out_date, "");

        booking.change_field(DateField::CheckOut, "2024-02-03").unwrap();
        booking.select_property(&property(1));
        assert_eq!(booking.state().property_id(), Some(1));
        assert_eq!(booking.state().dates().check_out_date, "2024-02-03");
    }

    #[tokio::test]
    async fn idle_controller_rejects_edits_and_submit() {
        let api = Arc::new(InMemoryRentalApi::new(Vec::new()));
        let mut booking = controller(Arc::clone(&api));

        assert!(matches!(
            booking.change_field(DateField::CheckIn, "2024-02-01"),
            Err(BookingError::NotDrafting)
        ));
        assert!(matches!(booking.submit(), Err(BookingError::NotDrafting)));
        assert_eq!(booking.state(), &BookingState::default());

        booking.cancel();
        assert_eq!(booking.state(), &BookingState::default());
        assert!(api.received_requests().await.is_empty());
    }

    #[tokio::test]
    async fn overlapping_submissions_are_not_serialized() {
        let api = Arc::new(InMemoryRentalApi::new(vec![property(1), property(2)]));
        let mut booking = controller(Arc::clone(&api));

        booking.select_property(&property(1));
        booking.change_field(DateField::CheckIn, "2024-06-01").unwrap();
        booking.change_field(DateField::CheckOut, "2024-06-02").unwrap();
        let first = booking.submit().unwrap();

        booking.select_property(&property(2));
        booking.change_field(DateField::CheckIn, "2024-07-01").unwrap();
        booking.change_field(DateField::CheckOut, "2024-07-02").unwrap();
        let second = booking.submit().unwrap();

        assert_eq!((first.seq, second.seq), (1, 2));
        first.outcome().await.unwrap();
        second.outcome().await.unwrap();

        let mut sent: Vec<_> = api
            .received_requests()
            .await
            .into_iter()
            .map(|r| r.property_id)
            .collect();
        sent.sort();
        assert_eq!(sent, vec![1, 2]);
    }

    #[tokio::test]
    async fn image_link_of_selected_property_is_sent() {
        let api = Arc::new(InMemoryRentalApi::new(Vec::new()));
        let mut booking = controller(api);

        let mut listing = property(3);
        listing.image_link = Some("https://img/3.jpg".to_string());
        booking.select_property(&listing);

        let pending = booking.submit().unwrap();
        assert_eq!(
            pending.request.property_image_link.as_deref(),
            Some("https://img/3.jpg")
        );
    }
}
