//! Tour bookings of the logged-in customer or guide.

use std::sync::Arc;
use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder, Response};
use crate::api::ApiClient;
use crate::lib_constants::{
    AVAILABLE_BOOKINGS_ENDPOINT, CLAIM_BOOKING_ENDPOINT, CREATE_BOOKING_ENDPOINT,
    CUSTOMER_BOOKINGS_ENDPOINT, DELETE_BOOKING_ENDPOINT, GUIDE_BOOKINGS_ENDPOINT,
};
use crate::session_store::SessionStore;

mod errors;
mod model;

pub use errors::{BookingError, TourCategoryParseError};
pub use model::{
    BookingForm, CustomerBooking, EntityId, GuideBooking, RawBooking, RawParticipant,
    RawTour, RawUser, TourCategory,
};

const FETCH_CUSTOMER_BOOKINGS_FAILED: &str = "Failed to fetch bookings of the customer";
const FETCH_GUIDE_BOOKINGS_FAILED: &str = "Failed to fetch bookings of the guide";
const FETCH_AVAILABLE_BOOKINGS_FAILED: &str = "Failed to fetch available bookings";
const CREATE_BOOKING_FAILED: &str = "Failed to make a booking";
const DELETE_BOOKING_FAILED: &str = "Failed to delete booking";
const CLAIM_BOOKING_FAILED: &str = "Failed to register the guide into the booking";

pub struct BookingClient {
    api: ApiClient,
    session: Arc<dyn SessionStore>,
}

impl BookingClient {
    pub fn new(api: ApiClient, session: Arc<dyn SessionStore>) -> Self {
        BookingClient { api, session }
    }

    pub async fn customer_bookings(&self) -> Result<Vec<CustomerBooking>, BookingError> {
        self.fetch(CUSTOMER_BOOKINGS_ENDPOINT, FETCH_CUSTOMER_BOOKINGS_FAILED).await
    }

    pub async fn guide_bookings(&self) -> Result<Vec<GuideBooking>, BookingError> {
        self.fetch(GUIDE_BOOKINGS_ENDPOINT, FETCH_GUIDE_BOOKINGS_FAILED).await
    }

    /// Bookings no guide has claimed yet.
    pub async fn available_bookings(&self) -> Result<Vec<GuideBooking>, BookingError> {
        self.fetch(AVAILABLE_BOOKINGS_ENDPOINT, FETCH_AVAILABLE_BOOKINGS_FAILED).await
    }

    pub async fn create_booking(
        &self,
        form: &BookingForm,
    ) -> Result<CustomerBooking, BookingError> {
        let request = self.authorized(Method::POST, CREATE_BOOKING_ENDPOINT).await?
            .json(form);
        let booking = self.execute(request, CREATE_BOOKING_FAILED).await?
            .json::<RawBooking>()
            .await
            .map_err(|source| BookingError::InvalidResponse {
                action: CREATE_BOOKING_FAILED,
                source,
            })?;
        info!("booked a {} tour for {}", form.tour_category, form.booking_date);
        Ok(booking.into())
    }

    pub async fn delete_booking(&self, id: i64) -> Result<(), BookingError> {
        let request = self.authorized(
            Method::DELETE,
            &format!("{DELETE_BOOKING_ENDPOINT}{id}"),
        ).await?;
        self.execute(request, DELETE_BOOKING_FAILED).await?;
        info!("deleted booking {id}");
        Ok(())
    }

    /// Assign the logged-in guide to booking [id].
    pub async fn claim_booking(&self, id: i64) -> Result<(), BookingError> {
        let request = self.authorized(
            Method::PUT,
            &format!("{CLAIM_BOOKING_ENDPOINT}{id}"),
        ).await?;
        self.execute(request, CLAIM_BOOKING_FAILED).await?;
        info!("claimed booking {id}");
        Ok(())
    }

    async fn fetch<T: From<RawBooking>>(
        &self,
        path: &str,
        action: &'static str,
    ) -> Result<Vec<T>, BookingError> {
        let request = self.authorized(Method::GET, path).await?;
        let bookings = self.execute(request, action).await?
            .json::<Vec<RawBooking>>()
            .await
            .map_err(|source| BookingError::InvalidResponse { action, source })?;
        debug!("fetched {} bookings from {path}", bookings.len());
        Ok(bookings.into_iter().map(T::from).collect())
    }

    async fn authorized(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, BookingError> {
        let session = self.session.session().await;
        let token = session.token().ok_or(BookingError::NotAuthenticated)?;
        Ok(self.api.authorized_request(method, path, token)?)
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        action: &'static str,
    ) -> Result<Response, BookingError> {
        let response = request.send()
            .await
            .map_err(|source| BookingError::Transport { action, source })?;
        let status = response.status();
        if !status.is_success() {
            warn!("{action}: HTTP {status}");
            return Err(BookingError::Request { action, status: status.as_u16() });
        }
        Ok(response)
    }
}
