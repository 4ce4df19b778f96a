//! Sign-up of new customers and guides. No session is involved.

use log::{debug, info};
use reqwest::Method;
use crate::api::{failure_detail, ApiClient};
use crate::bookings::TourCategory;
use crate::lib_constants::{
    CUSTOMER_REGISTRATION_ENDPOINT, DEFAULT_REGISTER_FAILURE_DETAIL, GUIDE_REGISTRATION_ENDPOINT,
};

mod errors;
mod model;

pub use errors::{GenderParseError, RegistrationError};
pub use model::{
    Gender, RegisteredTour, RegisteredUser, RegistrationRequest, UserInsert, UserRegistration,
};

pub struct RegistrationClient {
    api: ApiClient,
}

impl RegistrationClient {
    pub fn new(api: ApiClient) -> Self {
        RegistrationClient { api }
    }

    pub async fn register_customer(
        &self,
        registration: &UserRegistration,
    ) -> Result<RegisteredUser, RegistrationError> {
        self.register(CUSTOMER_REGISTRATION_ENDPOINT, registration, None).await
    }

    pub async fn register_guide(
        &self,
        registration: &UserRegistration,
        tour_category: TourCategory,
    ) -> Result<RegisteredUser, RegistrationError> {
        self.register(GUIDE_REGISTRATION_ENDPOINT, registration, Some(tour_category)).await
    }

    async fn register(
        &self,
        endpoint: &str,
        registration: &UserRegistration,
        tour_category: Option<TourCategory>,
    ) -> Result<RegisteredUser, RegistrationError> {
        registration.validate()?;
        debug!("registering \"{}\" as {}", registration.username, registration.role);
        let response = self.api
            .request(Method::POST, endpoint)?
            .json(&RegistrationRequest::new(registration, tour_category))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let reason = failure_detail(response, DEFAULT_REGISTER_FAILURE_DETAIL).await;
            info!(
                "registration of \"{}\" rejected with HTTP {status}: {reason}",
                registration.username,
            );
            return Err(
                RegistrationError::Rejected {
                    status: status.as_u16(),
                    reason,
                }
            );
        }
        let registered = response.json::<RegisteredUser>()
            .await
            .map_err(RegistrationError::InvalidResponse)?;
        info!("registered \"{}\" with id {}", registration.username, registered.id);
        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::role::Role;
    use super::*;

    fn client(server: &MockServer) -> RegistrationClient {
        RegistrationClient::new(
            ApiClient::new(&format!("{}/api/", server.uri()), None).unwrap(),
        )
    }

    fn guide() -> UserRegistration {
        UserRegistration {
            username: "gus".to_owned(),
            password: "Trail#2026".to_owned(),
            firstname: "Gus".to_owned(),
            lastname: "Guide".to_owned(),
            email: "gus@example.com".to_owned(),
            vat: "123456789".to_owned(),
            date_of_birth: date!(1985 - 01 - 30),
            gender: Gender::Male,
            nationality: "Greek".to_owned(),
            role: Role::Guide,
        }
    }

    #[tokio::test]
    async fn guide_registered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/guides/save"))
            .and(body_partial_json(json!({
                "isActive": true,
                "tourCategory": "HIKING",
                "userInsertDTO": {"username": "gus", "role": "GUIDE"},
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 4,
                "uuid": "0b3c",
                "isActive": true,
                "userReadOnlyDTO": {"firstname": "Gus", "lastname": "Guide", "vat": "123456789"},
                "tourReadOnlyDTO": {"id": 2, "category": "HIKING", "price": 60.0},
            })))
            .expect(1)
            .mount(&server)
            .await;
        let registered = client(&server)
            .register_guide(&guide(), TourCategory::Hiking)
            .await
            .unwrap();
        assert_eq!(registered.id, 4);
        assert_eq!(registered.user.lastname, "Guide");
        assert_eq!(registered.tour.map(|t| t.category), Some(TourCategory::Hiking));
    }

    #[tokio::test]
    async fn customer_registered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/customers/save"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "uuid": "77aa",
                "isActive": true,
                "userReadOnlyDTO": {"firstname": "Gus", "lastname": "Guide", "vat": "123456789"},
            })))
            .expect(1)
            .mount(&server)
            .await;
        let mut customer = guide();
        customer.role = Role::Customer;
        let registered = client(&server).register_customer(&customer).await.unwrap();
        assert_eq!(registered.tour, None);
        assert!(registered.is_active);
    }

    #[tokio::test]
    async fn rejection_carries_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/customers/save"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"detail": "User already exists"})),
            )
            .mount(&server)
            .await;
        let err = client(&server).register_customer(&guide()).await.expect_err("should fail");
        assert!(
            matches!(err, RegistrationError::Rejected { status: 409, .. }),
            "wrong error type: {err:#?}",
        );
        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn rejection_without_detail_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/guides/save"))
            .respond_with(ResponseTemplate::new(400).set_body_string("nope"))
            .mount(&server)
            .await;
        let err = client(&server)
            .register_guide(&guide(), TourCategory::Food)
            .await
            .expect_err("should fail");
        assert_eq!(err.to_string(), DEFAULT_REGISTER_FAILURE_DETAIL);
    }

    #[tokio::test]
    async fn invalid_form_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let mut registration = guide();
        registration.vat = "1".to_owned();
        let err = client(&server)
            .register_guide(&registration, TourCategory::Food)
            .await
            .expect_err("should fail");
        assert!(
            matches!(err, RegistrationError::Invalid { field: "vat", .. }),
            "wrong error type: {err:#?}",
        );
    }
}
