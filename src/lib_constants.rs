// persisted credential slot holding the access token
pub const TOKEN_CREDENTIAL_NAME: &str = "token";
pub const DEFAULT_CREDENTIAL_PATH: &str = "/";

pub const DEFAULT_LOGIN_FAILURE_DETAIL: &str = "Login Failed";
pub const DEFAULT_REGISTER_FAILURE_DETAIL: &str = "Register Failed";

pub const AUTHENTICATE_ENDPOINT: &str = "auth/authenticate";
pub const CUSTOMER_REGISTRATION_ENDPOINT: &str = "customers/save";
pub const GUIDE_REGISTRATION_ENDPOINT: &str = "guides/save";
pub const CUSTOMER_BOOKINGS_ENDPOINT: &str = "customers/bookings";
pub const GUIDE_BOOKINGS_ENDPOINT: &str = "guides/bookings";
pub const AVAILABLE_BOOKINGS_ENDPOINT: &str = "guides/available-bookings";
pub const CREATE_BOOKING_ENDPOINT: &str = "customers/bookings/save";
// followed by the booking id
pub const DELETE_BOOKING_ENDPOINT: &str = "customers/bookings/delete/";
pub const CLAIM_BOOKING_ENDPOINT: &str = "guides/bookings/save/";

pub const ROLE_CLAIM_NAME: &str = "role";
