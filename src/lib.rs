pub mod access_token;
pub mod api;
pub mod authenticator;
pub mod bin_constants;
pub mod bookings;
pub mod clock;
pub mod config;
pub mod credential_store;
mod lib_constants;
pub mod logging;
pub mod registration;
pub mod role;
pub mod serde;
pub mod session_store;
pub mod username_string;
pub mod util;

#[cfg(test)] pub mod test;
