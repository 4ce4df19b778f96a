use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::authenticator::CredentialsError;
use crate::username_string::UsernameString;

#[derive(Clone)]
pub struct Credentials {
    username: UsernameString,
    password: String,
}

impl Credentials {
    pub fn new(
        username: &str,
        password: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let username = UsernameString::from_str(username)
            .map_err(|_| CredentialsError::MissingUsername)?;
        let password = password.into();
        if password.is_empty() {
            return Err(CredentialsError::MissingPassword);
        }
        Ok(Credentials { username, password })
    }

    pub fn username(&self) -> &UsernameString {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct AuthenticationRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for AuthenticationRequest<'a> {
    fn from(value: &'a Credentials) -> Self {
        AuthenticationRequest {
            username: &value.username,
            password: &value.password,
        }
    }
}

#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuthenticationResponse {
    pub firstname: String,
    pub lastname: String,
    pub token: String,
}

impl Debug for AuthenticationResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationResponse")
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("token", &"<redacted>")
            .finish()
    }
}
