use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use time::Date;
use crate::bookings::{RawUser, TourCategory};
use crate::registration::{GenderParseError, RegistrationError};
use crate::role::Role;

const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*";
const MIN_PASSWORD_LENGTH: usize = 8;
const MIN_VAT_LENGTH: usize = 9;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Gender::Male, Gender::Female, Gender::Other].into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GenderParseError(s.to_owned()))
    }
}

#[derive(Clone)]
pub struct UserRegistration {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub vat: String,
    pub date_of_birth: Date,
    pub gender: Gender,
    pub nationality: String,
    pub role: Role,
}

impl UserRegistration {
    /// Check the form the way the portal does before submitting it.
    /// Reports the first offending field.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        require(!self.username.is_empty(), "username", "Username is required")?;
        require(
            is_strong_password(&self.password),
            "password",
            "Password must be at least 8 characters and include uppercase, lowercase, number, and special character.",
        )?;
        require(!self.firstname.is_empty(), "firstname", "First name is required")?;
        require(!self.lastname.is_empty(), "lastname", "Last name is required")?;
        require(!self.email.is_empty(), "email", "Email is required")?;
        require(self.vat.chars().count() >= MIN_VAT_LENGTH, "vat", "Vat is required")?;
        require(!self.nationality.is_empty(), "nationality", "Nationality is required")?;
        Ok(())
    }
}

impl Debug for UserRegistration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegistration")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("email", &self.email)
            .field("vat", &self.vat)
            .field("date_of_birth", &self.date_of_birth)
            .field("gender", &self.gender)
            .field("nationality", &self.nationality)
            .field("role", &self.role)
            .finish()
    }
}

fn require(
    condition: bool,
    field: &'static str,
    message: &'static str,
) -> Result<(), RegistrationError> {
    if condition {
        Ok(())
    } else {
        Err(RegistrationError::Invalid { field, message })
    }
}

fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest<'a> {
    pub is_active: bool,
    #[serde(rename = "userInsertDTO")]
    pub user: UserInsert<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tour_category: Option<TourCategory>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInsert<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub vat: &'a str,
    #[serde(with = "crate::serde::iso_date")]
    pub date_of_birth: Date,
    pub gender_type: Gender,
    pub nationality: &'a str,
    pub role: Role,
    pub is_active: bool,
}

impl<'a> RegistrationRequest<'a> {
    pub fn new(
        registration: &'a UserRegistration,
        tour_category: Option<TourCategory>,
    ) -> Self {
        RegistrationRequest {
            is_active: true,
            user: UserInsert {
                username: &registration.username,
                password: &registration.password,
                firstname: &registration.firstname,
                lastname: &registration.lastname,
                email: &registration.email,
                vat: &registration.vat,
                date_of_birth: registration.date_of_birth,
                gender_type: registration.gender,
                nationality: &registration.nationality,
                role: registration.role,
                is_active: true,
            },
            tour_category,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: i64,
    pub uuid: String,
    pub is_active: bool,
    #[serde(rename = "userReadOnlyDTO")]
    pub user: RawUser,
    /// Only guides have a tour.
    #[serde(rename = "tourReadOnlyDTO", default)]
    pub tour: Option<RegisteredTour>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RegisteredTour {
    pub id: i64,
    pub category: TourCategory,
    pub price: f64,
}
