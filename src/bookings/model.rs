use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;
use crate::bookings::TourCategoryParseError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TourCategory {
    Urban,
    Sightseeing,
    Hiking,
    Wellness,
    Food,
}

impl TourCategory {
    pub const ALL: [TourCategory; 5] = [
        TourCategory::Urban,
        TourCategory::Sightseeing,
        TourCategory::Hiking,
        TourCategory::Wellness,
        TourCategory::Food,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TourCategory::Urban => "URBAN",
            TourCategory::Sightseeing => "SIGHTSEEING",
            TourCategory::Hiking => "HIKING",
            TourCategory::Wellness => "WELLNESS",
            TourCategory::Food => "FOOD",
        }
    }
}

impl Display for TourCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TourCategory {
    type Err = TourCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TourCategory::ALL.into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TourCategoryParseError(s.to_owned()))
    }
}

/// Backend ids arrive as numbers or as strings depending on the entity.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityId::Number(id) => write!(f, "{id}"),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawBooking {
    pub id: i64,
    #[serde(with = "crate::serde::iso_date")]
    pub booking_date: Date,
    #[serde(rename = "tourReadOnlyDTO")]
    pub tour: RawTour,
    #[serde(rename = "guideReadOnlyDTO", default)]
    pub guide: Option<RawParticipant>,
    #[serde(rename = "customerReadOnlyDTO", default)]
    pub customer: Option<RawParticipant>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawTour {
    /// An empty category reads as none.
    #[serde(deserialize_with = "category_or_none")]
    pub category: Option<TourCategory>,
    pub price: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawParticipant {
    pub id: EntityId,
    #[serde(rename = "userReadOnlyDTO", default)]
    pub user: Option<RawUser>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RawUser {
    pub firstname: String,
    pub lastname: String,
    pub vat: String,
}

fn category_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TourCategory>, D::Error> {
    let category = String::deserialize(deserializer)?;
    if category.is_empty() {
        return Ok(None);
    }
    TourCategory::from_str(&category)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

fn lastname_of(participant: Option<&RawParticipant>) -> String {
    participant
        .and_then(|p| p.user.as_ref())
        .map(|u| u.lastname.clone())
        .unwrap_or_default()
}

/// A booking as its customer sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomerBooking {
    pub id: i64,
    pub booking_date: Date,
    pub tour_category: Option<TourCategory>,
    pub tour_price: f64,
    pub guide_id: Option<EntityId>,
    /// Empty until a guide has claimed the booking.
    pub guide_lastname: String,
}

impl From<RawBooking> for CustomerBooking {
    fn from(value: RawBooking) -> Self {
        CustomerBooking {
            id: value.id,
            booking_date: value.booking_date,
            tour_category: value.tour.category,
            tour_price: value.tour.price,
            guide_lastname: lastname_of(value.guide.as_ref()),
            guide_id: value.guide.map(|g| g.id),
        }
    }
}

/// A booking as a guide sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideBooking {
    pub id: i64,
    pub booking_date: Date,
    pub tour_category: Option<TourCategory>,
    pub tour_price: f64,
    pub customer_id: Option<EntityId>,
    pub customer_lastname: String,
}

impl From<RawBooking> for GuideBooking {
    fn from(value: RawBooking) -> Self {
        GuideBooking {
            id: value.id,
            booking_date: value.booking_date,
            tour_category: value.tour.category,
            tour_price: value.tour.price,
            customer_lastname: lastname_of(value.customer.as_ref()),
            customer_id: value.customer.map(|c| c.id),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    #[serde(with = "crate::serde::iso_date")]
    pub booking_date: Date,
    pub tour_category: TourCategory,
}
