//! `YYYY-MM-DD` calendar dates, as the portal backend exchanges them.

use std::fmt::Formatter;
use serde::de::Error;
use serde::de::Unexpected::Str;
use serde::{Deserializer, Serializer};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

pub const ISO_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn serialize<S: Serializer>(
    date: &Date,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let formatted = date.format(ISO_DATE_FORMAT)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Date, D::Error> {
    struct IsoDateVisitor;

    impl<'de> serde::de::Visitor<'de> for IsoDateVisitor {
        type Value = Date;
        fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a date in YYYY-MM-DD format")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Date::parse(v, ISO_DATE_FORMAT)
                .map_err(|_| Error::invalid_value(Str(v), &self))
        }
    }

    deserializer.deserialize_str(IsoDateVisitor)
}
