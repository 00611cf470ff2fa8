use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// The status string with which the booking API marks a finalized booking
pub(crate) const CONFIRMED: &str = "Confirmed";

/// A booking record as returned by the booking API.
///
/// Every field is optional: records are decoded leniently, and a record
/// lacking a usable `event_date` or `status` is kept but never matches any
/// calendar day.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(crate) struct Booking {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub(crate) id: Option<i64>,
    /// Given by the API as either a number or a string
    #[serde(default, deserialize_with = "lenient_id")]
    pub(crate) hall_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(crate) event_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(crate) status: Option<String>,
}

impl Booking {
    #[cfg(test)]
    pub(crate) fn new(event_date: &str, status: &str) -> Booking {
        Booking {
            event_date: Some(event_date.to_owned()),
            status: Some(status.to_owned()),
            ..Booking::default()
        }
    }

    /// Decode a booking record.  Fields of the wrong type are treated as
    /// absent, and anything other than an object is an empty booking.
    pub(crate) fn from_json(value: &Value) -> Booking {
        Booking::deserialize(value).unwrap_or_default()
    }

    /// Whether the booking belongs to `venue`.  Bookings that don't say which
    /// hall they are for are assumed to belong to the one asked about.
    pub(crate) fn is_for_venue(&self, venue: &str) -> bool {
        self.hall_id.as_deref().is_none_or(|h| h == venue)
    }

    fn state(&self) -> Option<(&str, BookingState)> {
        let date = self.event_date.as_deref()?;
        let state = if self.status.as_deref()? == CONFIRMED {
            BookingState::Confirmed
        } else {
            BookingState::Tentative
        };
        Some((date, state))
    }
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_i64())
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

/// Decode a booking list response.  Both a bare JSON array and an object
/// wrapping the array in a `bookings` field are accepted; any other shape
/// contains no bookings.
pub(crate) fn parse_bookings(value: &Value) -> Vec<Booking> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("bookings") {
            Some(Value::Array(items)) => items,
            _ => {
                tracing::warn!("booking response object has no \"bookings\" array");
                return Vec::new();
            }
        },
        _ => {
            tracing::warn!("booking response is neither an array nor an object");
            return Vec::new();
        }
    };
    items.iter().map(Booking::from_json).collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BookingState {
    Confirmed,
    /// Any booking whose status is not exactly "Confirmed", e.g., "Pending"
    Tentative,
}

/// Lookup table from `YYYY-MM-DD` date keys to the booking state of that date.
///
/// When several bookings share a date, a confirmed one wins over all others,
/// regardless of the order in which they were given.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct BookingIndex(HashMap<String, BookingState>);

impl BookingIndex {
    pub(crate) fn new(bookings: &[Booking]) -> BookingIndex {
        let mut map = HashMap::with_capacity(bookings.len());
        for b in bookings {
            let Some((date, state)) = b.state() else {
                tracing::debug!(id = ?b.id, "ignoring booking without an event date or status");
                continue;
            };
            let entry = map.entry(date.to_owned()).or_insert(state);
            if state == BookingState::Confirmed {
                *entry = BookingState::Confirmed;
            }
        }
        BookingIndex(map)
    }

    pub(crate) fn lookup(&self, date_key: &str) -> Option<BookingState> {
        self.0.get(date_key).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}
