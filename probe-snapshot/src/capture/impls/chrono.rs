//! `chrono` date and time types.

use chrono::{
    DateTime, Duration, FixedOffset, Local, Month, NaiveDate, NaiveDateTime, NaiveTime, Utc,
    Weekday,
};

use super::impl_captured_display;
use crate::capture::traits::{Captured, Scalar, ValueKind};

impl Captured for DateTime<Utc> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::Text(self.to_rfc3339().into()))
    }
}

impl Captured for DateTime<Local> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::Text(self.to_rfc3339().into()))
    }
}

impl Captured for DateTime<FixedOffset> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::Text(self.to_rfc3339().into()))
    }
}

impl_captured_display!(NaiveDateTime, NaiveDate, NaiveTime, Duration);

impl Captured for Month {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Enum(self.name())
    }
}

impl Captured for Weekday {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::Text(self.to_string().into()))
    }
}
