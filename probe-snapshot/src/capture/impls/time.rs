//! `time` date and time types.

use time::{
    Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, Weekday,
    format_description::well_known::Rfc3339,
};

use super::impl_captured_display;
use crate::capture::traits::{Captured, Scalar, ValueKind};

impl Captured for OffsetDateTime {
    fn kind(&self) -> ValueKind<'_> {
        let text = self
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.to_string());
        ValueKind::Scalar(Scalar::Text(text.into()))
    }
}

impl_captured_display!(PrimitiveDateTime, Date, Time, Duration, UtcOffset, Month, Weekday);
