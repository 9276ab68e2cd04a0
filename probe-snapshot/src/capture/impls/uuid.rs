use uuid::Uuid;

use crate::capture::traits::{Captured, Scalar, ValueKind};

impl Captured for Uuid {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Scalar(Scalar::Text(self.hyphenated().to_string().into()))
    }
}
