//! Transparent wrappers: `Option`, references and smart pointers.

use std::{rc::Rc, sync::Arc};

use crate::capture::traits::{Captured, ValueKind};

impl<T: Captured> Captured for Option<T> {
    fn kind(&self) -> ValueKind<'_> {
        match self {
            Some(value) => value.kind(),
            None => ValueKind::Null,
        }
    }

    fn type_name(&self) -> &str {
        match self {
            Some(value) => value.type_name(),
            None => std::any::type_name::<Self>(),
        }
    }
}

macro_rules! impl_captured_pointer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: Captured + ?Sized> Captured for $ty {
                fn kind(&self) -> ValueKind<'_> {
                    (**self).kind()
                }

                fn type_name(&self) -> &str {
                    (**self).type_name()
                }
            }
        )*
    };
}

impl_captured_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);
