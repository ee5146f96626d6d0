//! Substitution of component defaults for values the user left unset.
//!
//! A value counts as unset when it is absent *or* when it holds the zero value of its type: an
//! empty string, an empty list or the number `0`. This means a user can not request zero replicas
//! through the `QuayEcosystem` resource, `replicas: 0` resolves to the component default just
//! like an omitted field does.

/// Types which have a zero value that is treated the same as an absent value.
pub trait Unset {
    fn is_unset(&self) -> bool;
}

impl Unset for str {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for i32 {
    fn is_unset(&self) -> bool {
        *self == 0
    }
}

impl Unset for bool {
    fn is_unset(&self) -> bool {
        !self
    }
}

impl<T> Unset for Vec<T> {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Unset> Unset for Option<T> {
    fn is_unset(&self) -> bool {
        self.as_ref().is_none_or(Unset::is_unset)
    }
}

impl<T: Unset + ?Sized> Unset for &T {
    fn is_unset(&self) -> bool {
        (**self).is_unset()
    }
}

/// Returns `user_value` unless it is unset, in which case `component_default` is returned.
pub fn resolve<T: Unset>(user_value: Option<T>, component_default: T) -> T {
    present(user_value).unwrap_or(component_default)
}

/// Returns the value only if it is actually set.
pub fn present<T: Unset>(value: Option<T>) -> Option<T> {
    value.filter(|value| !value.is_unset())
}
