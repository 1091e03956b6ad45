//! Deprecated backend selection
//!
//! Older releases let callers pick between several enumeration backends. Only
//! the native one survives; these calls remain so existing callers keep
//! working, and every answer carries a notice the caller can surface however it
//! likes.

use crate::error::{Result, SysfontError};

pub const NATIVE_BACKEND: &str = "native";

const BACKENDS: &[&str] = &[NATIVE_BACKEND];

const NOTICE: &str =
    "backend selection is deprecated: only the native backend is supported and this call will be removed";

/// A value returned from a deprecated entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecated<T> {
    pub value: T,
    pub message: &'static str,
}

impl<T> Deprecated<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            message: NOTICE,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Select an enumeration backend. Anything but `native` is rejected.
pub fn use_backend(name: &str) -> Result<Deprecated<()>> {
    if name.trim().eq_ignore_ascii_case(NATIVE_BACKEND) {
        Ok(Deprecated::new(()))
    } else {
        Err(SysfontError::InvalidArgument(format!(
            "invalid font backend: {name}"
        )))
    }
}

pub fn backend() -> Deprecated<&'static str> {
    Deprecated::new(NATIVE_BACKEND)
}

pub fn backends() -> Deprecated<&'static [&'static str]> {
    Deprecated::new(BACKENDS)
}
