//! Soft-fail reads: a stored value or a documented default.

use std::fmt;

use serde::Serialize;

use crate::error::Result;

/// Why a read fell back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackCause {
    /// Nothing was stored under the key.
    Missing,
    /// A value was stored but could not be parsed.
    Corrupt,
    /// The backend could not be read.
    Unavailable,
}

impl fmt::Display for FallbackCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Corrupt => write!(f, "corrupt"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// The outcome of reading a value that must never fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback<T> {
    /// The stored value parsed successfully.
    Stored(T),
    /// The default was substituted.
    Default {
        /// The substituted value.
        value: T,
        /// Why the stored value was not used.
        cause: FallbackCause,
    },
}

impl<T: Default> Fallback<T> {
    /// Resolve a raw backend read into a value.
    ///
    /// Read errors, missing keys and values rejected by `parse` all yield
    /// `T::default()`.
    pub fn resolve<F>(read: Result<Option<String>>, parse: F) -> Self
    where
        F: FnOnce(&str) -> Option<T>,
    {
        match read {
            Err(_) => Self::fallback(FallbackCause::Unavailable),
            Ok(None) => Self::fallback(FallbackCause::Missing),
            Ok(Some(raw)) => match parse(&raw) {
                Some(value) => Self::Stored(value),
                None => Self::fallback(FallbackCause::Corrupt),
            },
        }
    }

    fn fallback(cause: FallbackCause) -> Self {
        Self::Default {
            value: T::default(),
            cause,
        }
    }
}

impl<T> Fallback<T> {
    /// The value, stored or substituted.
    pub fn into_inner(self) -> T {
        match self {
            Self::Stored(value) | Self::Default { value, .. } => value,
        }
    }

    /// Borrow the value.
    pub fn value(&self) -> &T {
        match self {
            Self::Stored(value) | Self::Default { value, .. } => value,
        }
    }

    /// Why the default was used, if it was.
    pub fn cause(&self) -> Option<FallbackCause> {
        match self {
            Self::Stored(_) => None,
            Self::Default { cause, .. } => Some(*cause),
        }
    }

    /// Whether the default was substituted.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default { .. })
    }

    /// The value to base a write on.
    ///
    /// Missing and corrupt values are replaced by the default, but an
    /// unreadable backend yields `None`: writing the default back would
    /// overwrite data that is still stored.
    pub fn into_writable(self) -> Option<T> {
        match self {
            Self::Default {
                cause: FallbackCause::Unavailable,
                ..
            } => None,
            other => Some(other.into_inner()),
        }
    }
}
