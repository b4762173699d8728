//! Success/failure value returned across the strategy boundary.
//!
//! Strategies never raise errors directly. They return an [`Attempt`] which
//! the provider inspects and converts into a [`crate::TaxationError`].

use std::error::Error;
use std::fmt;

/// Boxed error carried as the cause of a failed attempt.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Outcome of running a calculation: either a value or the cause of failure.
pub enum Attempt<T> {
    /// The calculation produced a value.
    Succeeded(T),
    /// The calculation failed; no value is available.
    Failed(BoxError),
}

impl<T> Attempt<T> {
    /// Wrap a successful value.
    pub fn succeed(value: T) -> Self {
        Self::Succeeded(value)
    }

    /// Wrap a failure cause.
    pub fn fail(cause: impl Into<BoxError>) -> Self {
        Self::Failed(cause.into())
    }

    /// Returns `true` for a successful attempt.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Successful value, `None` for a failed attempt.
    #[must_use]
    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// Failure cause, `None` for a successful attempt.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(cause) => Some(cause.as_ref()),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure cause for a failed attempt.
    pub fn into_result(self) -> Result<T, BoxError> {
        match self {
            Self::Succeeded(value) => Ok(value),
            Self::Failed(cause) => Err(cause),
        }
    }
}

impl<T, E> From<Result<T, E>> for Attempt<T>
where
    E: Into<BoxError>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(cause) => Self::Failed(cause.into()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Attempt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded(value) => f.debug_tuple("Succeeded").field(value).finish(),
            Self::Failed(cause) => f
                .debug_tuple("Failed")
                .field(&format_args!("{cause}"))
                .finish(),
        }
    }
}
