//! Deferred error collection.
//!
//! Request configuration never fails on the spot: errors are pushed into an
//! [`ErrorAccumulator`] and surfaced once, when the request is executed.

use std::fmt;
use std::sync::Arc;

use crate::Error;

/// Composite error whose message joins each constituent with `", "`.
#[derive(Debug, Clone, Default)]
pub struct MultiError {
    errors: Vec<Arc<Error>>,
}

impl MultiError {
    /// The constituent errors, in insertion order.
    pub fn errors(&self) -> impl ExactSizeIterator<Item = &Error> {
        self.errors.iter().map(AsRef::as_ref)
    }

    /// Number of constituent errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if there are no constituent errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}

/// Append-only list of errors gathered while building and decoding a request.
///
/// An empty accumulator means the request is still viable.
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator {
    errors: Vec<Arc<Error>>,
}

impl ErrorAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more error. Never rejects, never deduplicates.
    pub fn push(&mut self, error: impl Into<Error>) {
        self.errors.push(Arc::new(error.into()));
    }

    /// Returns `true` while no error has been recorded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded errors, in insertion order.
    pub fn errors(&self) -> impl ExactSizeIterator<Item = &Error> {
        self.errors.iter().map(AsRef::as_ref)
    }

    /// The composite error, or `None` if nothing was recorded.
    ///
    /// The accumulator keeps its content: calling this twice yields the same error.
    #[must_use]
    pub fn as_error(&self) -> Option<Error> {
        if self.is_ok() {
            return None;
        }
        Some(Error::Multiple(MultiError {
            errors: self.errors.clone(),
        }))
    }

    /// `Ok(())` when empty, the composite error otherwise.
    pub fn to_result(&self) -> crate::Result<()> {
        self.as_error().map_or(Ok(()), Err)
    }
}
