// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Result shape of every remote operation.

use std::fmt;

use crate::error::GCalError;

/// A failed round trip, exactly as reported by the transport.
///
/// `status` is `0` when no HTTP response was received at all (connection
/// refused, timeout, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// HTTP status code from the server.
    pub status: u16,
    /// Canonical reason phrase of `status`, or the error class when there was
    /// no response.
    ///
    /// The phrase the server actually sent is not available from the
    /// transport, so a status without a registered phrase has an empty
    /// reason.
    pub reason: String,
    /// Body of the server's response.
    pub body: String,
}

impl TransportFailure {
    /// Creates a new transport failure.
    #[must_use]
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.reason)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for TransportFailure {}

/// Outcome of one request against the calendar service.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The server accepted the request; carries the translated payload.
    Success(T),
    /// The request failed remotely; carried through unchanged.
    Failure(TransportFailure),
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Outcome::Failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the payload of a success.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&TransportFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f),
        }
    }

    /// Maps the success payload.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success(v) => Outcome::Success(f(v)),
            Self::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Maps the success payload with a fallible translation, such as parsing
    /// the response body.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`.
    pub fn try_map<U, F>(self, f: F) -> Result<Outcome<U>, GCalError>
    where
        F: FnOnce(T) -> Result<U, GCalError>,
    {
        match self {
            Self::Success(v) => f(v).map(Outcome::Success),
            Self::Failure(e) => Ok(Outcome::Failure(e)),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the transport failure when the outcome is not a success.
    pub fn into_result(self) -> Result<T, TransportFailure> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(e) => Err(e),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, TransportFailure> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_map_keeps_failure_untouched() {
        let failure = TransportFailure::new(404, "Not Found", "no such feed");
        let outcome: Outcome<String> = Outcome::Failure(failure.clone());

        let mapped = outcome
            .try_map(|_| -> Result<usize, GCalError> { unreachable!() })
            .unwrap();
        assert_eq!(mapped, Outcome::Failure(failure));
    }

    #[test]
    fn try_map_propagates_translation_error() {
        let outcome = Outcome::Success("<broken".to_string());
        let result: Result<Outcome<()>, _> =
            outcome.try_map(|_| Err(GCalError::Xml("unexpected eof".to_string())));
        assert!(matches!(result, Err(GCalError::Xml(_))));
    }

    #[test]
    fn failure_display_includes_body() {
        let failure = TransportFailure::new(403, "Forbidden", "token expired");
        assert_eq!(failure.to_string(), "403 Forbidden: token expired");
        assert_eq!(
            TransportFailure::new(500, "Internal Server Error", "").to_string(),
            "500 Internal Server Error"
        );
    }
}
