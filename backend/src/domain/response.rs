//! Success values returned by handlers that want to shape their response.
//!
//! Handlers may return plain data and let the boundary wrap it with the
//! default message, or return a [`SuccessEnvelope`] to pick the message and
//! the outgoing status themselves.

use std::borrow::Cow;

/// Message used when a success value does not supply one.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "OK";

/// Message used by [`SuccessEnvelope::created`].
pub const CREATED_MESSAGE: &str = "Created";

/// Handler-chosen success payload, message, and status.
///
/// Construction never fails. The value is consumed once by the boundary,
/// which writes `data` to the wire untouched.
///
/// # Examples
/// ```
/// use envelope::domain::SuccessEnvelope;
///
/// let reply = SuccessEnvelope::created(vec![1, 2, 3]);
/// assert_eq!(reply.message(), "Created");
/// assert_eq!(reply.status(), Some(201));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessEnvelope<T> {
    data: Option<T>,
    message: Cow<'static, str>,
    status: Option<u16>,
}

impl<T> SuccessEnvelope<T> {
    /// Wrap `data` as a 200 response with the default message.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            message: Cow::Borrowed(DEFAULT_SUCCESS_MESSAGE),
            status: Some(200),
        }
    }

    /// Wrap `data` as a 201 response with the "Created" message.
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            message: Cow::Borrowed(CREATED_MESSAGE),
            status: Some(201),
        }
    }

    /// A response without data and without a status override.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: None,
            message: Cow::Borrowed(DEFAULT_SUCCESS_MESSAGE),
            status: None,
        }
    }

    /// Replace the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Override the outgoing status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Message reported alongside the payload.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status override, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Split the envelope into data, message, and status override.
    pub fn into_parts(self) -> (Option<T>, Cow<'static, str>, Option<u16>) {
        (self.data, self.message, self.status)
    }
}

impl<T> Default for SuccessEnvelope<T> {
    fn default() -> Self {
        Self::empty()
    }
}
