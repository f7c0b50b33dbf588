//! Response definitions
//!
//! Represents server responses to requests.

use std::fmt;

/// A response to a request
///
/// An empty `payload` models the absent payload field: the wire format omits
/// the field entirely when there is nothing to carry, and decoding a line
/// without one yields an empty vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The request_id of the request this answers
    pub request_id: String,

    /// `true` for OK, `false` for FAILED
    pub status: bool,

    /// Opaque value bytes (the value for GET); empty when absent
    pub payload: Vec<u8>,
}

impl Response {
    /// A local FAILED response that never touched the network
    pub fn failed(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            status: false,
            payload: Vec::new(),
        }
    }
}

/// Human-facing rendering: the payload is shown as UTF-8 text when it is
/// valid UTF-8, else as a raw byte listing. One-way; there is no
/// corresponding decode.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.status { "OK" } else { "FAILED" };
        match std::str::from_utf8(&self.payload) {
            Ok(text) => write!(f, "{} {} {}", self.request_id, status, text),
            Err(_) => write!(f, "{} {} {:?}", self.request_id, status, self.payload),
        }
    }
}
