//! Request definitions
//!
//! Represents requests sent to the server.

/// Request kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Get,
    Put,
    Delete,
    Subscribe,
    Unsubscribe,
    /// Catch-all for unrecognized kind tokens; decoding degrades to this
    /// instead of failing so malformed kinds are observable as data
    Unknown,
}

impl RequestKind {
    /// Parse a wire token into a kind; unrecognized tokens map to `Unknown`
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => RequestKind::Get,
            "PUT" => RequestKind::Put,
            "DEL" => RequestKind::Delete,
            "SUB" => RequestKind::Subscribe,
            "UNSUB" => RequestKind::Unsubscribe,
            _ => RequestKind::Unknown,
        }
    }

    /// The wire token for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Get => "GET",
            RequestKind::Put => "PUT",
            RequestKind::Delete => "DEL",
            RequestKind::Subscribe => "SUB",
            RequestKind::Unsubscribe => "UNSUB",
            RequestKind::Unknown => "UNKNOWN",
        }
    }
}

/// A request to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Operation kind
    pub kind: RequestKind,

    /// Fresh identifier for this request (subscription id for SUB/UNSUB)
    pub request_id: String,

    /// Stable identifier of the issuing client instance
    pub client_id: String,

    /// The key the operation targets
    pub key: String,

    /// Optional opaque value; only PUT carries one on the wire
    pub payload: Option<Vec<u8>>,
}
