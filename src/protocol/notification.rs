//! Notification definitions
//!
//! Represents asynchronous change notifications pushed on a subscription
//! connection.

/// Notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Acknowledges a fresh subscription
    Hello,
    /// Carries a changed value
    Update,
    /// Server-initiated subscription teardown
    Close,
    /// The key did not exist at subscribe time
    NotFound,
    /// Catch-all for unrecognized kind tokens (degrade, don't fail)
    Unknown,
}

impl NotificationKind {
    /// Parse a wire token into a kind; unrecognized tokens map to `Unknown`
    pub fn parse(token: &str) -> Self {
        match token {
            "HELLO" => NotificationKind::Hello,
            "UPDATE" => NotificationKind::Update,
            "CLOSE" => NotificationKind::Close,
            "NOTFOUND" => NotificationKind::NotFound,
            _ => NotificationKind::Unknown,
        }
    }

    /// The wire token for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Hello => "HELLO",
            NotificationKind::Update => "UPDATE",
            NotificationKind::Close => "CLOSE",
            NotificationKind::NotFound => "NOTFOUND",
            NotificationKind::Unknown => "UNKNOWN",
        }
    }
}

/// A change notification for a subscribed key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// What happened
    pub kind: NotificationKind,

    /// The subscribed key
    pub key: String,

    /// The new value for UPDATE; absent for the other kinds
    pub payload: Option<Vec<u8>>,
}
