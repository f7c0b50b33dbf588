//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (line-oriented text)
//!
//! Every message is a single line of whitespace-separated fields terminated
//! by `\n`. Binary payloads travel as standard base64; an absent payload is
//! represented by omitting the field entirely, never by an empty string.
//!
//! ### Request Format
//! ```text
//! KIND REQUEST_ID CLIENT_ID KEY [BASE64]\n
//! ```
//!
//! ### Request Kinds
//! - GET:   read the value for KEY
//! - PUT:   write the payload as the value for KEY (only kind with a payload)
//! - DEL:   delete KEY
//! - SUB:   open a subscription to KEY on this connection
//! - UNSUB: tear down the subscription identified by REQUEST_ID
//!
//! ### Response Format
//! ```text
//! REQUEST_ID (OK|FAILED) [BASE64]\n
//! ```
//!
//! ### Notification Format
//! ```text
//! KIND KEY [BASE64]\n
//! ```
//!
//! ### Notification Kinds
//! - HELLO:    acknowledges a fresh subscription
//! - UPDATE:   carries a changed value
//! - CLOSE:    server-initiated subscription teardown
//! - NOTFOUND: the key did not exist at subscribe time
//!
//! An unrecognized Request or Notification kind token decodes to `Unknown`
//! rather than failing; an unrecognized Response status token is a decode
//! error. Too few fields is a framing error on any message.

mod request;
mod response;
mod notification;
mod codec;

pub use request::{Request, RequestKind};
pub use response::Response;
pub use notification::{Notification, NotificationKind};
pub use codec::{
    encode_request, decode_request, encode_response, decode_response,
    encode_notification, decode_notification, write_request, read_response,
    read_notification,
};
