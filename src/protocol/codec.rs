//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol, plus buffered
//! stream helpers shared by the client and the subscriber loop.
//!
//! Encoders emit one complete line including the terminating `\n`. Decoders
//! split on arbitrary runs of whitespace, so they accept lines with or
//! without the trailing newline.

use std::io::{BufRead, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{NkvError, Result};
use super::{Notification, NotificationKind, Request, RequestKind, Response};

/// Minimum field count for a request line
const REQUEST_FIELDS: usize = 4;

/// Minimum field count for a response or notification line
const SHORT_FIELDS: usize = 2;

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request as a wire line
///
/// GET/DEL/SUB/UNSUB never emit a payload field even if one was supplied
/// programmatically; PUT always emits one. An `Unknown` kind encodes to the
/// bare `UNKNOWN` token.
pub fn encode_request(request: &Request) -> String {
    match request.kind {
        RequestKind::Get
        | RequestKind::Delete
        | RequestKind::Subscribe
        | RequestKind::Unsubscribe => format!(
            "{} {} {} {}\n",
            request.kind.as_str(),
            request.request_id,
            request.client_id,
            request.key
        ),
        RequestKind::Put => {
            let payload = request.payload.as_deref().unwrap_or_default();
            format!(
                "{} {} {} {} {}\n",
                request.kind.as_str(),
                request.request_id,
                request.client_id,
                request.key,
                BASE64.encode(payload)
            )
        }
        RequestKind::Unknown => format!("{}\n", RequestKind::Unknown.as_str()),
    }
}

/// Decode a request from a wire line
///
/// Requires at least 4 fields. An unrecognized kind token decodes to
/// `RequestKind::Unknown` rather than failing.
pub fn decode_request(line: &str) -> Result<Request> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < REQUEST_FIELDS {
        return Err(NkvError::Framing {
            expected: REQUEST_FIELDS,
            got: fields.len(),
        });
    }

    let payload = match fields.get(REQUEST_FIELDS) {
        Some(encoded) => Some(BASE64.decode(encoded)?),
        None => None,
    };

    Ok(Request {
        kind: RequestKind::parse(fields[0]),
        request_id: fields[1].to_string(),
        client_id: fields[2].to_string(),
        key: fields[3].to_string(),
        payload,
    })
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response as a wire line
///
/// The payload field is emitted only when the payload is non-empty.
pub fn encode_response(response: &Response) -> String {
    let status = if response.status { "OK" } else { "FAILED" };
    if response.payload.is_empty() {
        format!("{} {}\n", response.request_id, status)
    } else {
        format!(
            "{} {} {}\n",
            response.request_id,
            status,
            BASE64.encode(&response.payload)
        )
    }
}

/// Decode a response from a wire line
///
/// Requires at least 2 fields. Unlike request and notification kinds, an
/// unrecognized status token is a hard decode error.
pub fn decode_response(line: &str) -> Result<Response> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < SHORT_FIELDS {
        return Err(NkvError::Framing {
            expected: SHORT_FIELDS,
            got: fields.len(),
        });
    }

    let status = match fields[1] {
        "OK" => true,
        "FAILED" => false,
        other => return Err(NkvError::Status(other.to_string())),
    };

    let payload = match fields.get(SHORT_FIELDS) {
        Some(encoded) => BASE64.decode(encoded)?,
        None => Vec::new(),
    };

    Ok(Response {
        request_id: fields[0].to_string(),
        status,
        payload,
    })
}

// =============================================================================
// Notification Encoding/Decoding
// =============================================================================

/// Encode a notification as a wire line
///
/// The payload field is emitted only when the payload is present and
/// non-empty.
pub fn encode_notification(notification: &Notification) -> String {
    match notification.payload.as_deref() {
        Some(payload) if !payload.is_empty() => format!(
            "{} {} {}\n",
            notification.kind.as_str(),
            notification.key,
            BASE64.encode(payload)
        ),
        _ => format!(
            "{} {}\n",
            notification.kind.as_str(),
            notification.key
        ),
    }
}

/// Decode a notification from a wire line
///
/// Requires at least 2 fields. An unrecognized kind token decodes to
/// `NotificationKind::Unknown` rather than failing.
pub fn decode_notification(line: &str) -> Result<Notification> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < SHORT_FIELDS {
        return Err(NkvError::Framing {
            expected: SHORT_FIELDS,
            got: fields.len(),
        });
    }

    let payload = match fields.get(SHORT_FIELDS) {
        Some(encoded) => Some(BASE64.decode(encoded)?),
        None => None,
    };

    Ok(Notification {
        kind: NotificationKind::parse(fields[0]),
        key: fields[1].to_string(),
        payload,
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write one encoded request line to a stream and flush it
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    writer.write_all(encode_request(request).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read one line from a stream and decode it as a response
///
/// End of stream before a line arrives is a transport error.
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    decode_response(&read_line(reader)?)
}

/// Read one line from a stream and decode it as a notification
///
/// End of stream before a line arrives is a transport error.
pub fn read_notification<R: BufRead>(reader: &mut R) -> Result<Notification> {
    decode_notification(&read_line(reader)?)
}

/// Read a single newline-terminated line, treating EOF as a closed connection
fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        return Err(NkvError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed",
        )));
    }
    Ok(line)
}
