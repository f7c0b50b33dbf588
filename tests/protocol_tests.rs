//! Protocol Tests
//!
//! Tests for wire-line encoding/decoding of requests, responses, and
//! notifications.

use std::io::Cursor;

use nkv_client::protocol::{
    decode_notification, decode_request, decode_response, encode_notification,
    encode_request, encode_response, read_notification, read_response, write_request,
    Notification, NotificationKind, Request, RequestKind, Response,
};
use nkv_client::NkvError;

fn request(kind: RequestKind, payload: Option<Vec<u8>>) -> Request {
    Request {
        kind,
        request_id: "12345".to_string(),
        client_id: "client1".to_string(),
        key: "key1".to_string(),
        payload,
    }
}

// =============================================================================
// Request Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_request_lines() {
    assert_eq!(
        encode_request(&request(RequestKind::Get, None)),
        "GET 12345 client1 key1\n"
    );
    assert_eq!(
        encode_request(&request(RequestKind::Delete, None)),
        "DEL 12345 client1 key1\n"
    );
    assert_eq!(
        encode_request(&request(RequestKind::Subscribe, None)),
        "SUB 12345 client1 key1\n"
    );
    assert_eq!(
        encode_request(&request(RequestKind::Unsubscribe, None)),
        "UNSUB 12345 client1 key1\n"
    );
    assert_eq!(
        encode_request(&request(RequestKind::Put, Some(b"bazinga\n".to_vec()))),
        "PUT 12345 client1 key1 YmF6aW5nYQo=\n"
    );
}

#[test]
fn test_decode_request_minimal() {
    let decoded = decode_request("GET 1 c k").unwrap();
    assert_eq!(decoded.kind, RequestKind::Get);
    assert_eq!(decoded.request_id, "1");
    assert_eq!(decoded.client_id, "c");
    assert_eq!(decoded.key, "k");
    assert_eq!(decoded.payload, None);
}

#[test]
fn test_decode_put_payload_bytes() {
    // "YmF6" is base64 for the bytes [98, 97, 122]
    let decoded = decode_request("PUT 1 c k YmF6").unwrap();
    assert_eq!(decoded.kind, RequestKind::Put);
    assert_eq!(decoded.payload, Some(vec![98, 97, 122]));
}

#[test]
fn test_request_round_trip_every_kind() {
    for kind in [
        RequestKind::Get,
        RequestKind::Delete,
        RequestKind::Subscribe,
        RequestKind::Unsubscribe,
    ] {
        let original = request(kind, None);
        let decoded = decode_request(&encode_request(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    let original = request(RequestKind::Put, Some(vec![0, 159, 146, 150]));
    let decoded = decode_request(&encode_request(&original)).unwrap();
    assert_eq!(decoded, original);
}

#[test]
fn test_non_put_kinds_never_emit_payload() {
    // A programmatically supplied payload is dropped on the wire
    let encoded = encode_request(&request(RequestKind::Get, Some(b"extra".to_vec())));
    assert_eq!(encoded, "GET 12345 client1 key1\n");
}

#[test]
fn test_unrecognized_request_kind_degrades_to_unknown() {
    let decoded = decode_request("FROB 1 c k").unwrap();
    assert_eq!(decoded.kind, RequestKind::Unknown);
    assert_eq!(decoded.key, "k");
}

#[test]
fn test_request_too_few_fields_is_framing_error() {
    match decode_request("GET 1 c") {
        Err(NkvError::Framing { expected: 4, got: 3 }) => {}
        other => panic!("expected framing error, got {other:?}"),
    }
}

#[test]
fn test_request_invalid_base64_is_payload_error() {
    match decode_request("PUT 1 c k not-base64!") {
        Err(NkvError::Payload(_)) => {}
        other => panic!("expected payload error, got {other:?}"),
    }
}

#[test]
fn test_fields_split_on_whitespace_runs() {
    let decoded = decode_request("GET   1 \t c   k\n").unwrap();
    assert_eq!(decoded.request_id, "1");
    assert_eq!(decoded.client_id, "c");
    assert_eq!(decoded.key, "k");
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_response_lines() {
    let failed = Response {
        request_id: "12345".to_string(),
        status: false,
        payload: Vec::new(),
    };
    assert_eq!(encode_response(&failed), "12345 FAILED\n");

    let ok = Response {
        request_id: "12345".to_string(),
        status: true,
        payload: b"bazinga\n".to_vec(),
    };
    assert_eq!(encode_response(&ok), "12345 OK YmF6aW5nYQo=\n");
}

#[test]
fn test_decode_response_without_payload() {
    let decoded = decode_response("12345 FAILED").unwrap();
    assert_eq!(decoded.request_id, "12345");
    assert!(!decoded.status);
    assert!(decoded.payload.is_empty());
}

#[test]
fn test_decode_response_with_payload() {
    let decoded = decode_response("12345 OK YmF6aW5nYQo=").unwrap();
    assert_eq!(decoded.request_id, "12345");
    assert!(decoded.status);
    assert_eq!(decoded.payload, b"bazinga\n".to_vec());
}

#[test]
fn test_response_round_trip() {
    let original = Response {
        request_id: "r1".to_string(),
        status: true,
        payload: vec![1, 2, 3, 255],
    };
    assert_eq!(decode_response(&encode_response(&original)).unwrap(), original);
}

#[test]
fn test_unrecognized_status_is_decode_error() {
    // Unlike kinds, a bad status token never degrades
    match decode_response("12345 MAYBE") {
        Err(NkvError::Status(token)) => assert_eq!(token, "MAYBE"),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn test_response_too_few_fields_is_framing_error() {
    match decode_response("12345") {
        Err(NkvError::Framing { expected: 2, got: 1 }) => {}
        other => panic!("expected framing error, got {other:?}"),
    }
}

#[test]
fn test_response_invalid_base64_is_payload_error() {
    match decode_response("12345 OK ???") {
        Err(NkvError::Payload(_)) => {}
        other => panic!("expected payload error, got {other:?}"),
    }
}

#[test]
fn test_response_display_renders_utf8_payload_as_text() {
    let response = Response {
        request_id: "12345".to_string(),
        status: true,
        payload: b"hello".to_vec(),
    };
    assert_eq!(response.to_string(), "12345 OK hello");
}

#[test]
fn test_response_display_renders_binary_payload_as_bytes() {
    let response = Response {
        request_id: "12345".to_string(),
        status: false,
        payload: vec![0xff, 0xfe],
    };
    assert_eq!(response.to_string(), "12345 FAILED [255, 254]");
}

// =============================================================================
// Notification Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_notification_lines() {
    let hello = Notification {
        kind: NotificationKind::Hello,
        key: "key1".to_string(),
        payload: None,
    };
    assert_eq!(encode_notification(&hello), "HELLO key1\n");

    let update = Notification {
        kind: NotificationKind::Update,
        key: "key1".to_string(),
        payload: Some(b"bazinga\n".to_vec()),
    };
    assert_eq!(encode_notification(&update), "UPDATE key1 YmF6aW5nYQo=\n");
}

#[test]
fn test_decode_notification_kinds() {
    assert_eq!(
        decode_notification("HELLO k").unwrap().kind,
        NotificationKind::Hello
    );
    assert_eq!(
        decode_notification("CLOSE k").unwrap().kind,
        NotificationKind::Close
    );
    assert_eq!(
        decode_notification("NOTFOUND k").unwrap().kind,
        NotificationKind::NotFound
    );

    let update = decode_notification("UPDATE k YmF6").unwrap();
    assert_eq!(update.kind, NotificationKind::Update);
    assert_eq!(update.payload, Some(vec![98, 97, 122]));
}

#[test]
fn test_notification_round_trip() {
    let original = Notification {
        kind: NotificationKind::Update,
        key: "key1".to_string(),
        payload: Some(vec![0, 1, 254, 255]),
    };
    assert_eq!(
        decode_notification(&encode_notification(&original)).unwrap(),
        original
    );
}

#[test]
fn test_unrecognized_notification_kind_degrades_to_unknown() {
    let decoded = decode_notification("SURPRISE k").unwrap();
    assert_eq!(decoded.kind, NotificationKind::Unknown);
}

#[test]
fn test_notification_too_few_fields_is_framing_error() {
    match decode_notification("HELLO") {
        Err(NkvError::Framing { expected: 2, got: 1 }) => {}
        other => panic!("expected framing error, got {other:?}"),
    }
}

// =============================================================================
// Stream Helper Tests
// =============================================================================

#[test]
fn test_write_request_emits_one_newline_terminated_line() {
    let mut buffer = Vec::new();
    write_request(&mut buffer, &request(RequestKind::Get, None)).unwrap();
    assert_eq!(buffer, b"GET 12345 client1 key1\n");
}

#[test]
fn test_read_response_consumes_one_line() {
    let mut reader = Cursor::new(b"12345 OK YmF6\nNEXT LINE\n".to_vec());
    let response = read_response(&mut reader).unwrap();
    assert_eq!(response.payload, vec![98, 97, 122]);
    assert_eq!(response.request_id, "12345");
}

#[test]
fn test_read_notification_eof_is_transport_error() {
    let mut reader = Cursor::new(Vec::new());
    match read_notification(&mut reader) {
        Err(NkvError::Io(e)) => {
            assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof)
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}
