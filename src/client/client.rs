//! Client
//!
//! Single-shot request calls and subscription lifecycle management.

use std::collections::HashMap;
use std::io::BufReader;
use std::thread;

use crossbeam::channel::bounded;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::protocol::{
    read_response, write_request, Notification, Request, RequestKind, Response,
};
use super::dial;
use super::subscriber::{StopSignal, Subscriber, SubscriberHandle};

/// Sentinel request_id returned when a request was never sent to the server
pub const NO_REQUEST_ID: &str = "0";

/// A live subscription: its wire identity plus the background threads
struct Subscription {
    id: String,
    handle: SubscriberHandle,
}

/// Client for a notifying key-value store
///
/// Single-shot calls (`get`/`put`/`delete`) each open one fresh connection,
/// exchange one request/response line pair, and close it; connections are
/// never pooled or reused. Subscriptions run on their own persistent
/// connections maintained by background threads.
///
/// The client generates one opaque identity at construction and reuses it as
/// the client_id of every request; a fresh request_id is generated per call.
pub struct Client {
    config: ClientConfig,
    client_id: String,
    subscriptions: Mutex<HashMap<String, Subscription>>,
}

impl Client {
    /// Create a client for the given server address with default settings
    pub fn new(addr: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::builder().server_addr(addr).build())
    }

    /// Create a client from a full configuration
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            client_id: generate_id(),
            subscriptions: Mutex::new(HashMap::new()),
        }
    }

    /// This client's process-lifetime identity
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Read the value for a key
    pub fn get(&self, key: &str) -> Result<Response> {
        self.send_request(&Request {
            kind: RequestKind::Get,
            request_id: generate_id(),
            client_id: self.client_id.clone(),
            key: key.to_string(),
            payload: None,
        })
    }

    /// Write a value for a key
    pub fn put(&self, key: &str, value: impl Into<Vec<u8>>) -> Result<Response> {
        self.send_request(&Request {
            kind: RequestKind::Put,
            request_id: generate_id(),
            client_id: self.client_id.clone(),
            key: key.to_string(),
            payload: Some(value.into()),
        })
    }

    /// Delete a key
    pub fn delete(&self, key: &str) -> Result<Response> {
        self.send_request(&Request {
            kind: RequestKind::Delete,
            request_id: generate_id(),
            client_id: self.client_id.clone(),
            key: key.to_string(),
            payload: None,
        })
    }

    /// Subscribe to change notifications for a key
    ///
    /// Starts a background connection that re-issues SUBSCRIBE across
    /// reconnects and feeds `handler` one notification at a time, in server
    /// send order for the current connection. Subscribing to a key this
    /// client already subscribes to is a no-op: it returns `status: false`
    /// with the existing subscription_id and keeps the original handler.
    pub fn subscribe<F>(&self, key: &str, handler: F) -> Result<Response>
    where
        F: FnMut(Notification) + Send + 'static,
    {
        let mut subscriptions = self.subscriptions.lock();
        if let Some(existing) = subscriptions.get(key) {
            return Ok(Response::failed(existing.id.clone()));
        }

        let subscription_id = generate_id();
        let handle = self.spawn_subscription(key, &subscription_id, handler)?;
        subscriptions.insert(
            key.to_string(),
            Subscription {
                id: subscription_id.clone(),
                handle,
            },
        );

        Ok(Response {
            request_id: subscription_id,
            status: true,
            payload: Vec::new(),
        })
    }

    /// Tear down the subscription for a key
    ///
    /// Sends an UNSUB request carrying the subscription_id as its
    /// request_id. On a successful response the background threads are
    /// stopped and the subscription entry removed. Without an active
    /// subscription this returns `status: false` with the sentinel
    /// [`NO_REQUEST_ID`] and issues no network call.
    pub fn unsubscribe(&self, key: &str) -> Result<Response> {
        let subscription_id = match self.subscriptions.lock().get(key) {
            Some(subscription) => subscription.id.clone(),
            None => return Ok(Response::failed(NO_REQUEST_ID)),
        };

        let response = self.send_request(&Request {
            kind: RequestKind::Unsubscribe,
            request_id: subscription_id,
            client_id: self.client_id.clone(),
            key: key.to_string(),
            payload: None,
        })?;

        if response.status {
            // Take the entry out first so the map lock is not held while
            // the background threads are joined
            let removed = self.subscriptions.lock().remove(key);
            if let Some(subscription) = removed {
                subscription.handle.stop();
            }
        }

        Ok(response)
    }

    /// One single-shot exchange: dial, write one request line, read one
    /// response line. The socket is dropped on every exit path.
    fn send_request(&self, request: &Request) -> Result<Response> {
        let stream = dial(&self.config.server_addr, self.config.connect_timeout)?;
        write_request(&mut &stream, request)?;
        let mut reader = BufReader::new(&stream);
        read_response(&mut reader)
    }

    /// Start the subscriber/dispatcher thread pair for one subscription
    fn spawn_subscription<F>(
        &self,
        key: &str,
        subscription_id: &str,
        mut handler: F,
    ) -> Result<SubscriberHandle>
    where
        F: FnMut(Notification) + Send + 'static,
    {
        // Zero capacity: receipt and handling rendezvous, so a slow handler
        // backpressures the read loop instead of growing a queue
        let (tx, rx) = bounded::<Notification>(0);
        let stop = StopSignal::new();

        let subscriber = Subscriber {
            addr: self.config.server_addr.clone(),
            key: key.to_string(),
            subscription_id: subscription_id.to_string(),
            client_id: self.client_id.clone(),
            connect_timeout: self.config.connect_timeout,
            reconnect_interval: self.config.reconnect_interval,
            tx,
            stop: stop.clone(),
        };

        let subscriber_thread = thread::Builder::new()
            .name(format!("nkv-sub-{key}"))
            .spawn(move || subscriber.run())?;

        // Dispatcher: single consumer, handlers run sequentially and exit
        // when the subscriber drops the sending side
        let dispatcher_thread = thread::Builder::new()
            .name(format!("nkv-dispatch-{key}"))
            .spawn(move || {
                for notification in rx.iter() {
                    handler(notification);
                }
            })?;

        Ok(SubscriberHandle::new(
            stop,
            subscriber_thread,
            dispatcher_thread,
        ))
    }
}

impl Drop for Client {
    /// Stop all remaining subscription threads
    fn drop(&mut self) {
        let subscriptions: Vec<Subscription> =
            self.subscriptions.lock().drain().map(|(_, s)| s).collect();
        for subscription in subscriptions {
            subscription.handle.stop();
        }
    }
}

/// Generate an opaque identity string (client, request, and subscription ids)
fn generate_id() -> String {
    format!("nkv-client-{}", Uuid::new_v4())
}
