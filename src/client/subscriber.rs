//! Subscriber
//!
//! The per-key reconnect loop behind a subscription.
//!
//! ## State machine
//!
//! ```text
//! Connecting ──dial ok──▶ Active ──read/conn failure──▶ Disconnected
//!     ▲                                                      │
//!     └───────────── wait reconnect_interval ────────────────┘
//! ```
//!
//! Every (re)connection re-issues SUBSCRIBE with the same subscription_id;
//! the server decides whether missed updates are replayed. Retries are
//! unbounded with a fixed interval. The loop only terminates through its
//! [`StopSignal`], which is checked before each dial, around each blocking
//! read, and during the reconnect wait; triggering it also shuts down the
//! currently open socket so a pending read unblocks.

use std::io::BufReader;
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

use crate::error::{NkvError, Result};
use crate::protocol::{read_notification, write_request, Notification, Request, RequestKind};
use super::dial;

/// Cancellation signal shared between a running subscriber and its owner
pub(crate) struct StopSignal {
    /// Set once, never cleared
    triggered: AtomicBool,

    /// Wakes a subscriber sleeping out the reconnect interval
    wake_tx: Sender<()>,
    wake_rx: Receiver<()>,

    /// The socket currently owned by the loop, if any, so `trigger` can
    /// unblock a pending read
    socket: Mutex<Option<TcpStream>>,
}

impl StopSignal {
    pub(crate) fn new() -> Arc<Self> {
        let (wake_tx, wake_rx) = bounded(1);
        Arc::new(Self {
            triggered: AtomicBool::new(false),
            wake_tx,
            wake_rx,
            socket: Mutex::new(None),
        })
    }

    /// Request the loop to stop and unblock whatever it is doing
    pub(crate) fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        let _ = self.wake_tx.try_send(());
        if let Some(stream) = self.socket.lock().take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }

    fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Register the loop's current socket; returns `false` if the signal
    /// already fired, in which case the socket has been shut down
    fn register(&self, stream: TcpStream) -> bool {
        *self.socket.lock() = Some(stream);
        if self.is_triggered() {
            if let Some(stream) = self.socket.lock().take() {
                let _ = stream.shutdown(Shutdown::Both);
            }
            return false;
        }
        true
    }

    fn clear_socket(&self) {
        self.socket.lock().take();
    }

    /// Sleep out the reconnect interval; returns `true` if stop was
    /// requested before or during the wait
    fn wait(&self, interval: Duration) -> bool {
        if self.is_triggered() {
            return true;
        }
        match self.wake_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => self.is_triggered(),
            _ => true,
        }
    }
}

/// The reconnect/read loop owning one subscription connection
pub(crate) struct Subscriber {
    pub(crate) addr: String,
    pub(crate) key: String,
    pub(crate) subscription_id: String,
    pub(crate) client_id: String,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) reconnect_interval: Duration,

    /// Delivery channel towards the dispatcher; zero capacity, so a slow
    /// handler backpressures this loop instead of dropping notifications
    pub(crate) tx: Sender<Notification>,

    pub(crate) stop: Arc<StopSignal>,
}

impl Subscriber {
    /// Run the reconnect loop until the stop signal fires (blocking)
    pub(crate) fn run(&self) {
        loop {
            if self.stop.is_triggered() {
                break;
            }
            match self.connect_and_stream() {
                Ok(()) => {
                    tracing::info!(key = %self.key, "subscription stream ended, reconnecting")
                }
                Err(e) if self.stop.is_triggered() => {
                    tracing::debug!(key = %self.key, error = %e, "subscription stopping")
                }
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "subscription connection failed")
                }
            }
            if self.stop.wait(self.reconnect_interval) {
                break;
            }
        }
        tracing::debug!(key = %self.key, "subscriber stopped");
    }

    /// One Connecting → Active episode: dial, re-issue SUBSCRIBE, then read
    /// notifications until the connection or the delivery channel goes away
    fn connect_and_stream(&self) -> Result<()> {
        let stream = dial(&self.addr, self.connect_timeout)?;
        if !self.stop.register(stream.try_clone()?) {
            return Ok(());
        }

        let result = self.stream_notifications(&stream);

        // The socket is owned by this episode only; drop it on every exit path
        self.stop.clear_socket();
        result
    }

    fn stream_notifications(&self, stream: &TcpStream) -> Result<()> {
        let request = Request {
            kind: RequestKind::Subscribe,
            request_id: self.subscription_id.clone(),
            client_id: self.client_id.clone(),
            key: self.key.clone(),
            payload: None,
        };
        write_request(&mut &*stream, &request)?;
        tracing::debug!(key = %self.key, subscription_id = %self.subscription_id, "subscribed");

        let mut reader = BufReader::new(stream);
        loop {
            if self.stop.is_triggered() {
                return Ok(());
            }
            match read_notification(&mut reader) {
                Ok(notification) => {
                    // Blocking send: the dispatcher's pace is our pace
                    if self.tx.send(notification).is_err() {
                        return Ok(());
                    }
                }
                Err(NkvError::Io(e)) => return Err(e.into()),
                // One bad line never tears down the connection
                Err(e) => {
                    tracing::warn!(key = %self.key, error = %e, "dropping undecodable notification")
                }
            }
        }
    }
}

/// Owner-side handle to a running subscriber/dispatcher pair
pub(crate) struct SubscriberHandle {
    stop: Arc<StopSignal>,
    subscriber: thread::JoinHandle<()>,
    dispatcher: thread::JoinHandle<()>,
}

impl SubscriberHandle {
    pub(crate) fn new(
        stop: Arc<StopSignal>,
        subscriber: thread::JoinHandle<()>,
        dispatcher: thread::JoinHandle<()>,
    ) -> Self {
        Self {
            stop,
            subscriber,
            dispatcher,
        }
    }

    /// Stop the reconnect loop and wait for the background threads to exit
    ///
    /// A handler may tear down its own subscription (a CLOSE notification is
    /// the obvious trigger), in which case this runs on the dispatcher
    /// thread itself. The dispatcher drains to completion on its own once
    /// the subscriber drops the sending side, so it is only joined when
    /// called from some other thread; joining it from within would self-join.
    pub(crate) fn stop(self) {
        self.stop.trigger();
        let _ = self.subscriber.join();
        if thread::current().id() != self.dispatcher.thread().id() {
            let _ = self.dispatcher.join();
        }
    }
}
