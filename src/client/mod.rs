//! Client Module
//!
//! The client API: single-shot request calls plus long-lived subscriptions.
//!
//! ## Architecture
//! - One fresh short-lived connection per single-shot call
//! - One persistent connection per subscribed key, owned by a background
//!   reconnect loop
//! - One dispatcher thread per subscription draining an unbuffered delivery
//!   channel into the caller's handler

mod client;
mod subscriber;

pub use client::{Client, NO_REQUEST_ID};

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::Result;

/// Dial the server, honoring the configured connect timeout when set
pub(crate) fn dial(addr: &str, timeout: Option<Duration>) -> Result<TcpStream> {
    let stream = match timeout {
        Some(timeout) => {
            let resolved = addr.to_socket_addrs()?.next().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("cannot resolve {addr}"))
            })?;
            TcpStream::connect_timeout(&resolved, timeout)?
        }
        None => TcpStream::connect(addr)?,
    };
    stream.set_nodelay(true)?;
    Ok(stream)
}
