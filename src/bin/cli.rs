//! nkv-client CLI
//!
//! Interactive command-line front end over the client API. Reads commands
//! from stdin, one per line, and prints each response (or notification, for
//! subscriptions) as it arrives.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use clap::Parser;
use nkv_client::protocol::{encode_notification, Notification, Response};
use nkv_client::{Client, NkvError};
use tracing_subscriber::{fmt, EnvFilter};

/// nkv-client interactive CLI
#[derive(Parser, Debug)]
#[command(name = "nkv-cli")]
#[command(about = "Interactive client for a notifying key-value store")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:6379")]
    server: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nkv_client=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("nkv-client CLI v{}", nkv_client::VERSION);
    tracing::info!("Server address: {}", args.server);

    let client = Client::new(args.server);

    println!("Enter commands as whitespace-separated words, one per line. HELP lists them.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error reading input: {e}");
                break;
            }
        };

        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["HELP"] => print_help(),
            ["QUIT"] => break,
            ["GET", key] => report(|| client.get(key)),
            ["PUT", key, value] => report(|| client.put(*key, value.as_bytes())),
            ["DELETE", key] => report(|| client.delete(key)),
            ["SUBSCRIBE", key] => report(|| client.subscribe(key, print_notification)),
            ["UNSUBSCRIBE", key] => report(|| client.unsubscribe(key)),
            ["PUT", ..] => println!("PUT requires a key and a value"),
            [command, ..] if KNOWN_COMMANDS.contains(command) => {
                println!("{command} requires a key")
            }
            _ => println!("Unknown command, try HELP"),
        }
        let _ = io::stdout().flush();
    }
}

const KNOWN_COMMANDS: [&str; 5] = ["GET", "PUT", "DELETE", "SUBSCRIBE", "UNSUBSCRIBE"];

/// Run one request, print elapsed time and the response debug rendering
fn report(call: impl FnOnce() -> Result<Response, NkvError>) {
    let start = Instant::now();
    let outcome = call();
    let elapsed = start.elapsed();
    match outcome {
        Ok(response) => println!("Request took {}ms\n{}", elapsed.as_millis(), response),
        Err(e) => println!("Request took {}ms\nerror: {}", elapsed.as_millis(), e),
    }
}

/// Subscription handler: print every notification in its wire form
fn print_notification(notification: Notification) {
    print!("Received update:\n{}", encode_notification(&notification));
    let _ = io::stdout().flush();
}

fn print_help() {
    println!("Commands:");
    println!("PUT key value");
    println!("GET key");
    println!("DELETE key");
    println!("SUBSCRIBE key");
    println!("UNSUBSCRIBE key");
    println!("HELP");
    println!("QUIT");
}
