//! Canned HTTP persona service for tests.
//!
//! Shared by the client unit tests and the binary integration tests, so it
//! only depends on std. Every connection gets the same status and body.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// One request seen by [`StubService`]
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub request_line: String,
    /// Request line and headers
    pub head: String,
    pub body: String,
}

/// Minimal HTTP/1.1 responder on an ephemeral port
pub struct StubService {
    pub base_url: String,
    seen: mpsc::Receiver<SeenRequest>,
}

impl StubService {
    /// Serve `status` (e.g. "200 OK") with a JSON `body`
    pub fn start(status: &'static str, body: impl Into<String>) -> Self {
        Self::start_delayed(status, body, Duration::ZERO)
    }

    /// Like [`start`](Self::start), holding each response back by `delay`
    pub fn start_delayed(status: &'static str, body: impl Into<String>, delay: Duration) -> Self {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let Some(seen) = read_request(&mut stream) else { continue };
                // Recorded before answering, so callers see it once their call returns
                let _ = tx.send(seen);

                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            seen: rx,
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.try_iter().collect()
    }
}

fn read_request(stream: &mut TcpStream) -> Option<SeenRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request_line = head.lines().next().unwrap_or_default().to_string();
    Some(SeenRequest {
        request_line,
        head,
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    })
}

/// Base URL nothing is listening on
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
