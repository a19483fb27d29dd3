//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every request with one canned response: a status line and a body
//! sent either with Content-Length or as explicit chunked-encoding chunks,
//! optionally stalling before the last chunk.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: &'static str,
    /// Body pieces. More than one piece switches to `Transfer-Encoding: chunked`.
    pub chunks: Vec<Vec<u8>>,
    /// Pause between pieces so they arrive as separate reads.
    pub gap: Duration,
    /// Sleep this long before the last piece (simulates a stalled server).
    pub stall: Option<Duration>,
}

impl Response {
    pub fn ok(body: &[u8]) -> Self {
        Self::with_status("200 OK", body)
    }

    pub fn with_status(status: &'static str, body: &[u8]) -> Self {
        Self {
            status,
            chunks: vec![body.to_vec()],
            gap: Duration::ZERO,
            stall: None,
        }
    }

    pub fn chunked(pieces: &[&str]) -> Self {
        Self {
            status: "200 OK",
            chunks: pieces.iter().map(|p| p.as_bytes().to_vec()).collect(),
            gap: Duration::from_millis(50),
            stall: None,
        }
    }
}

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start(response: Response) -> String {
    start_recording(response).0
}

/// Like `start`, also returning the request targets (e.g. "/a?b=c") in arrival order.
pub fn start_recording(response: Response) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let response = Arc::new(response);
    let targets = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&targets);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let response = Arc::clone(&response);
            let targets = Arc::clone(&targets);
            thread::spawn(move || handle(stream, &response, &targets));
        }
    });
    (format!("http://127.0.0.1:{}/", port), recorded)
}

/// A URL on a port nothing listens on (connection refused).
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: TcpStream, response: &Response, targets: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    if let Some(target) = request.lines().next().and_then(|l| l.split_whitespace().nth(1)) {
        if let Ok(mut t) = targets.lock() {
            t.push(target.to_string());
        }
    }

    if response.chunks.len() == 1 && response.stall.is_none() {
        let body = &response.chunks[0];
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            response.status,
            body.len()
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(body);
        return;
    }

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
        response.status
    );
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    let last = response.chunks.len().saturating_sub(1);
    for (i, piece) in response.chunks.iter().enumerate() {
        if i == last {
            if let Some(stall) = response.stall {
                thread::sleep(stall);
            }
        }
        let frame = format!("{:x}\r\n", piece.len());
        if stream.write_all(frame.as_bytes()).is_err()
            || stream.write_all(piece).is_err()
            || stream.write_all(b"\r\n").is_err()
        {
            return;
        }
        let _ = stream.flush();
        if i != last && !response.gap.is_zero() {
            thread::sleep(response.gap);
        }
    }
    let _ = stream.write_all(b"0\r\n\r\n");
}
