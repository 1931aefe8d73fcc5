// src/testutil.rs

//! Single-shot HTTP stub standing in for a launchcontrol device in tests.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Serves one canned status per entry in `statuses`, recording every raw
/// request it receives.
pub struct StubDevice {
    pub url: String,
    requests: mpsc::Receiver<String>,
}

impl StubDevice {
    pub fn serve(statuses: Vec<u16>) -> StubDevice {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for status in statuses {
                let Ok((mut stream, _)) = listener.accept() else { return };
                let request = read_request(&mut stream);
                tx.send(request).ok();
                let _ = write!(
                    stream,
                    "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    status,
                    reason(status)
                );
            }
        });

        StubDevice { url, requests: rx }
    }

    /// Next recorded request (request line, headers and body).
    pub fn request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub device received no request")
    }

    /// Like `request` but returns `None` when no further request arrives.
    pub fn try_request(&self) -> Option<String> {
        self.requests.recv_timeout(Duration::from_millis(200)).ok()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        409 => "Conflict",
        415 => "Unsupported Media Type",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = find_headers_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let total = header_end + 4 + content_length(&head);
            while buf.len() < total {
                let n = match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                buf.extend_from_slice(&chunk[..n]);
            }
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())?
        })
        .unwrap_or(0)
}
