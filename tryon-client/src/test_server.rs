//! One-shot HTTP server for the client tests.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// A request as the server received it
pub struct Received {
    pub head: String,
    pub body: Vec<u8>,
}

impl Received {
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    pub fn body_contains(&self, needle: &[u8]) -> bool {
        self.body.windows(needle.len()).any(|w| w == needle)
    }

    /// Value of a multipart text field
    pub fn form_field(&self, name: &str) -> Option<String> {
        let body = String::from_utf8_lossy(&self.body);
        let marker = format!("name=\"{}\"\r\n\r\n", name);
        let start = body.find(&marker)? + marker.len();
        let end = body[start..].find("\r\n")? + start;
        Some(body[start..end].to_string())
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn content_length(head: &str) -> Option<usize> {
    head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

/// Answers exactly one request with `status` and a JSON `body`.
/// Returns the base URL and a handle yielding the received request.
pub fn serve_once(status: &str, body: &str) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];

        let head_end = loop {
            let n = stream.read(&mut buf).unwrap();
            assert!(n > 0, "connection closed before headers");
            data.extend_from_slice(&buf[..n]);
            if let Some(pos) = find(&data, b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&data[..head_end]).to_string();

        if let Some(len) = content_length(&head) {
            while data.len() < head_end + len {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                data.extend_from_slice(&buf[..n]);
            }
        } else if head.to_ascii_lowercase().contains("transfer-encoding: chunked") {
            while !data.ends_with(b"0\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                data.extend_from_slice(&buf[..n]);
            }
        }

        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        Received {
            head,
            body: data[head_end..].to_vec(),
        }
    });

    (url, handle)
}
