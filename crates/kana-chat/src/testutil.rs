//! Local HTTP endpoints for exercising `GoogleTransliterate` without network.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::settings::{ChatSettings, LookupSettings};

/// Lookup settings pointing at `addr` with a short timeout.
pub(crate) fn lookup_settings(addr: SocketAddr, timeout_ms: u64) -> LookupSettings {
    LookupSettings {
        enabled: true,
        endpoint: format!("http://{addr}/transliterate"),
        timeout_ms,
        ..ChatSettings::default().lookup
    }
}

/// Accept one connection, answer it with `200 OK` and `body`, and return
/// the request line through the join handle.
pub(crate) fn serve_once(body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json; charset=utf-8\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        let request = String::from_utf8_lossy(&request).into_owned();
        request.lines().next().unwrap_or_default().to_string()
    });
    (addr, handle)
}

/// Address of a port that was just released, so connections are refused.
pub(crate) fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Decode `%XX` escapes (and `+` as space) in a query component.
pub(crate) fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap();
                out.push(u8::from_str_radix(hex, 16).unwrap());
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).unwrap()
}

/// Decoded value of `key` in the query string of an HTTP request line.
pub(crate) fn query_param(request_line: &str, key: &str) -> Option<String> {
    let target = request_line.split(' ').nth(1)?;
    let (_, query) = target.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| percent_decode(v))
}
