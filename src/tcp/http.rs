//! HTTP status detection on an already connected stream

use crate::{defaults::HTTP_READ_LIMIT, types::Hostname};
use regex::Regex;
use std::sync::OnceLock;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

fn status_line_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^HTTP/(\d+(?:\.\d+)?)\s+(\d{3})(?:\s+.*)?$").ok())
        .as_ref()
}

/// The HEAD request sent to HTTP ports
pub fn head_request(host: &Hostname) -> String {
    format!(
        "HEAD / HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        host.as_str()
    )
}

/// Status code carried by the first line of `response`, if it is an HTTP
/// status line
pub fn parse_status_line(response: &str) -> Option<u16> {
    let first_line = response.lines().next()?.trim_end();
    let captures = status_line_pattern()?.captures(first_line)?;
    captures.get(2)?.as_str().parse().ok()
}

/// Send a HEAD request and read back the status code.
///
/// Reads until the first line is complete, the peer closes, or
/// `HTTP_READ_LIMIT` bytes arrived. Every failure yields `None`.
pub async fn probe_http_status<S>(mut stream: S, host: &Hostname) -> Option<u16>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(head_request(host).as_bytes()).await.ok()?;
    stream.flush().await.ok()?;

    let mut buf = vec![0u8; HTTP_READ_LIMIT];
    let mut filled = 0;
    while filled < buf.len() {
        match stream.read(&mut buf[filled..]).await {
            Ok(0) | Err(_) => break,
            Ok(n) => filled += n,
        }
        if buf[..filled].contains(&b'\n') {
            break;
        }
    }

    if filled == 0 {
        return None;
    }
    parse_status_line(&String::from_utf8_lossy(&buf[..filled]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    fn host() -> Hostname {
        Hostname::parse("example.com").unwrap()
    }

    /// Serve `response` on the far end of a duplex pipe and return the
    /// request that arrived
    async fn exchange(response: &'static [u8]) -> (Option<u16>, String) {
        let (client, mut server) = duplex(4096);
        let server_task = tokio::spawn(async move {
            let mut request = vec![0u8; 1024];
            let n = server.read(&mut request).await.unwrap();
            server.write_all(response).await.unwrap();
            String::from_utf8_lossy(&request[..n]).into_owned()
        });

        let status = probe_http_status(client, &host()).await;
        (status, server_task.await.unwrap())
    }

    #[test]
    fn test_head_request_format() {
        assert_eq!(
            head_request(&host()),
            "HEAD / HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn test_status_line_pattern_compiles() {
        assert!(status_line_pattern().is_some());
    }

    #[test]
    fn test_parse_status_line() {
        assert_eq!(parse_status_line("HTTP/1.1 200 OK\r\nServer: x\r\n"), Some(200));
        assert_eq!(parse_status_line("HTTP/1.0 301 Moved Permanently\r\n"), Some(301));
        assert_eq!(parse_status_line("HTTP/2 404\r\n"), Some(404));
        assert_eq!(parse_status_line("HTTP/1.1 204"), Some(204));
    }

    #[test]
    fn test_parse_status_line_rejects_non_http() {
        assert_eq!(parse_status_line("SSH-2.0-OpenSSH_9.6\r\n"), None);
        assert_eq!(parse_status_line("HTTP/1.1 OK 200\r\n"), None);
        assert_eq!(parse_status_line("HTTP/1.1 2000 Too Long\r\n"), None);
        assert_eq!(parse_status_line("garbage HTTP/1.1 200 OK\r\n"), None);
        assert_eq!(parse_status_line(""), None);
    }

    #[tokio::test]
    async fn test_probe_reads_status_and_sends_head() {
        let (status, request) = exchange(b"HTTP/1.1 301 Moved Permanently\r\nLocation: /\r\n\r\n").await;
        assert_eq!(status, Some(301));
        assert_eq!(request, head_request(&host()));
    }

    #[tokio::test]
    async fn test_probe_garbage_response() {
        let (status, _) = exchange(b"\x00\x01\x02not http at all\r\n").await;
        assert_eq!(status, None);
    }

    #[tokio::test]
    async fn test_probe_peer_closes_without_reply() {
        let (status, _) = exchange(b"").await;
        assert_eq!(status, None);
    }

    #[tokio::test]
    async fn test_probe_status_line_split_across_reads() {
        let request = head_request(&host());
        let stream = tokio_test::io::Builder::new()
            .write(request.as_bytes())
            .read(b"HTTP/1.1 2")
            .read(b"00 OK\r\nServer: test\r\n")
            .build();

        assert_eq!(probe_http_status(stream, &host()).await, Some(200));
    }

    #[tokio::test]
    async fn test_probe_read_error_is_absent_status() {
        let request = head_request(&host());
        let stream = tokio_test::io::Builder::new()
            .write(request.as_bytes())
            .read_error(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"))
            .build();

        assert_eq!(probe_http_status(stream, &host()).await, None);
    }
}
