//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use tempfile::TempDir;

/// Builder for data directories as the file store lays them out
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw content as the stored history value
    pub fn with_history(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("history.json"), content)
            .expect("Failed to write history.json");
        self
    }

    /// Add history entries programmatically (first entry is the newest)
    pub fn with_history_entries(self, entries: &[HistoryEntryBuilder]) -> Self {
        let content = format!(
            "[{}]",
            entries.iter().map(|e| e.to_json()).collect::<Vec<_>>().join(",")
        );
        self.with_history(&content)
    }

    pub fn with_dark_mode(self, raw: &str) -> Self {
        fs::write(self.temp_dir.path().join("darkMode.json"), raw)
            .expect("Failed to write darkMode.json");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for stored history records
pub struct HistoryEntryBuilder {
    id: String,
    prompt: String,
    code: String,
    language: String,
    timestamp: String,
    favorite: bool,
}

impl HistoryEntryBuilder {
    pub fn new() -> Self {
        Self {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            prompt: "write a function to sort an array".to_string(),
            code: "function sort(a) { return a.sort(); }".to_string(),
            language: "javascript".to_string(),
            timestamp: "2025-01-15T10:00:00Z".to_string(),
            favorite: false,
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn prompt(mut self, prompt: &str) -> Self {
        self.prompt = prompt.to_string();
        self
    }

    pub fn code(mut self, code: &str) -> Self {
        self.code = code.to_string();
        self
    }

    pub fn language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({
            "id": self.id,
            "prompt": self.prompt,
            "code": self.code,
            "language": self.language,
            "timestamp": self.timestamp,
            "favorite": self.favorite,
        })
        .to_string()
    }
}

impl Default for HistoryEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A request captured by [`one_shot_server`]
pub struct CapturedRequest {
    pub request_line: String,
    pub body: String,
}

/// Serve exactly one HTTP request with a canned response.
///
/// Returns the base URL and a receiver yielding the captured request once the
/// response has been written.
pub fn one_shot_server(status: u16, body: &str) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let body = body.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else { return };
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("Failed to read request line");

        let mut content_length = 0;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).expect("Failed to read header");
            let header = header.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }

        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).expect("Failed to read request body");

        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).expect("Failed to write response");
        stream.flush().ok();

        tx.send(CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            body: String::from_utf8_lossy(&request_body).into_owned(),
        })
        .ok();
    });

    (format!("http://{}", addr), rx)
}

/// A base URL on which nothing is listening
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr: SocketAddr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{}", addr)
}
