#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;

use nba_schedule_notifier::config::{Config, Delivery};
use nba_schedule_notifier::error::{NotifyError, Result};
use nba_schedule_notifier::espn::parse_scoreboard;
use nba_schedule_notifier::model::game::OutboundMessage;
use nba_schedule_notifier::model::scoreboard::ScoreboardDocument;
use nba_schedule_notifier::pipeline::{MessageSink, ScheduleSource};

pub fn sample_body() -> String {
    std::fs::read_to_string("tests/sample_scoreboard.json").expect("failed to read sample_scoreboard.json")
}

pub fn empty_body() -> String {
    std::fs::read_to_string("tests/empty_scoreboard.json").expect("failed to read empty_scoreboard.json")
}

/// Config with both credentials set and the default Phoenix zone.
pub fn configured() -> Config {
    Config {
        bot_token: Some("123456:ABC-token".to_string()),
        chat_id: Some("-1001234".to_string()),
        test_chat_id: Some("-1009999".to_string()),
        ..Config::default()
    }
}

/// Schedule source that serves a canned body (or error) and counts calls.
pub struct FakeSource {
    response: std::result::Result<String, NotifyError>,
    pub calls: Cell<usize>,
    pub dates: RefCell<Vec<NaiveDate>>,
}

impl FakeSource {
    pub fn with_body(body: String) -> Self {
        Self { response: Ok(body), calls: Cell::new(0), dates: RefCell::new(Vec::new()) }
    }

    pub fn failing(error: NotifyError) -> Self {
        Self { response: Err(error), calls: Cell::new(0), dates: RefCell::new(Vec::new()) }
    }
}

impl ScheduleSource for FakeSource {
    fn fetch(&self, date: NaiveDate) -> Result<ScoreboardDocument> {
        self.calls.set(self.calls.get() + 1);
        self.dates.borrow_mut().push(date);
        match &self.response {
            Ok(body) => parse_scoreboard(body),
            Err(e) => Err(e.clone()),
        }
    }
}

/// Message sink that records every message it is handed.
#[derive(Default)]
pub struct FakeSink {
    fail_with: Option<NotifyError>,
    pub calls: Cell<usize>,
    pub sent: RefCell<Vec<(Delivery, OutboundMessage)>>,
}

impl FakeSink {
    pub fn failing(error: NotifyError) -> Self {
        Self { fail_with: Some(error), ..Self::default() }
    }
}

impl MessageSink for FakeSink {
    fn send(&self, delivery: &Delivery, message: &OutboundMessage) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        self.sent.borrow_mut().push((delivery.clone(), message.clone()));
        match &self.fail_with {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// A one-shot HTTP server on localhost: answers the first request with a fixed
/// response and hands back the raw request it received.
pub struct StubServer {
    pub base_url: String,
    requests: mpsc::Receiver<String>,
}

impl StubServer {
    pub fn respond(status_line: &str, body: &str) -> Self {
        Self::respond_raw(&format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        ))
    }

    /// Answer with exactly these bytes, e.g. a response whose body is shorter than its Content-Length.
    pub fn respond_raw(response: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let base_url = format!("http://{}", listener.local_addr().expect("stub addr"));
        let response = response.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else { return };
            let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
            let request = read_request(&mut stream);
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
            let _ = tx.send(request);
        });

        Self { base_url, requests: rx }
    }

    /// The raw request text, if a request arrived.
    pub fn received(&self) -> Option<String> {
        self.requests.recv_timeout(Duration::from_secs(5)).ok()
    }
}

fn read_request(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if headers.contains("transfer-encoding: chunked") {
                if buf.ends_with(b"0\r\n\r\n") {
                    break;
                }
                continue;
            }
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
