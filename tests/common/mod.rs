// tests/common/mod.rs
//
// Tiny in-process HTTP stub: canned answers per request path, every request
// path recorded. One request per connection (`Connection: close`).
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

pub mod fakes;

pub struct Canned {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Canned {
    pub fn json(status: u16, body: &str) -> Self {
        Self { status, content_type: "application/json", body: body.as_bytes().to_vec() }
    }

    pub fn not_found() -> Self {
        Self::json(404, r#"{"detail":"Not Found"}"#)
    }
}

type Route = dyn Fn(&str) -> Canned + Send + Sync;

pub struct Stub {
    pub base: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl Stub {
    /// Serve `route(path_and_query)` on a random local port.
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&str) -> Canned + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(Mutex::new(Vec::new()));
        let route: Arc<Route> = Arc::new(route);

        let log = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let (route, log) = (Arc::clone(&route), Arc::clone(&log));
                thread::spawn(move || serve(stream, route.as_ref(), &log));
            }
        });

        Self { base, hits }
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn serve(mut stream: TcpStream, route: &Route, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // skip headers; GET requests carry no body
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {}
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
    log.lock().unwrap().push(path.clone());

    let canned = route(&path);
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        canned.status,
        reason(canned.status),
        canned.content_type,
        canned.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&canned.body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Client that never goes through an environment proxy.
pub fn client() -> Client {
    Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

pub const SCHOOL_42: &str = r##"{
    "id": 42,
    "name": "Lincoln High",
    "address": "1 Main St",
    "city": "Springfield",
    "state": "IL",
    "district": "Springfield SD 186",
    "grades": "9-12",
    "national_rank": "#50"
}"##;

pub const RANKINGS_42: &str = r##"[
    {"year": 2021, "national_rank": 50, "math_proficiency": "85%", "medal_awarded": "Gold"},
    {"year": "2020", "national_rank": "#60", "math_proficiency": 80, "medal_awarded": "Silver"}
]"##;
