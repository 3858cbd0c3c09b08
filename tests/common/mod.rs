#![allow(clippy::unwrap_used, dead_code)]
//! A minimal stand-in for the Baidu translation endpoint.
//!
//! Answers each GET with a canned translation looked up by the `q`
//! parameter, or with an API error for unknown text. Every request is
//! counted and recorded.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use reqwest::Url;

pub struct MockServer {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockServer {
    pub fn start(table: &[(&str, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!(
            "http://{}/api/trans/vip/translate",
            listener.local_addr().unwrap()
        );

        let table: HashMap<String, String> = table
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &table, &recorded);
            }
        });

        Self { endpoint, requests }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(
    stream: TcpStream,
    table: &HashMap<String, String>,
    recorded: &Mutex<Vec<HashMap<String, String>>>,
) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap_or(0) == 0 || header == "\r\n" {
            break;
        }
    }

    let target = request_line.split_whitespace().nth(1).unwrap_or("/");
    let url = Url::parse(&format!("http://localhost{target}")).unwrap();
    let query: HashMap<String, String> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let source = query.get("q").cloned().unwrap_or_default();
    let body = table.get(&source).map_or_else(
        || {
            serde_json::json!({ "error_code": "54000", "error_msg": "PARAM_FROM_TO_OR_Q_EMPTY" })
        },
        |dst| {
            serde_json::json!({
                "from": query.get("from"),
                "to": query.get("to"),
                "trans_result": [{ "src": source, "dst": dst }]
            })
        },
    )
    .to_string();

    recorded.lock().unwrap().push(query);

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let mut stream = stream;
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();
}
