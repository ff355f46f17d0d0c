//! Read-only passthrough that republishes the raw device table.
//!
//! `GET /get-devices` answers with every record as a flat object of text
//! values. There are no query parameters and no filtering; the endpoint only
//! decouples where the data lives from whoever displays it.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tiny_http::{Header, Method, Request, Response, Server};

use crate::data::model::DeviceCollection;

pub const DEVICES_PATH: &str = "/get-devices";

/// JSON body for `GET /get-devices`.
pub fn devices_body(snapshot: &DeviceCollection) -> serde_json::Result<String> {
    serde_json::to_string(snapshot.records())
}

fn json_header() -> Option<Header> {
    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).ok()
}

/// Answer one request against the current snapshot.
pub fn handle(request: Request, snapshot: &DeviceCollection) {
    let path = request.url().split('?').next().unwrap_or_default().to_string();
    log::debug!("{} {}", request.method(), request.url());

    let response = if path != DEVICES_PATH {
        Response::from_string("Not found").with_status_code(404)
    } else if *request.method() != Method::Get {
        Response::from_string("Method not allowed").with_status_code(405)
    } else {
        match devices_body(snapshot) {
            Ok(body) => {
                let mut response = Response::from_string(body);
                if let Some(header) = json_header() {
                    response = response.with_header(header);
                }
                response
            }
            Err(e) => {
                log::error!("Failed to encode devices: {e}");
                Response::from_string("Internal error").with_status_code(500)
            }
        }
    };

    if let Err(e) = request.respond(response) {
        log::warn!("Failed to send response for {path}: {e}");
    }
}

/// Spawn `workers` threads pulling requests from `server`.
///
/// All workers read the same immutable snapshot. The threads run until
/// `server.unblock()` is called once per worker.
pub fn serve(
    server: Arc<Server>,
    snapshot: Arc<DeviceCollection>,
    workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..workers.max(1))
        .map(|id| {
            let server = Arc::clone(&server);
            let snapshot = Arc::clone(&snapshot);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    handle(request, &snapshot);
                }
                log::debug!("api worker {id} stopped");
            })
        })
        .collect()
}
