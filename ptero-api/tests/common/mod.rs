//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use ptero_api::{Connection, HttpResponse, Transport};
use ptero_core::config::PanelConfig;
use ptero_core::error::{PteroError, PteroResult};
use ptero_core::logging::MemoryLog;

pub const PANEL: &str = "https://panel.test";
pub const ADMIN_KEY: &str = "ptla_admin";
pub const CLIENT_KEY: &str = "ptlc_client";

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
enum Reply {
    Status(u16, String),
    Fail(String),
}

#[derive(Default)]
struct Script {
    routes: HashMap<String, VecDeque<Reply>>,
    requests: Vec<Recorded>,
}

/// Transport that answers from a per-URL script and records every request.
///
/// Each URL holds a queue of replies; the last reply repeats once the queue
/// is down to one. Unscripted URLs answer 404.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, path: &str, reply: Reply) -> Self {
        self.script
            .lock()
            .unwrap()
            .routes
            .entry(format!("{PANEL}{path}"))
            .or_default()
            .push_back(reply);
        self
    }

    /// Answer `path` with `status` and a JSON body.
    pub fn reply(self, path: &str, status: u16, body: Value) -> Self {
        self.push(path, Reply::Status(status, body.to_string()))
    }

    /// Answer `path` with `status` and a raw body.
    pub fn reply_raw(self, path: &str, status: u16, body: &str) -> Self {
        self.push(path, Reply::Status(status, body.to_string()))
    }

    /// Fail `path` at the transport level.
    pub fn fail(self, path: &str, message: &str) -> Self {
        self.push(path, Reply::Fail(message.to_string()))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().requests.clone()
    }

    /// Requested URLs with the panel prefix stripped, in order.
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.url.trim_start_matches(PANEL).to_string())
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
        timeout: Duration,
    ) -> PteroResult<HttpResponse> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(Recorded {
            url: url.to_string(),
            headers: headers.to_vec(),
            timeout,
        });

        let reply = match script.routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(Reply::Status(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(Reply::Fail(message)) => Err(PteroError::Timeout(message)),
            None => Ok(HttpResponse::new(404, r#"{"errors":[{"code":"NotFoundHttpException"}]}"#)),
        }
    }
}

pub fn panel_config(key: &str) -> PanelConfig {
    PanelConfig::new(PANEL, key)
}

/// Connect through `transport`, capturing logs in the returned sink.
pub fn connect(key: &str, transport: &ScriptedTransport) -> (Connection, Arc<MemoryLog>) {
    connect_with(&panel_config(key), transport)
}

pub fn connect_with(config: &PanelConfig, transport: &ScriptedTransport) -> (Connection, Arc<MemoryLog>) {
    let log = Arc::new(MemoryLog::new());
    let conn = Connection::connect(config, Arc::new(transport.clone()), log.clone());
    (conn, log)
}

/// Transport where the admin probe succeeds.
pub fn admin_panel() -> ScriptedTransport {
    ScriptedTransport::new().reply("/api/application/users", 200, json!({"object": "list", "data": []}))
}

/// Transport where only the client probe succeeds.
pub fn client_panel() -> ScriptedTransport {
    ScriptedTransport::new()
        .reply("/api/application/users", 403, json!({"errors": [{"code": "AccessDeniedHttpException"}]}))
        .reply("/api/client", 200, json!({"object": "list", "data": []}))
}

/// Application API server attributes.
pub fn admin_server(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "external_id": null,
        "uuid": format!("{id:08x}-0000-4000-8000-000000000000"),
        "identifier": format!("{id:08x}"),
        "name": name,
        "description": "",
        "suspended": false,
        "limits": {"memory": 1024, "swap": 0, "disk": 5120, "io": 500, "cpu": 100},
        "feature_limits": {"databases": 1, "allocations": 1, "backups": 1},
        "user": 1,
        "node": 2,
        "allocation": 10 + id,
        "nest": 1,
        "egg": 3,
        "container": {"startup_command": "./start.sh", "image": "ghcr.io/pterodactyl/yolks:debian", "environment": {}},
        "created_at": "2024-01-01T00:00:00+00:00",
        "updated_at": "2024-02-01T00:00:00+00:00"
    })
}

/// Client API server attributes with one allocation and one variable.
pub fn client_server(internal_id: i64, name: &str) -> Value {
    json!({
        "server_owner": true,
        "identifier": format!("{internal_id:08x}"),
        "internal_id": internal_id,
        "uuid": format!("{internal_id:08x}-0000-4000-8000-000000000000"),
        "name": name,
        "node": "node-a",
        "status": null,
        "description": "",
        "limits": {"memory": 1024, "swap": 0, "disk": 5120, "io": 500, "cpu": 100},
        "invocation": "./start.sh",
        "docker_image": "ghcr.io/pterodactyl/yolks:debian",
        "feature_limits": {"databases": 1, "allocations": 1, "backups": 1},
        "is_suspended": false,
        "is_installing": false,
        "is_transferring": false,
        "relationships": {
            "allocations": {"object": "list", "data": [
                {"object": "allocation", "attributes": {
                    "id": internal_id * 10, "ip": "10.0.0.5", "ip_alias": null,
                    "port": 25565, "notes": null, "is_default": true
                }}
            ]},
            "variables": {"object": "list", "data": [
                {"object": "egg_variable", "attributes": {
                    "name": "Server Port", "description": "", "env_variable": "SERVER_PORT",
                    "default_value": "25565", "server_value": "25565",
                    "is_editable": false, "rules": "required|numeric"
                }}
            ]}
        }
    })
}

/// A list page with pagination metadata.
pub fn page(servers: Vec<Value>, current: u32, total_pages: u32) -> Value {
    let count = servers.len();
    json!({
        "object": "list",
        "data": servers.into_iter().map(|s| json!({"object": "server", "attributes": s})).collect::<Vec<_>>(),
        "meta": {"pagination": {
            "total": count,
            "count": count,
            "per_page": 50,
            "current_page": current,
            "total_pages": total_pages,
            "links": {}
        }}
    })
}

/// A list page without any `meta` block.
pub fn bare_page(servers: Vec<Value>) -> Value {
    json!({
        "object": "list",
        "data": servers.into_iter().map(|s| json!({"object": "server", "attributes": s})).collect::<Vec<_>>()
    })
}
