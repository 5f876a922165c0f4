//! Server listing and lookup on either API surface.
//!
//! These operations never return an error. A failed request is logged on the
//! connection's sink, and the caller gets whatever was collected (listing)
//! or `None` (lookup).

use std::fmt::Display;

use ptero_core::logging::LogSink;

use crate::connection::{Connection, Surface};
use crate::normalize::{normalize, ServerRecord};
use crate::response::{DetailEnvelope, ListEnvelope, PaginationState};

impl Connection {
    /// List every server the key can see, following pagination.
    ///
    /// `search` filters by name on the application API. The client API has
    /// no server-side name filter, so it is ignored there. If a page fails,
    /// listing stops and the servers from earlier pages are returned.
    pub fn list_servers(&self, search: Option<&str>) -> Vec<ServerRecord> {
        let Some(surface) = self.mode().surface() else {
            self.log().error("API type not detected. Cannot list servers.");
            return Vec::new();
        };

        let search = search.filter(|s| !s.is_empty());
        if search.is_some() && !surface.supports_name_filter() {
            self.log()
                .debug("Name filter is not supported by the client API; listing all servers.");
        }

        let mut servers = Vec::new();
        let mut page: u32 = 1;

        loop {
            let path = list_path(surface, page, search);
            let envelope: ListEnvelope = match self.get_json(&path) {
                Ok(envelope) => envelope,
                Err(e) => {
                    self.report("Failed to list servers", "Error fetching server list", &e);
                    break;
                }
            };

            servers.extend(envelope.attributes().map(|attrs| normalize(surface, attrs)));

            // No pagination block means a single, unpaginated page
            let Some(state) = PaginationState::from_envelope(page, &envelope) else {
                break;
            };

            if self.debug_enabled() {
                self.log()
                    .debug(&format!("Fetched page {page} of {}", state.total_pages));
            }

            match state.next() {
                Some(next) => page = next,
                None => break,
            }
        }

        servers
    }

    /// Number of servers [`list_servers`](Self::list_servers) returns.
    pub fn total_servers(&self, search: Option<&str>) -> usize {
        let total = self.list_servers(search).len();
        self.log().info(&format!("Total servers found: {total}"));
        total
    }

    /// Fetch one server.
    ///
    /// The application API addresses servers by numeric id, while the client
    /// API takes the short identifier or uuid.
    pub fn server_details(&self, server: impl Display) -> Option<ServerRecord> {
        let Some(surface) = self.mode().surface() else {
            self.log()
                .error("API type not detected. Cannot fetch server details.");
            return None;
        };

        let path = detail_path(surface, &server.to_string());
        match self.get_json::<DetailEnvelope>(&path) {
            Ok(envelope) => Some(normalize(surface, &envelope.into_attributes())),
            Err(e) => {
                self.report(
                    "Failed to retrieve server details",
                    "Request error while retrieving server",
                    &e,
                );
                None
            }
        }
    }
}

fn list_path(surface: Surface, page: u32, search: Option<&str>) -> String {
    let mut path = format!("{}?page={page}", surface.list_path());
    if let Some(search) = search.filter(|_| surface.supports_name_filter()) {
        path.push_str("&filter[name]=");
        path.extend(url::form_urlencoded::byte_serialize(search.as_bytes()));
    }
    path
}

fn detail_path(surface: Surface, server: &str) -> String {
    format!("{}/{}", surface.detail_root(), urlencoding::encode(server))
}
