//! Canonical server records and the mapping from each surface's JSON shape.
//!
//! The application API and the client API describe the same servers with
//! different field names and different extras. [`normalize`] is the single
//! place that knows both shapes; callers only ever see [`ServerRecord`].
//!
//! Missing fields, explicit nulls and values of an unexpected JSON type all
//! come out as `None` (or an empty list). Normalization never fails.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::connection::{ApiMode, Surface};

/// A server as seen through either API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Numeric id. Application API `id`, client API `internal_id`.
    pub id: Option<i64>,
    pub uuid: Option<String>,
    /// Short identifier (first segment of the uuid).
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Resource limits object as returned by the panel.
    pub limits: Option<Value>,
    pub feature_limits: Option<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Surface-specific fields, tagged with `mode`.
    #[serde(flatten)]
    pub details: ServerDetails,
}

/// Fields only one surface provides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ServerDetails {
    Admin(AdminDetails),
    Client(ClientDetails),
}

/// Application API extras. The panel returns related objects as ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminDetails {
    pub suspended: Option<bool>,
    pub user_id: Option<i64>,
    pub node_id: Option<i64>,
    pub allocation_id: Option<i64>,
    pub nest_id: Option<i64>,
    pub egg_id: Option<i64>,
    /// Startup command, image and environment.
    pub container: Option<Value>,
}

/// Client API extras, including the expanded relationships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub status: Option<String>,
    /// Node name.
    pub node: Option<String>,
    /// Whether the requesting user owns the server.
    pub server_owner: Option<bool>,
    pub is_suspended: Option<bool>,
    pub is_installing: Option<bool>,
    pub is_transferring: Option<bool>,
    pub docker_image: Option<String>,
    pub invocation: Option<String>,
    pub allocations: Vec<AllocationRecord>,
    pub variables: Vec<VariableRecord>,
}

/// A network allocation (ip:port) assigned to a server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub id: Option<i64>,
    pub ip: Option<String>,
    pub ip_alias: Option<String>,
    pub port: Option<i64>,
    pub notes: Option<String>,
    pub is_default: Option<bool>,
}

/// A startup variable of a server's egg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub env_variable: Option<String>,
    pub default_value: Option<String>,
    pub server_value: Option<String>,
    pub is_editable: Option<bool>,
    pub rules: Option<String>,
}

/// Map a raw `attributes` object from `surface` into a [`ServerRecord`].
pub fn normalize(surface: Surface, attrs: &Value) -> ServerRecord {
    let (id_key, details) = match surface {
        Surface::Admin => ("id", ServerDetails::Admin(admin_details(attrs))),
        Surface::Client => ("internal_id", ServerDetails::Client(client_details(attrs))),
    };

    ServerRecord {
        id: int(attrs, id_key),
        uuid: text(attrs, "uuid"),
        identifier: text(attrs, "identifier"),
        name: text(attrs, "name"),
        description: text(attrs, "description"),
        limits: raw(attrs, "limits"),
        feature_limits: raw(attrs, "feature_limits"),
        created_at: text(attrs, "created_at"),
        updated_at: text(attrs, "updated_at"),
        details,
    }
}

fn admin_details(attrs: &Value) -> AdminDetails {
    AdminDetails {
        suspended: flag(attrs, "suspended"),
        user_id: int(attrs, "user"),
        node_id: int(attrs, "node"),
        allocation_id: int(attrs, "allocation"),
        nest_id: int(attrs, "nest"),
        egg_id: int(attrs, "egg"),
        container: raw(attrs, "container"),
    }
}

fn client_details(attrs: &Value) -> ClientDetails {
    ClientDetails {
        status: text(attrs, "status"),
        node: text(attrs, "node"),
        server_owner: flag(attrs, "server_owner"),
        is_suspended: flag(attrs, "is_suspended"),
        is_installing: flag(attrs, "is_installing"),
        is_transferring: flag(attrs, "is_transferring"),
        docker_image: text(attrs, "docker_image"),
        invocation: text(attrs, "invocation"),
        allocations: related(attrs, "allocations").map(allocation).collect(),
        variables: related(attrs, "variables").map(variable).collect(),
    }
}

fn allocation(attrs: &Value) -> AllocationRecord {
    AllocationRecord {
        id: int(attrs, "id"),
        ip: text(attrs, "ip"),
        ip_alias: text(attrs, "ip_alias"),
        port: int(attrs, "port"),
        notes: text(attrs, "notes"),
        is_default: flag(attrs, "is_default"),
    }
}

fn variable(attrs: &Value) -> VariableRecord {
    VariableRecord {
        name: text(attrs, "name"),
        description: text(attrs, "description"),
        env_variable: text(attrs, "env_variable"),
        default_value: text(attrs, "default_value"),
        server_value: text(attrs, "server_value"),
        is_editable: flag(attrs, "is_editable"),
        rules: text(attrs, "rules"),
    }
}

/// Attribute objects under `relationships.<name>.data[]`. An element
/// without `attributes` still yields an (all-absent) entry.
fn related<'a>(attrs: &'a Value, name: &str) -> impl Iterator<Item = &'a Value> {
    attrs
        .get("relationships")
        .and_then(|r| r.get(name))
        .and_then(|r| r.get("data"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(|item| item.get("attributes").unwrap_or(&NULL))
}

static NULL: Value = Value::Null;

fn field<'a>(attrs: &'a Value, key: &str) -> Option<&'a Value> {
    attrs.get(key).filter(|v| !v.is_null())
}

fn int(attrs: &Value, key: &str) -> Option<i64> {
    field(attrs, key).and_then(Value::as_i64)
}

fn text(attrs: &Value, key: &str) -> Option<String> {
    field(attrs, key).and_then(Value::as_str).map(str::to_string)
}

fn flag(attrs: &Value, key: &str) -> Option<bool> {
    field(attrs, key).and_then(Value::as_bool)
}

fn raw(attrs: &Value, key: &str) -> Option<Value> {
    field(attrs, key).cloned()
}

impl ServerRecord {
    /// The surface this record was fetched from.
    pub fn mode(&self) -> ApiMode {
        match self.details {
            ServerDetails::Admin(_) => ApiMode::Admin,
            ServerDetails::Client(_) => ApiMode::Client,
        }
    }

    pub fn admin(&self) -> Option<&AdminDetails> {
        match &self.details {
            ServerDetails::Admin(d) => Some(d),
            ServerDetails::Client(_) => None,
        }
    }

    pub fn client(&self) -> Option<&ClientDetails> {
        match &self.details {
            ServerDetails::Client(d) => Some(d),
            ServerDetails::Admin(_) => None,
        }
    }

    /// Suspension flag from whichever surface produced the record.
    pub fn is_suspended(&self) -> Option<bool> {
        match &self.details {
            ServerDetails::Admin(d) => d.suspended,
            ServerDetails::Client(d) => d.is_suspended,
        }
    }

    /// Allocations; always empty for application API records.
    pub fn allocations(&self) -> &[AllocationRecord] {
        self.client().map(|d| d.allocations.as_slice()).unwrap_or(&[])
    }

    /// Variables; always empty for application API records.
    pub fn variables(&self) -> &[VariableRecord] {
        self.client().map(|d| d.variables.as_slice()).unwrap_or(&[])
    }

    /// The allocation flagged as the server's primary one.
    pub fn default_allocation(&self) -> Option<&AllocationRecord> {
        self.allocations()
            .iter()
            .find(|a| a.is_default == Some(true))
    }

    pub fn created(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn updated(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(self.updated_at.as_deref())
    }
}

impl AllocationRecord {
    /// `alias:port` when an alias is set, `ip:port` otherwise.
    pub fn address(&self) -> Option<String> {
        let host = self.ip_alias.as_deref().or(self.ip.as_deref())?;
        Some(match self.port {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    value.and_then(|v| DateTime::parse_from_rfc3339(v).ok())
}
