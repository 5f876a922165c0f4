//! ptero API - blocking client for the Pterodactyl panel REST APIs.
//!
//! A panel exposes two surfaces: the application API for administrators
//! and the client API scoped to one account. This crate classifies an API
//! key against them once, at connect time, and then lists and fetches
//! servers from whichever surface the key unlocks, reconciling both JSON
//! shapes into one [`ServerRecord`].

pub mod connection;
pub mod endpoints;
pub mod normalize;
pub mod response;
pub mod transport;

// Re-export key types
pub use connection::{ApiMode, Connection, Surface};
pub use normalize::{
    normalize, AdminDetails, AllocationRecord, ClientDetails, ServerDetails, ServerRecord,
    VariableRecord,
};
pub use response::PaginationState;
pub use transport::{HttpResponse, HttpTransport, Transport};
