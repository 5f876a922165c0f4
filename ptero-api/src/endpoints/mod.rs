//! API endpoint modules organized by resource.
//!
//! Each module adds methods to [`Connection`](crate::connection::Connection)
//! for a group of related panel endpoints.

pub mod servers;
