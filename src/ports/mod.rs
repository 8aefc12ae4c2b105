//! Port traits for external collaborators.

pub mod price_port;
