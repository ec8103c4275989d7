//! JSON-file implementation of the storage traits.

pub mod connection;
pub mod tab_repository;

pub use connection::JsonConnection;
