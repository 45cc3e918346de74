// Export pipeline: validate → compose → encode.
// Composition and encoding are CPU-bound and run via tokio::task::spawn_blocking.

pub mod handlers;
pub mod service;
