//! Filesystem adapter for the credential store port.

mod atomic_io;
mod file_store;

pub use file_store::FileCredentialStore;
