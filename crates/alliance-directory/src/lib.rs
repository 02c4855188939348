//! # alliance-directory
//!
//! HTTP client for the remote people directory. Implements the
//! `DirectoryClient` trait from `alliance-core`: fetch an organization's
//! roster snapshot as JSON and decode it into the domain `Roster`.

mod client;
mod wire;

pub use client::{HttpDirectoryClient, HttpDirectoryConfig};
