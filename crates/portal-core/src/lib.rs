//! # portal-core
//!
//! Core data model and storage for the captive-portal configuration server.
//!
//! This crate provides:
//! - Shared data types (Wi-Fi credentials, scan/address snapshots, size limits)
//! - The autoexec startup-command list and its slot-key scheme
//! - Command storage abstraction with memory- and file-backed implementations
//! - Quote escaping for JSON documents that are assembled by hand
//!
//! This crate is intentionally runtime-agnostic and contains no async code,
//! making it usable on both Linux and embedded targets.

pub mod autoexec;
pub mod escape;
pub mod model;
pub mod storage;

pub use model::{AccessPoint, CredentialError, Credentials, IpInfo, MAX_PASSWORD_LEN, MAX_SSID_LEN};
pub use storage::{CommandStore, FileCommandStore, MemoryCommandStore, StorageError};
