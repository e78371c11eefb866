//!# Synology FileStation API Client
//!
//! A Rust client library for interacting with the Synology FileStation API. Manage files on your DiskStation programmatically with a strongly-typed interface.
//!
//! ## Features
//!
//! - Authentication with Synology API
//! - Upload files, with optional creation/modification/access timestamps, overwrite policy and parent-directory creation
//! - List shared folders (owner, real path, timestamps, volume status)
//! - Rename files and folders
//! - Query FileStation capabilities
//! - Typed errors, including a dedicated "file already exists" error for uploads
//! - Human-readable file sizes
//!
//! ## Usage example
//!
//! ```rust,no_run
//! use anyhow::Result;
//! use std::env;
//! use syno_file_station::client::SynoFS;
//! use syno_file_station::upload::{OverwriteBehavior, UploadRequest};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let mut synofs = {
//!         let host = env::var("SYNOLOGY_HOST")?;
//!         let username = env::var("SYNOLOGY_USERNAME")?;
//!         let password = env::var("SYNOLOGY_PASSWORD")?;
//!         SynoFS::builder()
//!             .host(host)
//!             .username(username)
//!             .password(password)
//!             .build()?
//!     };
//!
//!     synofs.authorize().await?;
//!
//!     for share in synofs.list_shares(false).await?.shares {
//!         println!("share: {}, path: {}", share.name, share.path);
//!     }
//!
//!     let request = UploadRequest::builder("/home/docs", "hello.txt", b"hello".to_vec())
//!         .overwrite_behavior(OverwriteBehavior::Overwrite)
//!         .create_parents(true)
//!         .build()?;
//!     synofs.upload(&request).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod entities;
pub mod multipart;
pub mod upload;
pub mod utils;
