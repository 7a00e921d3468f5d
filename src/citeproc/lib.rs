//! # Citeproc Attributes
//!
//! The schema-less data layer of a citation processor. Every domain object
//! the renderer consumes (items, names, dates) is built on one container type
//! and a small declaration table, instead of a hand-written struct per CSL
//! variable.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain types (implement HasAttributes)                     │
//! │  - Declare their fields once, in a static FieldTable        │
//! │  - Read/write/test fields through the generated operations  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Attribute container (attributes/)                          │
//! │  - Canonical keys, copy-on-store values                     │
//! │  - Atomic merge of mappings, JSON text and other containers │
//! │  - Projection to plain JSON for the renderer                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Extensions (ext.rs)                                        │
//! │  - DeepCopy: recursive, depth-guarded clone                 │
//! │  - DeepFetch: nested key path lookup                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O, No Locking
//!
//! Everything here is an in-memory transform. Nothing touches the filesystem
//! or the network. Mutation takes `&mut self`; a container shared between
//! threads must sit behind the caller's own lock.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`trace` for merges, `debug` for the
//! silent fallbacks) and never installs a subscriber.
//!
//! ## Module Overview
//!
//! - [`attributes`]: the container, merge sources, value capabilities and field tables
//! - [`ext`]: deep copy and deep fetch
//! - [`config`]: container configuration
//! - [`error`]: error types

pub mod attributes;
pub mod config;
pub mod error;
pub mod ext;

pub use attributes::{
    AttributeValue, Attributes, FieldDescriptor, FieldSpec, FieldTable, HasAttributes, Key,
    MergeSource,
};
pub use config::{AttributesConfig, JsonDetection};
pub use error::{AttributeError, Result};
pub use ext::{DeepCopy, DeepFetch};
