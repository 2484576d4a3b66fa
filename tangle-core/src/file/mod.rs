//! The file module is the content and traversal layer the analysis engine
//! reads project sources through.
//!
//! ## Architecture
//!
//! ### reader.rs
//! Defines the `FileReader` capability contract: read with mtime-keyed
//! caching, existence/size probes that never fail, a synchronous read escape
//! hatch, and lazy directory enumeration. The engine depends only on this
//! trait, never on a concrete backend.
//!
//! ### local.rs
//! The real-filesystem backend. All content reads flow through the per-backend
//! content cache; file discovery uses the `ignore` crate's WalkBuilder so
//! `.gitignore` semantics apply during traversal.
//!
//! ### memory.rs
//! An in-memory backend for hermetic tests: seeded path -> content map,
//! manual recursive descent, deterministic output.
//!
//! ### ignore.rs / path.rs
//! Backend-agnostic helpers shared by both implementations. Configured ignore
//! globs are matched against two forms of every path (root-joined and raw) so
//! patterns authored relative to the project root and raw globs both work;
//! paths are normalized to forward slashes first so matching behaves the same
//! on backslash-separated platforms.
//!
//! ### classify.rs
//! The `SourceClassifier` seam. Which directories, files, and manifests count
//! as "supported" is the downstream engine's decision; traversal only
//! consults the trait.

pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod ignore;
pub mod local;
pub mod memory;
pub mod path;
pub mod reader;
