#![deny(missing_docs)]

//! # s42-core: Foundational Types for the Studio42 Build Server
//!
//! Every other crate in the workspace depends on this one. It performs no
//! I/O; it only defines the identifiers that are allowed to reach the
//! filesystem.
//!
//! ## Design Principles
//!
//! 1. **Identifiers are path segments.** A [`GameId`] is used verbatim as a
//!    directory name under the storage root, so construction enforces an
//!    allow-list. There is no way to obtain a `GameId` containing a path
//!    separator or a traversal segment.
//!
//! 2. **Versions are strictly positive.** A [`BuildVersion`] is the integer
//!    name of a build directory. Zero is reserved as the "unparsable" value
//!    used while ordering stray directories and is never constructible.

pub mod error;
pub mod game;
pub mod version;

pub use error::ValidationError;
pub use game::GameId;
pub use version::BuildVersion;
