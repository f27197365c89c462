//! # Route Modules
//!
//! - `home`: landing page built from the remote catalog.
//! - `upload`: upload form and the Upload Handler (`/uploadFile`).
//! - `play`: the Build Retrieval Handler (`/play`).
//! - `builds`: JSON listing of a game's builds.

pub mod builds;
pub mod home;
pub mod play;
pub mod upload;
