//! Image repository layer for imgserve.
//!
//! This module owns everything that touches the static root on disk.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Repository Layer                       │
//! │                                                            │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │   validate   │  │    browse    │  │      media       │  │
//! │  │ (input rules)│  │ (dir listing)│  │ (path + MIME)    │  │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! All filesystem access is confined to subpaths of one configured static
//! root: the validators reject path separators and parent segments outright,
//! and [`media::resolve_image`] verifies the canonicalized result still lives
//! under the canonicalized root.

pub mod browse;
pub mod media;
pub mod validate;

pub use browse::{ImageRepository, LISTED_IMAGE_EXTENSIONS};
pub use media::{guess_mime, resolve_image};
pub use validate::{validate_filename, validate_folder, ALLOWED_IMAGE_EXTENSIONS};
