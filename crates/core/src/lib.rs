//! Folio domain core.
//!
//! Record schema, date normalization, the gallery list pipeline, tag
//! presentation, the detail slider builder and the locale catalog. This
//! crate has no I/O; the store adapters live in `folio-db` and
//! `folio-storage`.

pub mod date;
pub mod error;
pub mod gate;
pub mod listing;
pub mod locale;
pub mod project;
pub mod slides;
pub mod tags;
pub mod types;
