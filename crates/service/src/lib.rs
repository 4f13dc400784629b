//! Business layer on top of the `models` crate.
//! - Validates input and pagination/sort parameters before storage is touched.
//! - Applies partial-update merge semantics.
//! - Exposes a repository trait so storage is injected, never ambient.

pub mod advertisement;
pub mod errors;
pub mod pagination;
