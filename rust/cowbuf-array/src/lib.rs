//! Growable arrays of fixed-width code units with shared, copy-on-write storage.
//!
//! [`ArrayData`] is the storage layer of the byte and UTF-16 string types: a
//! handle to a reference-counted allocation that keeps free slots at both
//! ends, so that appends and prepends are amortized O(1), and that is copied
//! only when a shared handle is mutated. Arrays can also alias static or
//! caller-provided memory without copying it.

pub mod growth;
pub mod stats;

mod data;
mod element;
mod header;
mod ops;

pub use data::ArrayData;
pub use element::Element;
pub use header::ArrayFlags;

#[cfg(test)]
mod tests;
