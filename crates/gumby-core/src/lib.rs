//! Typed document schema for the Gumby catalog of tracked individuals.
//!
//! Defines strongly-typed field kinds on top of keyword storage (an
//! enumeration-backed keyword and a UUID keyword), the `Encounter` and
//! `Individual` schemas built from them, and lossless conversion between the
//! in-memory types and the store-native JSON documents. Every schema
//! operation is a pure function; only the [`store::DocumentStore`] trait is
//! async.

pub mod coerce;
pub mod document;
pub mod encounter;
pub mod enumeration;
pub mod error;
pub mod field;
pub mod geo;
pub mod individual;
pub mod path;
pub mod sex;
pub mod store;

pub use document::{Document, IndexedDocument, StoreDocument};
pub use encounter::Encounter;
pub use enumeration::Enumeration;
pub use error::{Error, Result, ValidationErrors};
pub use geo::GeoPoint;
pub use individual::Individual;
pub use sex::Sex;
