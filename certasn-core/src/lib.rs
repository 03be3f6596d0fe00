//! Core types and utilities for the certasn DER codec
//!
//! This crate provides the error catalog, encoding-type and structure
//! identifiers, decode flags, and the typed value model shared by the
//! codec, provider, and dispatch layers.

pub mod datatypes;
pub mod error;
pub mod flags;
pub mod ids;

pub use error::{CodecError, CodecResult};
pub use flags::DecodeFlags;
pub use ids::{EncodingType, StructId};
