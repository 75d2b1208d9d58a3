//! Numeric normalization
//!
//! DynamoDB stores numbers as exact decimals and the SDK has no notion of a
//! binary float. This module turns a schema-less JSON tree into an
//! [`AttrValue`] tree in which every float has become an exact decimal.
//!
//! # Overview
//!
//! - [`normalize`] walks any JSON value recursively
//! - [`normalize_record`] does the same for one top-level record
//! - [`float_to_number`] is the per-float conversion: the float is first
//!   rendered to its shortest round-trip text, and that text is parsed as a
//!   decimal, so `0.1` stays `0.1` instead of `0.1000000000000000055...`

mod normalizer;
mod value;

pub use normalizer::{float_to_number, normalize, normalize_record};
pub use value::{AttrValue, Item, Number};
