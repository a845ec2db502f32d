//! Data models for OpenAlex-shaped payloads.
//!
//! Only the fields the portal passes through are modelled; everything is
//! `#[serde(default)]` so partial `select=` responses still decode.

mod list;
mod work;

pub use list::{ListMeta, ListPage};
pub use work::{Work, reconstruct_abstract};
