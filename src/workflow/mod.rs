// src/workflow/mod.rs
//! Top-level workflows that chain the crypto pipeline with persistence
mod search;
mod submit;

pub use search::search_profiles;
pub use submit::{submit_profile, submit_request};
