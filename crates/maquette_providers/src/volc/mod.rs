//! Volcano-style signed visual API backend.

mod client;
mod dto;
pub mod signing;

pub use client::VolcImageClient;
pub use dto::{VisualData, VisualRequest, VisualResponse};
