//! OpenAI Images API backend.

mod client;
mod dto;

pub use client::OpenAiImagesClient;
pub use dto::{ImageDatum, ImagesRequest, ImagesResponse};
