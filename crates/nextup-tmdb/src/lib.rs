mod api;
pub mod client;
pub mod error;
pub mod traits;

pub use client::{TmdbClient, DEFAULT_API_BASE, DEFAULT_IMAGE_BASE};
pub use error::ProviderError;
pub use traits::MetadataProvider;
