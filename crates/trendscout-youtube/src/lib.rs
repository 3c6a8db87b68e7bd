//! Typed client for the `YouTube` Data API v3 search/detail endpoints.

pub mod client;
pub mod duration;
pub mod error;
pub mod types;

pub use client::{DurationHint, SearchOrder, SearchRequest, YouTubeClient};
pub use duration::parse_duration_code;
pub use error::YouTubeError;
