//! Candidate admission, guaranteed-N selection, anchor profiles,
//! week-over-week trend analysis, and monthly topic discovery.

pub mod anchor;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod selector;
pub mod trend;

pub use anchor::{build_profile, SeedResolver};
pub use discovery::{competition, discover_topics, top_by_views, TOPIC_LIMIT};
pub use error::PipelineError;
pub use filter::{admit, RejectReason};
pub use selector::{select, AnchorRanking, CandidateSource, SelectionRequest, YouTubeSource};
pub use trend::analyze;
