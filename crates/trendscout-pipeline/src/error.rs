use thiserror::Error;

/// Errors surfaced by the selection pipeline.
///
/// Filter rejections are not errors — they are per-candidate decisions with
/// a reason code. The only failure the pipeline propagates is an upstream
/// API failure, which is fatal for the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] trendscout_youtube::YouTubeError),
}
