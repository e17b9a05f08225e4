#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Invalid date window: {0}")]
    InvalidWindow(String),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
