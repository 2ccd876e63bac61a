pub mod display;
pub mod fetch;
pub mod types;
pub mod workflow;

pub use types::{
    BoundingBox, Detection, HistoryEntry, HistoryResponse, PredictionResponse, PrimaryDetection,
    ProfileResponse, ProfileUser, StatsSnapshot,
};
