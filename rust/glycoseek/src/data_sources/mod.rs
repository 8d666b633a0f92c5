pub mod scoring_job;

pub use scoring_job::{
    JobFormat,
    ScoringJob,
    ScoringTask,
};
