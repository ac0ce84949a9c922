//! Domain logic for the rider onboarding training service.
//!
//! Holds the tutorial catalog, per-user progress tracking, and the domain
//! error taxonomy. This crate is runtime-free: no async, no HTTP -- the
//! `onboarding-api` crate adapts these types to the REST boundary.

pub mod catalog;
pub mod error;
pub mod progress;
pub mod tutorial;
pub mod types;

pub use catalog::Catalog;
pub use error::CoreError;
pub use progress::{ProgressRecord, ProgressTracker, TrainingStats, UserProgress};
pub use tutorial::{QuizContent, QuizQuestion, Tutorial, TutorialContent};
