/// Tutorial identifiers are stable integers assigned in the catalog.
pub type TutorialId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
