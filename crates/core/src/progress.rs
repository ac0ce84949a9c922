//! Per-user training progress tracking.
//!
//! The [`ProgressTracker`] is the mutable half of the service: a
//! process-wide map from user id (an unverified, client-supplied phone
//! number string) to that user's completion records, plus the
//! training-complete gate derived from the catalog.
//!
//! State is volatile by design and lives for the process lifetime only.
//! The store is owned by the application and injected into handlers rather
//! than living in a module-level global.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::types::{Timestamp, TutorialId};

/// Completion state for one (user, tutorial) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub completed: bool,
    #[serde(rename = "completedAt")]
    pub completed_at: Timestamp,
}

/// All progress for one user.
///
/// Per-tutorial records are keyed by the tutorial id rendered as a string
/// (JSON object keys on the wire). The training-complete record is held in
/// its own field so statistics never have to filter it out of the
/// per-tutorial records, but it serializes to the same `trainingCompleted`
/// key clients expect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(flatten)]
    pub tutorials: HashMap<String, ProgressRecord>,
    #[serde(rename = "trainingCompleted", skip_serializing_if = "Option::is_none")]
    pub training_completed: Option<ProgressRecord>,
}

impl UserProgress {
    /// Number of the given tutorial ids recorded as completed.
    ///
    /// Records for ids outside the given set are ignored, which keeps the
    /// completion rate within [0, 100] even though writes accept any id.
    pub fn completed_count<I>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = TutorialId>,
    {
        ids.into_iter()
            .filter(|id| {
                self.tutorials
                    .get(&id.to_string())
                    .is_some_and(|r| r.completed)
            })
            .count()
    }

    /// Whether the training-complete gate has been passed.
    pub fn is_training_complete(&self) -> bool {
        self.training_completed.is_some_and(|r| r.completed)
    }

    /// Latest completion timestamp across all records, including the
    /// training-complete record. `None` when nothing has been recorded.
    pub fn last_updated(&self) -> Option<Timestamp> {
        self.tutorials
            .values()
            .chain(self.training_completed.as_ref())
            .map(|r| r.completed_at)
            .max()
    }
}

/// Aggregate completion statistics for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStats {
    /// Catalog tutorials recorded as completed.
    pub completed_count: usize,
    pub total_tutorials: usize,
    /// Whole-number percentage in [0, 100]; 0 for an empty catalog.
    pub completion_rate: u32,
    pub is_training_complete: bool,
    pub last_updated: Option<Timestamp>,
}

/// In-memory per-user progress store.
///
/// Handlers run on a multi-threaded runtime, so the store carries a lock
/// to keep each logical update atomic and immediately visible to
/// subsequent reads. Critical sections never block or await.
#[derive(Debug)]
pub struct ProgressTracker {
    catalog: Arc<Catalog>,
    users: RwLock<HashMap<String, UserProgress>>,
}

impl ProgressTracker {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Stored progress for `user_id`, or an empty map for an unknown user.
    pub fn progress(&self, user_id: &str) -> Result<UserProgress, CoreError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.get(user_id).cloned().unwrap_or_default())
    }

    /// Upsert the completion record for one tutorial.
    ///
    /// Latest write wins: a second call for the same tutorial id replaces
    /// the earlier record, it is never additive. `completed` defaults to
    /// `true` and `completed_at` to the current time when omitted. The
    /// user entry is created lazily on first write. Returns the full
    /// updated map.
    pub fn record_completion(
        &self,
        user_id: &str,
        tutorial_id: TutorialId,
        completed: Option<bool>,
        completed_at: Option<Timestamp>,
    ) -> Result<UserProgress, CoreError> {
        validate_user_id(user_id)?;

        let record = ProgressRecord {
            completed: completed.unwrap_or(true),
            completed_at: completed_at.unwrap_or_else(chrono::Utc::now),
        };

        let mut users = self.users.write().map_err(|_| poisoned())?;
        let progress = users.entry(user_id.to_owned()).or_default();
        progress.tutorials.insert(tutorial_id.to_string(), record);

        Ok(progress.clone())
    }

    /// Pass the training-complete gate.
    ///
    /// Requires every tutorial id in the catalog to have a record with
    /// `completed = true`. A failed gate does not create the user entry,
    /// preserving lazy creation on first progress write.
    pub fn mark_training_complete(
        &self,
        user_id: &str,
        completed_at: Option<Timestamp>,
    ) -> Result<UserProgress, CoreError> {
        validate_user_id(user_id)?;

        let mut users = self.users.write().map_err(|_| poisoned())?;

        let current = users.get(user_id);
        let all_completed = self.catalog.ids().all(|id| {
            current
                .and_then(|p| p.tutorials.get(&id.to_string()))
                .is_some_and(|r| r.completed)
        });
        if !all_completed {
            return Err(CoreError::Precondition(
                "all tutorials must be completed before marking training as complete".to_owned(),
            ));
        }

        let progress = users.entry(user_id.to_owned()).or_default();
        progress.training_completed = Some(ProgressRecord {
            completed: true,
            completed_at: completed_at.unwrap_or_else(chrono::Utc::now),
        });

        Ok(progress.clone())
    }

    /// Aggregate completion statistics for `user_id`.
    ///
    /// Never fails for unknown users: they report zero completions.
    pub fn stats(&self, user_id: &str) -> Result<TrainingStats, CoreError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        let progress = users.get(user_id);

        let completed_count = progress.map_or(0, |p| p.completed_count(self.catalog.ids()));
        let total_tutorials = self.catalog.len();
        let completion_rate = if total_tutorials == 0 {
            0
        } else {
            (completed_count as f64 / total_tutorials as f64 * 100.0).round() as u32
        };

        Ok(TrainingStats {
            completed_count,
            total_tutorials,
            completion_rate,
            is_training_complete: progress.is_some_and(UserProgress::is_training_complete),
            last_updated: progress.and_then(UserProgress::last_updated),
        })
    }
}

fn validate_user_id(user_id: &str) -> Result<(), CoreError> {
    if user_id.trim().is_empty() {
        return Err(CoreError::Validation("userId is required".to_owned()));
    }
    Ok(())
}

fn poisoned() -> CoreError {
    CoreError::Internal("progress store lock poisoned".to_owned())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::tutorial::{Tutorial, TutorialContent};

    const USER: &str = "5551234567";

    fn catalog(count: i64) -> Arc<Catalog> {
        let tutorials = (1..=count)
            .map(|id| Tutorial {
                id,
                title: format!("Tutorial {id}"),
                description: format!("Description {id}"),
                content: TutorialContent::Text(format!("Content {id}")),
                estimated_time: "2 minutes".to_string(),
                order: id as u32,
            })
            .collect();
        Arc::new(Catalog::new(tutorials).unwrap())
    }

    fn tracker(tutorial_count: i64) -> ProgressTracker {
        ProgressTracker::new(catalog(tutorial_count))
    }

    fn ts(secs: i64) -> Timestamp {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    // -- progress -------------------------------------------------------------

    #[test]
    fn unknown_user_gets_an_empty_map() {
        let tracker = tracker(4);

        let progress = tracker.progress("0000000000").unwrap();

        assert!(progress.tutorials.is_empty());
        assert!(progress.training_completed.is_none());
    }

    #[test]
    fn differently_formatted_numbers_are_distinct_users() {
        let tracker = tracker(4);

        tracker.record_completion("5551234567", 1, None, None).unwrap();

        let other = tracker.progress("555-123-4567").unwrap();
        assert!(other.tutorials.is_empty());
    }

    // -- record_completion ----------------------------------------------------

    #[test]
    fn record_completion_defaults_to_completed_now() {
        let tracker = tracker(4);
        let before = Utc::now();

        let progress = tracker.record_completion(USER, 1, None, None).unwrap();

        let record = progress.tutorials.get("1").unwrap();
        assert!(record.completed);
        assert!(record.completed_at >= before);
    }

    #[test]
    fn record_completion_is_idempotent_latest_write_wins() {
        let tracker = tracker(4);

        tracker
            .record_completion(USER, 1, Some(true), Some(ts(100)))
            .unwrap();
        let progress = tracker
            .record_completion(USER, 1, Some(false), Some(ts(200)))
            .unwrap();

        // Still one record for tutorial 1, holding the latest write.
        assert_eq!(progress.tutorials.len(), 1);
        let record = progress.tutorials.get("1").unwrap();
        assert!(!record.completed);
        assert_eq!(record.completed_at, ts(200));
    }

    #[test]
    fn explicit_false_is_not_coerced_to_true() {
        let tracker = tracker(4);

        let progress = tracker
            .record_completion(USER, 2, Some(false), None)
            .unwrap();

        assert!(!progress.tutorials.get("2").unwrap().completed);
        assert_eq!(tracker.stats(USER).unwrap().completed_count, 0);
    }

    #[test]
    fn empty_user_id_is_rejected() {
        let tracker = tracker(4);

        assert_matches!(
            tracker.record_completion("", 1, None, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            tracker.record_completion("   ", 1, None, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn writes_are_immediately_visible_to_reads() {
        let tracker = tracker(4);

        tracker
            .record_completion(USER, 3, None, Some(ts(50)))
            .unwrap();

        let progress = tracker.progress(USER).unwrap();
        assert_eq!(progress.tutorials.get("3").unwrap().completed_at, ts(50));
    }

    // -- mark_training_complete -----------------------------------------------

    #[test]
    fn gate_fails_for_a_fresh_user() {
        let tracker = tracker(4);

        assert_matches!(
            tracker.mark_training_complete(USER, None),
            Err(CoreError::Precondition(_))
        );
        // The failed gate must not materialize an empty user entry.
        assert!(tracker.progress(USER).unwrap().tutorials.is_empty());
    }

    #[test]
    fn gate_fails_while_any_tutorial_is_incomplete() {
        let tracker = tracker(4);
        for id in 1..=3 {
            tracker.record_completion(USER, id, None, None).unwrap();
        }

        assert_matches!(
            tracker.mark_training_complete(USER, None),
            Err(CoreError::Precondition(_))
        );
    }

    #[test]
    fn gate_ignores_completions_outside_the_catalog() {
        let tracker = tracker(4);
        // Four completed records, but tutorial 4 is missing.
        for id in [1, 2, 3, 99] {
            tracker.record_completion(USER, id, None, None).unwrap();
        }

        assert_matches!(
            tracker.mark_training_complete(USER, None),
            Err(CoreError::Precondition(_))
        );
    }

    #[test]
    fn gate_fails_when_a_record_was_overwritten_to_incomplete() {
        let tracker = tracker(2);
        tracker.record_completion(USER, 1, None, None).unwrap();
        tracker.record_completion(USER, 2, None, None).unwrap();
        tracker
            .record_completion(USER, 2, Some(false), None)
            .unwrap();

        assert_matches!(
            tracker.mark_training_complete(USER, None),
            Err(CoreError::Precondition(_))
        );
    }

    #[test]
    fn gate_passes_once_all_tutorials_are_completed() {
        let tracker = tracker(4);
        for id in 1..=4 {
            tracker.record_completion(USER, id, None, None).unwrap();
        }

        let progress = tracker
            .mark_training_complete(USER, Some(ts(500)))
            .unwrap();

        let record = progress.training_completed.unwrap();
        assert!(record.completed);
        assert_eq!(record.completed_at, ts(500));
    }

    #[test]
    fn empty_user_id_is_rejected_before_the_gate() {
        let tracker = tracker(0);

        assert_matches!(
            tracker.mark_training_complete("", None),
            Err(CoreError::Validation(_))
        );
    }

    // -- stats ----------------------------------------------------------------

    #[test]
    fn stats_for_a_fresh_user() {
        let tracker = tracker(4);

        let stats = tracker.stats(USER).unwrap();

        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.total_tutorials, 4);
        assert_eq!(stats.completion_rate, 0);
        assert!(!stats.is_training_complete);
        assert!(stats.last_updated.is_none());
    }

    #[test]
    fn one_of_four_completions_is_25_percent() {
        let tracker = tracker(4);
        tracker.record_completion(USER, 1, None, None).unwrap();

        let stats = tracker.stats(USER).unwrap();

        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.total_tutorials, 4);
        assert_eq!(stats.completion_rate, 25);
        assert!(!stats.is_training_complete);
    }

    #[test]
    fn completion_rate_is_monotonic_and_bounded() {
        let tracker = tracker(7);
        let mut previous = tracker.stats(USER).unwrap().completion_rate;

        for id in 1..=7 {
            tracker.record_completion(USER, id, None, None).unwrap();
            let rate = tracker.stats(USER).unwrap().completion_rate;
            assert!(rate >= previous);
            assert!(rate <= 100);
            previous = rate;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn out_of_catalog_completions_do_not_inflate_the_rate() {
        let tracker = tracker(4);
        // Five completed records, one of them for an id the catalog
        // does not contain.
        for id in [1, 2, 3, 4, 99] {
            tracker.record_completion(USER, id, None, None).unwrap();
        }

        let stats = tracker.stats(USER).unwrap();

        assert_eq!(stats.completed_count, 4);
        assert_eq!(stats.completion_rate, 100);
    }

    #[test]
    fn only_out_of_catalog_completions_count_as_zero() {
        let tracker = tracker(4);
        tracker.record_completion(USER, 99, None, None).unwrap();

        let stats = tracker.stats(USER).unwrap();

        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn completion_rate_is_zero_for_an_empty_catalog() {
        let tracker = tracker(0);

        assert_eq!(tracker.stats(USER).unwrap().completion_rate, 0);
    }

    #[test]
    fn training_record_is_not_counted_as_a_tutorial() {
        let tracker = tracker(2);
        tracker.record_completion(USER, 1, None, None).unwrap();
        tracker.record_completion(USER, 2, None, None).unwrap();
        tracker.mark_training_complete(USER, None).unwrap();

        let stats = tracker.stats(USER).unwrap();

        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.completion_rate, 100);
        assert!(stats.is_training_complete);
    }

    #[test]
    fn last_updated_tracks_the_latest_write() {
        let tracker = tracker(2);
        tracker
            .record_completion(USER, 1, None, Some(ts(100)))
            .unwrap();
        tracker
            .record_completion(USER, 2, None, Some(ts(300)))
            .unwrap();

        assert_eq!(tracker.stats(USER).unwrap().last_updated, Some(ts(300)));

        tracker.mark_training_complete(USER, Some(ts(400))).unwrap();
        assert_eq!(tracker.stats(USER).unwrap().last_updated, Some(ts(400)));
    }

    // -- wire shape -----------------------------------------------------------

    #[test]
    fn user_progress_serializes_as_one_flat_map() {
        let tracker = tracker(1);
        tracker
            .record_completion(USER, 1, None, Some(ts(100)))
            .unwrap();
        let progress = tracker.mark_training_complete(USER, Some(ts(200))).unwrap();

        let json = serde_json::to_value(&progress).unwrap();

        assert!(json["1"]["completed"].as_bool().unwrap());
        assert!(json["trainingCompleted"]["completed"].as_bool().unwrap());
    }

    #[test]
    fn empty_progress_serializes_as_an_empty_object() {
        let json = serde_json::to_value(UserProgress::default()).unwrap();

        assert_eq!(json, serde_json::json!({}));
    }
}
