// Copyright 2026 The wordmill authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::grade::Grade;
use crate::types::timestamp::Timestamp;

/// Per-word performance, keyed by `(direction, word)` in the store.
///
/// A record exists if and only if the word has been graded at least once
/// under that direction. Absence of a record means the word is new.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PerformanceRecord {
    /// The most recent grading decision.
    pub last_grade: Grade,
    /// When the word was last reviewed.
    pub last_reviewed_at: Timestamp,
    /// Consecutive `Easy` grades since the last `Hard` grade, or since the
    /// record was created.
    pub streak: u32,
}

impl PerformanceRecord {
    /// Fold a grading decision into the record for a word, creating the
    /// record if this is the word's first grading.
    pub fn apply(previous: Option<PerformanceRecord>, grade: Grade, now: Timestamp) -> Self {
        let streak = match grade {
            Grade::Hard => 0,
            Grade::Easy => match previous {
                Some(record) => record.streak + 1,
                None => 1,
            },
        };
        Self {
            last_grade: grade,
            last_reviewed_at: now,
            streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(streak: u32, last_grade: Grade) -> PerformanceRecord {
        PerformanceRecord {
            last_grade,
            last_reviewed_at: Timestamp::from_millis(1_000),
            streak,
        }
    }

    #[test]
    fn test_first_grading() {
        let now = Timestamp::from_millis(2_000);
        let easy = PerformanceRecord::apply(None, Grade::Easy, now);
        assert_eq!(easy.streak, 1);
        assert_eq!(easy.last_grade, Grade::Easy);
        assert_eq!(easy.last_reviewed_at, now);
        let hard = PerformanceRecord::apply(None, Grade::Hard, now);
        assert_eq!(hard.streak, 0);
        assert_eq!(hard.last_grade, Grade::Hard);
    }

    #[test]
    fn test_easy_increments_streak() {
        let now = Timestamp::from_millis(2_000);
        for streak in [0, 1, 2, 3, 10] {
            let previous = record(streak, Grade::Easy);
            let updated = PerformanceRecord::apply(Some(previous), Grade::Easy, now);
            assert_eq!(updated.streak, streak + 1);
        }
    }

    #[test]
    fn test_hard_resets_streak() {
        let now = Timestamp::from_millis(2_000);
        for streak in [0, 1, 2, 3, 10] {
            let previous = record(streak, Grade::Easy);
            let updated = PerformanceRecord::apply(Some(previous), Grade::Hard, now);
            assert_eq!(updated.streak, 0);
            assert_eq!(updated.last_grade, Grade::Hard);
        }
    }

    #[test]
    fn test_mastery_boundary() {
        // Grading easy at streak 2 crosses into a streak of 3.
        let now = Timestamp::from_millis(2_000);
        let previous = record(2, Grade::Easy);
        let updated = PerformanceRecord::apply(Some(previous), Grade::Easy, now);
        assert_eq!(updated.streak, 3);
    }
}
