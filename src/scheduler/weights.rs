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

use crate::scheduler::group::Buckets;
use crate::scheduler::group::Group;

/// How much a group's weight grows per tick it goes unpicked. This is what
/// guarantees liveness: any non-empty group outgrows the others eventually.
pub const STALENESS_BONUS: u64 = 2;

fn base_weight(group: Group) -> u64 {
    match group {
        Group::Hard => 100,
        Group::Learning => 60,
        Group::New => 40,
        Group::Mastered => 5,
    }
}

/// Whether the active workload meets the cap. When capped, the intake of new
/// words is paused outright, not merely deprioritized.
pub fn is_capped(active_count: usize, threshold: usize) -> bool {
    active_count >= threshold
}

/// The tick at which each group was last picked.
#[derive(Clone, Copy, Default, Debug)]
pub struct LastPicked([u64; 4]);

impl LastPicked {
    pub fn get(&self, group: Group) -> u64 {
        self.0[group.index()]
    }

    pub fn set(&mut self, group: Group, tick: u64) {
        self.0[group.index()] = tick;
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Weights([u64; 4]);

impl Weights {
    pub fn get(&self, group: Group) -> u64 {
        self.0[group.index()]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

/// Weigh the four groups for one pick cycle.
///
/// An empty group weighs zero, whatever the formula says. A capped New group
/// weighs zero, whatever its staleness. Everything else weighs its base
/// priority plus the staleness bonus.
pub fn weigh(buckets: &Buckets, tick: u64, last_picked: &LastPicked, capped: bool) -> Weights {
    let mut weights = [0u64; 4];
    for group in Group::ALL {
        if buckets.get(group).is_empty() {
            continue;
        }
        if group == Group::New && capped {
            continue;
        }
        let staleness = tick.saturating_sub(last_picked.get(group));
        weights[group.index()] = base_weight(group) + staleness * STALENESS_BONUS;
    }
    Weights(weights)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::scheduler::group::classify;
    use crate::types::grade::Grade;
    use crate::types::record::PerformanceRecord;
    use crate::types::timestamp::Timestamp;
    use crate::types::word::Word;

    fn word(name: &str) -> Word {
        Word {
            word: name.to_string(),
            translation: name.to_uppercase(),
            category: String::new(),
            part_of_speech: String::new(),
            tags: Vec::new(),
        }
    }

    fn record(streak: u32, grade: Grade) -> PerformanceRecord {
        PerformanceRecord {
            last_grade: grade,
            last_reviewed_at: Timestamp::from_millis(1_000),
            streak,
        }
    }

    /// One word per group.
    fn full_buckets() -> Buckets {
        let pool = vec![word("n"), word("h"), word("l"), word("m")];
        let mut records = HashMap::new();
        records.insert("h".to_string(), record(0, Grade::Hard));
        records.insert("l".to_string(), record(1, Grade::Easy));
        records.insert("m".to_string(), record(3, Grade::Easy));
        classify(&pool, &records)
    }

    #[test]
    fn test_is_capped() {
        assert!(!is_capped(0, 30));
        assert!(!is_capped(29, 30));
        assert!(is_capped(30, 30));
        assert!(is_capped(31, 30));
    }

    #[test]
    fn test_base_weights_at_tick_zero() {
        let buckets = full_buckets();
        let weights = weigh(&buckets, 0, &LastPicked::default(), false);
        assert_eq!(weights.get(Group::Hard), 100);
        assert_eq!(weights.get(Group::Learning), 60);
        assert_eq!(weights.get(Group::New), 40);
        assert_eq!(weights.get(Group::Mastered), 5);
        assert_eq!(weights.total(), 205);
    }

    #[test]
    fn test_staleness_bonus() {
        let buckets = full_buckets();
        let mut last_picked = LastPicked::default();
        last_picked.set(Group::Hard, 7);
        let weights = weigh(&buckets, 7, &last_picked, false);
        // Hard was just picked; the others have been stale for 7 ticks.
        assert_eq!(weights.get(Group::Hard), 100);
        assert_eq!(weights.get(Group::Learning), 60 + 14);
        assert_eq!(weights.get(Group::New), 40 + 14);
        assert_eq!(weights.get(Group::Mastered), 5 + 14);
    }

    #[test]
    fn test_capped_new_weighs_zero_at_any_staleness() {
        let buckets = full_buckets();
        for tick in [0, 1, 100, 1_000_000] {
            let weights = weigh(&buckets, tick, &LastPicked::default(), true);
            assert_eq!(weights.get(Group::New), 0);
            assert!(weights.get(Group::Hard) > 0);
        }
    }

    #[test]
    fn test_empty_group_weighs_zero() {
        // Pool of one new word: every other group is empty.
        let pool = vec![word("n")];
        let buckets = classify(&pool, &HashMap::new());
        let weights = weigh(&buckets, 50, &LastPicked::default(), false);
        assert_eq!(weights.get(Group::Hard), 0);
        assert_eq!(weights.get(Group::Learning), 0);
        assert_eq!(weights.get(Group::Mastered), 0);
        assert_eq!(weights.get(Group::New), 40 + 50 * STALENESS_BONUS);
    }

    #[test]
    fn test_neglected_weight_grows_without_bound() {
        let buckets = full_buckets();
        let mut previous = 0;
        for tick in [10, 100, 1_000, 10_000] {
            let weights = weigh(&buckets, tick, &LastPicked::default(), false);
            let mastered = weights.get(Group::Mastered);
            assert!(mastered > previous);
            previous = mastered;
        }
        // At large staleness the mastered group outweighs all the others
        // combined, since only it has gone unpicked.
        let mut last_picked = LastPicked::default();
        let tick = 10_000;
        last_picked.set(Group::Hard, tick);
        last_picked.set(Group::Learning, tick);
        last_picked.set(Group::New, tick);
        let weights = weigh(&buckets, tick, &last_picked, false);
        let others = weights.get(Group::Hard) + weights.get(Group::Learning) + weights.get(Group::New);
        assert!(weights.get(Group::Mastered) > others);
    }
}
