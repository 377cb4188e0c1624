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

use std::collections::HashMap;

use rand::Rng;

use crate::scheduler::group::Group;
use crate::scheduler::weights::Weights;
use crate::types::record::PerformanceRecord;
use crate::types::timestamp::Timestamp;
use crate::types::word::Word;

/// How many of the oldest words in a group are eligible on each pick.
const PICK_WINDOW: usize = 3;

/// Weighted random selection over the groups. Returns `None` when the total
/// weight is zero, which the caller treats as the end of the session. A
/// zero-weight group can never be drawn: the cumulative walk skips over its
/// empty span.
pub fn select_group(weights: &Weights, rng: &mut impl Rng) -> Option<Group> {
    let total = weights.total();
    if total == 0 {
        return None;
    }
    let mut draw = rng.random_range(0..total);
    for group in Group::ALL {
        let weight = weights.get(group);
        if draw < weight {
            return Some(group);
        }
        draw -= weight;
    }
    None
}

/// Pick a word from a group: order by last review (never-reviewed words sort
/// first) and draw uniformly from the oldest few. Oldest-first keeps urgency;
/// the window keeps the learner from anticipating the sequence.
pub fn pick_word(
    words: &[Word],
    records: &HashMap<String, PerformanceRecord>,
    rng: &mut impl Rng,
) -> Option<Word> {
    if words.is_empty() {
        return None;
    }
    let mut ordered: Vec<&Word> = words.iter().collect();
    ordered.sort_by_key(|word| {
        records
            .get(&word.word)
            .map(|record| record.last_reviewed_at)
            .unwrap_or(Timestamp::EPOCH)
    });
    let window = ordered.len().min(PICK_WINDOW);
    let index = rng.random_range(0..window);
    Some(ordered[index].clone())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::scheduler::group::classify;
    use crate::scheduler::weights::LastPicked;
    use crate::scheduler::weights::weigh;
    use crate::types::grade::Grade;

    fn word(name: &str) -> Word {
        Word {
            word: name.to_string(),
            translation: name.to_uppercase(),
            category: String::new(),
            part_of_speech: String::new(),
            tags: Vec::new(),
        }
    }

    fn record(streak: u32, grade: Grade, millis: i64) -> PerformanceRecord {
        PerformanceRecord {
            last_grade: grade,
            last_reviewed_at: Timestamp::from_millis(millis),
            streak,
        }
    }

    #[test]
    fn test_zero_total_yields_none() {
        let buckets = classify(&[], &HashMap::new());
        let weights = weigh(&buckets, 0, &LastPicked::default(), false);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(select_group(&weights, &mut rng), None);
    }

    #[test]
    fn test_zero_weight_groups_are_never_drawn() {
        // Hard and mastered words only; learning and new are empty.
        let pool = vec![word("h"), word("m")];
        let mut records = HashMap::new();
        records.insert("h".to_string(), record(0, Grade::Hard, 1_000));
        records.insert("m".to_string(), record(3, Grade::Easy, 1_000));
        let buckets = classify(&pool, &records);
        let weights = weigh(&buckets, 9, &LastPicked::default(), false);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1_000 {
            let group = select_group(&weights, &mut rng).unwrap();
            assert!(group == Group::Hard || group == Group::Mastered);
        }
    }

    #[test]
    fn test_selection_frequency_tracks_weight() {
        let pool = vec![word("n"), word("h"), word("l"), word("m")];
        let mut records = HashMap::new();
        records.insert("h".to_string(), record(0, Grade::Hard, 1_000));
        records.insert("l".to_string(), record(1, Grade::Easy, 1_000));
        records.insert("m".to_string(), record(3, Grade::Easy, 1_000));
        let buckets = classify(&pool, &records);
        // Weights 100/60/40/5, total 205.
        let weights = weigh(&buckets, 0, &LastPicked::default(), false);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let trials = 20_000;
        let mut drawn = [0usize; 4];
        for _ in 0..trials {
            let group = select_group(&weights, &mut rng).unwrap();
            drawn[group.index()] += 1;
        }
        for group in Group::ALL {
            let expected = weights.get(group) as f64 / weights.total() as f64;
            let observed = drawn[group.index()] as f64 / trials as f64;
            assert!(
                (observed - expected).abs() < 0.02,
                "{}: expected {expected:.3}, observed {observed:.3}",
                group.as_str()
            );
        }
    }

    #[test]
    fn test_dominant_stale_group_is_picked() {
        // The liveness property: once a neglected group's weight dwarfs the
        // rest, it is drawn essentially every time.
        let pool = vec![word("h"), word("m")];
        let mut records = HashMap::new();
        records.insert("h".to_string(), record(0, Grade::Hard, 1_000));
        records.insert("m".to_string(), record(3, Grade::Easy, 1_000));
        let buckets = classify(&pool, &records);
        let tick = 1_000_000;
        let mut last_picked = LastPicked::default();
        last_picked.set(Group::Hard, tick);
        let weights = weigh(&buckets, tick, &last_picked, false);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let trials = 10_000;
        let mut mastered = 0;
        for _ in 0..trials {
            if select_group(&weights, &mut rng) == Some(Group::Mastered) {
                mastered += 1;
            }
        }
        assert!(mastered as f64 / trials as f64 > 0.999);
    }

    #[test]
    fn test_pick_word_stays_in_oldest_window() {
        let pool: Vec<Word> = ["a", "b", "c", "d", "e"].iter().map(|n| word(n)).collect();
        let mut records = HashMap::new();
        for (i, name) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            records.insert(
                name.to_string(),
                record(1, Grade::Easy, 1_000 * (i as i64 + 1)),
            );
        }
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let trials = 6_000;
        let mut picked: HashMap<String, usize> = HashMap::new();
        for _ in 0..trials {
            let w = pick_word(&pool, &records, &mut rng).unwrap();
            *picked.entry(w.word).or_default() += 1;
        }
        // Only the three oldest are ever drawn, each about a third of the
        // time; the two newest never appear.
        assert!(!picked.contains_key("d"));
        assert!(!picked.contains_key("e"));
        for name in ["a", "b", "c"] {
            let share = picked[name] as f64 / trials as f64;
            assert!((share - 1.0 / 3.0).abs() < 0.03, "{name}: {share:.3}");
        }
    }

    #[test]
    fn test_pick_word_unreviewed_sorts_first() {
        let pool = vec![word("old"), word("fresh"), word("never")];
        let mut records = HashMap::new();
        records.insert("old".to_string(), record(1, Grade::Easy, 1_000));
        records.insert("fresh".to_string(), record(1, Grade::Easy, 999_999));
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_word(&pool, &records, &mut rng).unwrap().word);
        }
        // All three fit in the window, but "never" must be eligible.
        assert!(seen.contains("never"));
    }

    #[test]
    fn test_pick_word_small_groups() {
        let pool = vec![word("only")];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let picked = pick_word(&pool, &HashMap::new(), &mut rng).unwrap();
        assert_eq!(picked.word, "only");
        assert_eq!(pick_word(&[], &HashMap::new(), &mut rng), None);
    }
}
