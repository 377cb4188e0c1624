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

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::config::DrillConfig;
use crate::config::SessionLimit;
use crate::config::Strategy;
use crate::db::Database;
use crate::error::Fallible;
use crate::scheduler::group::Group;
use crate::scheduler::group::classify;
use crate::scheduler::group::classify_word;
use crate::scheduler::pick::pick_word;
use crate::scheduler::pick::select_group;
use crate::scheduler::weights::LastPicked;
use crate::scheduler::weights::is_capped;
use crate::scheduler::weights::weigh;
use crate::types::direction::Direction;
use crate::types::grade::Decision;
use crate::types::record::PerformanceRecord;
use crate::types::timestamp::Timestamp;
use crate::types::word::Word;

/// One review session. Ephemeral: dropped on exit, nothing to flush, since
/// the store is written on every grading event.
pub struct Session {
    pool: Vec<Word>,
    direction: Direction,
    config: DrillConfig,
    /// Logical clock, incremented once per grading event.
    tick: u64,
    last_picked: LastPicked,
    reviewed: usize,
    /// Whether the most recent pick cycle ran with new-word intake paused.
    workload_capped: bool,
    finished: bool,
    current: Option<Word>,
    /// Precomputed order for the non-adaptive strategies; unused by
    /// smart-sort.
    queue: VecDeque<Word>,
    rng: ChaCha8Rng,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Summary {
    pub reviewed: usize,
    pub finished: bool,
    pub workload_capped: bool,
}

impl Session {
    pub fn start(
        pool: Vec<Word>,
        direction: Direction,
        config: DrillConfig,
        db: &Database,
    ) -> Fallible<Self> {
        Self::with_rng(pool, direction, config, db, ChaCha8Rng::from_os_rng())
    }

    /// Deterministic variant for tests.
    pub fn start_seeded(
        pool: Vec<Word>,
        direction: Direction,
        config: DrillConfig,
        db: &Database,
        seed: u64,
    ) -> Fallible<Self> {
        Self::with_rng(pool, direction, config, db, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(
        pool: Vec<Word>,
        direction: Direction,
        config: DrillConfig,
        db: &Database,
        rng: ChaCha8Rng,
    ) -> Fallible<Self> {
        let mut session = Self {
            pool,
            direction,
            config,
            tick: 0,
            last_picked: LastPicked::default(),
            reviewed: 0,
            workload_capped: false,
            finished: false,
            current: None,
            queue: VecDeque::new(),
            rng,
        };
        session.build_queue(db)?;
        session.advance(db)?;
        Ok(session)
    }

    /// For the non-adaptive strategies, the whole session order is fixed
    /// here; the pick cycle degenerates to popping the front.
    fn build_queue(&mut self, db: &Database) -> Fallible<()> {
        match self.config.strategy {
            Strategy::SmartSort => {}
            Strategy::Sequential => {
                self.queue = self.pool.iter().cloned().collect();
            }
            Strategy::Random => {
                let mut shuffled = self.pool.clone();
                shuffled.shuffle(&mut self.rng);
                self.queue = shuffled.into();
            }
            Strategy::HardOnly => {
                let records = db.records(self.direction)?;
                let mut hard: Vec<Word> = self
                    .pool
                    .iter()
                    .filter(|word| classify_word(records.get(&word.word)) == Group::Hard)
                    .cloned()
                    .collect();
                hard.sort_by_key(|word| {
                    records
                        .get(&word.word)
                        .map(|record| record.last_reviewed_at)
                        .unwrap_or(Timestamp::EPOCH)
                });
                self.queue = hard.into();
            }
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&Word> {
        self.current.as_ref()
    }

    pub fn pool(&self) -> &[Word] {
        &self.pool
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn summary(&self) -> Summary {
        Summary {
            reviewed: self.reviewed,
            finished: self.finished,
            workload_capped: self.workload_capped,
        }
    }

    /// Grade the current word and advance to the next one. `Skip` advances
    /// without touching the store. No-op once the session is finished.
    pub fn grade(&mut self, db: &Database, decision: Decision, now: Timestamp) -> Fallible<()> {
        if self.finished {
            return Ok(());
        }
        let Some(word) = self.current.clone() else {
            return Ok(());
        };
        if let Some(grade) = decision.grade() {
            let previous = db.record(self.direction, &word.word)?;
            let record = PerformanceRecord::apply(previous, grade, now);
            db.upsert(self.direction, &word.word, &record)?;
            log::debug!(
                "graded {:?} {} (streak {})",
                word.word,
                grade.as_str(),
                record.streak
            );
        }
        self.reviewed += 1;
        if let SessionLimit::Count(limit) = self.config.limit {
            if self.reviewed >= limit {
                log::debug!("session limit reached after {} reviews", self.reviewed);
                self.finish();
                return Ok(());
            }
        }
        self.tick += 1;
        self.advance(db)
    }

    /// End the session without grading the word on display. Ungraded
    /// exposure leaves no trace in the store.
    pub fn end(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        self.finished = true;
        self.current = None;
    }

    fn advance(&mut self, db: &Database) -> Fallible<()> {
        match self.config.strategy {
            Strategy::SmartSort => {
                let records = db.records(self.direction)?;
                self.advance_adaptive(&records);
            }
            Strategy::Sequential | Strategy::Random | Strategy::HardOnly => {
                self.current = self.queue.pop_front();
                if self.current.is_none() {
                    log::debug!("queue exhausted after {} reviews", self.reviewed);
                    self.finish();
                }
            }
        }
        Ok(())
    }

    /// One full pick cycle: bucketize, weigh, draw a group, draw a word.
    fn advance_adaptive(
        &mut self,
        records: &std::collections::HashMap<String, PerformanceRecord>,
    ) {
        let buckets = classify(&self.pool, records);
        let capped = is_capped(buckets.active_count(), self.config.threshold);
        self.workload_capped = capped;
        let weights = weigh(&buckets, self.tick, &self.last_picked, capped);
        match select_group(&weights, &mut self.rng) {
            Some(group) => {
                self.last_picked.set(group, self.tick);
                self.current = pick_word(buckets.get(group), records, &mut self.rng);
                if let Some(word) = &self.current {
                    log::debug!(
                        "tick {}: picked {:?} from the {} group",
                        self.tick,
                        word.word,
                        group.as_str()
                    );
                }
            }
            None => {
                // Zero total weight means every group is empty or suppressed.
                // Capping requires a non-empty hard or learning group, which
                // would have carried weight, so a capped null pick cannot
                // happen with a validated threshold.
                debug_assert!(!capped);
                log::debug!("no eligible words after {} reviews", self.reviewed);
                self.finish();
            }
        }
    }
}
