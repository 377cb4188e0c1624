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

use serde::Serialize;

use crate::types::grade::Grade;
use crate::types::record::PerformanceRecord;
use crate::types::word::Word;

/// The classification of a word, derived from its performance record on
/// every pick. Never persisted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Group {
    Hard,
    Learning,
    New,
    Mastered,
}

impl Group {
    /// The fixed order in which the group selector walks the cumulative
    /// weights. The order does not change selection probabilities.
    pub const ALL: [Group; 4] = [Group::Hard, Group::Learning, Group::New, Group::Mastered];

    pub fn index(self) -> usize {
        match self {
            Group::Hard => 0,
            Group::Learning => 1,
            Group::New => 2,
            Group::Mastered => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Group::Hard => "hard",
            Group::Learning => "learning",
            Group::New => "new",
            Group::Mastered => "mastered",
        }
    }
}

pub fn classify_word(record: Option<&PerformanceRecord>) -> Group {
    match record {
        None => Group::New,
        Some(record) if record.last_grade == Grade::Hard || record.streak == 0 => Group::Hard,
        Some(record) if record.streak <= 2 => Group::Learning,
        Some(_) => Group::Mastered,
    }
}

/// The pool partitioned into the four groups.
pub struct Buckets {
    buckets: [Vec<Word>; 4],
}

impl Buckets {
    pub fn get(&self, group: Group) -> &[Word] {
        &self.buckets[group.index()]
    }

    /// Words currently being worked on: hard plus learning. This is the
    /// count the workload cap applies to.
    pub fn active_count(&self) -> usize {
        self.get(Group::Hard).len() + self.get(Group::Learning).len()
    }
}

/// Partition the pool. Every word lands in exactly one bucket; within a
/// bucket, pool order is preserved.
pub fn classify(pool: &[Word], records: &HashMap<String, PerformanceRecord>) -> Buckets {
    let mut buckets = Buckets {
        buckets: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
    };
    for word in pool {
        let group = classify_word(records.get(&word.word));
        buckets.buckets[group.index()].push(word.clone());
    }
    buckets
}

/// Group sizes for the dashboard. Computable at any time from the store,
/// without a session.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct GroupCounts {
    pub new: usize,
    pub hard: usize,
    pub learning: usize,
    pub mastered: usize,
}

pub fn live_counts(pool: &[Word], records: &HashMap<String, PerformanceRecord>) -> GroupCounts {
    let buckets = classify(pool, records);
    GroupCounts {
        new: buckets.get(Group::New).len(),
        hard: buckets.get(Group::Hard).len(),
        learning: buckets.get(Group::Learning).len(),
        mastered: buckets.get(Group::Mastered).len(),
    }
}
