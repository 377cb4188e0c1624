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

use serde::Deserialize;

use crate::types::direction::Direction;

/// A learnable vocabulary entry. Words are loaded once from static content
/// and are never mutated by the scheduler; the `word` field is the unique
/// identity under which progress is recorded.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
pub struct Word {
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Word {
    /// The side shown before the reveal.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.word,
            Direction::Reverse => &self.translation,
        }
    }

    /// The side hidden until the reveal.
    pub fn answer(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.translation,
            Direction::Reverse => &self.word,
        }
    }
}
