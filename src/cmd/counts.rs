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

use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::db::open_store;
use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::group::GroupCounts;
use crate::scheduler::group::live_counts;
use crate::types::direction::Direction;
use crate::wordlist::WordFilter;
use crate::wordlist::filter_words;
use crate::wordlist::load_words;

#[derive(ValueEnum, Clone)]
pub enum CountsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for CountsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CountsFormat::Text => write!(f, "text"),
            CountsFormat::Json => write!(f, "json"),
        }
    }
}

/// Print the live group counts for a direction. Reads the store, mutates
/// nothing.
pub fn print_counts(
    directory: &PathBuf,
    direction: Direction,
    filter: &WordFilter,
    format: CountsFormat,
) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let pool = filter_words(load_words(directory)?, filter);
    let db = open_store(directory)?;
    let records = db.records(direction)?;
    let counts: GroupCounts = live_counts(&pool, &records);
    match format {
        CountsFormat::Text => {
            println!("new:      {}", counts.new);
            println!("hard:     {}", counts.hard);
            println!("learning: {}", counts.learning);
            println!("mastered: {}", counts.mastered);
        }
        CountsFormat::Json => {
            let json = serde_json::to_string_pretty(&counts)?;
            println!("{json}");
        }
    }
    Ok(())
}
