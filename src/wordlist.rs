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

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::config::CONFIG_FILE_NAME;
use crate::error::Fallible;
use crate::types::word::Word;

#[derive(Deserialize)]
struct WordFile {
    #[serde(default)]
    words: Vec<Word>,
}

/// Load every word list in the directory. Word lists are `*.toml` files;
/// the configuration file is not a word list. Files are visited in path
/// order so the pool order is stable across runs.
pub fn load_words(directory: &Path) -> Fallible<Vec<Word>> {
    let mut words = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "toml") {
            continue;
        }
        if path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME) {
            continue;
        }
        let contents = std::fs::read_to_string(path)?;
        let file: WordFile = toml::from_str(&contents)?;
        for word in file.words {
            if seen.insert(word.word.clone()) {
                words.push(word);
            } else {
                log::warn!("duplicate word {:?} in {}", word.word, path.display());
            }
        }
    }
    log::debug!("Loaded {} words.", words.len());
    Ok(words)
}

/// Upstream filtering. The scheduler only ever sees the post-filter pool.
#[derive(Clone, Default, Debug)]
pub struct WordFilter {
    pub category: Option<String>,
    pub part_of_speech: Option<String>,
    pub search: Option<String>,
}

pub fn filter_words(words: Vec<Word>, filter: &WordFilter) -> Vec<Word> {
    words
        .into_iter()
        .filter(|word| {
            if let Some(category) = &filter.category {
                if &word.category != category {
                    return false;
                }
            }
            if let Some(pos) = &filter.part_of_speech {
                if &word.part_of_speech != pos {
                    return false;
                }
            }
            if let Some(search) = &filter.search {
                let needle = search.to_lowercase();
                let matches = word.word.to_lowercase().contains(&needle)
                    || word.translation.to_lowercase().contains(&needle);
                if !matches {
                    return false;
                }
            }
            true
        })
        .collect()
}
