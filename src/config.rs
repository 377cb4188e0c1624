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
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// An optional file of drill defaults, looked up in the word directory.
/// Command-line flags override it.
pub const CONFIG_FILE_NAME: &str = "wordmill.toml";

pub const DEFAULT_THRESHOLD: usize = 20;

/// How the session picks the next word.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Strategy {
    /// Adaptive scheduling: weighted selection over the new, hard, learning
    /// and mastered groups.
    SmartSort,
    /// Pool order.
    Sequential,
    /// A single shuffle of the pool.
    Random,
    /// Only words currently classified as hard, oldest first.
    HardOnly,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "smart_sort" => Ok(Strategy::SmartSort),
            "sequential" => Ok(Strategy::Sequential),
            "random" => Ok(Strategy::Random),
            "hard_only" => Ok(Strategy::HardOnly),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// How many words to review before the session ends on its own.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionLimit {
    All,
    Count(usize),
}

impl FromStr for SessionLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(SessionLimit::All);
        }
        match s.parse::<usize>() {
            Ok(count) => Ok(SessionLimit::Count(count)),
            Err(_) => Err(format!("expected a number or \"all\", got: {s}")),
        }
    }
}

impl Display for SessionLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionLimit::All => write!(f, "all"),
            SessionLimit::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Validated drill configuration. The scheduler assumes these invariants and
/// does not re-check them.
#[derive(Clone, Copy, Debug)]
pub struct DrillConfig {
    pub strategy: Strategy,
    pub limit: SessionLimit,
    /// The workload cap: when hard + learning words reach this count, no new
    /// words are introduced.
    pub threshold: usize,
}

impl DrillConfig {
    pub fn new(strategy: Strategy, limit: SessionLimit, threshold: usize) -> Fallible<Self> {
        if let SessionLimit::Count(0) = limit {
            return fail("session limit must be at least 1.");
        }
        if threshold == 0 {
            return fail("workload threshold must be at least 1.");
        }
        Ok(Self {
            strategy,
            limit,
            threshold,
        })
    }
}

#[derive(Deserialize, Default)]
struct FileDefaults {
    strategy: Option<String>,
    limit: Option<LimitValue>,
    threshold: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LimitValue {
    Number(usize),
    Text(String),
}

impl LimitValue {
    fn into_limit(self) -> Result<SessionLimit, String> {
        match self {
            LimitValue::Number(count) => Ok(SessionLimit::Count(count)),
            LimitValue::Text(text) => text.parse(),
        }
    }
}

/// Merge command-line flags over file defaults over built-in defaults, then
/// validate. This is the only place configuration is checked; everything
/// downstream takes a `DrillConfig` on faith.
pub fn resolve(
    directory: &Path,
    strategy: Option<Strategy>,
    limit: Option<SessionLimit>,
    threshold: Option<usize>,
) -> Fallible<DrillConfig> {
    let defaults = load_defaults(directory)?;
    let strategy = match strategy {
        Some(strategy) => strategy,
        None => match defaults.strategy {
            Some(text) => text.parse().map_err(ErrorReport::new)?,
            None => Strategy::SmartSort,
        },
    };
    let limit = match limit {
        Some(limit) => limit,
        None => match defaults.limit {
            Some(value) => value.into_limit().map_err(ErrorReport::new)?,
            None => SessionLimit::All,
        },
    };
    let threshold = threshold
        .or(defaults.threshold)
        .unwrap_or(DEFAULT_THRESHOLD);
    DrillConfig::new(strategy, limit, threshold)
}

fn load_defaults(directory: &Path) -> Fallible<FileDefaults> {
    let path = directory.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(FileDefaults::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    let defaults: FileDefaults = toml::from_str(&contents)?;
    Ok(defaults)
}
