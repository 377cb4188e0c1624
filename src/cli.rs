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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::counts::CountsFormat;
use crate::cmd::counts::print_counts;
use crate::cmd::reset::reset_progress;
use crate::config;
use crate::config::SessionLimit;
use crate::config::Strategy;
use crate::drill::server::start_server;
use crate::error::Fallible;
use crate::types::direction::Direction;
use crate::wordlist::WordFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill words in the browser.
    Drill {
        /// Optional path to the word directory.
        directory: Option<String>,
        /// The recall direction to drill.
        #[arg(long, value_enum, default_value_t = Direction::Forward)]
        direction: Direction,
        /// How the session picks the next word.
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
        /// How many words to review before stopping, or "all".
        #[arg(long)]
        limit: Option<SessionLimit>,
        /// Pause new words once this many are in the hard or learning
        /// groups.
        #[arg(long)]
        threshold: Option<usize>,
        /// The port to serve on.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Only drill words in this category.
        #[arg(long)]
        category: Option<String>,
        /// Only drill words with this part of speech.
        #[arg(long)]
        pos: Option<String>,
        /// Only drill words matching this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show how many words are new, hard, learning and mastered.
    Counts {
        /// Optional path to the word directory.
        directory: Option<String>,
        #[arg(long, value_enum, default_value_t = Direction::Forward)]
        direction: Direction,
        #[arg(long, value_enum, default_value_t = CountsFormat::Text)]
        format: CountsFormat,
    },
    /// Delete all recorded progress for a direction.
    Reset {
        /// Optional path to the word directory.
        directory: Option<String>,
        #[arg(long, value_enum, default_value_t = Direction::Forward)]
        direction: Direction,
    },
}

fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    match directory {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(std::env::current_dir()?),
    }
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            direction,
            strategy,
            limit,
            threshold,
            port,
            category,
            pos,
            search,
        } => {
            let directory = resolve_directory(directory)?;
            let config = config::resolve(&directory, strategy, limit, threshold)?;
            let filter = WordFilter {
                category,
                part_of_speech: pos,
                search,
            };
            start_server(directory, direction, filter, config, port).await
        }
        Command::Counts {
            directory,
            direction,
            format,
        } => {
            let directory = resolve_directory(directory)?;
            print_counts(&directory, direction, &WordFilter::default(), format)
        }
        Command::Reset {
            directory,
            direction,
        } => {
            let directory = resolve_directory(directory)?;
            reset_progress(&directory, direction)
        }
    }
}
