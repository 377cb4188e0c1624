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

use crate::db::open_store;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::direction::Direction;

/// Delete all recorded progress for one direction. The other direction is
/// untouched.
pub fn reset_progress(directory: &PathBuf, direction: Direction) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let db = open_store(directory)?;
    let count = db.reset(direction)?;
    println!("Deleted {count} records for the {direction} direction.");
    Ok(())
}
