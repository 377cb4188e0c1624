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

//! The adaptive review scheduler.
//!
//! Each pick cycle classifies the pool into four groups (new, hard,
//! learning, mastered), weighs the groups by base priority plus a staleness
//! bonus, draws a group by weighted random selection, and draws a word from
//! a small oldest-first window within that group. A configured workload cap
//! pauses the intake of new words while too many words are in the hard or
//! learning groups.
//!
//! Everything here is store-passing: records go in as parameters, updates
//! come back out, and all randomness flows through a seedable generator.

pub mod group;
pub mod pick;
pub mod session;
pub mod weights;
