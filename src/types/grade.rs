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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;

/// A grading decision that is recorded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Grade {
    Easy,
    Hard,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Easy => "easy",
            Grade::Hard => "hard",
        }
    }
}

impl ToSql for Grade {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Grade {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        match string.as_str() {
            "easy" => Ok(Grade::Easy),
            "hard" => Ok(Grade::Hard),
            other => Err(FromSqlError::Other(format!("unknown grade: {other}").into())),
        }
    }
}

/// What the learner chose for the current card. `Skip` advances the session
/// without leaving a trace in the performance store.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Decision {
    Easy,
    Hard,
    Skip,
}

impl Decision {
    pub fn grade(self) -> Option<Grade> {
        match self {
            Decision::Easy => Some(Grade::Easy),
            Decision::Hard => Some(Grade::Hard),
            Decision::Skip => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_grade() {
        assert_eq!(Decision::Easy.grade(), Some(Grade::Easy));
        assert_eq!(Decision::Hard.grade(), Some(Grade::Hard));
        assert_eq!(Decision::Skip.grade(), None);
    }
}
