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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::types::grade::Decision;
use crate::types::timestamp::Timestamp;

#[derive(Debug, Deserialize)]
enum Action {
    Reveal,
    Hard,
    Easy,
    Skip,
    End,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(state, form.action) {
        Ok(()) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: ServerState, action: Action) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    let mutable = &mut *mutable;
    match action {
        Action::Reveal => {
            if !mutable.reveal {
                mutable.reveal = true;
            }
        }
        Action::Hard | Action::Easy => {
            // Grading a card that has not been revealed is ignored.
            if mutable.reveal {
                let decision = match action {
                    Action::Hard => Decision::Hard,
                    _ => Decision::Easy,
                };
                mutable
                    .session
                    .grade(&mutable.db, decision, Timestamp::now())?;
                mutable.reveal = false;
            }
        }
        Action::Skip => {
            // Skipping is allowed before the reveal.
            mutable
                .session
                .grade(&mutable.db, Decision::Skip, Timestamp::now())?;
            mutable.reveal = false;
        }
        Action::End => {
            log::debug!("session ended by the learner");
            mutable.session.end();
            mutable.reveal = false;
        }
    }
    Ok(())
}
