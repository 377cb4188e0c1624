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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::drill::state::MutableState;
use crate::drill::state::ServerState;
use crate::error::Fallible;
use crate::scheduler::group::live_counts;

pub async fn root(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    match render(&mutable) {
        Ok(markup) => (StatusCode::OK, Html(markup.into_string())),
        Err(e) => {
            log::error!("{e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            )
        }
    }
}

fn render(mutable: &MutableState) -> Fallible<Markup> {
    let session = &mutable.session;
    let summary = session.summary();
    let records = mutable.db.records(session.direction())?;
    let counts = live_counts(session.pool(), &records);

    let body = if summary.finished {
        html! {
            div.root {
                div.card {
                    h1 { "Session Completed" }
                    p { "Reviewed " (summary.reviewed) " words." }
                    @if summary.workload_capped {
                        p.note { "New words are paused until the active pile shrinks." }
                    }
                }
            }
        }
    } else {
        let word = match session.current() {
            Some(word) => word,
            None => return Ok(page_template(html! { p { "No word to show." } })),
        };
        let direction = session.direction();
        let controls = if mutable.reveal {
            html! {
                form action="/" method="post" {
                    input id="hard" type="submit" name="action" value="Hard";
                    input id="easy" type="submit" name="action" value="Easy";
                    input id="skip" type="submit" name="action" value="Skip";
                    input id="end" type="submit" name="action" value="End";
                }
            }
        } else {
            html! {
                form action="/" method="post" {
                    input id="reveal" type="submit" name="action" value="Reveal";
                    input id="skip" type="submit" name="action" value="Skip";
                    input id="end" type="submit" name="action" value="End";
                }
            }
        };
        html! {
            div.root {
                div.counts {
                    span.new { (counts.new) " new" }
                    span.hard { (counts.hard) " hard" }
                    span.learning { (counts.learning) " learning" }
                    span.mastered { (counts.mastered) " mastered" }
                }
                div.card {
                    div.prompt {
                        p { (word.prompt(direction)) }
                        @if !word.part_of_speech.is_empty() {
                            p.pos { (word.part_of_speech) }
                        }
                    }
                    div.answer {
                        @if mutable.reveal {
                            p { (word.answer(direction)) }
                        }
                    }
                    div.controls {
                        (controls)
                    }
                }
            }
        }
    };
    Ok(page_template(body))
}

fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "wordmill" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
                script src="/script.js" {};
            }
        }
    }
}
