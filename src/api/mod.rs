//! # API Module
//!
//! HTTP handlers for the widget backend and for the one-time authorization
//! callback.
//!
//! The widget surface prioritizes availability over diagnostics: the
//! [`snapshot`] handler swallows every internal failure and answers with an
//! empty-but-valid snapshot and HTTP 200, and the [`control`] handler reports
//! failure only as `{"success": false}` with HTTP 500. Detail goes to the
//! process log, never to the caller.
//!
//! [`callback`] completes the OAuth authorization-code flow started by the
//! `auth` subcommand and is served by a separate short-lived server, not by
//! the widget backend.

mod callback;
mod health;
mod player;
mod snapshot;

pub use callback::callback;
pub use health::health;
pub use player::control;
pub use snapshot::snapshot;
