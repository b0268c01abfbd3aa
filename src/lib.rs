//! Form schema editor with a live preview.
//!
//! [`schema::validate`] turns JSON text into a [`schema::Schema`] or a
//! single [`schema::Diagnostic`]. [`state`] holds the editor buffer, the
//! preview form built from the last valid schema and the per-field rules.
//! [`ui`] draws both panes with ratatui and [`sink`] receives submissions.

pub mod app;
pub mod config;
pub mod platform;
pub mod schema;
pub mod sink;
pub mod state;
pub mod ui;
