//! Form rendering module
//!
//! This module contains UI components for rendering the active form:
//! - `field_renderer`: One box per schema field
//! - `progress`: Completion gauge
//! - `form_view`: The form body and submit button

mod field_renderer;
mod form_view;
mod progress;

pub use form_view::draw_form;
