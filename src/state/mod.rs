//! Application state module

mod app_state;
mod forms;
mod records;
mod schema;

pub use app_state::*;
pub use forms::*;
pub use records::*;
pub use schema::*;
