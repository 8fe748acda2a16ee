//! Reusable widgets.

mod path_input;

pub use path_input::path_input_with_paste;
