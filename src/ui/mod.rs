pub mod list;
pub mod progress;
pub mod select;
pub mod text;

pub use list::{run_interactive, ListAction, ListView};
pub use progress::Spinner;
pub use select::select_entries;
pub use text::render_entries;
