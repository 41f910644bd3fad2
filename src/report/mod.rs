//! Report generation modules.

pub mod results;
pub mod standup;

pub use results::{generate_json_report, generate_markdown_report, ResultsReport};
pub use standup::render_board;
