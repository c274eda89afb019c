mod extract;
mod prompt;
mod types;

pub use extract::{parse_analysis, strip_code_fences};
pub use prompt::{ANALYSIS_PROMPT, build_analysis_messages};
pub use types::*;
