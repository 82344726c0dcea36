//! Positional diff between the backup and active documents.
//!
//! Lines are compared by index, not aligned: inserting a line near the top
//! shows up as a run of `~` changes followed by one `+` at the end. That
//! approximation is accepted; the diff only summarizes drift from baseline.
//!
//! ```
//! use dynprompt_core::diff::{compute_diff, render_diff};
//!
//! let report = compute_diff(Some("A\nB\n"), Some("A\nC\nD\n"));
//! assert_eq!(render_diff(&report), "~ C\n+ D");
//! ```

pub mod engine;
pub mod model;
pub mod render;

pub use engine::compute_diff;
pub use model::{DiffLine, DiffMarker, DiffReport};
pub use render::{render_diff, NO_ACTIVE_MESSAGE, UNMODIFIED_MESSAGE};
