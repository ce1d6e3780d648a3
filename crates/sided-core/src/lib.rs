//! Sided Core - diff line model for side-by-side configuration comparison
//!
//! This library aligns two texts into classified diff lines and provides the
//! operations a viewer needs on top of them: statistics, merged and unified
//! exports, row pairing, change navigation and list pagination.

pub mod align;
pub mod git;
pub mod inventory;
pub mod line;
pub mod merge;
pub mod navigate;
pub mod paginate;
pub mod patch;
pub mod rows;
pub mod stats;

pub use align::{compare_files, compare_texts, CompareError};
pub use inventory::{list_config_files, ConfigFile, DEFAULT_EXTENSIONS};
pub use line::{Comparison, DiffLine, LineType, LoadError};
pub use merge::{merge_lines_to_unified, render_merged};
pub use navigate::ChangeNavigator;
pub use paginate::{ListFilter, Pager};
pub use patch::{unified_patch, ExportFormat, DEFAULT_CONTEXT};
pub use rows::{pair_rows, RowPair};
pub use stats::{calculate_stats, DiffStats};
