// Page-fit estimation for the A4 preview.
// Static font metrics, greedy word-wrap, one-page fill verdict.

pub mod font_metrics;
pub mod handlers;
pub mod page_fill;

// Re-export the public API consumed by other modules (handlers, state).
pub use font_metrics::{FontFamily, PageConfig};
pub use page_fill::{analyze_page_fit, PageFitReport, PageFitVerdict};
