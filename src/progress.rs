//! Batch progress computation and observable progress state
//!
//! Progress is a pure function of `(records_processed, total_records)`. The
//! [`ProgressState`] snapshot is published through a `tokio::sync::watch`
//! channel so renderers can subscribe to changes instead of polling.

use serde::{Deserialize, Serialize};

/// Rendered progress for one `(processed, total)` pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Floor of processed / total × 100, never above 100
    pub percentage: u8,
    /// Display width string, e.g. `width: 50%`
    pub display_style: String,
}

/// Compute the percentage and display string for a batch
///
/// A zero total has no meaningful progress and yields 0%.
///
/// # Examples
///
/// ```
/// use record_zip_dl::progress::compute_progress;
///
/// let progress = compute_progress(1, 3);
/// assert_eq!(progress.percentage, 33);
/// assert_eq!(progress.display_style, "width: 33%");
/// ```
#[must_use]
pub fn compute_progress(records_processed: usize, total_records: usize) -> Progress {
    let percentage = if total_records == 0 {
        0
    } else {
        // Integer division is the floor for non-negative operands
        let raw = (records_processed.min(total_records) as u128 * 100) / total_records as u128;
        raw.min(100) as u8
    };

    Progress {
        percentage,
        display_style: display_style(percentage),
    }
}

/// Format the width style string for a percentage
pub fn display_style(percentage: u8) -> String {
    format!("width: {percentage}%")
}

/// Progress of the current (or last) batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Records that have settled
    pub records_processed: usize,
    /// Records in the batch
    pub total_records: usize,
    /// Floor of processed / total × 100
    pub progress_percentage: u8,
    /// Display width string for a progress bar
    pub progress_bar_style: String,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::reset(0)
    }
}

impl ProgressState {
    /// Fresh state for a batch of `total_records`
    pub fn reset(total_records: usize) -> Self {
        Self {
            records_processed: 0,
            total_records,
            progress_percentage: 0,
            progress_bar_style: display_style(0),
        }
    }

    /// Count one more settled record and recompute the percentage
    pub fn advance(&mut self) -> &Self {
        self.records_processed = (self.records_processed + 1).min(self.total_records);
        let progress = compute_progress(self.records_processed, self.total_records);
        self.progress_percentage = progress.percentage;
        self.progress_bar_style = progress.display_style;
        self
    }

    /// Whether every record has settled
    pub fn is_complete(&self) -> bool {
        self.records_processed == self.total_records
    }
}
