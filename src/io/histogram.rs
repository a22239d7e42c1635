// src/io/histogram.rs

use std::fmt;

pub const DEFAULT_BIN_WIDTH: usize = 7;
pub const DEFAULT_MAX_BINS: usize = 12;
const BAR_WIDTH: usize = 40;

/// Fixed-width bins over wait times. Waits past the last bin edge are
/// clamped into the last bin rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitHistogram {
    bin_width: usize,
    counts: Vec<usize>,
}

impl WaitHistogram {
    /// Zero `bin_width` or `max_bins` is treated as 1.
    pub fn from_waits(waits: &[usize], bin_width: usize, max_bins: usize) -> Self {
        let bin_width = bin_width.max(1);
        let mut counts = vec![0; max_bins.max(1)];
        let last = counts.len() - 1;

        for &wait in waits {
            counts[(wait / bin_width).min(last)] += 1;
        }

        Self { bin_width, counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn bin_width(&self) -> usize {
        self.bin_width
    }

    /// Label like `0-6` for each bin; the last bin is open-ended (`77+`).
    pub fn label(&self, bin: usize) -> String {
        // Edges saturate for absurd widths instead of overflowing.
        let start = bin.saturating_mul(self.bin_width);
        if bin + 1 == self.counts.len() {
            format!("{start}+")
        } else {
            let end = start.saturating_add(self.bin_width - 1);
            format!("{start}-{end}")
        }
    }

    /// Horizontal text bars, scaled to the fullest bin.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WaitHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let peak = self.counts.iter().copied().max().unwrap_or(0);
        for (bin, &count) in self.counts.iter().enumerate() {
            let len = if peak == 0 { 0 } else { count * BAR_WIDTH / peak };
            writeln!(
                f,
                "{:>9} days | {:<width$} {}",
                self.label(bin),
                "#".repeat(len),
                count,
                width = BAR_WIDTH
            )?;
        }
        Ok(())
    }
}
