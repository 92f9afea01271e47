//! Process-wide display-color assignment
//!
//! Colors rotate round-robin over a fixed palette so concurrent users in a
//! room are visually distinct. Rotation is process-wide, not room-scoped.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed palette of display colors for connected users
pub const USER_COLORS: [&str; 8] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f39c12", "#9b59b6", "#1abc9c", "#e67e22", "#34495e",
];

/// Hands out user colors in round-robin order
///
/// Uses an atomic index, so assignment never contends with any other lock.
pub struct ColorPalette {
    index: AtomicUsize,
}

impl ColorPalette {
    pub fn new() -> Self {
        Self {
            index: AtomicUsize::new(0),
        }
    }

    /// Get the next color in rotation
    pub fn next_color(&self) -> &'static str {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % USER_COLORS.len();
        USER_COLORS[idx]
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles_in_order() {
        let palette = ColorPalette::new();

        for expected in USER_COLORS {
            assert_eq!(palette.next_color(), expected);
        }
        // Wraps around after a full rotation
        assert_eq!(palette.next_color(), USER_COLORS[0]);
        assert_eq!(palette.next_color(), USER_COLORS[1]);
    }
}
