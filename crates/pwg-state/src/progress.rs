//! # Checklist Progress

use serde::{Deserialize, Serialize};

/// Completed versus total steps of the current checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Steps marked done.
    pub completed: usize,
    /// Steps in the current checklist.
    pub total: usize,
}

impl Progress {
    /// Completion as a fraction in `[0, 1]`. An empty checklist is `0.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    /// Completion as a whole percentage, rounded to nearest.
    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).round() as u8
    }

    /// Whether a non-empty checklist is fully done.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} completed", self.completed, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_checklist_is_zero_not_nan() {
        let p = Progress::default();
        assert_eq!(p.fraction(), 0.0);
        assert_eq!(p.percent(), 0);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_partial() {
        let p = Progress {
            completed: 2,
            total: 6,
        };
        assert!((p.fraction() - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(p.percent(), 33);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_full() {
        let p = Progress {
            completed: 6,
            total: 6,
        };
        assert_eq!(p.fraction(), 1.0);
        assert_eq!(p.percent(), 100);
        assert!(p.is_complete());
    }

    #[test]
    fn test_display() {
        let p = Progress {
            completed: 1,
            total: 6,
        };
        assert_eq!(p.to_string(), "1 of 6 completed");
    }
}
