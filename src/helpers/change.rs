//! Change detector for value-typed state
//!
//! Remembers the last observed value and reports a change exactly once per
//! transition. Detection and acknowledgement happen in the same call.

/// Deep-equality change detector
#[derive(Clone, Debug)]
pub struct ChangeDetector<T> {
    previous: T,
}

impl<T: PartialEq + Clone> ChangeDetector<T> {
    /// Create a detector that treats `initial` as already observed
    pub fn new(initial: T) -> Self {
        Self { previous: initial }
    }

    /// Compare `current` with the stored value.
    ///
    /// Returns `true` when they differ and stores `current`, so the next
    /// call with the same value returns `false`.
    pub fn observe(&mut self, current: &T) -> bool {
        if &self.previous == current {
            return false;
        }
        self.previous = current.clone();
        true
    }

    /// The last acknowledged value
    pub fn previous(&self) -> &T {
        &self.previous
    }
}

impl<T: PartialEq + Clone + Default> Default for ChangeDetector<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_once_per_transition() {
        let mut detector = ChangeDetector::new(vec![1, 2]);
        assert!(!detector.observe(&vec![1, 2]));
        assert!(detector.observe(&vec![2, 1]));
        assert!(!detector.observe(&vec![2, 1]));
        assert_eq!(detector.previous(), &vec![2, 1]);
    }

    #[test]
    fn test_change_back_is_a_change() {
        let mut detector: ChangeDetector<Vec<i32>> = ChangeDetector::default();
        assert!(detector.observe(&vec![1]));
        assert!(detector.observe(&vec![]));
        assert!(!detector.observe(&vec![]));
    }
}
