use std::{collections::VecDeque, num::NonZeroUsize};

use crate::Average;

/// Fixed-capacity FIFO of the most recently fetched numbers.
///
/// Values are kept in insertion order and never deduplicated. Once the
/// window is full, every new value evicts the oldest one.
#[derive(Debug, Clone)]
pub struct NumberWindow {
    values: VecDeque<i64>,
    capacity: NonZeroUsize,
}

/// Window contents right before and right after a single ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTransition {
    pub prev: Vec<i64>,
    pub curr: Vec<i64>,
}

impl NumberWindow {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn snapshot(&self) -> Vec<i64> {
        self.values.iter().copied().collect()
    }

    pub fn ingest(&mut self, new_values: &[i64]) -> WindowTransition {
        let prev = self.snapshot();
        for &value in new_values {
            self.push(value);
        }
        WindowTransition {
            prev,
            curr: self.snapshot(),
        }
    }

    pub fn average(&self) -> Average {
        Average::of(&self.values)
    }

    fn push(&mut self, value: i64) {
        if self.values.len() == self.capacity.get() {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(capacity: usize) -> NumberWindow {
        NumberWindow::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn starts_empty() {
        let window = window(10);
        assert!(window.is_empty());
        assert_eq!(window.snapshot(), Vec::<i64>::new());
        assert_eq!(window.average().to_string(), "0.00");
    }

    #[test]
    fn ingest_below_capacity_keeps_everything() {
        let mut window = window(10);
        let transition = window.ingest(&[2, 4, 6]);

        assert_eq!(transition.prev, Vec::<i64>::new());
        assert_eq!(transition.curr, vec![2, 4, 6]);
        assert_eq!(window.average().to_string(), "4.00");
    }

    #[test]
    fn empty_ingest_is_noop() {
        let mut window = window(3);
        window.ingest(&[1, 2]);
        let before = window.average();

        let transition = window.ingest(&[]);
        assert_eq!(transition.prev, transition.curr);
        assert_eq!(transition.curr, vec![1, 2]);
        assert_eq!(window.average(), before);
    }

    #[test]
    fn full_window_evicts_oldest() {
        let mut window = window(10);
        window.ingest(&(1..=10).collect::<Vec<i64>>());

        let transition = window.ingest(&[100]);
        assert_eq!(transition.prev, (1..=10).collect::<Vec<i64>>());
        assert_eq!(transition.curr, vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 100]);
        assert_eq!(window.average().to_string(), "15.40");
    }

    #[test]
    fn batch_larger_than_capacity_keeps_its_tail() {
        let mut window = window(3);
        window.ingest(&[1, 2]);

        let transition = window.ingest(&[3, 4, 5, 6, 7]);
        assert_eq!(transition.prev, vec![1, 2]);
        assert_eq!(transition.curr, vec![5, 6, 7]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut window = window(4);
        let transition = window.ingest(&[5, 5, 5]);
        assert_eq!(transition.curr, vec![5, 5, 5]);
    }

    #[test]
    fn capacity_of_one() {
        let mut window = window(1);
        assert_eq!(window.ingest(&[1, 2, 3]).curr, vec![3]);
        assert_eq!(window.ingest(&[4]).curr, vec![4]);
    }

    #[test]
    fn retains_last_capacity_values_of_concatenation() {
        let batches: [&[i64]; 6] = [
            &[1],
            &[],
            &[2, 3, 4, 5],
            &[6, 7],
            &[8],
            &[9, 10, 11, 12, 13],
        ];
        for capacity in 1..=8 {
            let mut window = window(capacity);
            let mut all = Vec::new();
            for batch in batches {
                let transition = window.ingest(batch);
                all.extend_from_slice(batch);

                let expected = all[all.len().saturating_sub(capacity)..].to_vec();
                assert_eq!(transition.curr, expected);
                assert!(window.len() <= capacity);
                assert_eq!(window.len(), capacity.min(all.len()));
            }
        }
    }
}
