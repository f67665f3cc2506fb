use std::{num::NonZeroUsize, sync::RwLock};

use tracing::debug;

use crate::{Average, Category, NumberWindow, WindowTransition, error::WindowError};

/// One [`NumberWindow`] per [`Category`], shared between request handlers.
///
/// Each window sits behind its own lock. Ingesting takes the write lock for
/// the whole snapshot, evict, append and average sequence, so concurrent
/// requests for the same category are applied one after another and the
/// reported previous state is never a half-updated window.
#[derive(Debug)]
pub struct WindowRegistry {
    windows: [RwLock<NumberWindow>; 4],
    capacity: NonZeroUsize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowReport {
    pub prev: Vec<i64>,
    pub curr: Vec<i64>,
    pub avg: Average,
}

impl WindowRegistry {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            windows: Category::ALL.map(|_| RwLock::new(NumberWindow::new(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn ingest(&self, category: Category, values: &[i64]) -> Result<WindowReport, WindowError> {
        let mut window = self.windows[category.index()]
            .write()
            .map_err(|_| WindowError::Poisoned(category))?;

        let WindowTransition { prev, curr } = window.ingest(values);
        let avg = window.average();
        debug!(
            %category,
            fetched = values.len(),
            evicted = (prev.len() + values.len()).saturating_sub(curr.len()),
            size = curr.len(),
            %avg,
            "Updated window"
        );

        Ok(WindowReport { prev, curr, avg })
    }

    pub fn snapshot(&self, category: Category) -> Result<Vec<i64>, WindowError> {
        let window = self.windows[category.index()]
            .read()
            .map_err(|_| WindowError::Poisoned(category))?;
        Ok(window.snapshot())
    }

    pub fn average(&self, category: Category) -> Result<Average, WindowError> {
        let window = self.windows[category.index()]
            .read()
            .map_err(|_| WindowError::Poisoned(category))?;
        Ok(window.average())
    }

    /// Current number of values held for every category.
    pub fn sizes(&self) -> Result<Vec<(Category, usize)>, WindowError> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let window = self.windows[category.index()]
                    .read()
                    .map_err(|_| WindowError::Poisoned(category))?;
                Ok((category, window.len()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        panic::{AssertUnwindSafe, catch_unwind},
        sync::Arc,
        thread,
    };

    use super::*;

    fn registry(capacity: usize) -> WindowRegistry {
        WindowRegistry::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn windows_are_kept_per_category() {
        let registry = registry(10);
        registry.ingest(Category::Even, &[2, 4, 6]).unwrap();
        registry.ingest(Category::Primes, &[3, 5]).unwrap();

        assert_eq!(registry.snapshot(Category::Even).unwrap(), vec![2, 4, 6]);
        assert_eq!(registry.snapshot(Category::Primes).unwrap(), vec![3, 5]);
        assert!(registry.snapshot(Category::Random).unwrap().is_empty());
        assert_eq!(
            registry.sizes().unwrap(),
            vec![
                (Category::Primes, 2),
                (Category::Fibonacci, 0),
                (Category::Even, 3),
                (Category::Random, 0),
            ]
        );
    }

    #[test]
    fn ingest_reports_prev_curr_and_avg() {
        let registry = registry(10);
        let first = registry.ingest(Category::Even, &[2, 4, 6]).unwrap();
        assert_eq!(first.prev, Vec::<i64>::new());
        assert_eq!(first.curr, vec![2, 4, 6]);
        assert_eq!(first.avg.to_string(), "4.00");

        let second = registry.ingest(Category::Even, &[]).unwrap();
        assert_eq!(second.prev, second.curr);
        assert_eq!(second.avg, first.avg);
        assert_eq!(registry.average(Category::Even).unwrap(), first.avg);
    }

    #[test]
    fn concurrent_ingests_keep_window_consistent() {
        let registry = Arc::new(registry(10));
        let handles: Vec<_> = (0..8)
            .map(|thread_id| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        let base = thread_id * 1_000 + i * 3;
                        let batch = [base, base + 1, base + 2];
                        let report = registry.ingest(Category::Random, &batch).unwrap();
                        assert!(report.prev.len() <= 10);
                        assert_eq!(report.curr.len(), 10.min(report.prev.len() + 3));
                        // The batch always lands contiguously at the tail.
                        assert_eq!(&report.curr[report.curr.len() - 3..], &batch);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.snapshot(Category::Random).unwrap().len(), 10);
    }

    #[test]
    fn poisoned_window_is_reported() {
        let registry = registry(3);
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = registry.windows[Category::Fibonacci.index()]
                .write()
                .unwrap();
            panic!("poison the fibonacci window");
        }));

        assert!(matches!(
            registry.ingest(Category::Fibonacci, &[1]),
            Err(WindowError::Poisoned(Category::Fibonacci))
        ));
        assert!(registry.sizes().is_err());
        assert!(registry.ingest(Category::Primes, &[2]).is_ok());
    }
}
