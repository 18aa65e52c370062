//! Parallel task runner: a worker pool processes an independent stream of
//! scrambles while a single drain loop emits rows in input order.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

/// Runs `solve` over every item of `items` using `workers` threads
/// (granularity 1, dynamic work-stealing via a shared atomic cursor), and
/// calls `emit` once per item, strictly in input order, as soon as each
/// result becomes available.
///
/// Results that complete out of order are held in a small pending map until
/// the lowest-indexed slot is ready, not buffered wholesale: at any instant
/// the map holds at most one entry per in-flight worker, not one per item in
/// the corpus.
///
/// `solve` must be safe to call concurrently from many threads; it
/// typically only reads shared, read-only tables.
pub fn run_ordered<T, R, S, E>(items: &[T], workers: usize, solve: S, mut emit: E)
where
    T: Sync,
    R: Send,
    S: Fn(&T) -> R + Sync,
    E: FnMut(usize, R),
{
    let workers = workers.max(1);
    let n = items.len();
    if n == 0 {
        return;
    }
    let cursor = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, R)>();

    std::thread::scope(|scope| {
        for _ in 0..workers.min(n) {
            let tx = tx.clone();
            scope.spawn(|| loop {
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                if i >= n {
                    return;
                }
                let result = solve(&items[i]);
                if tx.send((i, result)).is_err() {
                    return;
                }
            });
        }
        drop(tx);

        let mut pending: HashMap<usize, R> = HashMap::new();
        let mut next = 0;
        while next < n {
            if let Some(result) = pending.remove(&next) {
                emit(next, result);
                next += 1;
                continue;
            }
            match rx.recv() {
                Ok((i, result)) if i == next => {
                    emit(next, result);
                    next += 1;
                }
                Ok((i, result)) => {
                    pending.insert(i, result);
                }
                Err(_) => break,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_input_order_despite_uneven_work() {
        let items: Vec<u32> = (0..200).collect();
        let mut out = Vec::new();
        run_ordered(
            &items,
            8,
            |&n| {
                // Make earlier items artificially slower so completion order
                // differs from input order.
                if n % 7 == 0 {
                    std::thread::yield_now();
                }
                n * 2
            },
            |i, r| out.push((i, r)),
        );
        let expected: Vec<(usize, u32)> = items.iter().enumerate().map(|(i, &n)| (i, n * 2)).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_input_emits_nothing() {
        let items: Vec<u32> = Vec::new();
        let mut calls = 0;
        run_ordered(&items, 4, |&n| n, |_, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn single_worker_still_completes() {
        let items = vec![1, 2, 3];
        let mut out = Vec::new();
        run_ordered(&items, 1, |&n| n * n, |_, r| out.push(r));
        assert_eq!(out, vec![1, 4, 9]);
    }
}
