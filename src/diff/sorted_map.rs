//! Sorted-map diff engine
//!
//! Linear merge-join over two mappings that share one ascending key order.
//! Keys are visited in ascending order without re-sorting; the first
//! `Flow::Stop` from the listener ends the walk.

use crate::types::Flow;
use std::cmp::Ordering;

/// Receives one callback per key of the merged key space
pub trait PropertyDiffListener<K, P, C> {
    type Error;

    /// Key only present on the previous side
    fn removed(&mut self, key: &K, previous: &P) -> Result<Flow, Self::Error>;

    /// Key only present on the current side
    fn added(&mut self, key: &K, current: &C) -> Result<Flow, Self::Error>;

    /// Key present on both sides
    fn updated(&mut self, key: &K, previous: &P, current: &C) -> Result<Flow, Self::Error>;
}

/// Diff two ascending `(key, value)` sequences
///
/// Both inputs must be sorted by key with no duplicates, which holds for
/// any `BTreeMap` iterator. Returns `Flow::Continue` only if every key was
/// visited and every callback asked to continue.
pub fn diff<'a, K, P, C, L>(
    previous: impl IntoIterator<Item = (&'a K, &'a P)>,
    current: impl IntoIterator<Item = (&'a K, &'a C)>,
    listener: &mut L,
) -> Result<Flow, L::Error>
where
    K: Ord + 'a,
    P: 'a,
    C: 'a,
    L: PropertyDiffListener<K, P, C>,
{
    let mut previous = previous.into_iter().peekable();
    let mut current = current.into_iter().peekable();

    loop {
        let order = match (previous.peek(), current.peek()) {
            (Some((prev_key, _)), Some((cur_key, _))) => prev_key.cmp(cur_key),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => return Ok(Flow::Continue),
        };

        let flow = match order {
            Ordering::Less => match previous.next() {
                Some((key, value)) => listener.removed(key, value)?,
                None => Flow::Continue,
            },
            Ordering::Greater => match current.next() {
                Some((key, value)) => listener.added(key, value)?,
                None => Flow::Continue,
            },
            Ordering::Equal => match (previous.next(), current.next()) {
                (Some((key, prev_value)), Some((_, cur_value))) => {
                    listener.updated(key, prev_value, cur_value)?
                }
                _ => Flow::Continue,
            },
        };

        if flow.is_stopped() {
            return Ok(Flow::Stop);
        }
    }
}
