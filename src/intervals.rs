//! Non-overlapping interval map.
//!
//! [`IntervalMap`] associates half-open intervals `[start, end)` with values
//! and keeps its keys pairwise disjoint. Inserting an interval that overlaps
//! stored ones truncates or splits them so that the newest value owns the
//! overlapped positions:
//!
//! ```text
//! stored:    [0 ......... 6)  -> red
//! insert:        [2 .. 4)     -> blue
//! result:    [0..2) [2..4) [4..6)
//!             red    blue   red
//! ```
//!
//! ## Invariants
//!
//! - Every key satisfies `start < end` ([`Interval::new`] refuses anything
//!   else).
//! - No two keys overlap. Because of that, ordering the keys by `start` also
//!   orders them by `end`, which is what makes the overlap query a single
//!   backwards walk from the query's end.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};

/// Half-open range of offsets with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    start: usize,
    end: usize,
}

impl Interval {
    /// Create an interval, rejecting empty and inverted ranges.
    ///
    /// ```
    /// use grec::Interval;
    ///
    /// assert!(Interval::new(2, 6).is_ok());
    /// assert!(Interval::new(3, 3).is_err());
    /// ```
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start < end { Ok(Self { start, end }) } else { Err(Error::InvalidInterval { start, end }) }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Strict half-open overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl TryFrom<Range<usize>> for Interval {
    type Error = Error;

    fn try_from(range: Range<usize>) -> Result<Self> {
        Interval::new(range.start, range.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Map from disjoint intervals to values, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalMap<V> {
    /// start -> (end, value)
    spans: BTreeMap<usize, (usize, V)>,
}

impl<V> Default for IntervalMap<V> {
    fn default() -> Self {
        Self { spans: BTreeMap::new() }
    }
}

impl<V> IntervalMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// All stored intervals overlapping `query`, in ascending order.
    pub fn overlapping(&self, query: Interval) -> Vec<Interval> {
        let mut found: Vec<Interval> = self
            .spans
            .range(..query.end)
            .rev()
            .take_while(|(_, (end, _))| *end > query.start)
            .map(|(&start, &(end, _))| Interval { start, end })
            .collect();
        found.reverse();
        found
    }

    /// Value stored under exactly `interval`.
    pub fn get(&self, interval: Interval) -> Option<&V> {
        match self.spans.get(&interval.start) {
            Some((end, value)) if *end == interval.end => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, interval: Interval) -> bool {
        self.get(interval).is_some()
    }

    /// Remove exactly `interval`, returning its value.
    pub fn remove(&mut self, interval: Interval) -> Option<V> {
        match self.spans.get(&interval.start) {
            Some((end, _)) if *end == interval.end => self.spans.remove(&interval.start).map(|(_, value)| value),
            _ => None,
        }
    }

    /// Value covering the single position `offset`, if any.
    pub fn at(&self, offset: usize) -> Option<(Interval, &V)> {
        let (&start, (end, value)) = self.spans.range(..=offset).next_back()?;
        (offset < *end).then(|| (Interval { start, end: *end }, value))
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter { inner: self.spans.iter() }
    }

    pub fn intervals(&self) -> impl DoubleEndedIterator<Item = Interval> + '_ {
        self.iter().map(|(interval, _)| interval)
    }
}

impl<V: Clone> IntervalMap<V> {
    /// Insert `value` over `interval`, overriding whatever was stored there.
    ///
    /// Stored intervals that overlap are cut back to the parts outside
    /// `interval`; one that fully spans it is split in two.
    pub fn insert(&mut self, interval: Interval, value: V) {
        for hit in self.overlapping(interval) {
            let Some((_, old)) = self.spans.remove(&hit.start) else {
                continue;
            };
            let keep_left = hit.start < interval.start;
            let keep_right = interval.end < hit.end;
            match (keep_left, keep_right) {
                (true, true) => {
                    self.spans.insert(hit.start, (interval.start, old.clone()));
                    self.spans.insert(interval.end, (hit.end, old));
                }
                (true, false) => {
                    self.spans.insert(hit.start, (interval.start, old));
                }
                (false, true) => {
                    self.spans.insert(interval.end, (hit.end, old));
                }
                (false, false) => {}
            }
        }
        self.spans.insert(interval.start, (interval.end, value));
    }
}

impl<V: Clone> FromIterator<(Interval, V)> for IntervalMap<V> {
    fn from_iter<T: IntoIterator<Item = (Interval, V)>>(iter: T) -> Self {
        let mut map = IntervalMap::new();
        map.extend(iter);
        map
    }
}

impl<V: Clone> Extend<(Interval, V)> for IntervalMap<V> {
    fn extend<T: IntoIterator<Item = (Interval, V)>>(&mut self, iter: T) {
        for (interval, value) in iter {
            self.insert(interval, value);
        }
    }
}

/// Ascending iterator over `(Interval, &V)`.
pub struct Iter<'a, V> {
    inner: btree_map::Iter<'a, usize, (usize, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Interval, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&start, (end, value))| (Interval { start, end: *end }, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(&start, (end, value))| (Interval { start, end: *end }, value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a IntervalMap<V> {
    type Item = (Interval, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
