//! Backward pattern search over the FM-index.
//!
//! All searches share one state machine: a half-open interval of suffix
//! rows, initialized from the pattern's last symbol and narrowed once
//! per preceding symbol via the cumulative table and two rank queries.
//! The interval is either exhausted (no occurrence of the consumed
//! suffix) or, once the pattern is spent, its width is the exact
//! occurrence count.

use std::ops::Range;

use crate::sequence::{Base, WILDCARD};

use super::{FmIndex, QueryError};

/// Result of a maximal-mappable-suffix search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixMatch {
    /// Number of pattern symbols matched, counting from the pattern's
    /// end (trailing wildcards included).
    pub matched: usize,
    /// Suffix rows of the last non-empty interval reached.
    pub rows: Range<usize>,
}

/// Interval state for one backward search.
struct BackwardSearch<'a> {
    index: &'a FmIndex,
    start: usize,
    end: usize,
}

impl<'a> BackwardSearch<'a> {
    /// Interval of all suffixes starting with `base`.
    fn begin(index: &'a FmIndex, base: Base) -> Self {
        let code = base.code() as usize;
        Self {
            index,
            start: index.c[code] as usize,
            end: index.c[code + 1] as usize,
        }
    }

    /// Consume one more pattern symbol, narrowing to the suffixes that
    /// start with `base` followed by the current interval.
    fn step(&mut self, base: Base) {
        let c = self.index.c[base.code() as usize] as usize;
        self.start = c + self.index.rank(base, self.start);
        self.end = c + self.index.rank(base, self.end);
    }

    fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

fn validate(pattern: &[u8], wildcards: bool) -> Result<(), QueryError> {
    if pattern.is_empty() {
        return Err(QueryError::EmptyPattern);
    }
    for (position, &symbol) in pattern.iter().enumerate() {
        if symbol >= 4 && !(wildcards && symbol == WILDCARD) {
            return Err(QueryError::InvalidSymbol { symbol, position });
        }
    }
    Ok(())
}

impl FmIndex {
    /// Exact occurrence count of `pattern` (symbols 0-3) in the
    /// indexed text. Zero occurrences is an ordinary result, not an
    /// error.
    pub fn count(&self, pattern: &[u8]) -> Result<usize, QueryError> {
        Ok(self.search(pattern)?.len())
    }

    /// Raw suffix-row interval of `pattern`, for callers that extend
    /// seeds downstream. The interval is empty when the pattern does
    /// not occur; rows convert to text offsets via
    /// [`sa_position`](FmIndex::sa_position).
    pub fn search(&self, pattern: &[u8]) -> Result<Range<usize>, QueryError> {
        validate(pattern, false)?;

        let (&last, rest) = pattern.split_last().expect("validated non-empty");
        let mut state = BackwardSearch::begin(self, Base::from_code(last));
        for &symbol in rest.iter().rev() {
            if state.is_empty() {
                break;
            }
            state.step(Base::from_code(symbol));
        }
        Ok(state.rows())
    }

    /// Text offset of the occurrence of `pattern` whose suffix sorts
    /// first, or `None` when the pattern does not occur.
    pub fn locate(&self, pattern: &[u8]) -> Result<Option<usize>, QueryError> {
        let rows = self.search(pattern)?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.sa_position(rows.start)?))
    }

    /// Maximal mappable suffix: match `pattern` back to front, stopping
    /// at the first missing extension instead of failing. Trailing
    /// wildcards are skipped but counted as matched; an interior
    /// wildcard is resolved greedily to the base with the most
    /// occurrences in the current interval — a continuation heuristic,
    /// not a best-alignment guarantee.
    pub fn mms(&self, pattern: &[u8]) -> Result<SuffixMatch, QueryError> {
        validate(pattern, true)?;

        let mut len = pattern.len();
        let mut skips = 0;
        while len > 0 && pattern[len - 1] == WILDCARD {
            len -= 1;
            skips += 1;
        }
        if len == 0 {
            // Nothing but wildcards: every row continues the match.
            return Ok(SuffixMatch {
                matched: skips,
                rows: 0..self.rows(),
            });
        }

        let mut state = BackwardSearch::begin(self, Base::from_code(pattern[len - 1]));
        let mut held = state.rows();
        let mut i = len as i64 - 2;
        while i >= 0 {
            if state.is_empty() {
                break;
            }
            held = state.rows();
            let symbol = pattern[i as usize];
            let base = if symbol == WILDCARD {
                self.likeliest_continuation(&state)
            } else {
                Base::from_code(symbol)
            };
            state.step(base);
            i -= 1;
        }

        if state.is_empty() {
            Ok(SuffixMatch {
                matched: (len as i64 - i - 2) as usize + skips,
                rows: held,
            })
        } else {
            Ok(SuffixMatch {
                matched: (len as i64 - i - 1) as usize + skips,
                rows: state.rows(),
            })
        }
    }

    /// The base with the most occurrences inside the current interval.
    fn likeliest_continuation(&self, state: &BackwardSearch<'_>) -> Base {
        let mut best = Base::A;
        let mut max = -1i64;
        for base in Base::ALL {
            let count =
                self.rank(base, state.end) as i64 - self.rank(base, state.start) as i64;
            if count > max {
                max = count;
                best = base;
            }
        }
        best
    }
}
