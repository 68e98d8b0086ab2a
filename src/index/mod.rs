//! FM-index over a packed nucleotide sequence.
//!
//! Built once from the suffix array (which is discarded afterwards), the
//! index holds the Burrows-Wheeler transform of the sentinel-terminated
//! text, every 32nd suffix-array entry for position recovery, a blocked
//! rank structure, and the cumulative symbol-count table. All queries
//! are read-only; a built index can be shared freely across threads.

mod rank;
mod search;

use thiserror::Error;
use tracing::debug;

pub use search::SuffixMatch;

use crate::sequence::{Base, PackedDna};
use crate::suffix::{self, SuffixArrayError};
use rank::RankTable;

/// Suffix-array sampling stride for position recovery.
const SAMPLE_STRIDE: usize = 32;

/// Errors surfaced while building an [`FmIndex`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// Suffix array construction failed.
    #[error("suffix array construction failed: {0}")]
    SuffixArray(#[from] SuffixArrayError),
}

/// Errors surfaced by index queries. A failed query leaves the index
/// untouched and usable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The pattern held no symbols.
    #[error("pattern must be non-empty")]
    EmptyPattern,

    /// A pattern symbol was outside the query alphabet.
    #[error("pattern symbol {symbol} at position {position} is outside the query alphabet")]
    InvalidSymbol {
        /// The offending symbol value.
        symbol: u8,
        /// Its position within the pattern.
        position: usize,
    },

    /// A suffix-array row was past the end of the index.
    #[error("row {row} is outside the {rows} suffix rows of this index")]
    RowOutOfBounds {
        /// The requested row.
        row: usize,
        /// Number of rows the index holds.
        rows: usize,
    },
}

/// Immutable compressed full-text index.
#[derive(Debug, Clone)]
pub struct FmIndex {
    /// BWT of the sentinel-terminated text, with the sentinel row
    /// elided from storage.
    bwt: PackedDna,
    rank_table: RankTable,
    /// Every 32nd suffix-array entry.
    sampled: Vec<u64>,
    /// `c[s]` is the first suffix row whose suffix starts with symbol
    /// `s`; row 0 belongs to the sentinel, and `c[4]` closes the T
    /// block.
    c: [u64; 5],
    /// Row whose BWT symbol would be the sentinel.
    endloc: usize,
    /// Indexed text length, excluding the sentinel.
    len: usize,
}

impl FmIndex {
    /// Build the index for `text`. The suffix array is materialized
    /// once during construction and dropped before returning.
    pub fn build(text: &PackedDna) -> Result<Self, BuildError> {
        let sa = suffix::workspace(text)?;
        let len = text.len();

        let mut sampled = Vec::with_capacity(len / SAMPLE_STRIDE + 1);
        for i in 0..=len / SAMPLE_STRIDE {
            sampled.push(sa[SAMPLE_STRIDE * i] as u64);
        }

        let mut bwt = PackedDna::with_capacity(len);
        let mut endloc = 0;
        for (row, &pos) in sa.iter().enumerate() {
            if pos == 0 {
                // This row's predecessor is the sentinel; it is left
                // out of the packed BWT and recorded by position.
                endloc = row;
                continue;
            }
            bwt.push_code(text.code(pos as usize - 1));
        }

        let rank_table = RankTable::build(&bwt);
        let totals = rank_table.totals();
        let mut c = [1u64; 5];
        for s in 0..4 {
            c[s + 1] = c[s] + totals[s];
        }

        debug!(len, endloc, "built fm-index");
        Ok(Self {
            bwt,
            rank_table,
            sampled,
            c,
            endloc,
            len,
        })
    }

    /// Length of the indexed text, excluding the sentinel.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: empty sequences are rejected at build time.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of suffix rows, i.e. text length plus the sentinel row.
    pub fn rows(&self) -> usize {
        self.len + 1
    }

    /// The cumulative count table: `c_table()[s]` is the first row of
    /// symbol `s`'s block in sorted-rotation order.
    pub fn c_table(&self) -> &[u64; 5] {
        &self.c
    }

    /// Row whose Burrows-Wheeler symbol is the sentinel.
    pub fn sentinel_row(&self) -> usize {
        self.endloc
    }

    /// The BWT symbol at `row`, or `None` for the sentinel row.
    pub fn bwt_base(&self, row: usize) -> Option<Base> {
        debug_assert!(row < self.rows());
        if row == self.endloc {
            return None;
        }
        let stored = if row > self.endloc { row - 1 } else { row };
        Some(Base::from_code(self.bwt.code(stored)))
    }

    /// Count of `base` in the conceptual `BWT[..pos]`. Monotone in
    /// `pos` and increasing by at most one per row.
    pub fn rank(&self, base: Base, pos: usize) -> usize {
        debug_assert!(pos <= self.rows());
        let stored = if pos > self.endloc { pos - 1 } else { pos };
        self.rank_table
            .rank(&self.bwt, base.code(), stored.min(self.len)) as usize
    }

    /// LF-mapping: the row of the rotation one text position earlier.
    pub fn lf(&self, row: usize) -> usize {
        if row == self.endloc {
            return 0;
        }
        let base = self
            .bwt_base(row)
            .expect("non-sentinel rows always carry a base");
        self.c[base.code() as usize] as usize + self.rank(base, row)
    }

    /// Recover the text offset for suffix row `row` (the inverse
    /// suffix-array lookup) by LF-walking to the nearest sampled row.
    pub fn sa_position(&self, row: usize) -> Result<usize, QueryError> {
        if row >= self.rows() {
            return Err(QueryError::RowOutOfBounds {
                row,
                rows: self.rows(),
            });
        }
        let mut row = row;
        let mut steps = 0;
        while row % SAMPLE_STRIDE != 0 {
            row = self.lf(row);
            steps += 1;
        }
        let mut pos = self.sampled[row / SAMPLE_STRIDE] as usize + steps;
        if pos > self.len {
            // The walk crossed the sentinel; wrap past the text end.
            pos -= self.len + 1;
        }
        Ok(pos)
    }
}
