//! The table partition.

use crate::error::{Result, SeatingError};

/// A partition of participants `0..N` into ordered tables.
///
/// Every participant belongs to exactly one table. The only mutation is
/// [`swap_one`](Assignment::swap_one), an exchange that keeps both the
/// partition and every table size intact.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    participants: usize,
    tables: Vec<Vec<usize>>,
}

impl Assignment {
    /// Round-robin: participant `i` goes to table `i % tables`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_seating::assignment::Assignment;
    ///
    /// let a = Assignment::initialize(5, 2).unwrap();
    /// assert_eq!(a.table(0), &[0, 2, 4]);
    /// assert_eq!(a.table(1), &[1, 3]);
    /// ```
    pub fn initialize(participants: usize, tables: usize) -> Result<Self> {
        if tables == 0 || tables > participants {
            return Err(SeatingError::InvalidTableCount {
                tables,
                participants,
            });
        }
        let mut buckets = vec![Vec::with_capacity(participants / tables + 1); tables];
        for p in 0..participants {
            buckets[p % tables].push(p);
        }
        Self::from_tables(participants, buckets)
    }

    /// Wraps explicit tables after checking they partition `0..participants`
    /// and that none is empty.
    pub fn from_tables(participants: usize, tables: Vec<Vec<usize>>) -> Result<Self> {
        if tables.is_empty() || tables.len() > participants {
            return Err(SeatingError::InvalidTableCount {
                tables: tables.len(),
                participants,
            });
        }
        if let Some(table) = tables.iter().position(Vec::is_empty) {
            return Err(SeatingError::EmptyTable { table });
        }
        let assignment = Self {
            participants,
            tables,
        };
        if !assignment.is_partition() {
            return Err(SeatingError::DimensionMismatch {
                what: "distinct seated participants",
                expected: participants,
                actual: assignment.seated_distinct(),
            });
        }
        Ok(assignment)
    }

    /// Exchanges `tables[a][pos_a]` with `tables[b][pos_b]`.
    ///
    /// Applying the same swap twice restores the original assignment.
    ///
    /// # Panics
    ///
    /// Panics if a table or position is out of range.
    pub fn swap_one(&mut self, a: usize, b: usize, pos_a: usize, pos_b: usize) {
        if a == b {
            self.tables[a].swap(pos_a, pos_b);
            return;
        }
        let (lo, hi, pos_lo, pos_hi) = if a < b {
            (a, b, pos_a, pos_b)
        } else {
            (b, a, pos_b, pos_a)
        };
        let (head, tail) = self.tables.split_at_mut(hi);
        std::mem::swap(&mut head[lo][pos_lo], &mut tail[0][pos_hi]);
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, table: usize) -> &[usize] {
        &self.tables[table]
    }

    pub fn tables(&self) -> &[Vec<usize>] {
        &self.tables
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.tables.iter().map(Vec::len).collect()
    }

    /// Table holding `participant`, if seated.
    pub fn table_of(&self, participant: usize) -> Option<usize> {
        self.tables.iter().position(|t| t.contains(&participant))
    }

    /// Per-participant table index, `None` for participants not seated.
    pub fn table_by_participant(&self) -> Vec<Option<usize>> {
        let mut seats = vec![None; self.participants];
        for (table, members) in self.tables.iter().enumerate() {
            for &p in members {
                if let Some(seat) = seats.get_mut(p) {
                    *seat = Some(table);
                }
            }
        }
        seats
    }

    /// True when every participant is seated exactly once and nothing else is.
    pub fn is_partition(&self) -> bool {
        let seated: usize = self.tables.iter().map(Vec::len).sum();
        seated == self.participants && self.seated_distinct() == self.participants
    }

    fn seated_distinct(&self) -> usize {
        let mut seen = vec![false; self.participants];
        let mut distinct = 0;
        for &p in self.tables.iter().flatten() {
            if let Some(slot) = seen.get_mut(p) {
                if !*slot {
                    *slot = true;
                    distinct += 1;
                }
            }
        }
        distinct
    }
}
