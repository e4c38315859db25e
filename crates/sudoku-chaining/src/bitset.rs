//! Bitset primitives: digit masks, cell sets, and candidate sets.
//!
//! A candidate is a `(cell, digit)` pair flattened to `cell * 9 + (digit - 1)`,
//! so the 729 candidates of a grid index a fixed-width bit array. Digits are
//! always `1..=9` at the API surface; the `- 1` only exists inside the index.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub};

use serde::{Deserialize, Serialize};

use crate::fabric::{peer_map, sector_map};

/// Flattened candidate index: `cell * 9 + (digit - 1)`.
pub type Candidate = usize;

/// Number of candidates in a grid; valid indices are below it.
pub const CANDIDATE_COUNT: Candidate = 729;

/// Build a candidate index from a cell (0..81) and a digit (1..=9).
#[inline]
pub fn candidate(cell: usize, digit: u8) -> Candidate {
    cell * 9 + (digit - 1) as usize
}

/// Cell part of a candidate index
#[inline]
pub fn cell_of(candidate: Candidate) -> usize {
    candidate / 9
}

/// Digit part of a candidate index (1..=9)
#[inline]
pub fn digit_of(candidate: Candidate) -> u8 {
    (candidate % 9) as u8 + 1
}

// ==================== BitSet (digits) ====================

/// A set of digits 1..=9 stored in the low nine bits of a `u16`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BitSet(u16);

impl BitSet {
    const FULL: u16 = 0x1FF;

    /// The empty digit set
    pub const fn empty() -> Self {
        BitSet(0)
    }

    /// All nine digits
    pub const fn all() -> Self {
        BitSet(Self::FULL)
    }

    /// Raw bits, bit `d - 1` set for digit `d`
    pub const fn bits(self) -> u16 {
        self.0
    }

    pub fn from_bits(bits: u16) -> Self {
        BitSet(bits & Self::FULL)
    }

    pub fn from_digit(digit: u8) -> Self {
        BitSet(1 << (digit - 1))
    }

    #[inline]
    pub fn contains(self, digit: u8) -> bool {
        (1..=9).contains(&digit) && self.0 & (1 << (digit - 1)) != 0
    }

    pub fn insert(&mut self, digit: u8) {
        self.0 |= 1 << (digit - 1);
    }

    pub fn remove(&mut self, digit: u8) {
        self.0 &= !(1 << (digit - 1));
    }

    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Exactly one digit present (a power of two)
    #[inline]
    pub fn is_single(self) -> bool {
        self.0.is_power_of_two()
    }

    /// The digit when exactly one is present
    pub fn single(self) -> Option<u8> {
        self.is_single().then(|| self.0.trailing_zeros() as u8 + 1)
    }

    pub fn union(&self, other: &BitSet) -> BitSet {
        BitSet(self.0 | other.0)
    }

    pub fn intersection(&self, other: &BitSet) -> BitSet {
        BitSet(self.0 & other.0)
    }

    pub fn difference(&self, other: &BitSet) -> BitSet {
        BitSet(self.0 & !other.0)
    }

    /// Ascending digits
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9u8).filter(move |&d| self.contains(d))
    }
}

impl BitOr for BitSet {
    type Output = BitSet;
    fn bitor(self, rhs: BitSet) -> BitSet {
        BitSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for BitSet {
    fn bitor_assign(&mut self, rhs: BitSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for BitSet {
    type Output = BitSet;
    fn bitand(self, rhs: BitSet) -> BitSet {
        BitSet(self.0 & rhs.0)
    }
}

impl Not for BitSet {
    type Output = BitSet;
    fn not(self) -> BitSet {
        BitSet(!self.0 & Self::FULL)
    }
}

impl FromIterator<u8> for BitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = BitSet::empty();
        for d in iter {
            set.insert(d);
        }
        set
    }
}

// ==================== CellMap ====================

/// A set of cells 0..81.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellMap(u128);

const CELL_BITS: u128 = (1u128 << 81) - 1;

impl CellMap {
    pub const fn empty() -> Self {
        CellMap(0)
    }

    pub const fn all() -> Self {
        CellMap(CELL_BITS)
    }

    pub fn from_cell(cell: usize) -> Self {
        CellMap(1u128 << cell)
    }

    #[inline]
    pub fn contains(self, cell: usize) -> bool {
        cell < 81 && self.0 & (1u128 << cell) != 0
    }

    pub fn insert(&mut self, cell: usize) {
        self.0 |= 1u128 << cell;
    }

    pub fn remove(&mut self, cell: usize) {
        self.0 &= !(1u128 << cell);
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn first(self) -> Option<usize> {
        (!self.is_empty()).then(|| self.0.trailing_zeros() as usize)
    }

    /// Ascending cell indices
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let cell = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(cell)
        })
    }

    /// Whether the two sets share at least one cell
    pub fn intersects(self, other: CellMap) -> bool {
        self.0 & other.0 != 0
    }

    /// Cells that see every cell of this map. Never contains the map's own cells.
    pub fn peer_intersection(self) -> CellMap {
        if self.is_empty() {
            return CellMap::empty();
        }
        self.iter()
            .fold(CellMap::all(), |acc, cell| acc & peer_map(cell))
    }

    /// Bit `s` set for every sector `s` that contains all cells of the map
    pub fn shared_houses(self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        (0..27)
            .filter(|&s| sector_map(s) & self == self)
            .fold(0u32, |acc, s| acc | 1 << s)
    }

    /// All cells lie inside one box and one row or column
    pub fn is_in_intersection(self) -> bool {
        let houses = self.shared_houses();
        let lines = houses & 0x3FFFF;
        let boxes = houses >> 18;
        lines != 0 && boxes != 0
    }

    /// Attach a digit to every cell
    pub fn with_digit(self, digit: u8) -> CandidateMap {
        self.iter().map(|cell| candidate(cell, digit)).collect()
    }
}

impl BitOr for CellMap {
    type Output = CellMap;
    fn bitor(self, rhs: CellMap) -> CellMap {
        CellMap(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellMap {
    fn bitor_assign(&mut self, rhs: CellMap) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CellMap {
    type Output = CellMap;
    fn bitand(self, rhs: CellMap) -> CellMap {
        CellMap(self.0 & rhs.0)
    }
}

impl BitAndAssign for CellMap {
    fn bitand_assign(&mut self, rhs: CellMap) {
        self.0 &= rhs.0;
    }
}

impl Sub for CellMap {
    type Output = CellMap;
    fn sub(self, rhs: CellMap) -> CellMap {
        CellMap(self.0 & !rhs.0)
    }
}

impl Not for CellMap {
    type Output = CellMap;
    fn not(self) -> CellMap {
        CellMap(!self.0 & CELL_BITS)
    }
}

impl FromIterator<usize> for CellMap {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut map = CellMap::empty();
        for cell in iter {
            map.insert(cell);
        }
        map
    }
}

/// RxCy notation: `r1c23`, `r12c4`, or comma-joined row groups.
impl fmt::Display for CellMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<usize> = self.iter().collect();
        let rows: Vec<usize> = dedup_sorted(cells.iter().map(|c| c / 9));
        let cols: Vec<usize> = dedup_sorted(cells.iter().map(|c| c % 9));

        if rows.len() > 1 && cols.len() == 1 {
            return write!(f, "r{}c{}", join_digits(&rows), cols[0] + 1);
        }

        let groups: Vec<String> = rows
            .iter()
            .map(|&row| {
                let in_row: Vec<usize> = cells
                    .iter()
                    .filter(|&&c| c / 9 == row)
                    .map(|c| c % 9)
                    .collect();
                format!("r{}c{}", row + 1, join_digits(&in_row))
            })
            .collect();
        write!(f, "{}", groups.join(","))
    }
}

fn dedup_sorted(values: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut v: Vec<usize> = values.collect();
    v.sort_unstable();
    v.dedup();
    v
}

fn join_digits(zero_based: &[usize]) -> String {
    zero_based.iter().map(|v| (v + 1).to_string()).collect()
}

// ==================== CandidateMap ====================

const CANDIDATE_WORDS: usize = 12;

/// A set of candidates `0..CANDIDATE_COUNT`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CandidateMap([u64; CANDIDATE_WORDS]);

impl CandidateMap {
    pub const fn empty() -> Self {
        CandidateMap([0; CANDIDATE_WORDS])
    }

    pub fn from_candidate(candidate: Candidate) -> Self {
        let mut map = CandidateMap::empty();
        map.insert(candidate);
        map
    }

    #[inline]
    pub fn contains(&self, candidate: Candidate) -> bool {
        candidate < CANDIDATE_COUNT && self.0[candidate / 64] & (1u64 << (candidate % 64)) != 0
    }

    /// Out-of-range indices are ignored.
    pub fn insert(&mut self, candidate: Candidate) {
        if candidate < CANDIDATE_COUNT {
            self.0[candidate / 64] |= 1u64 << (candidate % 64);
        }
    }

    pub fn remove(&mut self, candidate: Candidate) {
        if candidate < CANDIDATE_COUNT {
            self.0[candidate / 64] &= !(1u64 << (candidate % 64));
        }
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    pub fn first(&self) -> Option<Candidate> {
        self.iter().next()
    }

    /// The only candidate, when the map holds exactly one
    pub fn single(&self) -> Option<Candidate> {
        (self.len() == 1).then(|| self.first()).flatten()
    }

    /// Ascending candidate indices
    pub fn iter(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.0.iter().enumerate().flat_map(|(i, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let offset = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(i * 64 + offset)
            })
        })
    }

    /// Candidates that cannot be true alongside any candidate of the map:
    /// another digit in the same cell, or the same digit in a peer cell.
    pub fn peer_intersection(&self) -> CandidateMap {
        let mut sights = self.iter().map(|cand| {
            let (cell, digit) = (cell_of(cand), digit_of(cand));
            let in_cell = (1..=9u8).filter(|&d| d != digit).map(|d| candidate(cell, d));
            let in_peers = peer_map(cell).iter().map(|p| candidate(p, digit));
            in_cell.chain(in_peers).collect::<CandidateMap>()
        });
        let Some(first) = sights.next() else {
            return CandidateMap::empty();
        };
        sights.fold(first, |acc, sight| acc & sight)
    }

    pub fn intersects(&self, other: &CandidateMap) -> bool {
        self.0.iter().zip(other.0.iter()).any(|(a, b)| a & b != 0)
    }

    /// Cells touched by at least one candidate
    pub fn cells(&self) -> CellMap {
        self.iter().map(cell_of).collect()
    }

    /// Digits used by at least one candidate
    pub fn digits(&self) -> BitSet {
        self.iter().map(digit_of).collect()
    }

    /// Cells holding a candidate of `digit`
    pub fn reduce_by_digit(&self, digit: u8) -> CellMap {
        self.iter()
            .filter(|&c| digit_of(c) == digit)
            .map(cell_of)
            .collect()
    }
}

impl fmt::Debug for CandidateMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CandidateMap({})", self)
    }
}

/// Count first, then the smallest differing candidate decides.
impl Ord for CandidateMap {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.iter().cmp(other.iter()))
    }
}

impl PartialOrd for CandidateMap {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl BitOr for CandidateMap {
    type Output = CandidateMap;
    fn bitor(mut self, rhs: CandidateMap) -> CandidateMap {
        self |= rhs;
        self
    }
}

impl BitOrAssign for CandidateMap {
    fn bitor_assign(&mut self, rhs: CandidateMap) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a |= b;
        }
    }
}

impl BitAnd for CandidateMap {
    type Output = CandidateMap;
    fn bitand(mut self, rhs: CandidateMap) -> CandidateMap {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a &= b;
        }
        self
    }
}

impl Sub for CandidateMap {
    type Output = CandidateMap;
    fn sub(mut self, rhs: CandidateMap) -> CandidateMap {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a &= !b;
        }
        self
    }
}

impl FromIterator<Candidate> for CandidateMap {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut map = CandidateMap::empty();
        for c in iter {
            map.insert(c);
        }
        map
    }
}

/// `r1c23(4)`; several digits are comma-joined, one group per digit.
impl fmt::Display for CandidateMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .digits()
            .iter()
            .map(|digit| format!("{}({})", self.reduce_by_digit(digit), digit))
            .collect();
        write!(f, "{}", groups.join(","))
    }
}
