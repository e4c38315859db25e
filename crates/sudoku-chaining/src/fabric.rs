//! CandidateFabric: dual-indexed candidate state for link gathering.
//!
//! Provides O(1) lookups for "which cells in sector S have candidate d?" and
//! "which sectors does cell C belong to?". Every chaining rule reads its grid
//! through `&CandidateFabric`.

use std::sync::OnceLock;

use crate::bitset::{candidate, cell_of, digit_of, BitSet, Candidate, CandidateMap, CellMap};
use crate::error::{ChainingError, Result};

/// Sector index convention: 0..8 = rows, 9..17 = columns, 18..26 = boxes.
pub const SECTOR_ROW_BASE: usize = 0;
pub const SECTOR_COL_BASE: usize = 9;
pub const SECTOR_BOX_BASE: usize = 18;

/// Candidate state of one grid snapshot.
#[derive(Debug, Clone)]
pub struct CandidateFabric {
    /// Per-cell candidates (indexed by linear cell index 0..80)
    pub cell_cands: [BitSet; 81],
    /// Placed values (None if empty)
    pub values: [Option<u8>; 81],
    /// sector_digit_cells[sector][digit-1] = bitmask of positions within the sector
    /// holding `digit` as a candidate.
    pub sector_digit_cells: [[u16; 9]; 27],
    /// Candidate count per sector per digit
    pub sector_digit_count: [[u8; 9]; 27],
    /// Which 3 sectors each cell belongs to: [row_sector, col_sector, box_sector]
    pub cell_sectors: [[usize; 3]; 81],
    /// Precomputed 20 peers per cell (cells in same row/col/box, excluding self)
    pub peers: [[u8; 20]; 81],
    /// Number of empty cells
    pub empty_count: usize,
}

/// Convert (row, col) to linear cell index
#[inline]
pub fn cell_index(row: usize, col: usize) -> usize {
    row * 9 + col
}

/// Convert linear cell index back to (row, col)
#[inline]
pub fn cell_pos(idx: usize) -> (usize, usize) {
    (idx / 9, idx % 9)
}

/// Get the 9 cell indices belonging to a sector
pub fn sector_cells(sector: usize) -> [usize; 9] {
    if sector < 9 {
        let row = sector;
        std::array::from_fn(|col| cell_index(row, col))
    } else if sector < 18 {
        let col = sector - 9;
        std::array::from_fn(|row| cell_index(row, col))
    } else {
        let box_idx = sector - 18;
        let box_row = (box_idx / 3) * 3;
        let box_col = (box_idx % 3) * 3;
        std::array::from_fn(|i| cell_index(box_row + i / 3, box_col + i % 3))
    }
}

/// Compute the 20 peers of a cell (same row/col/box, excluding self)
fn compute_peers(idx: usize) -> [u8; 20] {
    let (row, col) = cell_pos(idx);
    let box_row = (row / 3) * 3;
    let box_col = (col / 3) * 3;
    let mut peers = [0u8; 20];
    let mut count = 0;

    for c in (0..9).filter(|&c| c != col) {
        peers[count] = cell_index(row, c) as u8;
        count += 1;
    }
    for r in (0..9).filter(|&r| r != row) {
        peers[count] = cell_index(r, col) as u8;
        count += 1;
    }
    // Box peers outside the row and column
    for dr in 0..3 {
        for dc in 0..3 {
            let (r, c) = (box_row + dr, box_col + dc);
            if r != row && c != col {
                peers[count] = cell_index(r, c) as u8;
                count += 1;
            }
        }
    }
    debug_assert_eq!(count, 20);
    peers
}

fn compute_cell_sectors(idx: usize) -> [usize; 3] {
    let (row, col) = cell_pos(idx);
    let box_idx = (row / 3) * 3 + col / 3;
    [
        SECTOR_ROW_BASE + row,
        SECTOR_COL_BASE + col,
        SECTOR_BOX_BASE + box_idx,
    ]
}

/// Position (0..8) of cell `idx` within a sector it belongs to.
fn sector_cell_position(sector: usize, idx: usize) -> usize {
    let (row, col) = cell_pos(idx);
    if sector < 9 {
        col
    } else if sector < 18 {
        row
    } else {
        (row % 3) * 3 + col % 3
    }
}

/// Peers of `cell` as a `CellMap`; the table is shared by every fabric.
pub fn peer_map(cell: usize) -> CellMap {
    static PEERS: OnceLock<[CellMap; 81]> = OnceLock::new();
    PEERS.get_or_init(|| {
        std::array::from_fn(|idx| compute_peers(idx).iter().map(|&p| p as usize).collect())
    })[cell]
}

/// Cells of `sector` as a `CellMap`
pub fn sector_map(sector: usize) -> CellMap {
    static SECTORS: OnceLock<[CellMap; 27]> = OnceLock::new();
    SECTORS.get_or_init(|| std::array::from_fn(|s| sector_cells(s).into_iter().collect()))[sector]
}

impl CandidateFabric {
    fn blank() -> Self {
        let mut fab = CandidateFabric {
            cell_cands: [BitSet::empty(); 81],
            values: [None; 81],
            sector_digit_cells: [[0u16; 9]; 27],
            sector_digit_count: [[0u8; 9]; 27],
            cell_sectors: [[0; 3]; 81],
            peers: [[0; 20]; 81],
            empty_count: 81,
        };
        for idx in 0..81 {
            fab.cell_sectors[idx] = compute_cell_sectors(idx);
            fab.peers[idx] = compute_peers(idx);
        }
        fab
    }

    /// An empty grid where every cell still holds all nine digits.
    pub fn empty() -> Self {
        let mut fab = Self::blank();
        fab.cell_cands = [BitSet::all(); 81];
        fab.rebuild_indexes();
        fab
    }

    /// Parse an 81-character puzzle string (`0` or `.` for empty cells).
    /// Candidates of empty cells are the digits no peer has placed.
    pub fn from_puzzle(puzzle: &str) -> Result<Self> {
        let chars: Vec<char> = puzzle.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 81 {
            return Err(ChainingError::InvalidPuzzle(format!(
                "expected 81 cells, found {}",
                chars.len()
            )));
        }

        let mut fab = Self::blank();
        for (idx, ch) in chars.into_iter().enumerate() {
            match ch {
                '0' | '.' => {}
                '1'..='9' => fab.values[idx] = Some(ch as u8 - b'0'),
                other => {
                    return Err(ChainingError::InvalidPuzzle(format!(
                        "unexpected character {other:?} at cell {idx}"
                    )))
                }
            }
        }

        for idx in 0..81 {
            if fab.values[idx].is_some() {
                continue;
            }
            let seen: BitSet = fab.peers[idx]
                .iter()
                .filter_map(|&p| fab.values[p as usize])
                .collect();
            fab.cell_cands[idx] = !seen;
        }
        fab.rebuild_indexes();
        Ok(fab)
    }

    /// Replace the candidates of an empty cell.
    pub fn set_candidates(&mut self, cell: usize, digits: BitSet) -> Result<()> {
        if cell >= 81 {
            return Err(ChainingError::CellOutOfRange(cell));
        }
        self.values[cell] = None;
        self.cell_cands[cell] = digits;
        self.rebuild_indexes();
        Ok(())
    }

    /// Builder form of `set_candidates`
    pub fn with_candidates(mut self, cell: usize, digits: &[u8]) -> Result<Self> {
        if let Some(&bad) = digits.iter().find(|d| !(1..=9).contains(*d)) {
            return Err(ChainingError::DigitOutOfRange(bad));
        }
        self.set_candidates(cell, digits.iter().copied().collect())?;
        Ok(self)
    }

    /// Place a value, removing the cell's candidates and the digit from its peers.
    pub fn place(&mut self, cell: usize, digit: u8) -> Result<()> {
        if cell >= 81 {
            return Err(ChainingError::CellOutOfRange(cell));
        }
        if !(1..=9).contains(&digit) {
            return Err(ChainingError::DigitOutOfRange(digit));
        }
        self.values[cell] = Some(digit);
        self.cell_cands[cell] = BitSet::empty();
        for &p in &self.peers[cell] {
            self.cell_cands[p as usize].remove(digit);
        }
        self.rebuild_indexes();
        Ok(())
    }

    /// Recompute the sector-digit indexes and the empty count from `cell_cands`.
    pub fn rebuild_indexes(&mut self) {
        self.sector_digit_cells = [[0u16; 9]; 27];
        self.sector_digit_count = [[0u8; 9]; 27];
        self.empty_count = 0;

        for idx in 0..81 {
            if self.values[idx].is_some() {
                continue;
            }
            self.empty_count += 1;
            let sectors = self.cell_sectors[idx];
            for d in self.cell_cands[idx].iter() {
                let di = (d - 1) as usize;
                for &sec in &sectors {
                    self.sector_digit_cells[sec][di] |= 1u16 << sector_cell_position(sec, idx);
                    self.sector_digit_count[sec][di] += 1;
                }
            }
        }
    }

    /// Check if two cells see each other (same row, col, or box)
    #[inline]
    pub fn sees(&self, a: usize, b: usize) -> bool {
        self.cell_sectors[a][0] == self.cell_sectors[b][0]
            || self.cell_sectors[a][1] == self.cell_sectors[b][1]
            || self.cell_sectors[a][2] == self.cell_sectors[b][2]
    }

    pub fn empty_cells(&self) -> CellMap {
        (0..81).filter(|&i| self.values[i].is_none()).collect()
    }

    /// Empty cells holding exactly two candidates
    pub fn bivalue_cells(&self) -> CellMap {
        (0..81)
            .filter(|&i| self.values[i].is_none() && self.cell_cands[i].count() == 2)
            .collect()
    }

    #[inline]
    pub fn has_cand(&self, idx: usize, digit: u8) -> bool {
        self.cell_cands[idx].contains(digit)
    }

    /// Whether the candidate is still present in the grid
    #[inline]
    pub fn exists(&self, cand: Candidate) -> bool {
        cand < 729 && self.has_cand(cell_of(cand), digit_of(cand))
    }

    /// Cells still holding `digit` as a candidate
    pub fn candidates_map(&self, digit: u8) -> CellMap {
        (0..81).filter(|&i| self.has_cand(i, digit)).collect()
    }

    /// Every live candidate of the grid
    pub fn all_candidates(&self) -> CandidateMap {
        (0..81)
            .flat_map(|cell| self.cell_cands[cell].iter().map(move |d| candidate(cell, d)))
            .collect()
    }

    /// Get cells in a sector that have a given candidate, as a list of cell indices
    pub fn sector_cells_with_candidate(&self, sector: usize, digit: u8) -> Vec<usize> {
        let mask = self.sector_digit_cells[sector][(digit - 1) as usize];
        sector_cells(sector)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1u16 << i) != 0)
            .map(|(_, cell)| cell)
            .collect()
    }

    #[inline]
    pub fn sector_cand_count(&self, sector: usize, digit: u8) -> u8 {
        self.sector_digit_count[sector][(digit - 1) as usize]
    }
}

impl Default for CandidateFabric {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_cell_index_roundtrip() {
        for row in 0..9 {
            for col in 0..9 {
                assert_eq!(cell_pos(cell_index(row, col)), (row, col));
            }
        }
    }

    #[test]
    fn test_sector_cells() {
        assert_eq!(sector_cells(0), [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(sector_cells(9), [0, 9, 18, 27, 36, 45, 54, 63, 72]);
        assert_eq!(sector_cells(18), [0, 1, 2, 9, 10, 11, 18, 19, 20]);
    }

    #[test]
    fn test_sector_cell_position_matches_layout() {
        for sector in 0..27 {
            for (i, cell) in sector_cells(sector).into_iter().enumerate() {
                assert_eq!(sector_cell_position(sector, cell), i);
            }
        }
    }

    #[test]
    fn test_peers() {
        let peers = peer_map(0);
        assert_eq!(peers.len(), 20);
        assert!(peers.contains(1));
        assert!(peers.contains(9));
        assert!(peers.contains(10));
        assert!(!peers.contains(0));
    }

    #[test]
    fn test_fabric_from_puzzle() {
        let fab = CandidateFabric::from_puzzle(PUZZLE).unwrap();
        assert_eq!(fab.values[0], Some(5));

        let idx = cell_index(0, 2);
        assert!(fab.values[idx].is_none());
        assert!(!fab.cell_cands[idx].is_empty());
        assert!(!fab.cell_cands[idx].contains(5));
        assert!(!fab.exists(candidate(idx, 5)));
        assert_eq!(fab.empty_count, 51);
    }

    #[test]
    fn test_rejects_bad_puzzle() {
        assert!(matches!(
            CandidateFabric::from_puzzle("123"),
            Err(ChainingError::InvalidPuzzle(_))
        ));
        let bad = PUZZLE.replacen('0', "x", 1);
        assert!(CandidateFabric::from_puzzle(&bad).is_err());
    }

    #[test]
    fn test_sees() {
        let fab = CandidateFabric::from_puzzle(PUZZLE).unwrap();
        assert!(fab.sees(0, 5));
        assert!(fab.sees(0, 9));
        assert!(fab.sees(0, 10));
        assert!(!fab.sees(0, 40));
    }

    #[test]
    fn test_place_updates_peers() {
        let mut fab = CandidateFabric::empty();
        fab.place(0, 4).unwrap();
        assert_eq!(fab.empty_count, 80);
        assert!(!fab.has_cand(1, 4));
        assert!(!fab.has_cand(9, 4));
        assert!(fab.has_cand(40, 4));
        assert_eq!(fab.sector_cand_count(0, 4), 0);
        assert_eq!(fab.candidates_map(4).len(), 80 - 20);
    }

    #[test]
    fn test_bivalue_cells() {
        let fab = CandidateFabric::empty().with_candidates(10, &[2, 8]).unwrap();
        assert_eq!(fab.bivalue_cells(), CellMap::from_cell(10));
        assert!(CandidateFabric::empty().with_candidates(10, &[0]).is_err());
    }
}
