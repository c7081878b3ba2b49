//! Alignment data model types
//!
//! Columns are characters. Alignment files are almost always ASCII, where a
//! residue is a byte; other rows keep a per-residue offset table so cell
//! lookup stays O(1) either way.

use std::sync::OnceLock;

/// Number of leading rows sampled when classifying an alignment
pub const CLASSIFY_SAMPLE_ROWS: usize = 10;
/// Number of leading columns sampled per row when classifying an alignment
pub const CLASSIFY_SAMPLE_COLS: usize = 50;

/// Symbols that only occur in protein sequences (never in IUPAC nucleotide codes)
const PROTEIN_ONLY: &[char] = &[
    'D', 'E', 'F', 'H', 'I', 'K', 'L', 'M', 'P', 'Q', 'R', 'S', 'V', 'W', 'Y',
];

/// One labeled row of an alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Identifier shown in the label gutter
    pub id: String,
    /// Aligned residues, gaps included ('-' or '.')
    sequence: String,
    /// Byte offset of each residue, for rows with non-ASCII characters
    offsets: Option<Box<[usize]>>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        let sequence = sequence.into();
        let offsets = (!sequence.is_ascii())
            .then(|| sequence.char_indices().map(|(i, _)| i).collect());
        Self {
            id: id.into(),
            sequence,
            offsets,
        }
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Residue at a column, or None when the row is shorter than the column
    #[inline]
    pub fn residue_at(&self, col: usize) -> Option<char> {
        match &self.offsets {
            None => self.sequence.as_bytes().get(col).map(|&b| b as char),
            Some(offsets) => self.sequence[*offsets.get(col)?..].chars().next(),
        }
    }

    /// Length of the row in residues
    pub fn len(&self) -> usize {
        self.offsets
            .as_ref()
            .map_or(self.sequence.len(), |offsets| offsets.len())
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Whether an alignment holds nucleotides or amino acids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueKind {
    Nucleotide,
    Protein,
}

/// Parsed alignment: an ordered list of records.
///
/// Rows are expected to share one length but ragged input is tolerated:
/// the column count comes from row 0 and missing residues read as `None`.
#[derive(Debug, Default)]
pub struct AlignmentMatrix {
    rows: Vec<SequenceRecord>,
    kind: OnceLock<ResidueKind>,
}

impl AlignmentMatrix {
    pub fn new(rows: Vec<SequenceRecord>) -> Self {
        Self {
            rows,
            kind: OnceLock::new(),
        }
    }

    /// Number of rows (sequences)
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, taken from the first row (0 when empty)
    #[inline]
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, SequenceRecord::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SequenceRecord] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&SequenceRecord> {
        self.rows.get(index)
    }

    /// Residue at (row, col); None for out-of-range rows or short rows
    #[inline]
    pub fn residue(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row)?.residue_at(col)
    }

    /// Classification, computed once from a bounded prefix and then cached
    pub fn kind(&self) -> ResidueKind {
        *self.kind.get_or_init(|| classify(&self.rows))
    }

    pub fn is_nucleotide(&self) -> bool {
        self.kind() == ResidueKind::Nucleotide
    }

    /// True when any row length differs from the column count
    pub fn is_ragged(&self) -> bool {
        let cols = self.col_count();
        self.rows.iter().any(|r| r.len() != cols)
    }
}

impl Clone for AlignmentMatrix {
    fn clone(&self) -> Self {
        let kind = OnceLock::new();
        if let Some(k) = self.kind.get() {
            let _ = kind.set(*k);
        }
        Self {
            rows: self.rows.clone(),
            kind,
        }
    }
}

impl PartialEq for AlignmentMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for AlignmentMatrix {}

/// Sample the first rows/columns for protein-exclusive symbols.
/// An empty alignment counts as nucleotide.
fn classify(rows: &[SequenceRecord]) -> ResidueKind {
    let has_protein_symbol = rows.iter().take(CLASSIFY_SAMPLE_ROWS).any(|record| {
        record
            .sequence
            .chars()
            .take(CLASSIFY_SAMPLE_COLS)
            .any(|c| PROTEIN_ONLY.contains(&c.to_ascii_uppercase()))
    });

    if has_protein_symbol {
        ResidueKind::Protein
    } else {
        ResidueKind::Nucleotide
    }
}
