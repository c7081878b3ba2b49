//! FASTA alignment parsing and file-type detection

use super::model::{AlignmentMatrix, SequenceRecord};

/// Extensions accepted without sniffing the content
pub const ALIGNMENT_EXTENSIONS: &[&str] = &["fasta", "fas", "fa"];

/// Number of leading characters inspected when sniffing content
pub const SNIFF_CHARS: usize = 2000;

/// Result of file-type detection for dropped files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Alignment,
    Unknown,
}

/// Decide whether a file looks like an alignment.
///
/// The extension is checked first; otherwise the first [`SNIFF_CHARS`]
/// characters must contain a line starting with `>` followed by a
/// non-whitespace character.
pub fn detect_file_type(filename: &str, text: &str) -> FileKind {
    let lower = filename.to_lowercase();
    let by_extension = lower
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALIGNMENT_EXTENSIONS.contains(&ext));
    if by_extension {
        return FileKind::Alignment;
    }

    let head = match text.char_indices().nth(SNIFF_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    };

    let has_header = head.lines().any(|line| {
        line.strip_prefix('>')
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| !c.is_whitespace())
    });

    if has_header {
        FileKind::Alignment
    } else {
        FileKind::Unknown
    }
}

/// Parse FASTA text into an alignment.
///
/// A line beginning with `>` starts a record whose id is the trimmed
/// remainder; following lines are trimmed and concatenated into its
/// sequence. Blank lines and text before the first header are ignored.
/// Input without headers yields an empty alignment, never an error.
pub fn parse_fasta(content: &str) -> AlignmentMatrix {
    let mut records = Vec::new();
    // (id, residues) of the record being read
    let mut current: Option<(&str, String)> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some((id, sequence)) = current.take() {
                records.push(SequenceRecord::new(id, sequence));
            }
            current = Some((header.trim(), String::new()));
        } else if let Some((_, sequence)) = current.as_mut() {
            sequence.push_str(line);
        }
    }

    if let Some((id, sequence)) = current {
        records.push(SequenceRecord::new(id, sequence));
    }

    AlignmentMatrix::new(records)
}
