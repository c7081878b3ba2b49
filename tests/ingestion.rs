//! File ingestion tests
//!
//! FASTA parsing, drop-time type detection and batch loading into panels.

mod common;

use std::fs;
use std::path::PathBuf;

use common::test_model;
use msaboard::commands::Cmd;
use msaboard::ingest::{load_all, load_alignment_file, IngestError, IngestSource};
use msaboard::messages::{AppMsg, Msg};
use msaboard::msa::{detect_file_type, parse_fasta, FileKind};
use msaboard::update::update;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_two_record_nucleotide_alignment() {
    let data = parse_fasta(">seq1\nAC-GT\n>seq2\nACGGT\n");
    assert_eq!(data.row_count(), 2);
    assert_eq!(data.col_count(), 5);
    assert_eq!(data.row(0).map(|r| r.id.as_str()), Some("seq1"));
    assert_eq!(data.row(1).map(|r| r.len()), Some(5));
    assert!(data.is_nucleotide());
}

#[test]
fn test_protein_symbols_classify_as_protein() {
    let data = parse_fasta(">p1\nMKVLE\n>p2\nMKILE\n");
    assert!(!data.is_nucleotide());
}

#[test]
fn test_multiline_records_and_crlf() {
    let data = parse_fasta(">a desc\r\nACG\r\nTT\r\n\r\n>b\r\nACGTT\r\n");
    assert_eq!(data.row(0).map(|r| r.id.as_str()), Some("a desc"));
    assert_eq!(data.row(0).map(|r| r.sequence()), Some("ACGTT"));
    assert!(!data.is_ragged());
}

#[test]
fn test_invalid_utf8_byte_is_a_single_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("odd.fasta");
    fs::write(&path, b">a\nA\xFFC\n>b\nAGC\n").unwrap();

    let loaded = load_alignment_file(&path, IngestSource::Picked).unwrap();
    assert_eq!(loaded.data.col_count(), 3);
    assert!(!loaded.data.is_ragged());
    assert_eq!(loaded.data.residue(0, 1), Some('\u{FFFD}'));
    assert_eq!(loaded.data.residue(0, 2), Some('C'));
}

#[test]
fn test_text_without_headers_is_empty() {
    let data = parse_fasta("just some notes\nACGT\n");
    assert!(data.is_empty());
    assert_eq!(data.col_count(), 0);
}

#[test]
fn test_detection_by_extension_or_content() {
    assert_eq!(detect_file_type("x.FASTA", ""), FileKind::Alignment);
    assert_eq!(detect_file_type("x.fa", "anything"), FileKind::Alignment);
    assert_eq!(detect_file_type("reads.txt", "\n>r1\nACGT\n"), FileKind::Alignment);
    assert_eq!(detect_file_type("notes.txt", "> not a header\n"), FileKind::Unknown);
    assert_eq!(detect_file_type("notes.txt", "hello"), FileKind::Unknown);
}

#[test]
fn test_dropped_files_are_sniffed_but_picked_files_are_not() {
    let dir = TempDir::new().unwrap();
    let notes = write(&dir, "notes.txt", "hello world\n");

    let dropped = load_alignment_file(&notes, IngestSource::Dropped);
    assert!(matches!(dropped, Err(IngestError::NotAlignment)));

    let picked = load_alignment_file(&notes, IngestSource::Picked).unwrap();
    assert!(picked.data.is_empty());
    assert_eq!(picked.filename, "notes.txt");
}

#[test]
fn test_load_all_keeps_order_and_reports_rejections() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.fasta", ">s1\nACGT\n");
    let notes = write(&dir, "notes.txt", "plain text\n");
    let b = write(&dir, "reads.txt", ">r1\nAC\n>r2\nGT\n");

    let results = load_all(&[a, notes, b], IngestSource::Dropped);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().map(|f| f.filename.as_str()).ok(), Some("a.fasta"));
    let rejected = results[1].as_ref().unwrap_err();
    assert!(rejected.user_message().contains("notes.txt"));
    assert_eq!(results[2].as_ref().map(|f| f.data.row_count()).ok(), Some(2));
}

#[test]
fn test_drop_produces_load_command() {
    let mut model = test_model();
    let paths = vec![PathBuf::from("/tmp/a.fasta")];
    let cmd = update(&mut model, Msg::App(AppMsg::FilesDropped(paths.clone())));
    assert_eq!(
        cmd,
        Some(Cmd::LoadFiles {
            paths,
            source: IngestSource::Dropped,
        })
    );
}

#[test]
fn test_loaded_files_open_panels_and_report_rejections() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.fasta", ">s1\nACGT\n>s2\nACGA\n");
    let b = write(&dir, "b.fasta", ">s1\nMKV\n");
    let missing = dir.path().join("missing.fasta");

    let mut model = test_model();
    let results = load_all(&[a, missing, b], IngestSource::Picked);
    update(&mut model, Msg::App(AppMsg::FilesLoaded(results)));

    let session = model.session();
    assert_eq!(session.len(), 2);
    let names: Vec<&str> = session
        .panel_ids
        .iter()
        .filter_map(|id| session.config(*id))
        .map(|c| c.filename.as_str())
        .collect();
    assert_eq!(names, vec!["a.fasta", "b.fasta"]);
    assert_eq!(model.history.undo_depth(), 2);

    let status = model.status.as_ref().map(|s| s.text.as_str()).unwrap_or("");
    assert!(status.contains("missing.fasta"), "status: {status}");
}
