//! Multiple sequence alignment core
//!
//! This module provides:
//! - `model`: alignment records and residue classification
//! - `parser`: FASTA parsing and file-type detection
//! - `scheme`: residue color tables
//! - `viewport`: virtualized row/column window
//! - `pointer`: pixel to cell mapping and tooltip placement
//! - `render`: cell, ruler and gutter materialization

pub mod model;
pub mod parser;
pub mod pointer;
pub mod render;
pub mod scheme;
pub mod viewport;

pub use model::{AlignmentMatrix, ResidueKind, SequenceRecord};
pub use parser::{detect_file_type, parse_fasta, FileKind};
pub use pointer::{map_pointer, place_tooltip, GridGeometry, HoverCell, TooltipPlacement};
pub use render::{CellDescriptor, GridRenderer, GutterLabel, RulerMark};
pub use scheme::ColorScheme;
pub use viewport::{compute_view_window, ViewWindow, ViewportInput, Virtualizer, CELL_SIZE};
