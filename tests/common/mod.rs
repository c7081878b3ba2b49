//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::Instant;

use msaboard::config::ViewerConfig;
use msaboard::messages::{Msg, SessionMsg};
use msaboard::model::{AppModel, PanelId};
use msaboard::msa::{AlignmentMatrix, SequenceRecord};
use msaboard::theme::Theme;
use msaboard::update::update;

/// Window size used by model tests. 12 columns of 90 px plus margins.
pub const WINDOW: (f64, f64) = (1210.0, 900.0);

/// Nucleotide alignment with ids `seq0..` and residues cycling ACGT
pub fn nucleotides(rows: usize, cols: usize) -> AlignmentMatrix {
    let bases = ['A', 'C', 'G', 'T'];
    AlignmentMatrix::new(
        (0..rows)
            .map(|r| {
                let seq: String = (0..cols).map(|c| bases[(r + c) % bases.len()]).collect();
                SequenceRecord::new(format!("seq{}", r), seq)
            })
            .collect(),
    )
}

/// Empty model with default config and theme
pub fn test_model() -> AppModel {
    AppModel::new(ViewerConfig::default(), Theme::default(), WINDOW.0, WINDOW.1)
}

/// Open an alignment through the update loop and return its panel id
pub fn open_panel(model: &mut AppModel, filename: &str, data: AlignmentMatrix) -> PanelId {
    update(
        model,
        Msg::Session(SessionMsg::AddPanel {
            filename: filename.to_string(),
            data,
        }),
    );
    *model
        .session()
        .panel_ids
        .last()
        .expect("panel was added")
}

/// Model with one 200 x 300 nucleotide panel
pub fn model_with_panel() -> (AppModel, PanelId) {
    let mut model = test_model();
    let id = open_panel(&mut model, "a.fasta", nucleotides(200, 300));
    (model, id)
}

/// Fixed reference instant for scheduler-driven tests
pub fn t0() -> Instant {
    Instant::now()
}
