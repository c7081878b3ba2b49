//! App message handlers (window events, frame ticks, file loading)

use std::time::Instant;

use super::{commit_label_width, dispatch, merge, release_capture};
use crate::commands::{redraw_if, Cmd};
use crate::ingest::IngestSource;
use crate::messages::{AppMsg, Msg, SessionMsg};
use crate::model::{AppModel, PanelId};

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Resize { width, height, now } => {
            // Applied on the next tick, once per frame
            model.canvas.pending_resize.coalesce((width, height), now);
            None
        }

        AppMsg::ScaleFactorChanged(scale) => {
            tracing::info!(scale, "scale factor changed");
            model.canvas.scale_factor = scale;
            Some(Cmd::Redraw)
        }

        AppMsg::Tick(now) => tick(model, now),

        AppMsg::OpenFileDialog => Some(Cmd::ShowOpenFileDialog),

        AppMsg::OpenFiles(paths) => load(paths, IngestSource::Picked),

        AppMsg::FilesDropped(paths) => load(paths, IngestSource::Dropped),

        AppMsg::FilesLoaded(results) => {
            let mut cmd = None;
            let mut rejected = Vec::new();
            for result in results {
                match result {
                    Ok(file) => {
                        let msg = Msg::Session(SessionMsg::AddPanel {
                            filename: file.filename,
                            data: file.data,
                        });
                        cmd = merge(cmd, dispatch(model, msg));
                    }
                    Err(rejection) => {
                        tracing::warn!(
                            path = %rejection.path.display(),
                            error = %rejection.error,
                            "file rejected"
                        );
                        rejected.push(rejection.user_message());
                    }
                }
            }
            if !rejected.is_empty() {
                model.set_status(rejected.join("  "), Instant::now());
                cmd = merge(cmd, Some(Cmd::Redraw));
            }
            cmd
        }

        AppMsg::FocusLost => redraw_if(release_capture(model)),

        AppMsg::Quit => Some(Cmd::Quit),
    }
}

fn load(paths: Vec<std::path::PathBuf>, source: IngestSource) -> Option<Cmd> {
    if paths.is_empty() {
        return None;
    }
    Some(Cmd::LoadFiles { paths, source })
}

/// Flush everything that became due: the coalesced window resize, trailing
/// scroll offsets, per-frame gutter commits and status expiry.
fn tick(model: &mut AppModel, now: Instant) -> Option<Cmd> {
    let mut changed = false;

    if let Some(size) = model.canvas.pending_resize.take_due(now) {
        if size != model.canvas.window_size {
            model.canvas.window_size = size;
            model.layout_panels();
            changed = true;
        }
    }

    let ids: Vec<PanelId> = model.session().panel_ids.clone();
    for id in ids {
        let Some(data) = model.session().config(id).map(|c| c.data.clone()) else {
            continue;
        };
        let Some(view) = model.views.get_mut(&id) else {
            continue;
        };
        changed |= view.poll_scroll(&data, now);
        if let Some(width) = view.take_due_commit(now) {
            commit_label_width(model, id, width);
        }
    }

    if model.status.as_ref().is_some_and(|s| s.is_expired(now)) {
        model.status = None;
        changed = true;
    }

    redraw_if(changed)
}
