use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::{CursorIcon, Window};

use msaboard::commands::Cmd;
use msaboard::config::ViewerConfig;
use msaboard::ingest;
use msaboard::messages::{AppMsg, Msg, PointerMsg};
use msaboard::model::{AppModel, HitTarget, PointerCapture};
use msaboard::scheduler::{earliest, FRAME_INTERVAL};
use msaboard::update::update;
use msaboard::Theme;

use super::input::{shortcut, wheel_delta, Modifiers};
use crate::view::Renderer;

const INITIAL_WINDOW_SIZE: (f64, f64) = (1200.0, 800.0);

pub struct App {
    model: AppModel,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    /// Files dropped in the current burst, sent together on the next wait
    dropped: Vec<PathBuf>,
    /// Files from the command line, opened once the window exists
    startup_files: Vec<PathBuf>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Worker threads that have not answered yet
    jobs_in_flight: usize,
    fatal: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: ViewerConfig, theme: Theme, startup_files: Vec<PathBuf>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let (width, height) = INITIAL_WINDOW_SIZE;
        Self {
            model: AppModel::new(config, theme, width, height),
            renderer: None,
            window: None,
            context: None,
            modifiers: ModifiersState::empty(),
            dropped: Vec::new(),
            startup_files,
            msg_tx,
            msg_rx,
            jobs_in_flight: 0,
            fatal: None,
        }
    }

    /// Error that stopped the event loop, if any
    pub fn into_result(self) -> Result<()> {
        match self.fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("msaboard")
            .with_inner_size(LogicalSize::new(INITIAL_WINDOW_SIZE.0, INITIAL_WINDOW_SIZE.1));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;

        let renderer = Renderer::new(
            Rc::clone(&window),
            &context,
            self.model.config.font_path.as_deref(),
            self.model.config.font_size,
        )?;

        let scale = window.scale_factor();
        let size = window.inner_size().to_logical::<f64>(scale);
        self.model.canvas.scale_factor = scale;
        self.model.canvas.window_size = (size.width, size.height);
        self.model.char_width = renderer.char_width();
        self.model.layout_panels();

        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Option<Cmd> {
        let now = Instant::now();
        match event {
            WindowEvent::Resized(size) => {
                let scale = self.model.canvas.scale_factor;
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        tracing::error!(error = %e, "surface resize failed");
                    }
                }
                let logical = size.to_logical::<f64>(scale);
                update(
                    &mut self.model,
                    Msg::App(AppMsg::Resize {
                        width: logical.width,
                        height: logical.height,
                        now,
                    }),
                )
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = &mut self.renderer {
                    match renderer.set_scale_factor(*scale_factor) {
                        Ok(()) => self.model.char_width = renderer.char_width(),
                        Err(e) => tracing::error!(error = %e, "font reload failed"),
                    }
                }
                update(
                    &mut self.model,
                    Msg::App(AppMsg::ScaleFactorChanged(*scale_factor)),
                )
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                let mods = Modifiers {
                    ctrl: self.modifiers.control_key(),
                    shift: self.modifiers.shift_key(),
                    logo: self.modifiers.super_key(),
                };
                let msg = shortcut(&event.logical_key, mods, self.model.hovered_panel)?;
                update(&mut self.model, msg)
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = position.to_logical::<f64>(self.model.canvas.scale_factor);
                let cmd = update(
                    &mut self.model,
                    Msg::Pointer(PointerMsg::Moved {
                        x: pos.x,
                        y: pos.y,
                        now,
                    }),
                );
                self.update_cursor_icon(pos.x, pos.y);
                cmd
            }
            WindowEvent::CursorLeft { .. } => {
                update(&mut self.model, Msg::Pointer(PointerMsg::Left { now }))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let msg = match state {
                    ElementState::Pressed => {
                        let (x, y) = self.model.pointer?;
                        PointerMsg::Pressed { x, y, now }
                    }
                    ElementState::Released => PointerMsg::Released { now },
                };
                update(&mut self.model, Msg::Pointer(msg))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = self.model.pointer?;
                let (dx, dy) = wheel_delta(
                    *delta,
                    self.model.canvas.scale_factor,
                    self.modifiers.shift_key(),
                );
                update(
                    &mut self.model,
                    Msg::Pointer(PointerMsg::Wheel { x, y, dx, dy, now }),
                )
            }
            WindowEvent::DroppedFile(path) => {
                // winit delivers one event per file; batch them
                self.dropped.push(path.clone());
                None
            }
            WindowEvent::Focused(false) => update(&mut self.model, Msg::App(AppMsg::FocusLost)),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!(error = %e, "render failed");
                }
                None
            }
            _ => None,
        }
    }

    fn update_cursor_icon(&self, x: f64, y: f64) {
        let Some(window) = &self.window else { return };
        let icon = match self.model.capture {
            Some(PointerCapture::Gutter(_)) => CursorIcon::ColResize,
            Some(PointerCapture::Layout(_)) => CursorIcon::Grabbing,
            None => match self.model.hit_test(x, y) {
                HitTarget::UploadButton | HitTarget::PanelRemove(_) => CursorIcon::Pointer,
                HitTarget::PanelHeader(_) => CursorIcon::Grab,
                HitTarget::PanelResize(_) => CursorIcon::SeResize,
                HitTarget::GutterHandle(_) => CursorIcon::ColResize,
                HitTarget::PanelBody { .. } => CursorIcon::Crosshair,
                HitTarget::Toolbar | HitTarget::Canvas => CursorIcon::Default,
            },
        };
        window.set_cursor(icon);
    }

    fn render(&mut self) -> Result<()> {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&mut self.model)?;
        }
        Ok(())
    }

    fn process_cmd(&mut self, event_loop: &ActiveEventLoop, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(event_loop, cmd);
                }
            }
            Cmd::LoadFiles { paths, source } => {
                let tx = self.msg_tx.clone();
                self.jobs_in_flight += 1;
                std::thread::spawn(move || {
                    let results = ingest::load_all(&paths, source);
                    let _ = tx.send(Msg::App(AppMsg::FilesLoaded(results)));
                });
            }
            Cmd::ShowOpenFileDialog => {
                let tx = self.msg_tx.clone();
                self.jobs_in_flight += 1;
                std::thread::spawn(move || {
                    let paths = rfd::FileDialog::new()
                        .set_title("Open alignments")
                        .add_filter("FASTA alignment", &["fasta", "fas", "fa"])
                        .pick_files()
                        .unwrap_or_default();
                    let _ = tx.send(Msg::App(AppMsg::OpenFiles(paths)));
                });
            }
            Cmd::Quit => event_loop.exit(),
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(event_loop, cmd);
        }
    }

    fn process_async_messages(&mut self, event_loop: &ActiveEventLoop) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.jobs_in_flight = self.jobs_in_flight.saturating_sub(1);
            self.dispatch(event_loop, msg);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            tracing::error!(error = %e, "failed to initialize window");
            self.fatal = Some(e);
            event_loop.exit();
            return;
        }
        if !self.startup_files.is_empty() {
            let files = std::mem::take(&mut self.startup_files);
            self.dispatch(event_loop, Msg::App(AppMsg::OpenFiles(files)));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        if let Some(cmd) = self.handle_event(&event) {
            self.process_cmd(event_loop, cmd);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.dropped.is_empty() {
            let files = std::mem::take(&mut self.dropped);
            self.dispatch(event_loop, Msg::App(AppMsg::FilesDropped(files)));
        }

        self.process_async_messages(event_loop);
        self.dispatch(event_loop, Msg::App(AppMsg::Tick(Instant::now())));

        // Sleep until the next throttled/coalesced deadline. Workers cannot
        // wake the loop, so keep checking the channel once per frame.
        let mut deadline = self.model.next_deadline();
        if self.jobs_in_flight > 0 {
            deadline = earliest([deadline, Some(Instant::now() + FRAME_INTERVAL)]);
        }
        let flow = match deadline {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(flow);
    }
}
