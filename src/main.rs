#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use msaboard::cli::CliArgs;
use msaboard::config::ViewerConfig;
use msaboard::theme;

mod runtime;
mod view;

use runtime::App;

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    msaboard::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut config = ViewerConfig::load();
    startup.apply_to(&mut config);

    let theme = theme::load_theme(&config.theme).unwrap_or_else(|e| {
        tracing::warn!(theme = %config.theme, error = %e, "falling back to built-in theme");
        msaboard::Theme::default()
    });

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, theme, startup.files);

    event_loop.run_app(&mut app)?;

    app.into_result()
}
