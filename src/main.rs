mod app;
mod gpu;
mod ui;

use winit::event_loop::{ControlFlow, EventLoop};

use riemann_fan::config::Settings;

fn main() -> Result<(), winit::error::EventLoopError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env();
    log::debug!("Settings: {:?}", settings);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(settings);
    event_loop.run_app(&mut app)
}
