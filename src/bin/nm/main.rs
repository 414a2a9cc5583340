//! nm - interactive NoiseMachine voice demo
//!
//! Plays the voice through the default audio output and maps a handful of
//! keys to the panel controls. Run with: cargo run --bin nm

mod app;

use app::NoiseMachineApp;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    NoiseMachineApp::new().run()
}
