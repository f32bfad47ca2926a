//! Group spacing for UFO font sources, built on norad and kurbo.

use bezy_spacing::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    match core::runner::run_app(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}
