// Gas ejecta erupting from a volcanic vent on Io, drawn onto an HTML canvas.
// The particle model is plain Rust; `eruption` wires it to the browser.

mod utils;

pub mod clock;
pub mod color;
pub mod error;
pub mod eruption;
pub mod gas;
pub mod legend;
pub mod particle;
pub mod simulation;
pub mod surface;

pub use crate::clock::FrameClock;
pub use crate::color::Color;
pub use crate::error::SimError;
pub use crate::eruption::{start, Eruption};
pub use crate::gas::{GasKind, GasPolicy};
pub use crate::particle::{Particle, Status};
pub use crate::simulation::{SimConfig, Simulation};
pub use crate::surface::{PixelSurface, TrailSurface};

use wasm_bindgen::prelude::*;
use web_sys::console;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    // a second call would fail because the logger is already set
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("console logger already initialized");
    }
}

// Scoped console.time / console.timeEnd pair
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
