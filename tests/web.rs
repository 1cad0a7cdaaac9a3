//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use io_volcano_particles::legend::Legend;
use io_volcano_particles::{GasPolicy, SimConfig, Simulation};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn context() -> CanvasRenderingContext2d {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(SimConfig::WIDTH);
    canvas.set_height(SimConfig::HEIGHT);
    canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into::<CanvasRenderingContext2d>()
        .unwrap()
}

#[wasm_bindgen_test]
fn entropy_seeded_simulation_runs() {
    let mut sim = Simulation::new(SimConfig {
        gas_policy: GasPolicy::Uniform,
        ..SimConfig::default()
    });
    for _ in 0..100 {
        sim.tick();
    }
    assert_eq!(sim.spawned(), 100);
}

#[wasm_bindgen_test]
fn legend_paints_top_left() {
    let ctx = context();
    Legend::new().render(&ctx).unwrap();
    let data = ctx.get_image_data(40.0, 20.0, 10.0, 80.0).unwrap().data();
    // black label backgrounds are opaque
    assert!(data.0.chunks(4).all(|px| px[3] == 0xff));
}
