// Browser side of the simulation: loads the background, owns the canvas, and drives
// ticks from requestAnimationFrame until stopped.

use crate::clock::FrameClock;
use crate::error::SimError;
use crate::gas::GasPolicy;
use crate::legend::Legend;
use crate::simulation::{SimConfig, Simulation};
use crate::surface::PixelSurface;
use crate::Timer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, ImageData};

const TITLE: &str = "IO Volcano Simulator";
// Side of the square drawn at each particle's current position
const HEAD_SIZE: u32 = 2;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct Driver {
    sim: Simulation,
    clock: FrameClock,
    legend: Legend,
    ctx: CanvasRenderingContext2d,
    frame: PixelSurface,
    profiling: bool,
}

impl Driver {
    fn on_frame(&mut self, now_ms: f64) -> Result<(), JsValue> {
        let _timer = self.profiling.then(|| Timer::new("Eruption::frame"));
        let due = self.clock.advance(now_ms);
        if due == 0 {
            return Ok(());
        }
        for _ in 0..due {
            self.sim.tick();
        }
        self.render()
    }

    fn render(&mut self) -> Result<(), JsValue> {
        self.frame.copy_from(self.sim.background());
        let offset = (HEAD_SIZE / 2) as i32;
        for p in self.sim.particles() {
            let [x, y] = p.pos();
            self.frame.draw_rect(
                x.round() as i32 - offset,
                y.round() as i32 - offset,
                HEAD_SIZE,
                HEAD_SIZE,
                p.color(),
            );
        }

        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.frame.pixels()),
            self.frame.width(),
            self.frame.height(),
        )?;
        self.ctx.put_image_data(&image, 0.0, 0.0)?;
        self.legend.render(&self.ctx)
    }
}

/// Handle to a running eruption. Dropping it from JS without calling `stop` leaves the loop running.
#[wasm_bindgen]
pub struct Eruption {
    driver: Rc<RefCell<Driver>>,
    frame_loop: Rc<RefCell<Option<FrameCallback>>>,
    request_id: Rc<Cell<Option<i32>>>,
}

#[wasm_bindgen]
impl Eruption {
    /// Quit: cancels the pending frame and releases the frame loop.
    pub fn stop(&mut self) -> Result<(), JsValue> {
        if let Some(id) = self.request_id.take() {
            window()?.cancel_animation_frame(id)?;
        }
        if self.frame_loop.borrow_mut().take().is_some() {
            let driver = self.driver.borrow();
            log::info!(
                "eruption stopped after {} ticks ({} particles live)",
                driver.sim.ticks(),
                driver.sim.particles().len()
            );
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.borrow().is_some()
    }

    pub fn live_particles(&self) -> usize {
        self.driver.borrow().sim.particles().len()
    }

    pub fn ticks(&self) -> f64 {
        self.driver.borrow().sim.ticks() as f64
    }

    /// Wraps every frame in console.time / console.timeEnd.
    pub fn set_profiling(&mut self, enabled: bool) {
        self.driver.borrow_mut().profiling = enabled;
    }
}

/// Starts the eruption on `canvas_id` over the image at `background_url`.
///
/// `random_gases` picks each particle's gas uniformly, otherwise every particle is H2O.
/// `seed` makes the launch angles (and gases) reproducible.
#[wasm_bindgen]
pub async fn start(
    canvas_id: String,
    background_url: String,
    random_gases: bool,
    seed: Option<u32>,
) -> Result<Eruption, JsValue> {
    let window = window()?;
    let document = window.document().ok_or(SimError::NoDocument)?;
    document.set_title(TITLE);

    let canvas = document
        .get_element_by_id(&canvas_id)
        .ok_or_else(|| SimError::CanvasNotFound(canvas_id.clone()))?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(SimConfig::WIDTH);
    canvas.set_height(SimConfig::HEIGHT);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| SimError::NoContext(canvas_id.clone()))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let image = load_image(&background_url).await?;
    let background = rasterize(&ctx, &image, SimConfig::WIDTH, SimConfig::HEIGHT)?;
    log::info!(
        "background `{}` loaded ({}x{} natural size)",
        background_url,
        image.natural_width(),
        image.natural_height()
    );

    let gas_policy = if random_gases {
        GasPolicy::Uniform
    } else {
        GasPolicy::default()
    };
    let config = SimConfig {
        gas_policy,
        seed: seed.map(u64::from),
        ..SimConfig::default()
    };
    let frame = background.clone();
    let driver = Rc::new(RefCell::new(Driver {
        sim: Simulation::with_background(config, background),
        clock: FrameClock::new(),
        legend: Legend::new(),
        ctx,
        frame,
        profiling: false,
    }));

    let frame_loop: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let request_id = Rc::new(Cell::new(None));
    {
        let driver = driver.clone();
        let request_id = request_id.clone();
        let next = frame_loop.clone();
        *frame_loop.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if let Err(err) = driver.borrow_mut().on_frame(now) {
                log::error!("frame failed: {:?}", err);
            }
            // stop() takes the closure out, which ends the loop
            if let Some(callback) = next.borrow().as_ref() {
                match request_frame(callback) {
                    Ok(id) => request_id.set(Some(id)),
                    Err(err) => log::error!("could not schedule next frame: {:?}", err),
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }
    if let Some(callback) = frame_loop.borrow().as_ref() {
        request_id.set(Some(request_frame(callback)?));
    }

    log::info!(
        "eruption started on `{}` at {} ticks/s, gas policy {:?}",
        canvas_id,
        FrameClock::TICK_HZ,
        gas_policy
    );
    Ok(Eruption {
        driver,
        frame_loop,
        request_id,
    })
}

fn window() -> Result<web_sys::Window, SimError> {
    web_sys::window().ok_or(SimError::NoWindow)
}

fn request_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

async fn load_image(url: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let on_error = Closure::once(move |err: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &err);
        });

        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        on_load.forget();
        on_error.forget();
    });

    image.set_src(url);

    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|_| SimError::BackgroundLoad(url.to_owned()))?;
    Ok(image)
}

// Draws the image once and reads its pixels back, so trails can be painted over it
fn rasterize(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    width: u32,
    height: u32,
) -> Result<PixelSurface, JsValue> {
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;
    let data = ctx.get_image_data(0.0, 0.0, width as f64, height as f64)?;
    Ok(PixelSurface::from_rgba(width, height, data.data().0)?)
}
