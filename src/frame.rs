use crate::audio::MicInput;
use crate::dom;
use crate::render;
use cake_core::{BlowDetector, CakeConfig, CakeSession, SessionEvent};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Animation loop state: advances the session and draws it.
pub struct FrameContext<'a> {
    pub session: Rc<RefCell<CakeSession>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub counter: Option<web::Element>,
    pub started: Instant,
    pub events: Vec<SessionEvent>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = self.started.elapsed();
        {
            let mut session = self.session.borrow_mut();
            session.tick(now);
            session.drain_events(&mut self.events);
        }
        self.apply_events();

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let session = self.session.borrow();
            if let Err(e) = g.render(session.candles()) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn apply_events(&mut self) {
        for ev in self.events.drain(..) {
            match ev {
                SessionEvent::CounterChanged(n) => {
                    if let Some(el) = &self.counter {
                        dom::set_text(el, &n.to_string());
                    }
                }
                SessionEvent::CandleExtinguished(id) => log::info!("[cake] {} went out", id),
                SessionEvent::CandleRemoved(id) => log::debug!("[cake] {} removed", id),
                _ => {}
            }
        }
    }
}

/// Blow polling loop state: feeds microphone spectra to the detector.
pub struct BlowContext {
    pub session: Rc<RefCell<CakeSession>>,
    pub detector: BlowDetector,
    pub mic: MicInput,
}

impl BlowContext {
    pub fn poll(&mut self) {
        let sample_rate = self.mic.sample_rate();
        let spectrum = self.mic.read_spectrum();
        let mut session = self.session.borrow_mut();
        self.detector.poll(spectrum, sample_rate, &mut session);
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    config: &CakeConfig,
) -> Option<render::GpuState<'static>> {
    let textures = render::CakeTextures::load().await;
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, config, textures).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Call `step` once per display refresh, for the lifetime of the page.
fn request_loop(mut step: impl FnMut() + 'static) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        step();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    request_loop(move || frame_ctx.borrow_mut().frame());
}

pub fn start_blow_loop(blow_ctx: BlowContext) {
    let mut ctx = blow_ctx;
    request_loop(move || ctx.poll());
}
