#![cfg(target_arch = "wasm32")]
use cake_core::{BlowConfig, BlowDetector, CakeConfig, CakeSession};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod frame;
mod render;

use constants::{CAKE_CONTAINER_ID, COUNTER_ID};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cake-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .get_element_by_id(CAKE_CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CAKE_CONTAINER_ID))?;
    let counter = document.get_element_by_id(COUNTER_ID);
    if counter.is_none() {
        log::warn!("missing #{}; candle count will not be shown", COUNTER_ID);
    }

    let canvas = dom::create_canvas_in(&document, &container)?;
    wire_canvas_resize(&canvas);

    let config = CakeConfig::default();
    let session = Rc::new(RefCell::new(
        CakeSession::new(config.clone(), rand::random())
            .map_err(|e| anyhow::anyhow!("cake config: {}", e))?,
    ));

    // Microphone is filled in once access is granted; clicks use it to resume audio.
    let mic_ctx: Rc<RefCell<Option<web::AudioContext>>> = Rc::new(RefCell::new(None));

    {
        let session = session.clone();
        let mic_ctx = mic_ctx.clone();
        dom::add_click_listener(&container, move || {
            let id = session.borrow_mut().place();
            log::info!("[click] placed {}", id);
            if let Some(ctx) = mic_ctx.borrow().as_ref() {
                audio::resume_if_suspended(ctx);
            }
        });
    }

    // The session ticks from the first frame; pixels follow once the GPU is up.
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session: session.clone(),
        gpu: None,
        canvas: canvas.clone(),
        counter,
        started: Instant::now(),
        events: Vec::new(),
    }));
    frame::start_loop(frame_ctx.clone());

    // Blow detection is optional: without a microphone the cake still works.
    spawn_local(async move {
        let mic = match audio::open_microphone().await {
            Ok(m) => m,
            Err(e) => {
                log::warn!("[mic] unavailable, blowing out candles disabled: {:?}", e);
                return;
            }
        };
        let detector = match BlowDetector::new(BlowConfig::default()) {
            Ok(d) => d,
            Err(e) => {
                log::error!("[mic] blow config: {}", e);
                return;
            }
        };
        mic.resume_if_suspended();
        *mic_ctx.borrow_mut() = Some(mic.audio_ctx.clone());
        frame::start_blow_loop(frame::BlowContext {
            session,
            detector,
            mic,
        });
    });

    let gpu = frame::init_gpu(&canvas, &config).await;
    frame_ctx.borrow_mut().gpu = gpu;
    Ok(())
}
