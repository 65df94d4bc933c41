use crate::constants::ANALYSER_FFT_SIZE;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Live microphone feeding an analyser, kept for the page lifetime.
pub struct MicInput {
    pub audio_ctx: web::AudioContext,
    pub analyser: web::AnalyserNode,
    _source: web::MediaStreamAudioSourceNode,
    spectrum: Vec<u8>,
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Ask for microphone access and route it into an analyser.
///
/// Fails if the browser has no media devices or the user denies access.
pub async fn open_microphone() -> anyhow::Result<MicInput> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window.navigator().media_devices().map_err(js_err)?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    constraints.set_video(&JsValue::FALSE);
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(js_err)?;
    let stream: web::MediaStream = JsFuture::from(promise)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;

    let audio_ctx = web::AudioContext::new().map_err(js_err)?;
    let source = audio_ctx
        .create_media_stream_source(&stream)
        .map_err(js_err)?;
    let analyser = web::AnalyserNode::new(&audio_ctx).map_err(js_err)?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    source
        .connect_with_audio_node(&analyser)
        .map_err(js_err)?;

    let bins = analyser.frequency_bin_count() as usize;
    log::info!(
        "[mic] analyser ready: {} bins at {} Hz",
        bins,
        audio_ctx.sample_rate()
    );
    Ok(MicInput {
        audio_ctx,
        analyser,
        _source: source,
        spectrum: vec![0; bins],
    })
}

impl MicInput {
    pub fn sample_rate(&self) -> f32 {
        self.audio_ctx.sample_rate()
    }

    /// Latest byte frequency data, one entry per analyser bin.
    pub fn read_spectrum(&mut self) -> &[u8] {
        let bins = self.analyser.frequency_bin_count() as usize;
        if self.spectrum.len() != bins {
            self.spectrum.resize(bins, 0);
        }
        self.analyser.get_byte_frequency_data(&mut self.spectrum);
        &self.spectrum
    }

    pub fn resume_if_suspended(&self) {
        resume_if_suspended(&self.audio_ctx);
    }
}

/// Browsers start contexts suspended until a user gesture.
pub fn resume_if_suspended(audio_ctx: &web::AudioContext) {
    if audio_ctx.state() == web::AudioContextState::Suspended {
        _ = audio_ctx.resume();
    }
}
