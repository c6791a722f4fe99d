//! WASM bindings for an interactive crop session.
//!
//! `JsCropSession` forwards DOM events to the core controller. Every method
//! runs synchronously; the host redraws from [`JsCropSession::css_transform`]
//! or [`JsCropSession::state`] after each event.

use cropframe_core::{
    AspectRatio, CropConfig, CropError, CropHandler, CropSession, CroppedImage, Point, Size,
    SourceImage,
};
use wasm_bindgen::prelude::*;

use crate::types::CropState;

/// An open crop dialog.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const session = new JsCropSession(bytes, 3, 800, 400, { padding: 16 });
/// slider.min = String(session.min_zoom);
/// slider.max = String(session.max_zoom);
/// slider.oninput = () => session.set_zoom(Number(slider.value));
/// window.onresize = () => session.resize(box.clientWidth, box.clientHeight);
/// ```
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Decode image bytes and open a session.
    ///
    /// # Arguments
    /// * `bytes` - Encoded image file contents (JPEG or PNG)
    /// * `aspect_ratio` - Crop box `width / height`
    /// * `container_width`, `container_height` - Size of the hosting element
    /// * `config` - Optional partial `CropConfig` object; `undefined` for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(
        bytes: &[u8],
        aspect_ratio: f64,
        container_width: f64,
        container_height: f64,
        config: JsValue,
    ) -> Result<JsCropSession, JsValue> {
        let config = parse_config(config)?;
        Self::open(
            bytes,
            aspect_ratio,
            container_width,
            container_height,
            config,
        )
        .map_err(to_js_error)
    }

    /// Open a session from RGBA pixels the browser already decoded,
    /// e.g. `ctx.getImageData(...).data` of an `ImageBitmap`.
    pub fn from_rgba(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        aspect_ratio: f64,
        container_width: f64,
        container_height: f64,
        config: JsValue,
    ) -> Result<JsCropSession, JsValue> {
        let config = parse_config(config)?;
        let source = SourceImage::from_raw_rgba(width, height, pixels)
            .map_err(to_js_error)?;
        Self::with_source(
            source,
            aspect_ratio,
            container_width,
            container_height,
            config,
        )
        .map_err(to_js_error)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.controller_mut().pointer_down(Point::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.controller_mut().pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.inner.controller_mut().pointer_up();
    }

    /// Forward `WheelEvent.deltaY` in pixels.
    ///
    /// Hosts must scale line-mode deltas (`deltaMode === 1`) to pixels first,
    /// e.g. by 16 per line. Raw line counts are too small to move the zoom
    /// away from the cover zoom, which snaps it straight back.
    pub fn wheel(&mut self, delta_y: f64) {
        self.inner.controller_mut().wheel(delta_y);
    }

    /// Set an absolute zoom from the slider.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner.controller_mut().set_zoom(zoom);
    }

    /// Report a new container size. Resets the framing.
    pub fn resize(&mut self, container_width: f64, container_height: f64) {
        self.inner
            .controller_mut()
            .resize(Size::new(container_width, container_height));
    }

    /// Switch to another aspect ratio. Resets the framing.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) -> Result<(), JsValue> {
        let aspect = AspectRatio::new(aspect_ratio).map_err(to_js_error)?;
        self.inner.controller_mut().set_aspect_ratio(aspect);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.inner.controller_mut().reset();
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.controller().viewport().zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.controller().viewport().offset().x
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.controller().viewport().offset().y
    }

    #[wasm_bindgen(getter)]
    pub fn crop_width(&self) -> f64 {
        self.inner.controller().layout().crop_box.width
    }

    #[wasm_bindgen(getter)]
    pub fn crop_height(&self) -> f64 {
        self.inner.controller().layout().crop_box.height
    }

    #[wasm_bindgen(getter)]
    pub fn min_zoom(&self) -> f64 {
        self.inner.controller().slider_range().min
    }

    #[wasm_bindgen(getter)]
    pub fn max_zoom(&self) -> f64 {
        self.inner.controller().slider_range().max
    }

    #[wasm_bindgen(getter)]
    pub fn cover_zoom(&self) -> f64 {
        self.inner.controller().slider_range().cover
    }

    /// CSS `transform` for the preview `<img>` (natural size, `transform-origin: 0 0`).
    pub fn css_transform(&self) -> String {
        self.inner.preview().css_matrix()
    }

    /// Snapshot of the session as a plain JavaScript object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&CropState::from_session(&self.inner))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export the current framing as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.export_png_bytes().map_err(to_js_error)
    }

    /// Export and pass the PNG to `on_complete(bytes: Uint8Array, width, height)`.
    ///
    /// On failure the callback is not called and the session stays open.
    pub fn confirm(&self, on_complete: &js_sys::Function) -> Result<(), JsValue> {
        let mut handler = JsHandler::new(on_complete);
        if let Err(e) = self.inner.confirm(&mut handler) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
            return Err(to_js_error(e));
        }
        handler.finish()
    }

    /// Close the session and call `on_cancel()`.
    pub fn cancel(self, on_cancel: &js_sys::Function) -> Result<(), JsValue> {
        let mut handler = JsHandler::new(on_cancel);
        self.inner.cancel(&mut handler);
        handler.finish()
    }
}

impl JsCropSession {
    pub(crate) fn open(
        bytes: &[u8],
        aspect_ratio: f64,
        container_width: f64,
        container_height: f64,
        config: CropConfig,
    ) -> Result<Self, CropError> {
        let aspect = AspectRatio::new(aspect_ratio)?;
        let inner = CropSession::open(
            bytes,
            Size::new(container_width, container_height),
            aspect,
            config,
        )?;
        Ok(Self { inner })
    }

    pub(crate) fn with_source(
        source: SourceImage,
        aspect_ratio: f64,
        container_width: f64,
        container_height: f64,
        config: CropConfig,
    ) -> Result<Self, CropError> {
        let aspect = AspectRatio::new(aspect_ratio)?;
        let inner = CropSession::new(
            source,
            Size::new(container_width, container_height),
            aspect,
            config,
        )?;
        Ok(Self { inner })
    }

    pub(crate) fn export_png_bytes(&self) -> Result<Vec<u8>, CropError> {
        let raster = self.inner.export()?;
        cropframe_core::encode::encode_png(&raster)
    }
}

/// Adapts a JavaScript callback to `CropHandler`, keeping the first error it throws.
struct JsHandler<'a> {
    callback: &'a js_sys::Function,
    error: Option<JsValue>,
}

impl<'a> JsHandler<'a> {
    fn new(callback: &'a js_sys::Function) -> Self {
        Self {
            callback,
            error: None,
        }
    }

    fn finish(self) -> Result<(), JsValue> {
        self.error.map_or(Ok(()), Err)
    }
}

impl CropHandler for JsHandler<'_> {
    fn on_crop_complete(&mut self, image: CroppedImage) {
        let bytes = js_sys::Uint8Array::from(image.png.as_slice());
        if let Err(e) = self.callback.call3(
            &JsValue::NULL,
            &bytes,
            &JsValue::from(image.width),
            &JsValue::from(image.height),
        ) {
            self.error = Some(e);
        }
    }

    fn on_cancel(&mut self) {
        if let Err(e) = self.callback.call0(&JsValue::NULL) {
            self.error = Some(e);
        }
    }
}

fn parse_config(value: JsValue) -> Result<CropConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(e: CropError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
