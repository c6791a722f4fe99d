//! Cropframe WASM - WebAssembly bindings for the crop engine
//!
//! This crate is the thin adapter between browser events and the pure
//! `cropframe-core` engine. The host dialog forwards pointer, wheel, slider
//! and resize events to a [`JsCropSession`] and applies the returned CSS
//! transform to its preview image.
//!
//! # Module Structure
//!
//! - `session` - the `JsCropSession` class driven by DOM events
//! - `types` - serializable snapshots handed back to JavaScript
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@cropframe/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsCropSession(bytes, 1, box.clientWidth, box.clientHeight);
//!
//! el.onpointerdown = (e) => session.pointer_down(e.clientX, e.clientY);
//! el.onpointermove = (e) => { session.pointer_move(e.clientX, e.clientY); redraw(); };
//! el.onpointerup = () => session.pointer_up();
//! el.onwheel = (e) => {
//!   session.wheel(e.deltaMode === 1 ? e.deltaY * 16 : e.deltaY);
//!   redraw();
//! };
//!
//! function redraw() {
//!   img.style.transform = session.css_transform();
//! }
//!
//! confirmButton.onclick = () => session.confirm((png) => upload(png));
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;

pub use session::JsCropSession;
pub use types::CropState;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
