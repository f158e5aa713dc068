#![forbid(unsafe_code)]

//! Canvas-2D presentation.
//!
//! Expands the indexed framebuffer through the palette into an RGBA scratch
//! buffer and blits it with `putImageData`. The scratch buffer is reused
//! across frames.

use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, ImageData};

use wrlview_raster::{Frame, Palette};

pub(crate) fn present(
    frame: &Frame,
    palette: &Palette,
    rgba: &mut Vec<u8>,
    ctx: &CanvasRenderingContext2d,
) -> Result<(), JsValue> {
    frame.expand_rgba(palette, rgba);
    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(rgba.as_slice()),
        u32::from(frame.width()),
        u32::from(frame.height()),
    )?;
    ctx.put_image_data(&image, 0.0, 0.0)
}
