use std::fmt::Display;

use wasm_bindgen::JsValue;
use web_sys::Window;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn to_js_err(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Current layout viewport width in CSS pixels.
pub fn viewport_width(window: &Window) -> Result<f64, JsValue> {
    window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("window.innerWidth is not a number"))
}

/// Seed for layouts whose configuration does not pin one.
pub fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}
