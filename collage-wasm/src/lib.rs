//! Browser bindings for the heart collage layout.
//!
//! `HeartLayout` keeps the latest `LayoutResult` and replaces it wholesale on
//! every recompute, so readers never observe a half-updated layout. One seed
//! serves the whole session: resizing within a tier leaves every slot put.

use std::cell::RefCell;
use std::rc::Rc;

use collage_core::{LayoutConfig, LayoutScaler, LayoutSession};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

mod dom;
mod utils;

use utils::{log, random_seed, to_js_err, viewport_width};

struct Collage {
    session: LayoutSession,
}

impl Collage {
    fn recompute(&mut self, viewport: f64, requested: usize) -> Result<bool, JsValue> {
        let changed = self
            .session
            .resize(viewport, requested)
            .map_err(to_js_err)?;
        let current = self.session.current();
        if changed && current.shortfall() > 0 {
            log(&format!(
                "placed {} of {} photos at {}px",
                current.len(),
                requested,
                current.container_size
            ));
        }
        Ok(changed)
    }

    fn render(&self, container_id: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{container_id}")))?;
        let current = self.session.current();
        dom::apply_css_variables(&document, current.container_size)?;
        dom::render_placeholders(&document, &container, current)
    }
}

#[wasm_bindgen]
pub struct HeartLayout {
    inner: Rc<RefCell<Collage>>,
}

#[wasm_bindgen]
impl HeartLayout {
    /// `config_json` is an optional `LayoutConfig` document; `{}` or nothing
    /// means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<HeartLayout, JsValue> {
        let config = match config_json.as_deref() {
            Some(txt) => LayoutConfig::from_json_str(txt).map_err(to_js_err)?,
            None => LayoutConfig::default(),
        };
        let scaler = LayoutScaler::new(config).map_err(to_js_err)?;
        let session = LayoutSession::with_config_seed(scaler, random_seed());
        Ok(HeartLayout {
            inner: Rc::new(RefCell::new(Collage { session })),
        })
    }

    /// Returns whether the slots changed.
    pub fn recompute(&self, viewport_width: f64, requested: usize) -> Result<bool, JsValue> {
        self.inner.borrow_mut().recompute(viewport_width, requested)
    }

    #[wasm_bindgen(js_name = containerSize)]
    pub fn container_size(&self) -> f64 {
        self.inner.borrow().session.current().container_size
    }

    pub fn placed(&self) -> usize {
        self.inner.borrow().session.current().len()
    }

    pub fn shortfall(&self) -> usize {
        self.inner.borrow().session.current().shortfall()
    }

    /// Slot for `index` as a plain object, or `null` if it was not placed.
    pub fn position(&self, index: usize) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        match inner.session.current().get(index) {
            Some(slot) => {
                let json = serde_json::to_string(slot).map_err(to_js_err)?;
                js_sys::JSON::parse(&json)
            }
            None => Ok(JsValue::NULL),
        }
    }

    pub fn positions(&self) -> Result<JsValue, JsValue> {
        let json = self
            .inner
            .borrow()
            .session
            .current()
            .rects_json()
            .map_err(to_js_err)?;
        js_sys::JSON::parse(&json)
    }

    #[wasm_bindgen(js_name = applyCssVariables)]
    pub fn apply_css_variables(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        dom::apply_css_variables(&document, self.container_size())
    }

    #[wasm_bindgen(js_name = renderPlaceholders)]
    pub fn render_placeholders(&self, container_id: &str) -> Result<(), JsValue> {
        self.inner.borrow().render(container_id)
    }

    /// Lay out for the current window, render, and do it again on every
    /// window resize.
    #[wasm_bindgen(js_name = watchResize)]
    pub fn watch_resize(&self, container_id: String, requested: usize) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        {
            let mut inner = self.inner.borrow_mut();
            inner.recompute(viewport_width(&window)?, requested)?;
            inner.render(&container_id)?;
        }
        let inner = self.inner.clone();
        let win = window.clone();
        let onresize = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let res = viewport_width(&win).and_then(|w| {
                let mut c = inner.borrow_mut();
                if c.recompute(w, requested)? {
                    c.render(&container_id)?;
                }
                Ok(())
            });
            if let Err(e) = res {
                log(&format!("resize layout failed: {e:?}"));
            }
        }));
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
        Ok(())
    }
}
