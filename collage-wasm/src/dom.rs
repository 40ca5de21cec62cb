use collage_core::{LayoutResult, css_variables};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

const PLACEHOLDER_CLASS: &str = "photo-placeholder";

fn px(v: f64) -> String {
    format!("{v:.2}px")
}

/// Publish the tier's sizes as custom properties on the document root.
pub fn apply_css_variables(document: &Document, container_size: f64) -> Result<(), JsValue> {
    let root = document
        .document_element()
        .ok_or("no document element")?
        .dyn_into::<HtmlElement>()?;
    let style = root.style();
    for (name, value) in css_variables(container_size) {
        style.set_property(name, &value)?;
    }
    Ok(())
}

/// Replace the children of `container` with one absolutely positioned
/// placeholder per slot.
pub fn render_placeholders(
    document: &Document,
    container: &Element,
    layout: &LayoutResult,
) -> Result<(), JsValue> {
    container.set_inner_html("");
    if let Some(host) = container.dyn_ref::<HtmlElement>() {
        let st = host.style();
        st.set_property("position", "relative")?;
        st.set_property("width", &px(layout.container_size))?;
        st.set_property("height", &px(layout.container_size))?;
    }
    for slot in layout {
        let el = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        el.set_class_name(&format!("{PLACEHOLDER_CLASS} {}", slot.size_class.name()));
        let st = el.style();
        st.set_property("position", "absolute")?;
        st.set_property("left", &px(slot.x))?;
        st.set_property("top", &px(slot.y))?;
        st.set_property("width", &px(slot.width))?;
        st.set_property("height", &px(slot.height))?;
        st.set_property("z-index", &slot.stack_order.to_string())?;
        el.dataset().set("index", &slot.item_index.to_string())?;
        container.append_child(&el)?;
    }
    Ok(())
}
