use wasm_bindgen::prelude::*;

use crate::dom;
use crate::error::Result;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let result = dom::document().and_then(|document| {
        dom::on_dom_ready(&document, || {
            if let Err(e) = mount_from_page() {
                web_sys::console::error_1(&format!("Image preview not mounted: {}", e).into());
            }
        })
    });
    if let Err(e) = result {
        web_sys::console::error_1(&format!("Image preview failed to start: {}", e).into());
    }
}

fn mount_from_page() -> Result<()> {
    let document = dom::document()?;
    let config = dom::page_config(&document)?;

    if console_log::init_with_level(config.log_level.to_level()).is_err() {
        web_sys::console::log_1(&"Logger already initialized, keeping it".into());
    }

    dom::mount(&document, config)
}
