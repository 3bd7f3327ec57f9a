//! Browser bindings for the preview controller.
//!
//! Looks up the page elements, registers one listener per trigger and runs
//! `FileReader.readAsDataURL` as a future. All of this runs on the UI thread;
//! the controller is shared between listeners through `Rc<RefCell<_>>` and
//! never borrowed across an `await`.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, DocumentReadyState, DragEvent, Element, Event, File, FileList, FileReader,
    HtmlImageElement, HtmlInputElement, ProgressEvent,
};
use web_time::Instant;

use crate::config::{CONFIG_ELEMENT_ID, PreviewConfig};
use crate::controller::{PreviewController, PreviewSink, ReadRequest, SelectedFile};
use crate::error::{PreviewError, Result};

type SharedController = Rc<RefCell<PreviewController<DomSink>>>;

impl SelectedFile for File {
    fn name(&self) -> String {
        File::name(self)
    }
}

/// Writes controller state into the page.
pub struct DomSink {
    label: Element,
    image: HtmlImageElement,
    drop_zone: Option<Element>,
    active_class: String,
}

impl PreviewSink for DomSink {
    fn set_label(&mut self, text: &str) {
        self.label.set_text_content(Some(text));
    }

    fn set_preview_source(&mut self, data_uri: &str) {
        self.image.set_src(data_uri);
    }

    fn set_drop_zone_active(&mut self, active: bool) {
        let Some(zone) = &self.drop_zone else {
            return;
        };
        let classes = zone.class_list();
        let result = if active {
            classes.add_1(&self.active_class)
        } else {
            classes.remove_1(&self.active_class)
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle '{}' on drop zone: {:?}", self.active_class, e);
        }
    }
}

/// The current document.
pub fn document() -> Result<Document> {
    web_sys::window()
        .ok_or(PreviewError::DomUnavailable("window"))?
        .document()
        .ok_or(PreviewError::DomUnavailable("document"))
}

/// Read the config from the page's JSON `<script>` element, if it has one.
pub fn page_config(document: &Document) -> Result<PreviewConfig> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    {
        Some(json) => PreviewConfig::from_json(&json),
        None => Ok(PreviewConfig::default()),
    }
}

/// Run `ready` once the DOM has been parsed.
pub fn on_dom_ready(document: &Document, ready: impl FnOnce() + 'static) -> Result<()> {
    if document.ready_state() != DocumentReadyState::Loading {
        ready();
        return Ok(());
    }

    let listener = Closure::once_into_js(ready);
    document.add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())?;
    Ok(())
}

/// Resolve the configured elements and wire the listeners.
pub fn mount(document: &Document, config: PreviewConfig) -> Result<()> {
    let label = required_element(document, &config.label_id)?;
    let image: HtmlImageElement = required_element(document, &config.image_id)?
        .dyn_into()
        .map_err(|_| PreviewError::UnexpectedElement {
            id: config.image_id.clone(),
            expected: "<img>",
        })?;

    let mut inputs = Vec::new();
    for id in &config.file_input_ids {
        let Some(element) = document.get_element_by_id(id) else {
            log::debug!("📂 No file input #{}, skipping", id);
            continue;
        };
        let input: HtmlInputElement =
            element
                .dyn_into()
                .map_err(|_| PreviewError::UnexpectedElement {
                    id: id.clone(),
                    expected: "<input>",
                })?;
        inputs.push(input);
    }

    let drop_zone = document.get_element_by_id(&config.drop_zone_id);
    if drop_zone.is_none() {
        log::debug!("No drop zone #{}, drag-and-drop disabled", config.drop_zone_id);
    }
    if inputs.is_empty() && drop_zone.is_none() {
        return Err(PreviewError::NoTriggers);
    }

    let sink = DomSink {
        label,
        image,
        drop_zone: drop_zone.clone(),
        active_class: config.active_class.clone(),
    };
    let controller: SharedController = Rc::new(RefCell::new(PreviewController::new(config, sink)));

    for input in &inputs {
        listen_for_file_input(&controller, input)?;
    }
    if let Some(zone) = &drop_zone {
        listen_for_drops(&controller, zone)?;
    }

    log::info!(
        "🖼️ Image preview ready ({} file input(s), drop zone: {})",
        inputs.len(),
        drop_zone.is_some()
    );
    Ok(())
}

fn required_element(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PreviewError::ElementNotFound { id: id.to_string() })
}

fn listen_for_file_input(controller: &SharedController, input: &HtmlInputElement) -> Result<()> {
    let controller = Rc::clone(controller);
    let source = input.clone();

    let onchange = Closure::wrap(Box::new(move |_event: Event| {
        let file = source.files().and_then(|files| files.get(0));
        let request = controller.borrow_mut().on_file_input_changed(file);
        spawn_read(&controller, request);
    }) as Box<dyn FnMut(Event)>);

    input.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
    onchange.forget(); // Listener lives as long as the page

    Ok(())
}

fn listen_for_drops(controller: &SharedController, zone: &Element) -> Result<()> {
    // Without preventDefault the browser navigates to the dropped file
    let over = Rc::clone(controller);
    let ondragover = Closure::wrap(Box::new(move |event: DragEvent| {
        event.prevent_default();
        over.borrow_mut().on_drag_over();
    }) as Box<dyn FnMut(DragEvent)>);

    let leave = Rc::clone(controller);
    let ondragleave = Closure::wrap(Box::new(move |_event: DragEvent| {
        leave.borrow_mut().on_drag_leave();
    }) as Box<dyn FnMut(DragEvent)>);

    let dropped = Rc::clone(controller);
    let ondrop = Closure::wrap(Box::new(move |event: DragEvent| {
        event.prevent_default();
        let files = event
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .map(|list| file_list_to_vec(&list))
            .unwrap_or_default();
        let request = dropped.borrow_mut().on_drop(files);
        spawn_read(&dropped, request);
    }) as Box<dyn FnMut(DragEvent)>);

    zone.add_event_listener_with_callback("dragover", ondragover.as_ref().unchecked_ref())?;
    zone.add_event_listener_with_callback("dragleave", ondragleave.as_ref().unchecked_ref())?;
    zone.add_event_listener_with_callback("drop", ondrop.as_ref().unchecked_ref())?;
    ondragover.forget();
    ondragleave.forget();
    ondrop.forget();

    Ok(())
}

fn file_list_to_vec(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Start the read for `request` and report back to the controller when done.
fn spawn_read(controller: &SharedController, request: Option<ReadRequest<File>>) {
    let Some(request) = request else {
        return;
    };
    let controller = Rc::clone(controller);

    wasm_bindgen_futures::spawn_local(async move {
        let start = Instant::now();
        let result = read_as_data_url(&request.file).await;
        log::debug!(
            "Read #{} took {:.1}ms",
            request.token.sequence(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        controller.borrow_mut().complete_read(request.token, result);
    });
}

/// Read a file as a data URI.
pub async fn read_as_data_url(file: &File) -> Result<String> {
    let name = File::name(file);
    let reader = FileReader::new()?;

    // Handlers are attached before the read starts; exactly one of them fires
    let settled = Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move |_event: ProgressEvent| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once_into_js(move |_event: ProgressEvent| {
            let _ = reject.call0(&JsValue::NULL);
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader.read_as_data_url(file)?;

    if JsFuture::from(settled).await.is_err() {
        let reason = reader
            .error()
            .map(|e| e.message())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(PreviewError::ReadFailed { name, reason });
    }

    reader
        .result()?
        .as_string()
        .ok_or(PreviewError::UnexpectedReadResult { name })
}
