//! DOM-backed prompt and banner (browser only)
//!
//! The answer modal is built once and reused. Answers land in a mailbox that
//! the frame loop polls, so the canvas keeps animating while it is open.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement};

use super::{Banner, Notifier, PromptHost, PromptRequest};
use crate::sim::Response;

/// How long a banner stays up (ms)
const BANNER_MS: i32 = 1600;

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Look up an element by id, creating it under `parent` if missing
fn ensure_element(doc: &Document, parent: &Element, tag: &str, id: &str) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    parent.append_child(&el)?;
    Ok(el)
}

type Mailbox = Rc<RefCell<Option<Response>>>;

/// Modal dialog with a single numeric input
pub struct DomPrompt {
    overlay: Element,
    title: Element,
    question: Element,
    input: HtmlInputElement,
    mailbox: Mailbox,
}

impl DomPrompt {
    pub fn new() -> Result<Self, JsValue> {
        let doc = document()?;
        let body: Element = doc
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .into();

        let overlay = ensure_element(&doc, &body, "div", "prompt")?;
        let panel = ensure_element(&doc, &overlay, "div", "prompt-panel")?;
        let title = ensure_element(&doc, &panel, "h2", "prompt-title")?;
        let question = ensure_element(&doc, &panel, "p", "prompt-question")?;
        let input: HtmlInputElement = ensure_element(&doc, &panel, "input", "prompt-input")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#prompt-input is not an input"))?;
        let submit = ensure_element(&doc, &panel, "button", "prompt-submit")?;
        let cancel = ensure_element(&doc, &panel, "button", "prompt-cancel")?;

        input.set_type("text");
        let _ = input.set_attribute("inputmode", "numeric");
        let _ = input.set_attribute("autocomplete", "off");
        submit.set_text_content(Some("Answer"));
        cancel.set_text_content(Some("Skip"));
        let _ = overlay.set_attribute("class", "hidden");

        let mailbox: Mailbox = Rc::new(RefCell::new(None));

        // Submit button
        {
            let mailbox = mailbox.clone();
            let input = input.clone();
            let overlay = overlay.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                *mailbox.borrow_mut() = Some(Response::Text(input.value()));
                let _ = overlay.set_attribute("class", "hidden");
            });
            let _ = submit
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Skip button
        {
            let mailbox = mailbox.clone();
            let overlay = overlay.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                *mailbox.borrow_mut() = Some(Response::Dismissed);
                let _ = overlay.set_attribute("class", "hidden");
            });
            let _ = cancel
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter submits, Escape skips. Key downs typed here never reach the game;
        // key ups still bubble so held arrows are released.
        {
            let mailbox = mailbox.clone();
            let input_clone = input.clone();
            let overlay = overlay.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                event.stop_propagation();
                let response = match event.key().as_str() {
                    "Enter" => Response::Text(input_clone.value()),
                    "Escape" => Response::Dismissed,
                    _ => return,
                };
                event.prevent_default();
                *mailbox.borrow_mut() = Some(response);
                let _ = overlay.set_attribute("class", "hidden");
            });
            let _ = input
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(Self {
            overlay,
            title,
            question,
            input,
            mailbox,
        })
    }

    pub fn is_open(&self) -> bool {
        self.overlay.get_attribute("class").as_deref() != Some("hidden")
    }
}

impl PromptHost for DomPrompt {
    fn present(&mut self, request: &PromptRequest) {
        self.mailbox.borrow_mut().take();
        self.title.set_text_content(Some(&request.title));
        self.question.set_text_content(Some(&request.question));
        self.input.set_placeholder(&request.placeholder);
        self.input.set_value("");
        let _ = self.overlay.set_attribute("class", "");
        if let Err(e) = self.input.focus() {
            log::warn!("Could not focus answer input: {:?}", e);
        }
    }

    fn poll(&mut self) -> Option<Response> {
        self.mailbox.borrow_mut().take()
    }

    fn close(&mut self) {
        self.mailbox.borrow_mut().take();
        let _ = self.overlay.set_attribute("class", "hidden");
    }
}

/// Transient banner at the top of the page
pub struct DomBanner {
    element: Element,
    /// Bumped per banner so an old timeout doesn't hide a newer one
    generation: Rc<Cell<u32>>,
}

impl DomBanner {
    pub fn new() -> Result<Self, JsValue> {
        let doc = document()?;
        let body: Element = doc
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .into();
        let element = ensure_element(&doc, &body, "div", "banner")?;
        let _ = element.set_attribute("class", "hidden");
        Ok(Self {
            element,
            generation: Rc::new(Cell::new(0)),
        })
    }
}

impl Notifier for DomBanner {
    fn notify(&mut self, banner: &Banner) {
        self.element.set_text_content(Some(&banner.text));
        let _ = self
            .element
            .set_attribute("class", &format!("banner {}", banner.kind.css_class()));

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let element = self.element.clone();
        let current = self.generation.clone();
        let hide = Closure::once_into_js(move || {
            if current.get() == generation {
                let _ = element.set_attribute("class", "hidden");
            }
        });
        let scheduled = web_sys::window().map(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                hide.unchecked_ref(),
                BANNER_MS,
            )
        });
        if !matches!(scheduled, Some(Ok(_))) {
            log::warn!("Could not schedule banner hide");
        }
    }
}
