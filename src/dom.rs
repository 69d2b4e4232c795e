use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Appends a new `<tag class="...">` to `parent`.
pub fn append_element(
    document: &web::Document,
    parent: &web::Element,
    tag: &str,
    class: &str,
) -> anyhow::Result<web::Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create_element({tag}): {:?}", e))?;
    el.set_class_name(class);
    parent
        .append_child(&el)
        .map_err(|e| anyhow::anyhow!("append_child({tag}): {:?}", e))?;
    Ok(el)
}

pub fn container(document: &web::Document, id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))
}

struct Registered {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Owns every listener a mounted instance registers. Dropping the set
/// removes them all, so closures never outlive the instance.
#[derive(Default)]
pub struct ListenerSet {
    entries: Vec<Registered>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<E, F>(&mut self, target: &web::EventTarget, event: &'static str, handler: F)
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        self.register(target, event, handler, None);
    }

    /// Like [`ListenerSet::on`] but non-passive, so the handler may call
    /// `prevent_default` (wheel).
    pub fn on_active<E, F>(&mut self, target: &web::EventTarget, event: &'static str, handler: F)
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        self.register(target, event, handler, Some(opts));
    }

    fn register<E, F>(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        mut handler: F,
        opts: Option<web::AddEventListenerOptions>,
    ) where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        let res = match &opts {
            Some(o) => target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                o,
            ),
            None => target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()),
        };
        if let Err(e) = res {
            log::error!("[input] addEventListener({event}) failed: {:?}", e);
            return;
        }
        self.entries.push(Registered {
            target: target.clone(),
            event,
            closure,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        for r in self.entries.drain(..) {
            _ = r
                .target
                .remove_event_listener_with_callback(r.event, r.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
