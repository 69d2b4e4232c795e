//! One mounted drone sound simulator widget.

use crate::audio::WebAudioGraph;
use crate::constants::{DEFAULT_AUDIO_SRC, SIMULATOR_CLASS, WIDGET_CSS};
use crate::dom::{self, ListenerSet};
use crate::loader::{self, Abortable};
use crate::simulator_ui as ui;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::audio_map::AudioGraph;
use viewer_core::lifecycle::LoadTicket;
use viewer_core::simulator::{DroneSoundSimulator, SimulatorView};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

type Simulator = DroneSoundSimulator<WebAudioGraph>;

fn find<T: JsCast>(root: &web::Element, role: &str) -> anyhow::Result<T> {
    root.query_selector(&format!("[data-role=\"{role}\"]"))
        .map_err(|e| anyhow::anyhow!("query {role}: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing [data-role={role}]"))?
        .dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("[data-role={role}] has the wrong element type"))
}

struct SimulatorDom {
    status: web::HtmlElement,
    play: web::HtmlButtonElement,
    distance: web::HtmlInputElement,
    distance_label: web::Element,
    rotor: web::HtmlInputElement,
    rotor_label: web::Element,
}

impl SimulatorDom {
    fn find(root: &web::Element) -> anyhow::Result<Self> {
        Ok(Self {
            status: find(root, "status")?,
            play: find(root, "play")?,
            distance: find(root, "distance")?,
            distance_label: find(root, "distance-label")?,
            rotor: find(root, "rotor")?,
            rotor_label: find(root, "rotor-label")?,
        })
    }

    fn sync(&self, view: &SimulatorView) {
        match ui::status_line(view) {
            Some((text, error)) => {
                self.status.set_text_content(Some(&text));
                self.status
                    .set_class_name(if error { "sim-status error" } else { "sim-status" });
                self.status.set_hidden(false);
            }
            None => self.status.set_hidden(true),
        }

        self.play.set_text_content(Some(ui::play_label(view)));
        self.play.set_disabled(!view.controls_enabled);
        self.play
            .set_class_name(if view.playing { "sim-play playing" } else { "sim-play" });

        let d = view.inputs.distance;
        if self.distance.value_as_number() as f32 != d {
            self.distance.set_value_as_number(d as f64);
        }
        self.distance_label
            .set_text_content(Some(&ui::distance_label(d)));
        _ = self
            .distance
            .set_attribute("style", &ui::track_style(ui::distance_fill(d), "#3b82f6"));

        let r = view.inputs.rotor_speed;
        if self.rotor.value_as_number() as f32 != r {
            self.rotor.set_value_as_number(r as f64);
        }
        self.rotor_label.set_text_content(Some(&ui::rotor_label(r)));
        _ = self
            .rotor
            .set_attribute("style", &ui::track_style(ui::rotor_fill(r), "#ef4444"));
    }
}

pub struct SimulatorApp {
    sim: Rc<RefCell<Simulator>>,
    listeners: ListenerSet,
    fetch: Abortable,
    nodes: Vec<web::Element>,
}

impl SimulatorApp {
    pub fn mount(container_id: &str, audio_src: Option<&str>) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let container = dom::container(&document, container_id)?;
        let url = audio_src.unwrap_or(DEFAULT_AUDIO_SRC).to_owned();

        let style = dom::append_element(&document, &container, "style", "")?;
        style.set_text_content(Some(WIDGET_CSS));
        let root = dom::append_element(&document, &container, "div", SIMULATOR_CLASS)?;
        root.set_inner_html(ui::SIMULATOR_HTML);
        let view_dom = Rc::new(SimulatorDom::find(&root)?);

        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {:?}", e))?;
        let mut sim = Simulator::new(url.clone());
        let ticket = sim.begin_load()?;
        view_dom.sync(&sim.view());
        let sim = Rc::new(RefCell::new(sim));

        let mut listeners = ListenerSet::new();
        wire_controls(&mut listeners, &document, &sim, &view_dom);
        log::info!("[audio] simulator mounted for '{}'", url);

        let fetch = Abortable::new();
        spawn_local(load_audio(
            sim.clone(),
            view_dom,
            ctx,
            ticket,
            url,
            fetch.signal(),
        ));

        Ok(Self {
            sim,
            listeners,
            fetch,
            nodes: vec![style, root],
        })
    }

    pub fn view(&self) -> SimulatorView {
        self.sim.borrow().view()
    }

    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.fetch.abort();
        self.sim.borrow_mut().teardown();
        for node in self.nodes.drain(..) {
            node.remove();
        }
    }
}

impl Drop for SimulatorApp {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn wire_controls(
    listeners: &mut ListenerSet,
    document: &web::Document,
    sim: &Rc<RefCell<Simulator>>,
    view_dom: &Rc<SimulatorDom>,
) {
    let (s, d) = (sim.clone(), view_dom.clone());
    listeners.on(view_dom.distance.as_ref(), "input", move |_: web::Event| {
        let value = d.distance.value_as_number() as f32;
        let fx = s.borrow_mut().set_distance(value);
        log::debug!("[audio] distance {:.0}m -> {:?}", value, fx);
        d.sync(&s.borrow().view());
    });

    let (s, d) = (sim.clone(), view_dom.clone());
    listeners.on(view_dom.rotor.as_ref(), "input", move |_: web::Event| {
        let value = d.rotor.value_as_number() as f32;
        let fx = s.borrow_mut().set_rotor_speed(value);
        log::debug!("[audio] rotor {:.0}rpm -> {:?}", value, fx);
        d.sync(&s.borrow().view());
    });

    let (s, d) = (sim.clone(), view_dom.clone());
    listeners.on(view_dom.play.as_ref(), "click", move |_: web::MouseEvent| {
        let (s, d) = (s.clone(), d.clone());
        spawn_local(async move {
            toggle(&s).await;
            d.sync(&s.borrow().view());
        });
    });

    // Any gesture on the page lifts the autoplay block.
    let (s, d) = (sim.clone(), view_dom.clone());
    listeners.on(document.as_ref(), "pointerdown", move |_: web::Event| {
        if !s.borrow().view().blocked {
            return;
        }
        let (s, d) = (s.clone(), d.clone());
        spawn_local(async move {
            resume_context(&s).await;
            s.borrow_mut().notify_gesture();
            d.sync(&s.borrow().view());
        });
    });
}

async fn resume_context(sim: &Rc<RefCell<Simulator>>) {
    let promise = {
        let sim = sim.borrow();
        match sim.graph() {
            Some(g) if !g.context_running() => g.context().resume().ok(),
            _ => None,
        }
    };
    if let Some(p) = promise {
        if let Err(e) = JsFuture::from(p).await {
            log::warn!("[audio] resume failed: {:?}", e);
        }
    }
}

async fn toggle(sim: &Rc<RefCell<Simulator>>) {
    sim.borrow_mut().notify_gesture();
    if !sim.borrow().is_playing() {
        resume_context(sim).await;
    }
    if let Err(e) = sim.borrow_mut().toggle_playback() {
        log::warn!("[audio] {}", e);
    }
}

async fn load_audio(
    sim: Rc<RefCell<Simulator>>,
    view_dom: Rc<SimulatorDom>,
    ctx: web::AudioContext,
    ticket: LoadTicket,
    url: String,
    signal: Option<web::AbortSignal>,
) {
    let graph = match loader::fetch_audio(&ctx, &url, signal.as_ref()).await {
        Ok(buffer) => WebAudioGraph::new(ctx.clone(), buffer),
        Err(e) => Err(e),
    };
    match graph {
        Ok(graph) => {
            if !sim.borrow_mut().attach(ticket, graph) {
                return;
            }
        }
        Err(e) => {
            log::error!("[load] {}", e);
            _ = ctx.close();
            if !sim.borrow_mut().fail_load(ticket, e) {
                return;
            }
        }
    }
    view_dom.sync(&sim.borrow().view());
}
