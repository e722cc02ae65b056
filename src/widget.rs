//! DOM presentation for the character: two `<img>` elements (the sprite and
//! its portal ghost), an animation-frame loop driving [`Character::tick`], and
//! the pointer / resize / motion-preference listeners feeding it.
//!
//! Nothing in here makes behavioural decisions; it reads [`Frame`]s and
//! forwards browser events.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, HtmlImageElement, MediaQueryList, PointerEvent, Window,
};

use crate::character::{Anchor, Character, Facing, Frame, Geometry, PointerInput, Pose};
use crate::config::Config;
use crate::error::{Result, WidgetError};
use crate::rng::Xorshift64;

const MAIN_ID: &str = "tinychancy";
const GHOST_ID: &str = "tinychancy_clone";
/// Rendered size for a pose whose animation failed to load.
const FALLBACK_SPRITE_PX: f64 = 50.0;
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[derive(Clone, Copy, Debug)]
enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerKind {
    fn event_name(self) -> &'static str {
        match self {
            PointerKind::Down => "pointerdown",
            PointerKind::Move => "pointermove",
            PointerKind::Up => "pointerup",
            PointerKind::Cancel => "pointercancel",
        }
    }
}

/// An attached DOM listener, detached explicitly on teardown.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self> {
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| WidgetError::dom("addEventListener", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Runtime widget state, shared between the frame loop and event listeners.
struct WidgetState {
    config: Config,
    // created once every pose has loaded or failed
    character: Option<Character>,
    window: Window,
    document: Document,
    main: HtmlImageElement,
    ghost: Option<HtmlImageElement>,
    pose: Option<Pose>,
    // one per pose, in `Pose::ALL` order; kept alive so the browser caches them
    preload: Vec<HtmlImageElement>,
    pending_preloads: usize,
    listeners: Vec<Listener>,
    frame_cb: FrameCallback,
    frame_request: Option<i32>,
    running: bool,
}

impl WidgetState {
    /// Geometry for the current pose, sized from its preloaded image.
    fn geometry(&self) -> Geometry {
        let pose = self.pose.unwrap_or(Pose::Idle);
        let img = Pose::ALL
            .iter()
            .position(|p| *p == pose)
            .and_then(|i| self.preload.get(i))
            .unwrap_or(&self.main);
        read_geometry(&self.window, img, &self.config)
    }

    fn on_preload_settled(&mut self, src: &str, loaded: bool) {
        if !loaded {
            warn!(src = %src, "failed to load pose animation");
        }
        self.pending_preloads = self.pending_preloads.saturating_sub(1);
        if self.pending_preloads > 0 || self.character.is_some() {
            return;
        }
        if let Err(e) = self.init_character() {
            warn!(error = %e, "failed to start tinychancy");
        }
    }

    /// Attach the sprite, create the character and start the frame loop.
    fn init_character(&mut self) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| WidgetError::Dom("no body".into()))?;
        body.append_child(&self.main)
            .map_err(|e| WidgetError::dom("appendChild", e))?;

        let now = self.window.performance().map(|p| p.now()).unwrap_or(0.0);
        let geometry = self.geometry();
        let character =
            Character::new(self.config.clone(), geometry, Xorshift64::from_entropy(), now)?;
        let frame = character.frame();
        info!(state = %frame.state, x = frame.x, "tinychancy started");
        self.character = Some(character);

        self.render(&frame, &geometry);
        self.frame_request = request_frame(&self.window, &self.frame_cb);
        Ok(())
    }

    fn on_frame(&mut self, ts: f64) {
        let geometry = self.geometry();
        let Some(character) = self.character.as_mut() else {
            return;
        };
        character.set_geometry(geometry);
        let frame = character.tick(ts);
        self.render(&frame, &geometry);
    }

    fn on_pointer(&mut self, kind: PointerKind, evt: &PointerEvent) {
        let input = PointerInput {
            pointer_id: evt.pointer_id(),
            x: evt.client_x() as f64,
            y: evt.client_y() as f64,
            button: evt.button(),
            time_ms: evt.time_stamp(),
        };
        let geometry = self.geometry();
        let Some(character) = self.character.as_mut() else {
            return;
        };
        character.set_geometry(geometry);

        let handled = match kind {
            PointerKind::Down => {
                let picked = character.pointer_down(input);
                if picked {
                    // keep receiving moves even when the cursor outruns the sprite
                    let _ = self.main.set_pointer_capture(input.pointer_id);
                }
                picked
            }
            PointerKind::Move => character.pointer_move(input),
            PointerKind::Up | PointerKind::Cancel => {
                let released = match kind {
                    PointerKind::Cancel => character.pointer_cancel(input),
                    _ => character.pointer_up(input),
                };
                if released {
                    let _ = self.main.release_pointer_capture(input.pointer_id);
                }
                released
            }
        };

        if handled {
            evt.prevent_default();
            let frame = character.frame();
            self.render(&frame, &geometry);
        }
    }

    fn on_resize(&mut self) {
        let geometry = self.geometry();
        let Some(character) = self.character.as_mut() else {
            return;
        };
        character.resize(geometry);
        let frame = character.frame();
        self.render(&frame, &geometry);
    }

    fn set_reduced_motion(&mut self, on: bool) {
        self.config.reduced_motion = Some(on);
        if let Some(character) = self.character.as_mut() {
            character.set_reduced_motion(on);
        }
    }

    fn render(&mut self, frame: &Frame, geometry: &Geometry) {
        if self.pose != Some(frame.pose) {
            self.main.set_src(&self.config.asset_url(frame.pose));
            if let Some(ghost) = &self.ghost {
                ghost.set_src(&self.config.asset_url(frame.pose));
            }
            self.pose = Some(frame.pose);
        }

        if let Err(e) = place(&self.main, frame.x, frame, geometry) {
            warn!(error = %e, "failed to position sprite");
        }

        match frame.ghost_x {
            Some(ghost_x) => {
                if self.ghost.is_none() {
                    match self.create_ghost() {
                        Ok(ghost) => self.ghost = Some(ghost),
                        Err(e) => warn!(error = %e, "failed to create portal ghost"),
                    }
                }
                if let Some(ghost) = &self.ghost {
                    if let Err(e) = place(ghost, ghost_x, frame, geometry) {
                        warn!(error = %e, "failed to position portal ghost");
                    }
                }
            }
            None => {
                if let Some(ghost) = self.ghost.take() {
                    ghost.remove();
                }
            }
        }
    }

    fn create_ghost(&self) -> Result<HtmlImageElement> {
        let ghost = create_sprite(GHOST_ID, &self.config)?;
        ghost
            .style()
            .set_property("pointer-events", "none")
            .map_err(|e| WidgetError::dom("style", e))?;
        if let Some(pose) = self.pose {
            ghost.set_src(&self.config.asset_url(pose));
        }
        let body = self
            .document
            .body()
            .ok_or_else(|| WidgetError::Dom("no body".into()))?;
        body.append_child(&ghost)
            .map_err(|e| WidgetError::dom("appendChild", e))?;
        Ok(ghost)
    }
}

/// A mounted character. Dropping it (or calling `destroy`) stops the loop,
/// detaches every listener and removes the elements.
///
/// The sprite appears once every pose animation has loaded or failed to.
#[wasm_bindgen]
pub struct TinyChancy {
    state: Rc<RefCell<WidgetState>>,
}

#[wasm_bindgen]
impl TinyChancy {
    /// Mount a character. `config_json` is a partial [`Config`] object; an
    /// invalid one is rejected here (unlike `start`, which falls back).
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> std::result::Result<TinyChancy, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => Config::from_json(json)?,
            _ => Config::default(),
        };
        Ok(Self::mount(config)?)
    }

    /// Current behaviour state, or `"loading"` while the poses preload.
    #[wasm_bindgen(js_name = stateName)]
    pub fn state_name(&self) -> String {
        match &self.state.borrow().character {
            Some(character) => character.state().kind().to_string(),
            None => "loading".to_string(),
        }
    }

    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&self, on: bool) {
        self.state.borrow_mut().set_reduced_motion(on);
    }

    pub fn destroy(&self) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        if !state.running {
            return;
        }
        state.running = false;
        if let Some(id) = state.frame_request.take() {
            let _ = state.window.cancel_animation_frame(id);
        }
        for listener in state.listeners.drain(..) {
            listener.detach();
        }
        if let Some(character) = state.character.as_mut() {
            if let Some(pointer_id) = character.drag_pointer() {
                let _ = state.main.release_pointer_capture(pointer_id);
            }
            character.teardown();
        }
        state.main.remove();
        if let Some(ghost) = state.ghost.take() {
            ghost.remove();
        }
        state.preload.clear();
        // breaks the frame closure's reference to itself
        state.frame_cb.borrow_mut().take();
        info!("tinychancy destroyed");
    }
}

impl TinyChancy {
    /// Start preloading the poses; the character is created and the loop
    /// started once all of them have settled.
    pub fn mount(mut config: Config) -> Result<Self> {
        config.validate()?;
        let window = web_sys::window().ok_or_else(|| WidgetError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| WidgetError::Dom("no document".into()))?;
        if document.body().is_none() {
            return Err(WidgetError::Dom("no body".into()));
        }

        let motion_query = match config.reduced_motion {
            Some(_) => None,
            None => window.match_media(REDUCED_MOTION_QUERY).ok().flatten(),
        };
        if let Some(query) = &motion_query {
            config.reduced_motion = Some(query.matches());
        }

        let main = create_sprite(MAIN_ID, &config)?;
        main.set_src(&config.asset_url(Pose::Idle));

        let preload = Pose::ALL
            .iter()
            .map(|_| HtmlImageElement::new().map_err(|e| WidgetError::dom("new Image", e)))
            .collect::<Result<Vec<_>>>()?;

        let state = Rc::new(RefCell::new(WidgetState {
            config,
            character: None,
            window: window.clone(),
            document,
            main,
            ghost: None,
            pose: None,
            pending_preloads: preload.len(),
            preload,
            listeners: Vec::new(),
            frame_cb: Rc::new(RefCell::new(None)),
            frame_request: None,
            running: true,
        }));

        let widget = Self { state };
        widget.build_frame_loop();
        if let Err(e) = widget.attach_listeners(&window, motion_query) {
            widget.destroy();
            return Err(e);
        }
        info!("tinychancy mounted, preloading poses");
        Ok(widget)
    }

    fn attach_listeners(&self, window: &Window, motion_query: Option<MediaQueryList>) -> Result<()> {
        let mut listeners = Vec::new();
        let window_target: &EventTarget = window.as_ref();

        for kind in [
            PointerKind::Down,
            PointerKind::Move,
            PointerKind::Up,
            PointerKind::Cancel,
        ] {
            let weak = Rc::downgrade(&self.state);
            let callback = Closure::wrap(Box::new(move |evt: Event| {
                with_state(&weak, |state| state.on_pointer(kind, evt.unchecked_ref()));
            }) as Box<dyn FnMut(Event)>);
            listeners.push(Listener::attach(window_target, kind.event_name(), callback)?);
        }

        {
            let weak = Rc::downgrade(&self.state);
            let callback = Closure::wrap(Box::new(move |_evt: Event| {
                with_state(&weak, WidgetState::on_resize);
            }) as Box<dyn FnMut(Event)>);
            listeners.push(Listener::attach(window_target, "resize", callback)?);
        }

        if let Some(query) = motion_query {
            let weak = Rc::downgrade(&self.state);
            let q = query.clone();
            let callback = Closure::wrap(Box::new(move |_evt: Event| {
                let on = q.matches();
                with_state(&weak, |state| state.set_reduced_motion(on));
            }) as Box<dyn FnMut(Event)>);
            listeners.push(Listener::attach(query.as_ref(), "change", callback)?);
        }

        // Preload every pose. Each image settles once, on `load` or `error`;
        // a failed load only costs that pose its image.
        let preload: Vec<(HtmlImageElement, String)> = {
            let state = self.state.borrow();
            state
                .preload
                .iter()
                .zip(Pose::ALL)
                .map(|(img, pose)| (img.clone(), state.config.asset_url(pose)))
                .collect()
        };
        for (img, url) in preload {
            for (event, loaded) in [("load", true), ("error", false)] {
                let weak = Rc::downgrade(&self.state);
                let src = url.clone();
                let callback = Closure::wrap(Box::new(move |_evt: Event| {
                    with_state(&weak, |state| state.on_preload_settled(&src, loaded));
                }) as Box<dyn FnMut(Event)>);
                listeners.push(Listener::attach(img.as_ref(), event, callback)?);
            }
        }
        self.state.borrow_mut().listeners.extend(listeners);

        // src last, so no settle event can be missed
        let state = self.state.borrow();
        for (img, pose) in state.preload.iter().zip(Pose::ALL) {
            img.set_src(&state.config.asset_url(pose));
        }
        Ok(())
    }

    /// Build the animation-frame closure. Nothing is scheduled until the
    /// character exists.
    fn build_frame_loop(&self) {
        let weak = Rc::downgrade(&self.state);
        let f = self.state.borrow().frame_cb.clone();
        let cb = f.clone();
        *cb.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = state.borrow_mut();
            if !state.running {
                return;
            }
            state.on_frame(ts);
            state.frame_request = request_frame(&state.window, &f);
        }) as Box<dyn FnMut(f64)>));
    }
}

impl Drop for TinyChancy {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn with_state(weak: &Weak<RefCell<WidgetState>>, f: impl FnOnce(&mut WidgetState)) {
    if let Some(state) = weak.upgrade() {
        if let Ok(mut state) = state.try_borrow_mut() {
            if state.running {
                f(&mut state);
            }
        }
    }
}

fn request_frame(window: &Window, cb: &FrameCallback) -> Option<i32> {
    cb.borrow()
        .as_ref()
        .and_then(|c| window.request_animation_frame(c.as_ref().unchecked_ref()).ok())
}

fn create_sprite(id: &str, config: &Config) -> Result<HtmlImageElement> {
    let img = HtmlImageElement::new().map_err(|e| WidgetError::dom("new Image", e))?;
    img.set_id(id);
    img.set_alt("");
    img.set_draggable(false);
    img.set_attribute("aria-hidden", "true")
        .map_err(|e| WidgetError::dom("setAttribute", e))?;
    let style = img.style();
    let z_index = config.z_index.to_string();
    for (name, value) in [
        ("position", "fixed"),
        ("left", "0"),
        ("top", "0"),
        ("z-index", z_index.as_str()),
        ("will-change", "transform, left, top"),
        ("pointer-events", "auto"),
        ("touch-action", "none"),
        ("user-select", "none"),
        ("transform-origin", "center center"),
    ] {
        style
            .set_property(name, value)
            .map_err(|e| WidgetError::dom("style", e))?;
    }
    Ok(img)
}

/// Viewport size plus the sprite's rendered size at the current breakpoint.
fn read_geometry(window: &Window, img: &HtmlImageElement, config: &Config) -> Geometry {
    let dim = |v: std::result::Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let viewport_width = dim(window.inner_width());
    let viewport_height = dim(window.inner_height());
    let scale = config.scale_for_viewport(viewport_width);
    let (nw, nh) = (img.natural_width(), img.natural_height());
    let (w, h) = if nw == 0 || nh == 0 {
        (FALLBACK_SPRITE_PX, FALLBACK_SPRITE_PX)
    } else {
        (nw as f64 * scale, nh as f64 * scale)
    };
    Geometry::new(viewport_width, viewport_height, w, h)
}

/// Position one sprite element with its horizontal centre at `x`.
fn place(img: &HtmlImageElement, x: f64, frame: &Frame, geometry: &Geometry) -> Result<()> {
    let style = img.style();
    let left = x - geometry.half_width();
    let top = geometry.viewport_height - frame.y - geometry.sprite_height;
    let mirror = match frame.facing {
        Facing::Left => "scaleX(-1)",
        Facing::Right => "none",
    };
    let origin = match frame.anchor {
        Anchor::TopCenter => "center top",
        Anchor::BottomCenter => "center bottom",
    };
    for (name, value) in [
        ("width", format!("{}px", geometry.sprite_width)),
        ("height", format!("{}px", geometry.sprite_height)),
        ("left", format!("{left}px")),
        ("top", format!("{top}px")),
        ("transform", mirror.to_string()),
        ("transform-origin", origin.to_string()),
    ] {
        style
            .set_property(name, &value)
            .map_err(|e| WidgetError::dom("style", e))?;
    }
    Ok(())
}
