//! TinyChancy core crate.
//!
//! A small animated character that idles, walks and sits along the bottom of a
//! web page, and can be picked up, dragged and thrown. The behaviour and
//! physics live in [`character`] and run without a browser; [`widget`] mounts
//! them onto the page with an animation-frame loop.
//!
//! From JS:
//!
//! ```js
//! import init, { start, TinyChancy } from "./pkg/tinychancy.js";
//! await init();
//! start();                                   // default character
//! const pet = new TinyChancy('{"gravity": 900}'); // or an owned one
//! pet.destroy();
//! ```

use std::cell::RefCell;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub mod character;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod rng;
pub mod widget;

pub use character::{BehaviorState, Character, Frame, Geometry, PointerInput, Pose, StateKind};
pub use config::Config;
pub use error::WidgetError;
pub use widget::TinyChancy;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init("info");
}

/// Change the log filter, e.g. `"tinychancy=debug"`. Only the first
/// installed subscriber takes effect, so call this before `start`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(directive: &str) {
    logging::init(directive);
}

// -----------------------------------------------------------------------------
// Page-global character
// -----------------------------------------------------------------------------

thread_local! {
    static WIDGET: RefCell<Option<TinyChancy>> = const { RefCell::new(None) };
}

/// Mount the page's character with default settings.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    start_with_config(None)
}

/// Mount the page's character, replacing any previous one. A config that
/// fails to parse is logged and the defaults are used. Mounting waits for
/// `DOMContentLoaded` when the document is still loading.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config_json: Option<String>) -> Result<(), JsValue> {
    let config = Config::from_json_or_default(config_json.as_deref());
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from(WidgetError::Dom("no document".into())))?;

    if document.ready_state() == "loading" {
        let mount = Closure::once_into_js(move || {
            if let Err(e) = mount_global(config) {
                warn!(error = %e, "failed to mount tinychancy");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", mount.unchecked_ref())?;
        return Ok(());
    }
    Ok(mount_global(config)?)
}

/// Remove the page's character, if any.
#[wasm_bindgen]
pub fn stop() {
    // Drop outside the borrow; destroy() touches only the widget's own state.
    let old = WIDGET.with(|w| w.borrow_mut().take());
    if let Some(old) = old {
        old.destroy();
    }
}

fn mount_global(config: Config) -> Result<(), WidgetError> {
    let widget = TinyChancy::mount(config)?;
    let old = WIDGET.with(|w| w.borrow_mut().replace(widget));
    if let Some(old) = old {
        old.destroy();
    }
    Ok(())
}
