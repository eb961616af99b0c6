//! Browser bindings for the data-center globe.
//!
//! ```js
//! const globe = new DataCenterGlobe(document.getElementById("globe"), null);
//! globe.mount();          // false until the element has been laid out
//! // ...
//! globe.unmount();
//! ```

mod backend;
mod container;
mod host;

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog::Catalog;
use globe::{GlobeConfig, GlobeView, MountOutcome};
use runtime::Host;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub use backend::Canvas2dBackend;
pub use container::DomContainer;
pub use host::WebHost;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    Ok(())
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[derive(Serialize)]
struct StatsJson {
    frames_rendered: u64,
    arcs_spawned: u64,
    arcs_retired: u64,
    active_arcs: usize,
    mounted: bool,
    torn_down: bool,
    width: u32,
    height: u32,
}

#[derive(Serialize)]
struct LegendEntry {
    category: String,
    color: String,
    radius_scale: f32,
}

#[wasm_bindgen]
pub struct DataCenterGlobe {
    view: GlobeView,
}

#[wasm_bindgen]
impl DataCenterGlobe {
    /// `config_json` may be null or a partial `GlobeConfig` object as JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, config_json: Option<String>) -> Result<DataCenterGlobe, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => GlobeConfig::from_json(json).map_err(js_error)?,
            _ => GlobeConfig::default(),
        };
        let host: Rc<dyn Host> = Rc::new(WebHost::new().map_err(js_error)?);
        let container = DomContainer::new(element).map_err(js_error)?;
        let view = GlobeView::new(host, Box::new(container), Catalog::builtin(), config)
            .map_err(js_error)?;
        Ok(Self { view })
    }

    /// Returns false when the element is not laid out yet; call again once it is.
    pub fn mount(&self) -> Result<bool, JsValue> {
        match self.view.mount().map_err(js_error)? {
            MountOutcome::Mounted | MountOutcome::AlreadyMounted => Ok(true),
            MountOutcome::Deferred => Ok(false),
        }
    }

    /// Re-read the element size. Window resizes are handled automatically.
    pub fn resize(&self) {
        self.view.resize();
    }

    #[wasm_bindgen(js_name = setAutoRotate)]
    pub fn set_auto_rotate(&self, enabled: bool) {
        self.view.set_auto_rotate(enabled);
    }

    pub fn unmount(&self) {
        self.view.teardown();
    }

    /// Engine counters as a JSON string.
    pub fn stats(&self) -> Result<String, JsValue> {
        let s = self.view.stats();
        serde_json::to_string(&StatsJson {
            frames_rendered: s.frames_rendered,
            arcs_spawned: s.arcs_spawned,
            arcs_retired: s.arcs_retired,
            active_arcs: s.active_arcs,
            mounted: s.mounted,
            torn_down: s.torn_down,
            width: s.size.0,
            height: s.size.1,
        })
        .map_err(js_error)
    }
}

/// Category colors of the built-in catalog, headquarters first, as JSON.
#[wasm_bindgen]
pub fn legend_json() -> Result<String, JsValue> {
    let entries: Vec<LegendEntry> = layers::legend(&Catalog::builtin())
        .into_iter()
        .map(|(category, style)| LegendEntry {
            category: category.to_string(),
            color: style.css(),
            radius_scale: style.radius_scale,
        })
        .collect();
    serde_json::to_string(&entries).map_err(js_error)
}

/// The default configuration as JSON, for pages that tweak a few fields.
#[wasm_bindgen]
pub fn default_config_json() -> Result<String, JsValue> {
    serde_json::to_string(&GlobeConfig::default()).map_err(js_error)
}
