//! Browser side of the logistics site: the interactive hero globe, the
//! hero entrance animation and the navigation chrome.

use console_error_panic_hook::set_once;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod console;
pub mod dom;
pub mod entrance;
pub mod globe_controller;
pub mod interaction;
pub mod label_raster;
pub mod nav;
pub mod texture;
pub mod uniforms;
mod wgpu;
pub mod widget;

use config::GlobeConfig;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Initializes every page component with the default configuration.
#[wasm_bindgen]
pub fn init_site() {
    init_components(&GlobeConfig::default());
}

/// Like [`init_site`], with a JSON globe configuration. Invalid JSON falls
/// back to the defaults.
#[wasm_bindgen]
pub fn init_site_with_config(json: &str) {
    let config = match GlobeConfig::from_json_str(json) {
        Ok(config) => config,
        Err(err) => {
            console::warn(&format!("globe config ignored: {err}"));
            GlobeConfig::default()
        }
    };
    init_components(&config);
}

/// Each component is independent; one failing leaves the others running.
fn init_components(config: &GlobeConfig) {
    let components: [(&str, &dyn Fn() -> Result<(), JsValue>); 3] = [
        ("globe", &|| widget::init_globe(config)),
        ("entrance", &entrance::init_entrance),
        ("navigation", &nav::init_nav),
    ];
    for (name, init) in components {
        if let Err(err) = init() {
            console::error(&format!("{name} failed to initialize: {}", console::describe(&err)));
        }
    }
}
