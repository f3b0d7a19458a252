//! Page-supplied settings for the hero globe.

use catalog::{CatalogError, Destination, DestinationRegistry};
use scene::prefabs::SceneOptions;
use scene::routes::RouteStyle;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXTURE_URL: &str =
    "https://raw.githubusercontent.com/mrdoob/three.js/master/examples/textures/planets/earth_atmos_2048.jpg";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStyleName {
    #[default]
    Dashed,
    Tube,
}

impl From<RouteStyleName> for RouteStyle {
    fn from(name: RouteStyleName) -> Self {
        match name {
            RouteStyleName::Dashed => RouteStyle::Dashed,
            RouteStyleName::Tube => RouteStyle::Tube,
        }
    }
}

/// DOM ids the globe looks up. Each one is optional on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub container: String,
    pub tooltip: String,
    pub tooltip_country: String,
    pub tooltip_desc: String,
    pub modal: String,
    pub modal_name: String,
    pub modal_services: String,
    pub modal_routing: String,
    pub modal_transit: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            container: "hero-canvas-container".to_string(),
            tooltip: "globe-tooltip".to_string(),
            tooltip_country: "tooltip-country".to_string(),
            tooltip_desc: "tooltip-desc".to_string(),
            modal: "destinationModal".to_string(),
            modal_name: "modal-country-name".to_string(),
            modal_services: "modal-services".to_string(),
            modal_routing: "modal-routing".to_string(),
            modal_transit: "modal-transit".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobeConfig {
    pub route_style: RouteStyleName,
    pub aircraft: bool,
    pub wheel_zoom: bool,
    pub texture_url: String,
    /// Replaces the built-in destination list when present.
    pub destinations: Option<Vec<Destination>>,
    pub ids: ElementIds,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            route_style: RouteStyleName::Dashed,
            aircraft: true,
            wheel_zoom: false,
            texture_url: DEFAULT_TEXTURE_URL.to_string(),
            destinations: None,
            ids: ElementIds::default(),
        }
    }
}

impl GlobeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            route_style: self.route_style.into(),
            aircraft: self.aircraft,
        }
    }

    pub fn registry(&self) -> Result<DestinationRegistry, CatalogError> {
        match &self.destinations {
            Some(list) => DestinationRegistry::new(list.clone()),
            None => Ok(DestinationRegistry::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_TEXTURE_URL, GlobeConfig, RouteStyleName};
    use scene::routes::RouteStyle;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = GlobeConfig::from_json_str("{}").expect("parse");
        assert_eq!(cfg, GlobeConfig::default());
        assert_eq!(cfg.texture_url, DEFAULT_TEXTURE_URL);
        assert!(!cfg.wheel_zoom);
        assert_eq!(cfg.ids.container, "hero-canvas-container");
    }

    #[test]
    fn camel_case_fields() {
        let cfg = GlobeConfig::from_json_str(
            r#"{"routeStyle":"tube","aircraft":false,"wheelZoom":true,
                "textureUrl":"/static/earth.jpg","ids":{"modal":"m"}}"#,
        )
        .expect("parse");
        assert_eq!(cfg.route_style, RouteStyleName::Tube);
        assert_eq!(cfg.scene_options().route_style, RouteStyle::Tube);
        assert!(!cfg.scene_options().aircraft);
        assert!(cfg.wheel_zoom);
        assert_eq!(cfg.texture_url, "/static/earth.jpg");
        assert_eq!(cfg.ids.modal, "m");
        assert_eq!(cfg.ids.tooltip, "globe-tooltip");
    }

    #[test]
    fn unknown_route_style_is_an_error() {
        assert!(GlobeConfig::from_json_str(r#"{"routeStyle":"zigzag"}"#).is_err());
    }

    #[test]
    fn destinations_override_is_validated() {
        let cfg = GlobeConfig::from_json_str(
            r#"{"destinations":[{"name":"Hub","lat":1,"lon":2,"isOrigin":true},
                                {"name":"Far","lat":-10,"lon":120}]}"#,
        )
        .expect("parse");
        let reg = cfg.registry().expect("valid");
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.origin().name, "Hub");

        let bad = GlobeConfig::from_json_str(r#"{"destinations":[{"name":"A","lat":0,"lon":0}]}"#)
            .expect("parse");
        assert!(bad.registry().is_err());
    }

    #[test]
    fn default_registry_is_builtin() {
        let reg = GlobeConfig::default().registry().expect("builtin");
        assert_eq!(reg.len(), catalog::DestinationRegistry::builtin().len());
    }
}
