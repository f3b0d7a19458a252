//! Hover and click resolution for the hero globe.
//!
//! Turns a pointer position into a picked destination and works out what
//! the tooltip, cursor and modal should show. Applying the result to the
//! DOM is left to [`crate::dom`].

use catalog::{DestinationId, DestinationRegistry, ModalContent, TooltipContent};
use foundation::math::Vec2;
use gpu::camera::{Camera3D, ClientRect, ndc_from_client};
use scene::World;
use scene::picking::pick_ray;

use crate::globe_controller::Cursor;

/// Tooltip offset from the pointer, in pixels.
pub const TOOLTIP_OFFSET_PX: f64 = 20.0;

const TRANSIT_STYLE: &str = "color:#CBD5E1; font-size:0.85em; margin-top:0.3rem; display:block;";

/// Destination under a client-space pointer position, if any.
pub fn pick_destination(
    world: &World,
    camera: &Camera3D,
    rect: ClientRect,
    client: Vec2,
) -> Option<DestinationId> {
    let ndc = ndc_from_client(client, rect)?;
    pick_ray(world, camera.ray_from_ndc(ndc)).map(|hit| hit.destination)
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipView {
    Hidden,
    Shown {
        /// Position relative to the globe container.
        left_px: f64,
        top_px: f64,
        title: String,
        body_html: String,
    },
}

impl TooltipView {
    pub fn for_destination(content: &TooltipContent, rect: ClientRect, client: Vec2) -> Self {
        TooltipView::Shown {
            left_px: client.x - rect.left + TOOLTIP_OFFSET_PX,
            top_px: client.y - rect.top + TOOLTIP_OFFSET_PX,
            title: content.title.clone(),
            body_html: format!(
                "{}<br><span style=\"{TRANSIT_STYLE}\">{}</span>",
                escape_html(&content.body),
                escape_html(&content.transit_line),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverOutcome {
    /// Destination whose route is highlighted; `None` resets every route.
    pub hovered: Option<DestinationId>,
    pub tooltip: TooltipView,
    pub cursor: Cursor,
}

/// What a pointer move over the globe should show.
pub fn hover_outcome(
    registry: &DestinationRegistry,
    hit: Option<DestinationId>,
    rect: ClientRect,
    client: Vec2,
    idle_cursor: Cursor,
) -> HoverOutcome {
    match hit.and_then(|id| registry.get(id).map(|d| (id, d))) {
        Some((id, dest)) => HoverOutcome {
            hovered: Some(id),
            tooltip: TooltipView::for_destination(&TooltipContent::for_destination(dest), rect, client),
            cursor: Cursor::Pointer,
        },
        None => HoverOutcome {
            hovered: None,
            tooltip: TooltipView::Hidden,
            cursor: idle_cursor,
        },
    }
}

/// Modal content for a click; `None` unless it is a real click on a destination.
pub fn click_outcome(
    registry: &DestinationRegistry,
    hit: Option<DestinationId>,
    is_click: bool,
) -> Option<ModalContent> {
    if !is_click {
        return None;
    }
    registry.get(hit?).map(ModalContent::for_destination)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundation::math::{Vec3, mat4_transform_point};
    use scene::prefabs::{GlobeScene, SceneOptions};
    use scene::routes::{DEFAULT_APPEARANCE, HIGHLIGHT_APPEARANCE};

    const RECT: ClientRect = ClientRect {
        left: 40.0,
        top: 10.0,
        width: 800.0,
        height: 600.0,
    };

    fn setup() -> (DestinationRegistry, GlobeScene, Camera3D) {
        let reg = DestinationRegistry::builtin();
        let scene = GlobeScene::assemble(&reg, &SceneOptions::default());
        let camera = Camera3D::hero(RECT.width / RECT.height);
        (reg, scene, camera)
    }

    /// Client position where `world_point` appears on screen.
    fn client_of(camera: &Camera3D, world_point: Vec3) -> Vec2 {
        let ndc = mat4_transform_point(camera.view_proj(), world_point);
        Vec2::new(
            RECT.left + (ndc.x + 1.0) * 0.5 * RECT.width,
            RECT.top + (1.0 - ndc.y) * 0.5 * RECT.height,
        )
    }

    fn hitbox_client(scene: &GlobeScene, camera: &Camera3D, id: DestinationId) -> Vec2 {
        let hitbox = scene.marker(id).expect("marker").hitbox;
        let centre = scene.world.world_point(hitbox, Vec3::ZERO).expect("point");
        client_of(camera, centre)
    }

    #[test]
    fn pointer_over_a_marker_picks_it() {
        let (reg, scene, camera) = setup();
        let (uk, _) = reg.find_by_name("United Kingdom").expect("uk");
        let client = hitbox_client(&scene, &camera, uk);
        let hit = pick_destination(&scene.world, &camera, RECT, client);
        assert_eq!(hit, Some(uk));
    }

    #[test]
    fn empty_space_picks_nothing() {
        let (_, scene, camera) = setup();
        let corner = Vec2::new(RECT.left + 1.0, RECT.top + 1.0);
        assert_eq!(pick_destination(&scene.world, &camera, RECT, corner), None);
    }

    #[test]
    fn hover_shows_tooltip_and_highlights_route() {
        let (reg, mut scene, camera) = setup();
        let (uk, _) = reg.find_by_name("United Kingdom").expect("uk");
        let client = hitbox_client(&scene, &camera, uk);
        let hit = pick_destination(&scene.world, &camera, RECT, client);
        let out = hover_outcome(&reg, hit, RECT, client, Cursor::Grab);
        scene.apply_hover(out.hovered);

        assert_eq!(out.cursor, Cursor::Pointer);
        match &out.tooltip {
            TooltipView::Shown {
                left_px,
                top_px,
                title,
                body_html,
            } => {
                assert!((left_px - (client.x - RECT.left + 20.0)).abs() < 1e-9);
                assert!((top_px - (client.y - RECT.top + 20.0)).abs() < 1e-9);
                assert_eq!(title, "United Kingdom");
                assert!(body_html.contains("Transit: 3-5 business days"));
                assert!(body_html.contains("<br><span style="));
            }
            TooltipView::Hidden => panic!("tooltip should be shown"),
        }

        for route in scene.routes.iter() {
            let m = scene.world.drawable_3d(route.entity).expect("route").material;
            let expected = if route.destination == uk {
                HIGHLIGHT_APPEARANCE.opacity
            } else {
                DEFAULT_APPEARANCE.opacity
            };
            assert_eq!(m.opacity, expected);
        }
    }

    #[test]
    fn moving_off_every_marker_hides_tooltip() {
        let (reg, mut scene, _) = setup();
        let (dubai, _) = reg.find_by_name("UAE / Dubai").expect("dubai");
        scene.apply_hover(Some(dubai));

        let out = hover_outcome(&reg, None, RECT, Vec2::new(0.0, 0.0), Cursor::Grabbing);
        scene.apply_hover(out.hovered);
        assert_eq!(out.tooltip, TooltipView::Hidden);
        assert_eq!(out.cursor, Cursor::Grabbing);
        for route in scene.routes.iter() {
            let m = scene.world.drawable_3d(route.entity).expect("route").material;
            assert_eq!(m.opacity, DEFAULT_APPEARANCE.opacity);
        }
    }

    #[test]
    fn click_on_dubai_opens_its_modal() {
        let (reg, _, _) = setup();
        let (dubai, _) = reg.find_by_name("UAE / Dubai").expect("dubai");
        let modal = click_outcome(&reg, Some(dubai), true).expect("modal");
        assert_eq!(modal.name, "UAE / Dubai");
        assert_eq!(modal.routing, "LHE → DXB (Direct)");
        assert_eq!(modal.transit, "1-2 business days");
    }

    #[test]
    fn drag_release_or_miss_opens_nothing() {
        let (reg, _, _) = setup();
        let (dubai, _) = reg.find_by_name("UAE / Dubai").expect("dubai");
        assert_eq!(click_outcome(&reg, Some(dubai), false), None);
        assert_eq!(click_outcome(&reg, None, true), None);
    }

    #[test]
    fn tooltip_text_is_escaped() {
        let content = TooltipContent {
            title: "X".to_string(),
            body: "<b>Fast & safe</b>".to_string(),
            transit_line: "Transit: 1 day".to_string(),
        };
        let TooltipView::Shown { body_html, .. } =
            TooltipView::for_destination(&content, RECT, Vec2::new(40.0, 10.0))
        else {
            panic!("shown");
        };
        assert!(body_html.starts_with("&lt;b&gt;Fast &amp; safe&lt;/b&gt;<br>"));
    }
}
