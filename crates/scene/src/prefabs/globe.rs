//! The hero globe: sphere, lights, destination markers, labels, routes and
//! aircraft, all hung under one rotating group.

use catalog::{DestinationId, DestinationRegistry};
use foundation::math::{QuadraticBezier3, Quat, Rgb, Vec3, lat_lon_to_vector3};
use runtime::{FlightPose, INITIAL_ROTATION, WidgetState};

use crate::World;
use crate::components::{
    Drawable3D, HitSphere, Light, Material, TextureSlot, Transform, Visibility,
};
use crate::entity::EntityId;
use crate::labels::{LABEL_LIFT, LABEL_SIZE, LabelRaster};
use crate::mesh::{Polyline, tube, uv_sphere};
use crate::prefabs::aircraft::aircraft_mesh;
use crate::routes::{
    ROUTE_COLOR, ROUTE_DASH, ROUTE_DIVISIONS, ROUTE_GAP, ROUTE_OPACITY, Route, RouteStyle,
    RouteTable, TUBE_RADIUS, TUBE_SEGMENTS, TUBE_SIDES, route_curve,
};

pub const GLOBE_RADIUS: f64 = 6.0;
pub const GLOBE_SEGMENTS: u32 = 64;
pub const GLOBE_COLOR: u32 = 0x3D5A80;
pub const GLOBE_SPECULAR: u32 = 0x1A2332;
pub const GLOBE_EMISSIVE: u32 = 0x0A1929;
pub const GLOBE_EMISSIVE_INTENSITY: f32 = 0.15;
/// Colour of the globe once the texture attempt has finished, either way.
pub const GLOBE_SETTLED_COLOR: u32 = 0x5B7FA8;

pub const MARKER_RADIUS: f64 = 0.15;
pub const HITBOX_RADIUS: f64 = 0.5;

pub const AIRCRAFT_EMISSIVE: u32 = 0x2DBE60;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneOptions {
    pub route_style: RouteStyle,
    pub aircraft: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            route_style: RouteStyle::Dashed,
            aircraft: true,
        }
    }
}

/// Decoded RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Result of the single globe texture fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureOutcome {
    Loaded(TextureImage),
    Fallback { reason: String },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlobeSurface {
    /// Texture fetch still in flight; base colour shown.
    Pending,
    Textured,
    Solid,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DestinationMarker {
    pub destination: DestinationId,
    pub marker: EntityId,
    pub hitbox: EntityId,
    pub label: EntityId,
    /// Surface point in globe-group space.
    pub position: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aircraft {
    pub destination: DestinationId,
    pub entity: EntityId,
    pub curve: QuadraticBezier3,
}

#[derive(Debug)]
pub struct GlobeScene {
    pub world: World,
    pub group: EntityId,
    pub globe: EntityId,
    pub markers: Vec<DestinationMarker>,
    pub routes: RouteTable,
    pub aircraft: Vec<Aircraft>,
    surface: GlobeSurface,
}

impl GlobeScene {
    pub fn assemble(registry: &DestinationRegistry, options: &SceneOptions) -> Self {
        let mut world = World::new();

        let group = world.spawn();
        world.set_transform(
            group,
            Transform::identity().with_rotation(Quat::from_euler_xyz(
                INITIAL_ROTATION.0,
                INITIAL_ROTATION.1,
                0.0,
            )),
        );

        let globe_mesh = world.add_mesh(uv_sphere(GLOBE_RADIUS, GLOBE_SEGMENTS, GLOBE_SEGMENTS));
        let globe = world.spawn();
        world.set_transform(globe, Transform::identity());
        world.set_parent(globe, group);
        world.set_drawable_3d(
            globe,
            Drawable3D::mesh(
                globe_mesh,
                Material::phong(
                    Rgb::from_hex(GLOBE_COLOR),
                    Rgb::from_hex(GLOBE_SPECULAR),
                    8.0,
                )
                .with_emissive(Rgb::from_hex(GLOBE_EMISSIVE), GLOBE_EMISSIVE_INTENSITY),
            ),
        );

        for light in [
            Light::ambient(Rgb::WHITE, 1.4),
            Light::directional(Rgb::WHITE, 0.8, Vec3::new(15.0, 8.0, 15.0)),
            Light::directional(Rgb::from_hex(0x7BA3D1), 0.3, Vec3::new(-10.0, -5.0, -10.0)),
        ] {
            let e = world.spawn();
            world.set_light(e, light);
        }

        let marker_mesh = world.add_mesh(uv_sphere(MARKER_RADIUS, 16, 16));
        let hitbox_mesh = world.add_mesh(uv_sphere(HITBOX_RADIUS, 8, 8));
        let mut markers = Vec::with_capacity(registry.len());

        for (id, dest) in registry.iter() {
            let position = lat_lon_to_vector3(dest.lat, dest.lon, GLOBE_RADIUS);

            let marker = world.spawn();
            world.set_transform(marker, Transform::translate(position));
            world.set_parent(marker, group);
            world.set_drawable_3d(
                marker,
                Drawable3D::mesh(marker_mesh, Material::unlit(Rgb::WHITE)),
            );

            let hitbox = world.spawn();
            world.set_transform(hitbox, Transform::translate(position));
            world.set_parent(hitbox, group);
            world.set_drawable_3d(
                hitbox,
                Drawable3D::mesh(hitbox_mesh, Material::unlit(Rgb::WHITE)),
            );
            world.set_visibility(hitbox, Visibility::hidden());
            world.set_hit_sphere(hitbox, HitSphere::new(HITBOX_RADIUS, id));

            let label_id = world.add_label(dest.name.clone(), LabelRaster::default());
            let label = world.spawn();
            world.set_transform(label, Transform::translate(position.scale(LABEL_LIFT)));
            world.set_parent(label, group);
            world.set_drawable_3d(label, Drawable3D::sprite(label_id, LABEL_SIZE));

            markers.push(DestinationMarker {
                destination: id,
                marker,
                hitbox,
                label,
                position,
            });
        }

        let origin = lat_lon_to_vector3(registry.origin().lat, registry.origin().lon, GLOBE_RADIUS);
        let plane_mesh = options.aircraft.then(|| world.add_mesh(aircraft_mesh()));
        let mut routes = RouteTable::default();
        let mut aircraft = Vec::new();

        for (id, dest) in registry.non_origin() {
            let target = lat_lon_to_vector3(dest.lat, dest.lon, GLOBE_RADIUS);
            let curve = route_curve(origin, target);

            let entity = world.spawn();
            world.set_transform(entity, Transform::identity());
            world.set_parent(entity, group);
            let drawable = match options.route_style {
                RouteStyle::Dashed => {
                    let line = world.add_polyline(Polyline::from_points(curve.points(ROUTE_DIVISIONS)));
                    Drawable3D::polyline(
                        line,
                        Material::dashed(Rgb::from_hex(ROUTE_COLOR), ROUTE_DASH, ROUTE_GAP, ROUTE_OPACITY),
                    )
                }
                RouteStyle::Tube => {
                    let mesh = world.add_mesh(tube(&curve, TUBE_RADIUS, TUBE_SEGMENTS, TUBE_SIDES));
                    Drawable3D::mesh(
                        mesh,
                        Material::unlit(Rgb::from_hex(ROUTE_COLOR)).with_opacity(ROUTE_OPACITY),
                    )
                }
            };
            world.set_drawable_3d(entity, drawable);
            routes.insert(Route {
                destination: id,
                entity,
                curve,
            });

            if let Some(mesh) = plane_mesh {
                let plane = world.spawn();
                world.set_transform(plane, Transform::translate(curve.p0));
                world.set_parent(plane, group);
                world.set_drawable_3d(
                    plane,
                    Drawable3D::mesh(
                        mesh,
                        Material::phong(Rgb::WHITE, Rgb::BLACK, 0.0)
                            .with_emissive(Rgb::from_hex(AIRCRAFT_EMISSIVE), 0.5)
                            .with_flat_shading()
                            .double_sided(),
                    ),
                );
                aircraft.push(Aircraft {
                    destination: id,
                    entity: plane,
                    curve,
                });
            }
        }

        Self {
            world,
            group,
            globe,
            markers,
            routes,
            aircraft,
            surface: GlobeSurface::Pending,
        }
    }

    pub fn surface(&self) -> GlobeSurface {
        self.surface
    }

    /// Consumes the texture fetch result. Loaded images are handed back for
    /// upload; a second outcome is ignored and returns `None`.
    pub fn apply_texture_outcome(&mut self, outcome: TextureOutcome) -> Option<TextureImage> {
        if self.surface != GlobeSurface::Pending {
            return None;
        }
        let drawable = self.world.drawable_3d_mut(self.globe)?;
        drawable.material.color = Rgb::from_hex(GLOBE_SETTLED_COLOR);
        match outcome {
            TextureOutcome::Loaded(image) => {
                drawable.material.texture = TextureSlot::Globe;
                self.surface = GlobeSurface::Textured;
                Some(image)
            }
            TextureOutcome::Fallback { .. } => {
                drawable.material.texture = TextureSlot::None;
                self.surface = GlobeSurface::Solid;
                None
            }
        }
    }

    /// Sets the group's intrinsic XYZ Euler rotation (pitch, yaw).
    pub fn set_rotation(&mut self, x: f64, y: f64) {
        self.world
            .set_rotation(self.group, Quat::from_euler_xyz(x, y, 0.0));
    }

    pub fn set_aircraft_pose(&mut self, index: usize, position: Vec3, orientation: Quat) {
        let Some(plane) = self.aircraft.get(index) else {
            return;
        };
        self.world.set_transform(
            plane.entity,
            Transform::translate(position).with_rotation(orientation),
        );
    }

    /// Writes an animation state into the scene: group rotation and the
    /// pose of every aircraft whose flight index matches.
    pub fn apply_state(&mut self, state: &WidgetState) {
        self.set_rotation(state.rotation.current_x, state.rotation.current_y);
        for flight in &state.flights {
            let Some(plane) = self.aircraft.get(flight.route) else {
                continue;
            };
            let pose = FlightPose::sample(&plane.curve, flight.progress);
            self.set_aircraft_pose(flight.route, pose.position, pose.orientation);
        }
    }

    pub fn apply_hover(&mut self, hovered: Option<DestinationId>) {
        self.routes.apply_hover(&mut self.world, hovered);
    }

    pub fn marker(&self, destination: DestinationId) -> Option<&DestinationMarker> {
        self.markers.iter().find(|m| m.destination == destination)
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobeScene, GlobeSurface, SceneOptions, TextureImage, TextureOutcome};
    use crate::components::{Shape3D, TextureSlot};
    use crate::picking::{Ray, pick_ray};
    use crate::routes::{DEFAULT_APPEARANCE, HIGHLIGHT_APPEARANCE, RouteStyle};
    use catalog::{Destination, DestinationId, DestinationRegistry};
    use foundation::math::{Rgb, Vec3};

    fn scene() -> (DestinationRegistry, GlobeScene) {
        let reg = DestinationRegistry::builtin();
        let scene = GlobeScene::assemble(&reg, &SceneOptions::default());
        (reg, scene)
    }

    #[test]
    fn one_route_per_non_origin_destination() {
        let (reg, scene) = scene();
        assert_eq!(scene.routes.len(), reg.len() - 1);
        assert!(scene.routes.get(reg.origin_id()).is_none());
        for (id, _) in reg.non_origin() {
            assert!(scene.routes.get(id).is_some());
        }
        assert_eq!(scene.aircraft.len(), reg.len() - 1);
        assert_eq!(scene.markers.len(), reg.len());
    }

    #[test]
    fn origin_in_the_middle_gets_no_route() {
        let reg = DestinationRegistry::new(vec![
            Destination::new("Norway", 60.0, 10.0),
            Destination::new("Kenya", -1.0, 37.0),
            Destination::new("Pakistan", 30.37, 69.34).origin(),
            Destination::new("Chile", -33.0, -70.0),
            Destination::new("Japan", 36.0, 138.0),
        ])
        .expect("registry");
        assert_eq!(reg.origin_id(), DestinationId(2));

        let scene = GlobeScene::assemble(&reg, &SceneOptions::default());
        assert_eq!(scene.routes.len(), reg.len() - 1);
        assert!(scene.routes.get(reg.origin_id()).is_none());
        assert!(scene.routes.iter().all(|r| r.destination != reg.origin_id()));
        for (id, _) in reg.non_origin() {
            assert!(scene.routes.get(id).is_some());
        }
    }

    #[test]
    fn routes_start_at_origin_and_end_at_destination() {
        let (reg, scene) = scene();
        let origin = scene.marker(reg.origin_id()).expect("origin").position;
        for route in scene.routes.iter() {
            let target = scene.marker(route.destination).expect("marker").position;
            assert_eq!(route.curve.p0, origin);
            assert!((route.curve.p2 - target).length() < 1e-9);
        }
    }

    #[test]
    fn tube_style_and_no_aircraft() {
        let reg = DestinationRegistry::builtin();
        let scene = GlobeScene::assemble(
            &reg,
            &SceneOptions {
                route_style: RouteStyle::Tube,
                aircraft: false,
            },
        );
        assert!(scene.aircraft.is_empty());
        for route in scene.routes.iter() {
            let d = scene.world.drawable_3d(route.entity).expect("drawable");
            assert!(matches!(d.shape, Shape3D::Mesh(_)));
        }
    }

    #[test]
    fn hitboxes_are_hidden_but_pickable() {
        let (reg, scene) = scene();
        let visible: Vec<_> = scene.world.drawables_3d().into_iter().map(|(e, _)| e).collect();
        assert!(scene.markers.iter().all(|m| !visible.contains(&m.hitbox)));
        assert!(scene.markers.iter().all(|m| visible.contains(&m.marker)));

        // Aim straight at the origin's hitbox from outside the globe.
        let target = scene
            .world
            .world_point(scene.marker(reg.origin_id()).expect("m").hitbox, Vec3::ZERO)
            .expect("point");
        let from = target.scale(3.0);
        let hit = pick_ray(&scene.world, Ray::new(from, target - from)).expect("hit");
        assert_eq!(hit.destination, reg.origin_id());
    }

    #[test]
    fn hover_highlights_only_the_hovered_route() {
        let (reg, mut scene) = scene();
        let (dubai, _) = reg.find_by_name("UAE / Dubai").expect("dubai");
        scene.apply_hover(Some(dubai));
        for route in scene.routes.iter() {
            let m = scene.world.drawable_3d(route.entity).expect("drawable").material;
            let look = if route.destination == dubai {
                HIGHLIGHT_APPEARANCE
            } else {
                DEFAULT_APPEARANCE
            };
            assert_eq!(m.color, Rgb::from_hex(look.color));
            assert_eq!(m.opacity, look.opacity);
        }

        // Hovering the origin has no route to raise.
        scene.apply_hover(Some(reg.origin_id()));
        for route in scene.routes.iter() {
            let m = scene.world.drawable_3d(route.entity).expect("drawable").material;
            assert_eq!(m.opacity, DEFAULT_APPEARANCE.opacity);
        }
    }

    #[test]
    fn widget_state_moves_group_and_aircraft() {
        let (_, mut scene) = scene();
        let mut state = runtime::WidgetState::new(scene.aircraft.len());
        state.rotation = runtime::RotationState::at(0.0, 0.0);
        state.flights[0].progress = 0.5;
        scene.apply_state(&state);

        let group = scene.world.transform(scene.group).expect("group");
        assert_eq!(group.rotation, foundation::math::Quat::from_euler_xyz(0.0, 0.0, 0.0));
        let plane = scene.world.transform(scene.aircraft[0].entity).expect("plane");
        let expected = scene.aircraft[0].curve.point_at(0.5);
        assert!((plane.position - expected).length() < 1e-12);
        assert!(plane.position.length() > super::GLOBE_RADIUS);
    }

    #[test]
    fn texture_failure_keeps_a_solid_globe() {
        let (_, mut scene) = scene();
        let upload = scene.apply_texture_outcome(TextureOutcome::Fallback {
            reason: "network error".to_string(),
        });
        assert!(upload.is_none());
        assert_eq!(scene.surface(), GlobeSurface::Solid);

        let globe = scene
            .world
            .drawables_3d()
            .into_iter()
            .find(|(e, _)| *e == scene.globe)
            .expect("globe still drawn");
        assert_eq!(globe.1.material.color, Rgb::from_hex(0x5B7FA8));
        assert_eq!(globe.1.material.texture, TextureSlot::None);
    }

    #[test]
    fn texture_outcome_is_consumed_once() {
        let (_, mut scene) = scene();
        let image = TextureImage {
            width: 1,
            height: 1,
            rgba: vec![0, 0, 0, 255],
        };
        assert!(scene.apply_texture_outcome(TextureOutcome::Loaded(image.clone())).is_some());
        assert_eq!(scene.surface(), GlobeSurface::Textured);
        assert!(scene.apply_texture_outcome(TextureOutcome::Loaded(image)).is_none());
        assert!(
            scene
                .apply_texture_outcome(TextureOutcome::Fallback {
                    reason: "late".to_string()
                })
                .is_none()
        );
        assert_eq!(scene.surface(), GlobeSurface::Textured);
    }
}
