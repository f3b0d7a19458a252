use foundation::math::{Mat4, Vec3};
use scene::components::{Light, Material, Shape3D};
use scene::entity::EntityId;
use scene::world::World;

use crate::camera::Camera3D;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderCommand {
    pub entity: EntityId,
    /// Local-to-world matrix, parents included.
    pub model: Mat4,
    pub shape: Shape3D,
    pub material: Material,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderFrame {
    pub view_proj: Mat4,
    pub camera_position: Vec3,
    /// Opaque commands first, then transparent ones, each in entity order.
    pub commands: Vec<RenderCommand>,
    pub lights: Vec<Light>,
}

impl RenderFrame {
    pub fn opaque(&self) -> impl Iterator<Item = &RenderCommand> + '_ {
        self.commands.iter().filter(|c| !c.material.is_transparent())
    }

    pub fn transparent(&self) -> impl Iterator<Item = &RenderCommand> + '_ {
        self.commands.iter().filter(|c| c.material.is_transparent())
    }
}

pub struct Renderer;

impl Renderer {
    /// Snapshot of everything to draw this frame. Hidden entities (such as
    /// hit spheres) are skipped.
    pub fn collect(world: &World, camera: &Camera3D) -> RenderFrame {
        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        for (entity, drawable) in world.drawables_3d() {
            let Some(model) = world.world_matrix(entity) else {
                continue;
            };
            let command = RenderCommand {
                entity,
                model,
                shape: drawable.shape,
                material: drawable.material,
            };
            if drawable.material.is_transparent() {
                transparent.push(command);
            } else {
                opaque.push(command);
            }
        }
        opaque.extend(transparent);

        RenderFrame {
            view_proj: camera.view_proj(),
            camera_position: camera.position,
            commands: opaque,
            lights: world.lights(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Renderer;
    use crate::camera::Camera3D;
    use catalog::DestinationRegistry;
    use scene::components::Shape3D;
    use scene::prefabs::{GlobeScene, SceneOptions};

    fn frame() -> (GlobeScene, super::RenderFrame) {
        let scene = GlobeScene::assemble(&DestinationRegistry::builtin(), &SceneOptions::default());
        let frame = Renderer::collect(&scene.world, &Camera3D::hero(1.0));
        (scene, frame)
    }

    #[test]
    fn hidden_hitboxes_are_not_drawn() {
        let (scene, frame) = frame();
        for m in &scene.markers {
            assert!(frame.commands.iter().all(|c| c.entity != m.hitbox));
            assert!(frame.commands.iter().any(|c| c.entity == m.marker));
        }
    }

    #[test]
    fn transparent_commands_come_last() {
        let (_, frame) = frame();
        let first_transparent = frame
            .commands
            .iter()
            .position(|c| c.material.is_transparent())
            .expect("routes and labels are transparent");
        assert!(frame.commands[first_transparent..]
            .iter()
            .all(|c| c.material.is_transparent()));
        assert_eq!(frame.opaque().count() + frame.transparent().count(), frame.commands.len());
    }

    #[test]
    fn frame_carries_lights_and_every_part() {
        let (scene, frame) = frame();
        assert_eq!(frame.lights.len(), 3);
        let routes = frame
            .commands
            .iter()
            .filter(|c| matches!(c.shape, Shape3D::Polyline(_)))
            .count();
        let sprites = frame
            .commands
            .iter()
            .filter(|c| matches!(c.shape, Shape3D::Sprite { .. }))
            .count();
        assert_eq!(routes, scene.routes.len());
        assert_eq!(sprites, scene.markers.len());
        assert!(frame.commands.iter().any(|c| c.entity == scene.globe));
    }
}
