use catalog::DestinationId;
use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::World;
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    pub destination: DestinationId,
    pub distance: f64,
    pub point: Vec3,
}

/// Deterministic ray picking against destination hit spheres.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - If multiple spheres are hit at the same distance, the lower `EntityId::index()` wins.
///
/// Hit spheres are tested in world space (after all parent transforms) and
/// regardless of visibility. Rays starting inside a sphere hit it at distance 0.
pub fn pick_ray(world: &World, ray: Ray) -> Option<PickHit> {
    let dir = ray.dir.try_normalize()?;
    let mut best: Option<(f64, EntityId, DestinationId)> = None;

    for (entity, hit) in world.hit_spheres() {
        let Some(center) = world.world_point(entity, Vec3::ZERO) else {
            continue;
        };
        let Some(t) = ray_sphere_hit_t(ray.origin, dir, center, hit.radius) else {
            continue;
        };

        best = match best {
            None => Some((t, entity, hit.destination)),
            Some((bt, be, bd)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| entity.index().cmp(&be.index()));
                if ord.is_lt() {
                    Some((t, entity, hit.destination))
                } else {
                    Some((bt, be, bd))
                }
            }
        };
    }

    let (t, entity, destination) = best?;
    Some(PickHit {
        entity,
        destination,
        distance: t,
        point: ray.origin + dir.scale(t),
    })
}

/// Entry distance of a unit-direction ray into a sphere, if it hits in front.
fn ray_sphere_hit_t(origin: Vec3, dir: Vec3, center: Vec3, radius: f64) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let near = -b - sqrt;
    let far = -b + sqrt;
    if far < 0.0 {
        return None;
    }
    Some(near.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::{Ray, pick_ray};
    use crate::World;
    use crate::components::{HitSphere, Transform, Visibility};
    use catalog::DestinationId;
    use foundation::math::{Quat, Vec3};

    fn spawn_hit(world: &mut World, at: Vec3, dest: usize) -> crate::entity::EntityId {
        let e = world.spawn();
        world.set_transform(e, Transform::translate(at));
        world.set_hit_sphere(e, HitSphere::new(0.5, DestinationId(dest)));
        world.set_visibility(e, Visibility::hidden());
        e
    }

    #[test]
    fn ray_picks_nearest_hit() {
        let mut world = World::new();
        let far = spawn_hit(&mut world, Vec3::new(0.0, 0.0, -10.0), 0);
        let near = spawn_hit(&mut world, Vec3::new(0.0, 0.0, -5.0), 1);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        let hit = pick_ray(&world, ray).expect("hit");
        assert_eq!(hit.entity, near);
        assert_eq!(hit.destination, DestinationId(1));
        assert!((hit.distance - 4.5).abs() < 1e-12);
        assert_ne!(hit.entity, far);
    }

    #[test]
    fn tie_breaks_by_entity_index() {
        let mut world = World::new();
        let first = spawn_hit(&mut world, Vec3::new(0.0, 0.0, -5.0), 3);
        let _second = spawn_hit(&mut world, Vec3::new(0.0, 0.0, -5.0), 4);

        let hit = pick_ray(&world, Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))).expect("hit");
        assert_eq!(hit.entity, first);
    }

    #[test]
    fn misses_and_spheres_behind_are_ignored() {
        let mut world = World::new();
        spawn_hit(&mut world, Vec3::new(0.0, 0.0, 5.0), 0);
        spawn_hit(&mut world, Vec3::new(3.0, 0.0, -5.0), 1);
        assert!(pick_ray(&world, Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))).is_none());
        assert!(pick_ray(&world, Ray::new(Vec3::ZERO, Vec3::ZERO)).is_none());
    }

    #[test]
    fn picking_follows_parent_rotation() {
        let mut world = World::new();
        let group = world.spawn();
        world.set_transform(group, Transform::identity());
        let e = spawn_hit(&mut world, Vec3::new(6.0, 0.0, 0.0), 2);
        world.set_parent(e, group);

        let down_z = Ray::new(Vec3::new(0.0, 0.0, 16.5), Vec3::new(0.0, 0.0, -1.0));
        assert!(pick_ray(&world, down_z).is_none());

        // A quarter turn about Y brings +X round to +Z, facing the camera.
        world.set_rotation(
            group,
            Quat::from_axis_angle(Vec3::Y, -std::f64::consts::FRAC_PI_2),
        );
        let hit = pick_ray(&world, down_z).expect("hit");
        assert_eq!(hit.destination, DestinationId(2));
        assert!((hit.point.z - 6.5).abs() < 1e-9);
    }
}
