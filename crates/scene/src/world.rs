use foundation::math::{Mat4, Quat, Vec3, mat4_mul};

use crate::components::{
    Drawable3D, HitSphere, LabelId, Light, MeshId, Parent, PolylineId, Transform, Visibility,
};
use crate::entity::EntityId;
use crate::labels::{LabelRaster, LabelSprite};
use crate::mesh::{MeshData, Polyline};

/// Entity/component store for the hero scene.
///
/// Components live in parallel `Vec<Option<_>>` columns indexed by
/// `EntityId::index()`. Geometry and label rasters are shared resources
/// addressed by id.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    parents: Vec<Option<Parent>>,
    visibility: Vec<Option<Visibility>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    hit_spheres: Vec<Option<HitSphere>>,
    lights: Vec<Option<Light>>,
    meshes: Vec<MeshData>,
    polylines: Vec<Polyline>,
    labels: Vec<LabelSprite>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId::from_index(self.next_index as usize);
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        id
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.index() as usize).and_then(|t| *t)
    }

    /// Replaces only the rotation of an entity that already has a transform.
    pub fn set_rotation(&mut self, entity: EntityId, rotation: Quat) {
        if let Some(Some(t)) = self.transforms.get_mut(entity.index() as usize) {
            t.rotation = rotation;
        }
    }

    /// Attaches `entity` under `parent`. Returns false and leaves the
    /// hierarchy unchanged when the link would create a cycle.
    pub fn set_parent(&mut self, entity: EntityId, parent: EntityId) -> bool {
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == entity {
                return false;
            }
            ancestor = self.parent(current);
        }
        self.ensure_capacity(entity.index() as usize);
        self.parents[entity.index() as usize] = Some(Parent(parent));
        true
    }

    pub fn parent(&self, entity: EntityId) -> Option<EntityId> {
        self.parents
            .get(entity.index() as usize)
            .and_then(|p| *p)
            .map(|p| p.0)
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.ensure_capacity(entity.index() as usize);
        self.visibility[entity.index() as usize] = Some(visibility);
    }

    pub fn is_visible(&self, entity: EntityId) -> bool {
        self.visibility
            .get(entity.index() as usize)
            .and_then(|v| *v)
            .map(|v| v.visible)
            .unwrap_or(true)
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<&Drawable3D> {
        self.drawables_3d
            .get(entity.index() as usize)
            .and_then(|d| d.as_ref())
    }

    pub fn drawable_3d_mut(&mut self, entity: EntityId) -> Option<&mut Drawable3D> {
        self.drawables_3d
            .get_mut(entity.index() as usize)
            .and_then(|d| d.as_mut())
    }

    pub fn set_hit_sphere(&mut self, entity: EntityId, hit: HitSphere) {
        self.ensure_capacity(entity.index() as usize);
        self.hit_spheres[entity.index() as usize] = Some(hit);
    }

    pub fn hit_sphere(&self, entity: EntityId) -> Option<HitSphere> {
        self.hit_spheres.get(entity.index() as usize).and_then(|h| *h)
    }

    pub fn set_light(&mut self, entity: EntityId, light: Light) {
        self.ensure_capacity(entity.index() as usize);
        self.lights[entity.index() as usize] = Some(light);
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(mesh);
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.0 as usize)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshData)> + '_ {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, m)| (MeshId(i as u32), m))
    }

    pub fn add_polyline(&mut self, line: Polyline) -> PolylineId {
        let id = PolylineId(self.polylines.len() as u32);
        self.polylines.push(line);
        id
    }

    pub fn polyline(&self, id: PolylineId) -> Option<&Polyline> {
        self.polylines.get(id.0 as usize)
    }

    pub fn polylines(&self) -> impl Iterator<Item = (PolylineId, &Polyline)> + '_ {
        self.polylines
            .iter()
            .enumerate()
            .map(|(i, l)| (PolylineId(i as u32), l))
    }

    pub fn add_label(&mut self, text: impl Into<String>, raster: LabelRaster) -> LabelId {
        let id = LabelId(self.labels.len() as u32);
        self.labels.push(LabelSprite {
            id,
            text: text.into(),
            raster,
        });
        id
    }

    pub fn labels(&self) -> &[LabelSprite] {
        &self.labels
    }

    /// Local-to-world matrix, composing every ancestor transform.
    pub fn world_matrix(&self, entity: EntityId) -> Option<Mat4> {
        let local = self.transform(entity)?.matrix();
        match self.parent(entity) {
            Some(parent) => Some(mat4_mul(self.world_matrix(parent)?, local)),
            None => Some(local),
        }
    }

    /// Maps a point in the entity's local space to world space.
    pub fn world_point(&self, entity: EntityId, local: Vec3) -> Option<Vec3> {
        let mut p = self.transform(entity)?.apply(local);
        let mut current = entity;
        while let Some(parent) = self.parent(current) {
            p = self.transform(parent)?.apply(p);
            current = parent;
        }
        Some(p)
    }

    /// Visible drawables, in entity order.
    pub fn drawables_3d(&self) -> Vec<(EntityId, Drawable3D)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let entity = EntityId::from_index(idx);
            if self.transform(entity).is_none() || !self.is_visible(entity) {
                continue;
            }
            out.push((entity, *drawable));
        }
        out
    }

    /// Every hit sphere, visible or not.
    pub fn hit_spheres(&self) -> Vec<(EntityId, HitSphere)> {
        self.hit_spheres
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| h.map(|h| (EntityId::from_index(idx), h)))
            .collect()
    }

    pub fn lights(&self) -> Vec<Light> {
        self.lights.iter().filter_map(|l| *l).collect()
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.parents.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.hit_spheres.resize(new_len, None);
            self.lights.resize(new_len, None);
        }
    }
}
