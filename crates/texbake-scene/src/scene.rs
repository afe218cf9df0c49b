use texbake_graph::Material;
use texbake_image::ImageData;
use texbake_util::HashMap;

use crate::{Id, MaterialId, MeshObject, RenderSettings};

/// Prefix reserved for scratch bake buffers; enumeration filters it out.
pub const BAKE_SCRATCH_PREFIX: &str = "_bake_";

/// Host-internal buffers that are never valid bake references.
const INTERNAL_IMAGES: [&str; 2] = ["Render Result", "Viewer Node"];

/// Smallest image accepted as a resolution reference.
const MIN_REFERENCE_SIZE: u32 = 512;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageResource {
    pub name: String,
    pub data: ImageData,
}

pub type ImageId = Id<ImageResource>;
pub type ObjectId = Id<MeshObject>;

/// The project: objects, materials, images, and the global render
/// settings block.
#[derive(Debug, Default)]
pub struct Scene {
    objects: HashMap<ObjectId, MeshObject>,
    materials: HashMap<MaterialId, Material>,
    images: HashMap<ImageId, ImageResource>,
    next_index: u32,
    pub render: RenderSettings,
    pub gpu_available: bool,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_index(&mut self) -> u32 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    pub fn add_object(&mut self, object: MeshObject) -> ObjectId {
        let id = Id::from_index(self.next_index());
        self.objects.insert(id, object);
        id
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = Id::from_index(self.next_index());
        self.materials.insert(id, material);
        id
    }

    pub fn add_image(&mut self, name: impl Into<String>, data: ImageData) -> ImageId {
        let id = Id::from_index(self.next_index());
        self.images.insert(
            id,
            ImageResource {
                name: name.into(),
                data,
            },
        );
        id
    }

    pub fn remove_image(&mut self, id: ImageId) {
        self.images.remove(&id);
    }

    #[inline]
    pub fn object(&self, id: ObjectId) -> Option<&MeshObject> {
        self.objects.get(&id)
    }

    #[inline]
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut MeshObject> {
        self.objects.get_mut(&id)
    }

    #[inline]
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    #[inline]
    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(&id)
    }

    #[inline]
    pub fn image(&self, id: ImageId) -> Option<&ImageResource> {
        self.images.get(&id)
    }

    pub fn image_by_name(&self, name: &str) -> Option<&ImageResource> {
        self.images.values().find(|image| image.name == name)
    }

    #[inline]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// Materials referenced by an object's slots, skipping empty slots and
    /// dangling ids.
    pub fn object_materials(&self, id: ObjectId) -> impl Iterator<Item = (MaterialId, &Material)> {
        let slots = self
            .object(id)
            .map(|object| object.material_slots.as_slice())
            .unwrap_or(&[]);

        slots
            .iter()
            .flatten()
            .filter_map(move |&material| Some((material, self.material(material)?)))
    }

    pub fn object_material_ids(&self, id: ObjectId) -> Vec<MaterialId> {
        self.object_materials(id).map(|(id, _)| id).collect()
    }

    /// Images eligible as bake resolution references, in a stable order.
    ///
    /// Filters out images too small to be UV bake targets, host-internal
    /// buffers, scratch bake buffers, and thumbnail/asset-browser junk.
    pub fn bake_reference_images(&self) -> Vec<(ImageId, &ImageResource)> {
        let mut images: Vec<_> = self
            .images
            .iter()
            .filter(|(_, image)| {
                let (width, height) = image.data.dimensions();
                if width < MIN_REFERENCE_SIZE || height < MIN_REFERENCE_SIZE {
                    return false;
                }
                if INTERNAL_IMAGES.contains(&image.name.as_str()) {
                    return false;
                }
                if image.name.starts_with(BAKE_SCRATCH_PREFIX) {
                    return false;
                }
                let lower = image.name.to_lowercase();
                !lower.starts_with("thumbnail") && !lower.contains("asset_type")
            })
            .map(|(&id, image)| (id, image))
            .collect();

        images.sort_by_key(|(id, _)| *id);
        images
    }
}
