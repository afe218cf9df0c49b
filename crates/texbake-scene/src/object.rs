use texbake_graph::Material;

use crate::Id;

pub type MaterialId = Id<Material>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UvLayer {
    pub name: String,
}

/// A mesh object: UV layers plus material slots.
///
/// Geometry itself never matters to baking, only which UV layer is active
/// and which materials the slots reference.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshObject {
    pub name: String,
    uv_layers: Vec<UvLayer>,
    active_uv: Option<usize>,
    pub material_slots: Vec<Option<MaterialId>>,
}

impl MeshObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uv_layers: Vec::new(),
            active_uv: None,
            material_slots: Vec::new(),
        }
    }

    /// Adds a UV layer; the first one added becomes active.
    pub fn add_uv_layer(&mut self, name: impl Into<String>) {
        self.uv_layers.push(UvLayer { name: name.into() });
        if self.active_uv.is_none() {
            self.active_uv = Some(self.uv_layers.len() - 1);
        }
    }

    #[inline]
    pub fn uv_layers(&self) -> impl Iterator<Item = &UvLayer> {
        self.uv_layers.iter()
    }

    #[inline]
    pub fn has_uv_layers(&self) -> bool {
        !self.uv_layers.is_empty()
    }

    pub fn active_uv_layer(&self) -> Option<&str> {
        self.active_uv
            .and_then(|index| self.uv_layers.get(index))
            .map(|layer| layer.name.as_str())
    }

    /// Makes the named layer active; returns false if it does not exist.
    pub fn set_active_uv_layer(&mut self, name: &str) -> bool {
        match self.uv_layers.iter().position(|layer| layer.name == name) {
            Some(index) => {
                self.active_uv = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn add_material_slot(&mut self, material: Option<MaterialId>) {
        self.material_slots.push(material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_uv_layer_becomes_active() {
        let mut object = MeshObject::new("Crate");
        assert_eq!(object.active_uv_layer(), None);

        object.add_uv_layer("UVMap");
        object.add_uv_layer("Lightmap");
        assert_eq!(object.active_uv_layer(), Some("UVMap"));

        assert!(object.set_active_uv_layer("Lightmap"));
        assert_eq!(object.active_uv_layer(), Some("Lightmap"));

        assert!(!object.set_active_uv_layer("Missing"));
        assert_eq!(object.active_uv_layer(), Some("Lightmap"));
    }
}
