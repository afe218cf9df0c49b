use texbake_scene::{ImageId, ObjectId};

use crate::BakeProfile;

/// Everything the configuration dialog collects; immutable once the run
/// starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BakeRequest {
    pub object: ObjectId,
    /// UV layer the bake projects onto.
    pub uv_layer: String,
    /// Only the dimensions of this image are read, never its pixels.
    pub reference_image: ImageId,
    pub profile: BakeProfile,
}

impl BakeRequest {
    pub fn new(object: ObjectId, uv_layer: impl Into<String>, reference_image: ImageId) -> Self {
        Self {
            object,
            uv_layer: uv_layer.into(),
            reference_image,
            profile: BakeProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: BakeProfile) -> Self {
        self.profile = profile;
        self
    }
}
