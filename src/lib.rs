#![deny(unsafe_op_in_unsafe_fn)]

//! Bakes PBR material channels from a shader node graph into UV-space
//! textures, packs occlusion/roughness/metallic into one ORM image, and
//! exports engine-ready PNGs.

pub use texbake_bake as bake;
pub use texbake_graph as graph;
pub use texbake_image as image;
pub use texbake_scene as scene;
pub use texbake_util as util;

pub use texbake_util::math;

pub mod prelude {
    pub use texbake_bake::{
        export_maps, run_bake, BakeBackend, BakeError, BakeOutput, BakeProfile, BakeRequest,
        Channel, DirectoryPicker, ExportStatus, FixedDirectory, SoftwareBaker,
    };
    pub use texbake_graph::{
        EmissionRewire, Material, NodeKind, NodeTree, PrincipledInput, SocketValue,
    };
    pub use texbake_image::{pack_orm, Encoding, ImageData};
    pub use texbake_scene::{ImageId, MaterialId, MeshObject, ObjectId, Scene};
}

use texbake_bake::{
    export_maps, run_bake, BakeBackend, BakeError, BakeProgress, BakeRequest, DirectoryPicker,
    ExportStatus,
};
use texbake_scene::Scene;
use tracing_log::log;

/// The whole procedure the context-menu action runs: bake every channel,
/// then prompt for a directory and write the PNGs.
///
/// All scene state is restored before the directory prompt appears, so
/// cancelling loses nothing but the bake time.
pub fn bake_and_export(
    scene: &mut Scene,
    request: &BakeRequest,
    backend: &mut dyn BakeBackend,
    progress: &mut dyn BakeProgress,
    picker: &mut dyn DirectoryPicker,
) -> Result<ExportStatus, BakeError> {
    let output = run_bake(scene, request, backend, progress)?;
    log::info!("bake complete, {} textures ready to save", output.maps.len());

    export_maps(&output, picker)
}
