use texbake_graph::EmissionRewire;
use texbake_image::{pack_orm, Encoding, ImageData};
use texbake_scene::{MaterialId, Scene};
use tracing_log::log;

use crate::{
    apply_bake_environment, BakeBackend, BakeError, BakeProgress, BakeRequest, ChannelSpec,
    EnvironmentSnapshot, ValidationError,
};

/// One exportable texture produced by a run.
#[derive(Clone, Debug)]
pub struct BakedMap {
    pub suffix: &'static str,
    pub encoding: Encoding,
    pub image: ImageData,
}

/// The finished set of textures, ready for export.
#[derive(Clone, Debug)]
pub struct BakeOutput {
    pub object_name: String,
    pub width: u32,
    pub height: u32,
    pub maps: Vec<BakedMap>,
}

impl BakeOutput {
    /// Engine import naming convention.
    pub fn file_name(&self, map: &BakedMap) -> String {
        format!("T_{}_{}.png", self.object_name, map.suffix)
    }
}

/// Runs the whole bake procedure.
///
/// Mutable state touched during the run (render settings, active UV
/// layer, emission rewires, linked-material locality) is restored before
/// this function returns, on the error path as much as on success.
pub fn run_bake(
    scene: &mut Scene,
    request: &BakeRequest,
    backend: &mut dyn BakeBackend,
    progress: &mut dyn BakeProgress,
) -> Result<BakeOutput, BakeError> {
    validate(scene, request)?;

    let reference = scene
        .image(request.reference_image)
        .ok_or(ValidationError::MissingReferenceImage)?;
    let (width, height) = reference.data.dimensions();

    let object_name = scene
        .object(request.object)
        .ok_or(ValidationError::MissingObject)?
        .name
        .clone();

    log::debug!(
        "baking `{object_name}` at {width}x{height} ({:?} profile)",
        request.profile,
    );

    let snapshot = EnvironmentSnapshot::capture(&scene.render);
    apply_bake_environment(&mut scene.render, scene.gpu_available);

    let prior_uv = set_active_uv(scene, request);

    let localized = if request.profile.localizes_linked() {
        localize_linked(scene, request)
    } else {
        Vec::new()
    };

    // Everything after this point runs under restore-on-every-path: the
    // inner result is only propagated once the scene is back in shape.
    let baked = bake_channels(scene, request, backend, width, height, progress);

    relink_materials(scene, localized);
    restore_active_uv(scene, request, prior_uv);
    snapshot.restore(&mut scene.render);

    let maps = baked?;

    Ok(BakeOutput {
        object_name,
        width,
        height,
        maps,
    })
}

/// Precondition check; reads only.
fn validate(scene: &Scene, request: &BakeRequest) -> Result<(), ValidationError> {
    let object = scene
        .object(request.object)
        .ok_or(ValidationError::MissingObject)?;

    if !object.has_uv_layers() {
        return Err(ValidationError::MissingUvLayer);
    }

    if !object.uv_layers().any(|layer| layer.name == request.uv_layer) {
        return Err(ValidationError::UnknownUvLayer(request.uv_layer.clone()));
    }

    let has_principled = scene
        .object_materials(request.object)
        .any(|(_, material)| material.principled().is_some());

    if !has_principled {
        return Err(ValidationError::MissingPrincipledMaterial);
    }

    if scene.image(request.reference_image).is_none() {
        return Err(ValidationError::MissingReferenceImage);
    }

    Ok(())
}

fn set_active_uv(scene: &mut Scene, request: &BakeRequest) -> Option<String> {
    let object = scene.object_mut(request.object)?;
    let prior = object.active_uv_layer().map(str::to_owned);
    object.set_active_uv_layer(&request.uv_layer);
    prior
}

fn restore_active_uv(scene: &mut Scene, request: &BakeRequest, prior: Option<String>) {
    if let (Some(object), Some(prior)) = (scene.object_mut(request.object), prior) {
        object.set_active_uv_layer(&prior);
    }
}

/// Makes linked materials local so their graphs can be patched; returns
/// the records `relink_materials` needs to undo it.
fn localize_linked(scene: &mut Scene, request: &BakeRequest) -> Vec<(MaterialId, String)> {
    let ids = scene.object_material_ids(request.object);
    let mut localized = Vec::new();

    for id in ids {
        if let Some(material) = scene.material_mut(id) {
            if let Some(library) = material.library.take() {
                log::debug!("made linked material `{}` local for bake", material.name);
                localized.push((id, library));
            }
        }
    }

    localized
}

fn relink_materials(scene: &mut Scene, localized: Vec<(MaterialId, String)>) {
    for (id, library) in localized {
        if let Some(material) = scene.material_mut(id) {
            material.library = Some(library);
        }
    }
}

/// The per-channel loop plus ORM packing.
///
/// Rewire patches are applied right before a channel's pass and reverted
/// right after it, before the bake result is even inspected, so a backend
/// failure cannot leave a patched graph behind.
fn bake_channels(
    scene: &mut Scene,
    request: &BakeRequest,
    backend: &mut dyn BakeBackend,
    width: u32,
    height: u32,
    progress: &mut dyn BakeProgress,
) -> Result<Vec<BakedMap>, BakeError> {
    let specs = request.profile.channels();
    let mut results: Vec<(&ChannelSpec, ImageData)> = Vec::with_capacity(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        progress.update(index, specs.len());
        log::debug!(
            "baking channel {:?} ({}/{})",
            spec.channel,
            index + 1,
            specs.len(),
        );

        let patches = match spec.rewire {
            Some(source) => apply_rewires(scene, request, source),
            None => Vec::new(),
        };

        let mut target = ImageData::new(width, height);
        let baked = backend.bake(scene, request.object, spec.pass, &mut target);

        revert_rewires(scene, patches);
        baked?;

        results.push((spec, target));
    }

    progress.update(specs.len(), specs.len());

    assemble_maps(request, results)
}

fn apply_rewires(
    scene: &mut Scene,
    request: &BakeRequest,
    source: texbake_graph::PrincipledInput,
) -> Vec<(MaterialId, EmissionRewire)> {
    let ids = scene.object_material_ids(request.object);
    let mut patches = Vec::new();

    for id in ids {
        let Some(material) = scene.material_mut(id) else {
            continue;
        };

        // The Simple profile leaves linked materials untouched; Full has
        // already made them local by the time a rewire happens.
        if material.is_linked() || !material.has_node_tree() {
            continue;
        }

        if let Some(patch) = EmissionRewire::apply(&mut material.tree, source) {
            patches.push((id, patch));
        }
    }

    patches
}

fn revert_rewires(scene: &mut Scene, patches: Vec<(MaterialId, EmissionRewire)>) {
    for (id, patch) in patches {
        if let Some(material) = scene.material_mut(id) {
            patch.revert(&mut material.tree);
        }
    }
}

/// Orders the exportable maps and folds the packed channels into ORM.
fn assemble_maps(
    request: &BakeRequest,
    results: Vec<(&ChannelSpec, ImageData)>,
) -> Result<Vec<BakedMap>, BakeError> {
    let mut maps: Vec<BakedMap> = results
        .iter()
        .filter(|(spec, _)| !spec.packed)
        .map(|(spec, image)| BakedMap {
            suffix: spec.suffix,
            encoding: spec.encoding,
            image: image.clone(),
        })
        .collect();

    if request.profile.packs_orm() {
        let find = |channel| {
            results
                .iter()
                .find(|(spec, _)| spec.channel == channel)
                .map(|(_, image)| image)
        };

        let (Some(occlusion), Some(roughness), Some(metallic)) = (
            find(crate::Channel::AmbientOcclusion),
            find(crate::Channel::Roughness),
            find(crate::Channel::Metallic),
        ) else {
            // The Full table always contains all three.
            unreachable!("packed channels missing from channel table");
        };

        let packed = pack_orm(occlusion, roughness, metallic)?;

        // BC, N, ORM, E, O.
        let index = maps.len().min(2);
        maps.insert(
            index,
            BakedMap {
                suffix: "ORM",
                encoding: Encoding::Linear,
                image: packed,
            },
        );
    }

    Ok(maps)
}
