use texbake_graph::{InputRef, NodeKind, NodeTree, OutputKey, OutputRef, PrincipledInput};
use texbake_image::ImageData;
use texbake_scene::{ObjectId, Scene};
use tracing_log::log;

use crate::{BackendError, BakePass};

/// The host renderer's bake invocation.
///
/// The runner hands the backend a scratch buffer sized from the reference
/// image and asks for one pass at a time; whatever parallelism the
/// renderer uses internally is its own business.
pub trait BakeBackend {
    fn bake(
        &mut self,
        scene: &Scene,
        object: ObjectId,
        pass: BakePass,
        target: &mut ImageData,
    ) -> Result<(), BackendError>;
}

/// Reference CPU backend.
///
/// Evaluates the object's first Principled material per pixel in UV space:
/// target pixel (x, y) maps to uv (x/w, y/h), image-texture inputs are
/// sampled there, constants fill flat. It has no geometry term, so the
/// ambient occlusion pass renders white.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareBaker;

impl BakeBackend for SoftwareBaker {
    fn bake(
        &mut self,
        scene: &Scene,
        object: ObjectId,
        pass: BakePass,
        target: &mut ImageData,
    ) -> Result<(), BackendError> {
        let (material, principled) = scene
            .object_materials(object)
            .find_map(|(_, material)| Some((material, material.principled()?)))
            .ok_or_else(|| BackendError::new("no Principled BSDF to bake from"))?;

        log::trace!(
            "software bake: pass {:?} of `{}` into {}x{} buffer",
            pass,
            material.name,
            target.width(),
            target.height(),
        );

        let (width, height) = target.dimensions();
        for y in 0..height {
            for x in 0..width {
                let u = (x as f32 + 0.5) / width as f32;
                let v = (y as f32 + 0.5) / height as f32;

                let pixel = eval_pass(scene, &material.tree, principled, pass, u, v)?;
                target.put_pixel(x, y, pixel);
            }
        }

        Ok(())
    }
}

fn eval_pass(
    scene: &Scene,
    tree: &NodeTree,
    principled: texbake_graph::NodeId,
    pass: BakePass,
    u: f32,
    v: f32,
) -> Result<[f32; 4], BackendError> {
    let input = |input: PrincipledInput| InputRef::principled(principled, input);

    match pass {
        BakePass::Diffuse => eval_color(scene, tree, input(PrincipledInput::BaseColor), u, v),
        BakePass::Roughness => {
            let value = eval_scalar(scene, tree, input(PrincipledInput::Roughness), u, v)?;
            Ok([value, value, value, 1.0])
        }
        BakePass::Normal => {
            let normal = input(PrincipledInput::Normal);
            match tree.input_source(normal) {
                Some(from) => eval_output(scene, tree, from, u, v),
                // Flat tangent-space normal.
                None => Ok([0.5, 0.5, 1.0, 1.0]),
            }
        }
        BakePass::AmbientOcclusion => Ok([1.0, 1.0, 1.0, 1.0]),
        BakePass::Emission => {
            let color = eval_color(scene, tree, input(PrincipledInput::EmissionColor), u, v)?;
            let strength =
                eval_scalar(scene, tree, input(PrincipledInput::EmissionStrength), u, v)?;
            Ok([
                color[0] * strength,
                color[1] * strength,
                color[2] * strength,
                1.0,
            ])
        }
    }
}

fn eval_color(
    scene: &Scene,
    tree: &NodeTree,
    to: InputRef,
    u: f32,
    v: f32,
) -> Result<[f32; 4], BackendError> {
    match tree.input_source(to) {
        Some(from) => eval_output(scene, tree, from, u, v),
        None => {
            let value = tree
                .input_value(to)
                .ok_or_else(|| BackendError::new("input socket missing"))?;
            Ok(value.color().to_array())
        }
    }
}

fn eval_scalar(
    scene: &Scene,
    tree: &NodeTree,
    to: InputRef,
    u: f32,
    v: f32,
) -> Result<f32, BackendError> {
    match tree.input_source(to) {
        Some(from) => {
            let color = eval_output(scene, tree, from, u, v)?;
            Ok((color[0] + color[1] + color[2]) / 3.0)
        }
        None => {
            let value = tree
                .input_value(to)
                .ok_or_else(|| BackendError::new("input socket missing"))?;
            Ok(value.scalar())
        }
    }
}

fn eval_output(
    scene: &Scene,
    tree: &NodeTree,
    from: OutputRef,
    u: f32,
    v: f32,
) -> Result<[f32; 4], BackendError> {
    let node = tree
        .node(from.node)
        .ok_or_else(|| BackendError::new("dangling link"))?;

    match &node.kind {
        NodeKind::ImageTexture { image } => {
            let resource = scene.image_by_name(image).ok_or_else(|| {
                BackendError::new(format!("image `{image}` not found in project"))
            })?;

            let sample = resource.data.sample(u, v);
            match from.socket {
                OutputKey::Alpha => Ok([sample[3], sample[3], sample[3], 1.0]),
                _ => Ok(sample),
            }
        }
        NodeKind::Rgb { value } => Ok(value.to_array()),
        NodeKind::Value { value } => Ok([*value, *value, *value, 1.0]),
        kind => Err(BackendError::new(format!(
            "cannot evaluate output of {kind:?} node"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texbake_graph::Material;
    use texbake_scene::MeshObject;
    use texbake_util::math::Vec4;

    fn scene_with_material(material: Material) -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let material = scene.add_material(material);

        let mut object = MeshObject::new("Probe");
        object.add_uv_layer("UVMap");
        object.add_material_slot(Some(material));
        let object = scene.add_object(object);

        (scene, object)
    }

    #[test]
    fn constant_base_color_fills_flat() {
        let mut material = Material::new("Paint");
        let principled = material.principled().unwrap();
        material.tree.set_input_value(
            InputRef::principled(principled, PrincipledInput::BaseColor),
            texbake_graph::SocketValue::Color(Vec4::new(0.2, 0.4, 0.6, 1.0)),
        );

        let (scene, object) = scene_with_material(material);

        let mut target = ImageData::new(8, 8);
        SoftwareBaker
            .bake(&scene, object, BakePass::Diffuse, &mut target)
            .unwrap();

        assert_eq!(target.pixel(0, 0), [0.2, 0.4, 0.6, 1.0]);
        assert_eq!(target.pixel(7, 7), [0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn texture_input_is_sampled_in_uv_space() {
        let mut material = Material::new("Bricks");
        let principled = material.principled().unwrap();
        let texture = material.tree.add_image_texture("Albedo", "bricks");
        material.tree.connect(
            OutputRef {
                node: texture,
                socket: OutputKey::Color,
            },
            InputRef::principled(principled, PrincipledInput::BaseColor),
        );

        let (mut scene, object) = scene_with_material(material);

        let mut bricks = ImageData::new(2, 2);
        bricks.put_pixel(0, 0, [1.0, 0.0, 0.0, 1.0]);
        bricks.put_pixel(1, 1, [0.0, 1.0, 0.0, 1.0]);
        scene.add_image("bricks", bricks);

        let mut target = ImageData::new(2, 2);
        SoftwareBaker
            .bake(&scene, object, BakePass::Diffuse, &mut target)
            .unwrap();

        assert_eq!(target.pixel(0, 0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(target.pixel(1, 1), [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn unlinked_normal_is_flat() {
        let (scene, object) = scene_with_material(Material::new("Flat"));

        let mut target = ImageData::new(2, 2);
        SoftwareBaker
            .bake(&scene, object, BakePass::Normal, &mut target)
            .unwrap();

        assert_eq!(target.pixel(1, 0), [0.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn missing_texture_image_is_a_backend_error() {
        let mut material = Material::new("Broken");
        let principled = material.principled().unwrap();
        let texture = material.tree.add_image_texture("Albedo", "missing");
        material.tree.connect(
            OutputRef {
                node: texture,
                socket: OutputKey::Color,
            },
            InputRef::principled(principled, PrincipledInput::BaseColor),
        );

        let (scene, object) = scene_with_material(material);

        let mut target = ImageData::new(2, 2);
        let err = SoftwareBaker
            .bake(&scene, object, BakePass::Diffuse, &mut target)
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
