use texbake::prelude::*;
use texbake::util::math::Vec4;
use texbake_graph::{InputRef, OutputKey, OutputRef};

fn checker_mask(size: u32) -> ImageData {
    let mut mask = ImageData::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let on = (x / 2 + y / 2) % 2 == 0;
            let value = if on { 1.0 } else { 0.0 };
            mask.put_pixel(x, y, [value, value, value, 1.0]);
        }
    }
    mask
}

/// An object with a textured metallic input, an emissive glow, and a
/// constant base color; close to what the tool meets in practice.
fn build_scene() -> (Scene, BakeRequest) {
    let mut scene = Scene::new();
    scene.gpu_available = true;

    scene.add_image("metal_mask", checker_mask(8));

    let mut material = Material::new("PaintedMetal");
    let principled = material.principled().unwrap();

    material.tree.set_input_value(
        InputRef::principled(principled, PrincipledInput::BaseColor),
        SocketValue::Color(Vec4::new(0.5, 0.25, 0.125, 1.0)),
    );
    material.tree.set_input_value(
        InputRef::principled(principled, PrincipledInput::EmissionColor),
        SocketValue::Color(Vec4::new(1.0, 0.0, 0.0, 1.0)),
    );
    material.tree.set_input_value(
        InputRef::principled(principled, PrincipledInput::EmissionStrength),
        SocketValue::Scalar(0.5),
    );

    let mask = material.tree.add_image_texture("Metal Mask", "metal_mask");
    material.tree.connect(
        OutputRef {
            node: mask,
            socket: OutputKey::Color,
        },
        InputRef::principled(principled, PrincipledInput::Metallic),
    );

    let material = scene.add_material(material);
    let reference = scene.add_image("Reference", ImageData::new(8, 8));

    let mut object = MeshObject::new("Barrel");
    object.add_uv_layer("UVMap");
    object.add_material_slot(Some(material));
    let object = scene.add_object(object);

    (scene, BakeRequest::new(object, "UVMap", reference))
}

#[test]
fn bake_and_export_full_profile() {
    let (mut scene, request) = build_scene();

    let dir = tempfile::tempdir().unwrap();
    let mut picker = FixedDirectory(dir.path().to_path_buf());

    let status = texbake::bake_and_export(
        &mut scene,
        &request,
        &mut SoftwareBaker,
        &mut (),
        &mut picker,
    )
    .unwrap();

    let ExportStatus::Saved(paths) = status else {
        panic!("expected files on disk");
    };
    assert_eq!(paths.len(), 5);

    // ORM blue holds the metallic checker; red (occlusion) is white.
    let orm = image::open(dir.path().join("T_Barrel_ORM.png"))
        .unwrap()
        .into_rgba8();
    assert_eq!(orm.dimensions(), (8, 8));
    assert_eq!(orm.get_pixel(0, 0).0[2], 255);
    assert_eq!(orm.get_pixel(2, 0).0[2], 0);
    assert_eq!(orm.get_pixel(0, 0).0[0], 255);

    // Base color is sRGB encoded: linear 0.5 lands at 188, not 128.
    let bc = image::open(dir.path().join("T_Barrel_BC.png"))
        .unwrap()
        .into_rgba8();
    assert_eq!(bc.get_pixel(3, 3).0[0], 188);

    // Emissive carries color times strength, sRGB encoded.
    let emissive = image::open(dir.path().join("T_Barrel_E.png"))
        .unwrap()
        .into_rgba8();
    assert_eq!(emissive.get_pixel(0, 0).0[0], 188);
    assert_eq!(emissive.get_pixel(0, 0).0[1], 0);

    // Opacity of an opaque material is solid white.
    let opacity = image::open(dir.path().join("T_Barrel_O.png"))
        .unwrap()
        .into_rgba8();
    assert_eq!(opacity.get_pixel(4, 4).0[0], 255);
}

#[test]
fn bake_and_export_simple_profile() {
    let (mut scene, request) = build_scene();
    let request = request.with_profile(BakeProfile::Simple);

    let dir = tempfile::tempdir().unwrap();
    let mut picker = FixedDirectory(dir.path().to_path_buf());

    let status = texbake::bake_and_export(
        &mut scene,
        &request,
        &mut SoftwareBaker,
        &mut (),
        &mut picker,
    )
    .unwrap();

    let ExportStatus::Saved(paths) = status else {
        panic!("expected files on disk");
    };
    assert_eq!(paths.len(), 4);

    for suffix in ["BC", "R", "N", "M"] {
        assert!(dir.path().join(format!("T_Barrel_{suffix}.png")).exists());
    }
    assert!(!dir.path().join("T_Barrel_ORM.png").exists());
}

#[test]
fn cancelled_picker_leaves_directory_empty() {
    struct Cancel;

    impl DirectoryPicker for Cancel {
        fn pick_directory(&mut self) -> Option<std::path::PathBuf> {
            None
        }
    }

    let (mut scene, request) = build_scene();

    let status = texbake::bake_and_export(
        &mut scene,
        &request,
        &mut SoftwareBaker,
        &mut (),
        &mut Cancel,
    )
    .unwrap();

    assert_eq!(status, ExportStatus::Cancelled);
}

#[test]
fn failed_bake_writes_no_files_and_restores_scene() {
    struct AlwaysFails;

    impl BakeBackend for AlwaysFails {
        fn bake(
            &mut self,
            _scene: &Scene,
            _object: ObjectId,
            _pass: texbake_bake::BakePass,
            _target: &mut ImageData,
        ) -> Result<(), texbake_bake::BackendError> {
            Err(texbake_bake::BackendError::new("renderer exploded"))
        }
    }

    let (mut scene, request) = build_scene();
    let settings_before = scene.render;
    let material_id = scene.object_material_ids(request.object)[0];
    let tree_before = scene.material(material_id).unwrap().tree.clone();

    let dir = tempfile::tempdir().unwrap();
    let mut picker = FixedDirectory(dir.path().to_path_buf());

    let err = texbake::bake_and_export(
        &mut scene,
        &request,
        &mut AlwaysFails,
        &mut (),
        &mut picker,
    )
    .unwrap_err();

    assert!(matches!(err, BakeError::BakeInvocation(_)));
    assert_eq!(scene.render, settings_before);
    assert_eq!(&tree_before, &scene.material(material_id).unwrap().tree);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
