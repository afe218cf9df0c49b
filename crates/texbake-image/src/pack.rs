use texbake_util::thiserror;

use crate::ImageData;

#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("packed input `{name}` is {got_width}x{got_height}, expected {width}x{height}")]
    DimensionMismatch {
        name: &'static str,
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },
}

/// Packs three grayscale bakes into one ORM image.
///
/// R = ambient occlusion, G = roughness, B = metallic, alpha opaque. The
/// sources all derive their size from one reference image, so a mismatch
/// here is an internal-consistency failure rather than user error.
pub fn pack_orm(
    occlusion: &ImageData,
    roughness: &ImageData,
    metallic: &ImageData,
) -> Result<ImageData, PackError> {
    let (width, height) = occlusion.dimensions();

    for (name, input) in [("roughness", roughness), ("metallic", metallic)] {
        if input.dimensions() != (width, height) {
            return Err(PackError::DimensionMismatch {
                name,
                width,
                height,
                got_width: input.width(),
                got_height: input.height(),
            });
        }
    }

    let mut packed = ImageData::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let pixel = [
                occlusion.pixel(x, y)[0],
                roughness.pixel(x, y)[0],
                metallic.pixel(x, y)[0],
                1.0,
            ];
            packed.put_pixel(x, y, pixel);
        }
    }

    Ok(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channel_per_slot() {
        let width = 3;
        let height = 2;
        let mut ao = ImageData::new(width, height);
        let mut rough = ImageData::new(width, height);
        let mut metal = ImageData::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let t = (y * width + x) as f32 / 8.0;
                ao.put_pixel(x, y, [t, t, t, 1.0]);
                rough.put_pixel(x, y, [1.0 - t, 1.0 - t, 1.0 - t, 1.0]);
                metal.put_pixel(x, y, [0.5, 0.5, 0.5, 1.0]);
            }
        }

        let packed = pack_orm(&ao, &rough, &metal).unwrap();
        assert_eq!(packed.dimensions(), (width, height));

        for y in 0..height {
            for x in 0..width {
                let t = (y * width + x) as f32 / 8.0;
                assert_eq!(packed.pixel(x, y), [t, 1.0 - t, 0.5, 1.0]);
            }
        }
    }

    #[test]
    fn rejects_mismatched_inputs() {
        let ao = ImageData::new(4, 4);
        let rough = ImageData::new(4, 4);
        let metal = ImageData::new(2, 4);

        let err = pack_orm(&ao, &rough, &metal).unwrap_err();
        assert!(matches!(
            err,
            PackError::DimensionMismatch { name: "metallic", .. }
        ));
    }
}
