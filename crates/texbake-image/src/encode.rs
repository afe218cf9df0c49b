/// Transfer function applied when quantizing a bake buffer for export.
///
/// Color-like channels (base color, emissive) are display-referred and get
/// the sRGB curve; data channels (normal, ORM, opacity) must stay linear
/// or the encoded values no longer mean what the engine samples expect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Linear,
    Srgb,
}

/// The piecewise sRGB transfer function.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
pub fn encode_channel(value: f32, encoding: Encoding) -> u8 {
    let value = match encoding {
        Encoding::Linear => value,
        Encoding::Srgb => linear_to_srgb(value),
    };

    (value.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_endpoints() {
        assert_eq!(encode_channel(0.0, Encoding::Srgb), 0);
        assert_eq!(encode_channel(1.0, Encoding::Srgb), 255);
        assert_eq!(encode_channel(2.0, Encoding::Srgb), 255);
    }

    #[test]
    fn srgb_brightens_midtones() {
        assert!(encode_channel(0.5, Encoding::Srgb) > encode_channel(0.5, Encoding::Linear));
        // 18% gray encodes to roughly 46%.
        assert_eq!(encode_channel(0.18, Encoding::Srgb), 118);
    }

    #[test]
    fn linear_is_identity() {
        assert_eq!(encode_channel(0.5, Encoding::Linear), 128);
    }
}
