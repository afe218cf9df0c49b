use texbake_graph::PrincipledInput;
use texbake_image::Encoding;

/// One output channel of the bake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    BaseColor,
    Roughness,
    Normal,
    AmbientOcclusion,
    Emissive,
    Metallic,
    Opacity,
}

/// Render pass the backend is asked to run for a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BakePass {
    Diffuse,
    Roughness,
    Normal,
    AmbientOcclusion,
    Emission,
}

/// Static description of how one channel is produced and exported.
#[derive(Clone, Copy, Debug)]
pub struct ChannelSpec {
    pub channel: Channel,
    pub pass: BakePass,
    /// File name suffix in `T_{Object}_{Suffix}.png`.
    pub suffix: &'static str,
    pub encoding: Encoding,
    /// Folded into the ORM image instead of exported on its own.
    pub packed: bool,
    /// Principled input routed through emission before the pass runs.
    pub rewire: Option<PrincipledInput>,
}

/// Channel table for the full five-texture output.
///
/// The order is load-bearing: metallic and opacity overwrite the emission
/// wiring for their capture, so the emissive channel must bake first,
/// while its original wiring is still in place.
pub const FULL_CHANNELS: [ChannelSpec; 7] = [
    ChannelSpec {
        channel: Channel::BaseColor,
        pass: BakePass::Diffuse,
        suffix: "BC",
        encoding: Encoding::Srgb,
        packed: false,
        rewire: None,
    },
    ChannelSpec {
        channel: Channel::Roughness,
        pass: BakePass::Roughness,
        suffix: "R",
        encoding: Encoding::Linear,
        packed: true,
        rewire: None,
    },
    ChannelSpec {
        channel: Channel::Normal,
        pass: BakePass::Normal,
        suffix: "N",
        encoding: Encoding::Linear,
        packed: false,
        rewire: None,
    },
    ChannelSpec {
        channel: Channel::AmbientOcclusion,
        pass: BakePass::AmbientOcclusion,
        suffix: "AO",
        encoding: Encoding::Linear,
        packed: true,
        rewire: None,
    },
    ChannelSpec {
        channel: Channel::Emissive,
        pass: BakePass::Emission,
        suffix: "E",
        encoding: Encoding::Srgb,
        packed: false,
        rewire: None,
    },
    ChannelSpec {
        channel: Channel::Metallic,
        pass: BakePass::Emission,
        suffix: "M",
        encoding: Encoding::Linear,
        packed: true,
        rewire: Some(PrincipledInput::Metallic),
    },
    ChannelSpec {
        channel: Channel::Opacity,
        pass: BakePass::Emission,
        suffix: "O",
        encoding: Encoding::Linear,
        packed: false,
        rewire: Some(PrincipledInput::Alpha),
    },
];

/// Channel table for the reduced four-texture output: no occlusion,
/// emissive, opacity, or packing. The one rewired channel comes last so
/// the native passes see the untouched graph.
pub const SIMPLE_CHANNELS: [ChannelSpec; 4] = [
    ChannelSpec {
        channel: Channel::BaseColor,
        pass: BakePass::Diffuse,
        suffix: "BC",
        encoding: Encoding::Srgb,
        packed: false,
        rewire: None,
    },
    ChannelSpec {
        channel: Channel::Roughness,
        pass: BakePass::Roughness,
        suffix: "R",
        encoding: Encoding::Linear,
        packed: false,
        rewire: None,
    },
    ChannelSpec {
        channel: Channel::Normal,
        pass: BakePass::Normal,
        suffix: "N",
        encoding: Encoding::Linear,
        packed: false,
        rewire: None,
    },
    ChannelSpec {
        channel: Channel::Metallic,
        pass: BakePass::Emission,
        suffix: "M",
        encoding: Encoding::Linear,
        packed: false,
        rewire: Some(PrincipledInput::Metallic),
    },
];

/// Which of the two product variants a run uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BakeProfile {
    /// BC, N, ORM, E, O; linked materials are made local for the run.
    #[default]
    Full,
    /// BC, R, N, M; linked materials are skipped rather than localized.
    Simple,
}

impl BakeProfile {
    #[inline]
    pub fn channels(&self) -> &'static [ChannelSpec] {
        match self {
            Self::Full => &FULL_CHANNELS,
            Self::Simple => &SIMPLE_CHANNELS,
        }
    }

    #[inline]
    pub fn packs_orm(&self) -> bool {
        matches!(self, Self::Full)
    }

    #[inline]
    pub fn localizes_linked(&self) -> bool {
        matches!(self, Self::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emission-sourced channels must come after the emissive capture in
    /// every table that has one.
    #[test]
    fn emissive_bakes_before_rewired_channels() {
        for table in [&FULL_CHANNELS[..], &SIMPLE_CHANNELS[..]] {
            let emissive = table
                .iter()
                .position(|spec| spec.channel == Channel::Emissive);
            let first_rewire = table.iter().position(|spec| spec.rewire.is_some());

            if let (Some(emissive), Some(first_rewire)) = (emissive, first_rewire) {
                assert!(emissive < first_rewire);
            }
        }
    }

    #[test]
    fn packed_channels_only_in_full_table() {
        assert_eq!(
            FULL_CHANNELS.iter().filter(|spec| spec.packed).count(),
            3
        );
        assert!(SIMPLE_CHANNELS.iter().all(|spec| !spec.packed));
    }
}
