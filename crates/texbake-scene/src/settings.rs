/// The renderer the host is currently using.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderEngine {
    /// Interactive rasterizer, cannot bake.
    #[default]
    Realtime,
    /// Offline path tracer, the engine baking requires.
    PathTraced,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderDevice {
    #[default]
    Cpu,
    Gpu,
}

/// Display color transform applied to render output.
///
/// Anything other than `Raw` would bend raw channel data on readback, so
/// bakes force `Raw` and put the user's transform back afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewTransform {
    Standard,
    #[default]
    Filmic,
    Raw,
}

/// The mutable global render state the bake procedure snapshots and
/// restores around a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderSettings {
    pub engine: RenderEngine,
    pub device: RenderDevice,
    pub view_transform: ViewTransform,
}
