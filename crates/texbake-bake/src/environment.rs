use texbake_scene::{RenderDevice, RenderEngine, RenderSettings, ViewTransform};
use tracing_log::log;

/// Render settings captured before a bake run.
///
/// `restore` consumes the snapshot, so each run puts the settings back
/// exactly once; the runner guarantees it happens on every exit path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    settings: RenderSettings,
}

impl EnvironmentSnapshot {
    #[inline]
    pub fn capture(settings: &RenderSettings) -> Self {
        Self {
            settings: *settings,
        }
    }

    #[inline]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn restore(self, settings: &mut RenderSettings) {
        *settings = self.settings;
    }
}

/// Forces the offline engine, GPU compute when present, and the raw view
/// transform. A missing GPU is a silent CPU fallback, not an error.
pub fn apply_bake_environment(settings: &mut RenderSettings, gpu_available: bool) {
    settings.engine = RenderEngine::PathTraced;

    if gpu_available {
        settings.device = RenderDevice::Gpu;
    } else {
        log::debug!("no GPU compute device, baking on CPU");
        settings.device = RenderDevice::Cpu;
    }

    settings.view_transform = ViewTransform::Raw;
}
