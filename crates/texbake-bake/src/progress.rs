/// Coarse per-channel progress, driven once before each channel bakes and
/// once after the last. Stands in for the host's progress bar.
pub trait BakeProgress {
    fn update(&mut self, completed: usize, total: usize);
}

/// No-op progress sink.
impl BakeProgress for () {
    #[inline]
    fn update(&mut self, _completed: usize, _total: usize) {}
}
