use crate::Encoding;

/// An RGBA image with f32 channels, the working format of every bake
/// buffer. Encoding to 8-bit only happens at export.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ImageData {
    /// An opaque black image.
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0.0, 0.0, 0.0, 1.0])
    }

    pub fn filled(width: u32, height: u32, pixel: [f32; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&pixel);
        }

        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let offset = self.offset(x, y);
        let mut pixel = [0.0; 4];
        pixel.copy_from_slice(&self.data[offset..offset + 4]);
        pixel
    }

    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: [f32; 4]) {
        let offset = self.offset(x, y);
        self.data[offset..offset + 4].copy_from_slice(&pixel);
    }

    /// Nearest-neighbor sample at normalized UV coordinates.
    pub fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let x = ((u.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((v.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        self.pixel(x, y)
    }

    /// Quantizes to interleaved 8-bit RGBA, applying the encoding to the
    /// color channels. Alpha stays linear either way.
    pub fn to_rgba8(&self, encoding: Encoding) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len());

        for pixel in self.data.chunks_exact(4) {
            for channel in &pixel[..3] {
                bytes.push(crate::encode_channel(*channel, encoding));
            }
            bytes.push(crate::encode_channel(pixel[3], Encoding::Linear));
        }

        bytes
    }
}
