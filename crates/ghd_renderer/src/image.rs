//! Display side of the renderer.
//!
//! The host (a UI panel, a window texture, a file writer) receives the
//! packed pixel buffer through [`ImageTarget`]. [`Image`] is the
//! in-memory implementation used by the command-line renderer and tests.

/// Receiver of rendered frames.
///
/// Pixels are row-major, one `u32` per pixel packed as
/// `A << 24 | B << 16 | G << 8 | R`.
pub trait ImageTarget {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Change the target dimensions. Existing contents may be discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Upload a full frame of `width * height` pixels.
    fn set_data(&mut self, pixels: &[u32]);
}

/// An in-memory RGBA image.
#[derive(Debug, Clone, Default)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u32>,
    uploads: usize,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
            uploads: 0,
        }
    }

    /// The most recently uploaded pixels.
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Number of `set_data` calls so far.
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    /// Pixel at (x, y), packed RGBA.
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    /// R, G, B, A bytes with the last row first.
    ///
    /// The renderer stores row 0 at the bottom of the image; encoders
    /// such as PNG expect the top row first.
    pub fn to_top_down_rgba8(&self) -> Vec<u8> {
        self.data
            .chunks((self.width as usize).max(1))
            .rev()
            .flat_map(|row| row.iter().flat_map(|px| px.to_le_bytes()))
            .collect()
    }
}

impl ImageTarget for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data = vec![0; (width as usize) * (height as usize)];
    }

    fn set_data(&mut self, pixels: &[u32]) {
        self.data.clear();
        self.data.extend_from_slice(pixels);
        self.uploads += 1;
    }
}
