//! Plain-text PPM (P3) output.

use std::io::{self, Write};

/// Write packed RGBA pixels as a P3 image.
///
/// The renderer stores row 0 at the bottom of the image, while PPM
/// starts with the top row, so rows are written last to first.
pub fn write_ppm<W: Write>(out: &mut W, width: u32, height: u32, pixels: &[u32]) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;

    let width = width as usize;
    for row in pixels.chunks(width.max(1)).take(height as usize).rev() {
        for &px in row {
            let [r, g, b, _a] = px.to_le_bytes();
            writeln!(out, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppm_layout() {
        // Bottom row red, top row blue
        let red = 0xFF00_00FF;
        let blue = 0xFFFF_0000;
        let pixels = [red, red, blue, blue];

        let mut out = Vec::new();
        write_ppm(&mut out, 2, 2, &pixels).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "P3\n2 2\n255\n0 0 255\n0 0 255\n255 0 0\n255 0 0\n"
        );
    }
}
