use crate::Error;

/// A two dimensional grid of bits. `true` is a dark module or pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BitMatrix {
    /// Creates an all-light matrix.
    pub fn new(width: u32, height: u32) -> Self {
        BitMatrix {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bit at `(x, y)`. Out of range coordinates read as light.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[self.index(x, y)]
    }

    /// Sets the bit at `(x, y)`. Panics if the coordinates are out of range.
    pub fn set(&mut self, x: u32, y: u32, dark: bool) {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside matrix");
        let idx = self.index(x, y);
        self.bits[idx] = dark;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Scales a module grid into a `width` x `height` pixel grid.
///
/// The symbol plus `margin` quiet modules on each side is scaled by the
/// largest integer factor that fits, then centered. If the symbol does not fit
/// the requested size the output grows to the smallest size that holds it.
pub fn render(modules: &BitMatrix, width: u32, height: u32, margin: u32) -> Result<BitMatrix, Error> {
    if width == 0 || height == 0 || modules.width() == 0 || modules.height() == 0 {
        return Err(Error::InvalidParameter);
    }

    let qr_width = modules.width() + margin * 2;
    let qr_height = modules.height() + margin * 2;
    let output_width = width.max(qr_width);
    let output_height = height.max(qr_height);

    let multiple = (output_width / qr_width).min(output_height / qr_height);
    let left_padding = (output_width - modules.width() * multiple) / 2;
    let top_padding = (output_height - modules.height() * multiple) / 2;

    let mut output = BitMatrix::new(output_width, output_height);
    for my in 0..modules.height() {
        let oy = top_padding + my * multiple;
        for mx in 0..modules.width() {
            if !modules.get(mx, my) {
                continue;
            }
            let ox = left_padding + mx * multiple;
            for dy in 0..multiple {
                for dx in 0..multiple {
                    output.set(ox + dx, oy + dy, true);
                }
            }
        }
    }

    Ok(output)
}
