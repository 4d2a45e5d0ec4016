//! Raster surface: the pixel buffer behind the drawing canvas.

use kurbo::Point;
use thiserror::Error;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Surface allocation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Snapshot restore errors.
///
/// Restoring into a differently sized buffer fails closed: the pre-restore
/// pixels are left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestoreError {
    #[error("snapshot is {snapshot_width}x{snapshot_height} but surface is {surface_width}x{surface_height}")]
    DimensionMismatch {
        snapshot_width: u32,
        snapshot_height: u32,
        surface_width: u32,
        surface_height: u32,
    },
}

/// Pixel-blending behavior for newly drawn pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CompositeRule {
    /// Opaque paint over existing content.
    SourceOver,
    /// Erase covered pixels to transparency.
    DestinationOut,
}

/// An immutable full-raster capture of the surface at one point in time.
///
/// Snapshots are tagged with a monotonically increasing sequence number and
/// are owned exclusively by the history stack once pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    sequence: u64,
}

impl Snapshot {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Sequence position assigned at capture time.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// The mutable pixel buffer the engine draws into.
///
/// Buffer dimensions always equal the logical viewport pixel dimensions
/// currently assigned; `resize` is the only way to change them.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    /// Next snapshot sequence number.
    sequence: u64,
}

impl Surface {
    /// Allocate a blank (fully transparent) surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            sequence: 0,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reset every pixel to transparent. Does not touch any history.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Capture the full buffer.
    pub fn snapshot(&mut self) -> Snapshot {
        self.sequence += 1;
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
            sequence: self.sequence,
        }
    }

    /// Replace the buffer contents exactly with the snapshot's pixels.
    ///
    /// The snapshot must have the same dimensions as the surface.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RestoreError> {
        if snapshot.width != self.width || snapshot.height != self.height {
            return Err(RestoreError::DimensionMismatch {
                snapshot_width: snapshot.width,
                snapshot_height: snapshot.height,
                surface_width: self.width,
                surface_height: self.height,
            });
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
        Ok(())
    }

    /// Composite a snapshot into the current buffer, stretched to fit.
    ///
    /// Independent per-axis nearest-neighbor sampling; restoring a snapshot
    /// with matching dimensions is the identity mapping.
    pub fn restore_scaled(&mut self, snapshot: &Snapshot) {
        self.blit_scaled(snapshot);
    }

    /// Change the buffer dimensions, preserving visible content.
    ///
    /// The current buffer is captured strictly before reallocation, then
    /// composited into the new buffer with a scale-to-fit stretch.
    pub fn resize(&mut self, new_width: u32, new_height: u32) -> Result<(), SurfaceError> {
        if new_width == 0 || new_height == 0 {
            return Err(SurfaceError::InvalidDimensions {
                width: new_width,
                height: new_height,
            });
        }
        if new_width == self.width && new_height == self.height {
            return Ok(());
        }
        let captured = self.snapshot();
        self.width = new_width;
        self.height = new_height;
        self.pixels = vec![0; new_width as usize * new_height as usize * BYTES_PER_PIXEL];
        self.blit_scaled(&captured);
        log::debug!(
            "surface resized {}x{} -> {}x{}",
            captured.width,
            captured.height,
            new_width,
            new_height
        );
        Ok(())
    }

    /// Render one round-capped stroke segment.
    ///
    /// Fills the capsule from `from` to `to` with the given brush width,
    /// hard-edged so that snapshot round trips stay pixel-exact.
    pub fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        width: u32,
        rule: CompositeRule,
        ink: [u8; 4],
    ) {
        let radius = f64::from(width.max(1)) / 2.0;
        let radius_sq = radius * radius;
        let x0 = ((from.x.min(to.x) - radius).floor() as i64).max(0);
        let y0 = ((from.y.min(to.y) - radius).floor() as i64).max(0);
        let x1 = ((from.x.max(to.x) + radius).ceil() as i64).min(i64::from(self.width) - 1);
        let y1 = ((from.y.max(to.y) + radius).ceil() as i64).min(i64::from(self.height) - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if segment_distance_sq(center, from, to) <= radius_sq {
                    self.put_pixel(x as u32, y as u32, rule, ink);
                }
            }
        }
    }

    fn put_pixel(&mut self, x: u32, y: u32, rule: CompositeRule, ink: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        match rule {
            CompositeRule::SourceOver => {
                self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&ink);
            }
            CompositeRule::DestinationOut => {
                self.pixels[idx..idx + BYTES_PER_PIXEL].fill(0);
            }
        }
    }

    fn blit_scaled(&mut self, source: &Snapshot) {
        for dst_y in 0..self.height {
            let src_y = (u64::from(dst_y) * u64::from(source.height) / u64::from(self.height)) as u32;
            for dst_x in 0..self.width {
                let src_x =
                    (u64::from(dst_x) * u64::from(source.width) / u64::from(self.width)) as u32;
                let src_idx =
                    (src_y as usize * source.width as usize + src_x as usize) * BYTES_PER_PIXEL;
                let dst_idx =
                    (dst_y as usize * self.width as usize + dst_x as usize) * BYTES_PER_PIXEL;
                self.pixels[dst_idx..dst_idx + BYTES_PER_PIXEL]
                    .copy_from_slice(&source.pixels[src_idx..src_idx + BYTES_PER_PIXEL]);
            }
        }
    }
}

/// Squared distance from `p` to the segment `a`-`b`.
fn segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let len_sq = ab.hypot2();
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (ap.dot(ab) / len_sq).clamp(0.0, 1.0)
    };
    let closest = a + ab * t;
    (p - closest).hypot2()
}
