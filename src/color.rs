//! src/color.rs
//! ------------
//! Intermediate shading results and how they combine.

use crate::algebra::Vec3;

pub const BLACK: Vec3 = Vec3(0.0, 0.0, 0.0);

/// A tint together with how much it contributes to the final pixel.
///
/// The tint is in display units (0..255 per channel); it only becomes a pixel
/// once multiplied by `intensity` in [`RayColor::to_rgb`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayColor {
    pub intensity: f32,
    pub tint: Vec3,
}

impl RayColor {
    pub fn new(intensity: f32, tint: Vec3) -> Self { Self { intensity, tint } }

    fn scaled(&self) -> Vec3 { self.tint.scale(self.intensity) }

    /// True if any channel falls outside the displayable range before clamping.
    pub fn overflows(&self) -> bool {
        let c = self.scaled();
        [c.0, c.1, c.2].iter().any(|x| !(0.0..256.0).contains(x))
    }

    /// Final pixel conversion: multiply by intensity, clamp, truncate.
    pub fn to_rgb(&self) -> [u8; 3] {
        let c = self.scaled();
        [
            c.0.clamp(0.0, 255.0) as u8,
            c.1.clamp(0.0, 255.0) as u8,
            c.2.clamp(0.0, 255.0) as u8,
        ]
    }
}

/// Combine partial results. Intensities add up (they are never averaged) and
/// each channel is the intensity-weighted sum of the inputs. Nothing is
/// clamped here; clamping belongs to [`RayColor::to_rgb`].
pub fn blend(colors: &[RayColor]) -> RayColor {
    colors.iter().fold(RayColor::new(0.0, BLACK), |acc, c| RayColor {
        intensity: acc.intensity + c.intensity,
        tint: acc.tint.add(c.scaled()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn blend_conserves_total_intensity() {
        let parts = [
            RayColor::new(0.8, Vec3(255.0, 0.0, 0.0)),
            RayColor::new(0.15, Vec3(0.0, 255.0, 0.0)),
            RayColor::new(0.05, BLACK),
        ];
        assert_relative_eq!(blend(&parts).intensity, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn blend_weights_channels_by_intensity() {
        let parts = [
            RayColor::new(0.5, Vec3(100.0, 20.0, 0.0)),
            RayColor::new(0.25, Vec3(40.0, 0.0, 8.0)),
        ];
        let out = blend(&parts);
        assert_relative_eq!(out.tint.0, 60.0);
        assert_relative_eq!(out.tint.1, 10.0);
        assert_relative_eq!(out.tint.2, 2.0);
    }

    #[test]
    fn blend_of_nothing_is_black_with_zero_intensity() {
        let out = blend(&[]);
        assert_eq!(out, RayColor::new(0.0, BLACK));
    }

    #[test]
    fn to_rgb_truncates() {
        assert_eq!(RayColor::new(0.5, Vec3(255.0, 101.0, 3.0)).to_rgb(), [127, 50, 1]);
    }

    #[test]
    fn to_rgb_clamps_overflow_from_blend() {
        let c = blend(&[
            RayColor::new(1.0, Vec3(255.0, 255.0, 0.0)),
            RayColor::new(1.0, Vec3(255.0, 0.0, 0.0)),
        ]);
        assert!(c.overflows());
        assert_eq!(c.to_rgb(), [255, 255, 0]);
    }
}
