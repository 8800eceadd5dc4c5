//! Pixel sampling at fractional coordinates.
//!
//! The warp loop maps every destination pixel back to a fractional source
//! coordinate; these samplers turn that coordinate into an RGB value.
//! Bilinear is the fast default used while dragging points, Lanczos3 the
//! sharper choice for the final export.

use crate::decode::DecodedImage;

/// Interpolation used when resampling the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFilter {
    /// Fast bilinear interpolation - good for live preview.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation - good for export.
    Lanczos3,
}

/// Sample the image at (x, y) with the given filter.
pub(crate) fn sample(image: &DecodedImage, x: f64, y: f64, filter: SampleFilter) -> [u8; 3] {
    match filter {
        SampleFilter::Bilinear => sample_bilinear(image, x, y),
        SampleFilter::Lanczos3 => sample_lanczos3(image, x, y),
    }
}

#[inline]
fn pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Weighted blend of the 2x2 neighborhood around (x, y).
///
/// Out-of-bounds samples are black, so destination pixels whose inverse
/// mapping falls outside the source come out black consistently.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = pixel_f64(image, x0, y0);
    let p10 = pixel_f64(image, x0 + 1, y0);
    let p01 = pixel_f64(image, x0, y0 + 1);
    let p11 = pixel_f64(image, x0 + 1, y0 + 1);

    let mut out = [0u8; 3];
    for ch in 0..3 {
        let v = p00[ch] * (1.0 - fx) * (1.0 - fy)
            + p10[ch] * fx * (1.0 - fy)
            + p01[ch] * (1.0 - fx) * fy
            + p11[ch] * fx * fy;
        out[ch] = v.clamp(0.0, 255.0).round() as u8;
    }
    out
}

/// 6x6 Lanczos3 kernel sample; falls back to bilinear near the edges where
/// the kernel would not fit.
fn sample_lanczos3(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            if px < 0 || px >= w || py < 0 || py >= h {
                continue;
            }

            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
            let pixel = pixel_f64(image, px as usize, py as usize);
            for ch in 0..3 {
                sum[ch] += pixel[ch] * weight;
            }
            weight_sum += weight;
        }
    }

    let mut out = [0u8; 3];
    if weight_sum > 0.0 {
        for ch in 0..3 {
            out[ch] = (sum[ch] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }
    out
}

/// Lanczos kernel: sinc(x) * sinc(x/a) for |x| < a, else 0.
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 8 % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_bilinear_at_integer_coords_is_exact() {
        let img = gradient_image(16, 16);
        let sampled = sample_bilinear(&img, 5.0, 7.0);
        assert_eq!(sampled, [96, 96, 96]); // (5 + 7) * 8
    }

    #[test]
    fn test_bilinear_midpoint_averages() {
        let mut img = gradient_image(4, 4);
        // Two known pixels side by side
        img.pixels[0..3].copy_from_slice(&[100, 100, 100]);
        img.pixels[3..6].copy_from_slice(&[200, 200, 200]);

        let sampled = sample_bilinear(&img, 0.5, 0.0);
        assert_eq!(sampled, [150, 150, 150]);
    }

    #[test]
    fn test_out_of_bounds_is_black() {
        let img = gradient_image(8, 8);
        assert_eq!(sample_bilinear(&img, -1.0, 4.0), [0, 0, 0]);
        assert_eq!(sample_bilinear(&img, 4.0, 100.0), [0, 0, 0]);
        assert_eq!(sample(&img, -1.0, -1.0, SampleFilter::Lanczos3), [0, 0, 0]);
    }

    #[test]
    fn test_lanczos_weight_at_zero() {
        assert!((lanczos_weight(0.0, 3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_outside_support() {
        assert!(lanczos_weight(3.0, 3.0).abs() < f64::EPSILON);
        assert!(lanczos_weight(-4.5, 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_symmetry() {
        let w1 = lanczos_weight(1.25, 3.0);
        let w2 = lanczos_weight(-1.25, 3.0);
        assert!((w1 - w2).abs() < 1e-12);
    }

    #[test]
    fn test_lanczos_small_image_falls_back() {
        let img = gradient_image(4, 4);
        // Kernel cannot fit anywhere in a 4x4 image; must not panic
        let sampled = sample(&img, 1.5, 1.5, SampleFilter::Lanczos3);
        assert!(sampled.iter().all(|&v| v > 0));
    }

    #[test]
    fn test_filters_agree_on_flat_region() {
        let img = DecodedImage::new(16, 16, vec![77u8; 16 * 16 * 3]);
        let b = sample(&img, 7.3, 8.6, SampleFilter::Bilinear);
        let l = sample(&img, 7.3, 8.6, SampleFilter::Lanczos3);
        assert_eq!(b, [77, 77, 77]);
        assert_eq!(l, [77, 77, 77]);
    }
}
