use crate::foundation::error::{BackdropError, BackdropResult};
use crate::raster::FrameRGBA;

/// Kernel half-width used for a Gaussian of standard deviation `sigma`.
pub fn radius_for_sigma(sigma: f64) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Gaussian blur of a premultiplied frame with standard deviation `sigma` pixels.
///
/// A zero sigma returns the frame unchanged. Edges clamp.
pub fn gaussian_blur(frame: &FrameRGBA, sigma: f64) -> BackdropResult<FrameRGBA> {
    let radius = radius_for_sigma(sigma);
    let data = blur_rgba8_premul(&frame.data, frame.width, frame.height, radius, sigma)?;
    Ok(FrameRGBA { data, ..frame.clone() })
}

pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f64,
) -> BackdropResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BackdropError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(BackdropError::render(format!(
            "blur expects {expected_len} bytes for {width}x{height}, got {}",
            src.len()
        )));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    blur_pass(src, &mut tmp, width, height, &kernel, Axis::Horizontal);
    blur_pass(&tmp, &mut out, width, height, &kernel, Axis::Vertical);
    Ok(out)
}

/// Normalized kernel weights in Q16, summing to exactly `1 << 16`.
fn gaussian_kernel_q16(radius: u32, sigma: f64) -> BackdropResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BackdropError::render("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(BackdropError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(*a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sigma_is_identity() {
        let frame = FrameRGBA {
            width: 1,
            height: 2,
            data: vec![1, 2, 3, 4, 5, 6, 7, 8],
            premultiplied: true,
        };
        assert_eq!(gaussian_blur(&frame, 0.0).unwrap(), frame);
        assert_eq!(radius_for_sigma(10.0), 30);
    }

    #[test]
    fn flat_color_survives_blur() {
        let (w, h) = (6u32, 4u32);
        let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
        let out = blur_rgba8_premul(&src, w, h, 3, 1.5).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn single_pixel_spreads_and_keeps_energy() {
        let (w, h) = (7u32, 7u32);
        let mut src = vec![0u8; (w * h * 4) as usize];
        let center = ((3 * w + 3) * 4) as usize;
        src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

        let out = blur_rgba8_premul(&src, w, h, 3, 1.0).unwrap();
        let lit = out.chunks_exact(4).filter(|px| px[3] != 0).count();
        assert!(lit > 1);
        let sum_a: i64 = out.chunks_exact(4).map(|px| i64::from(px[3])).sum();
        assert!((sum_a - 255).abs() <= 6, "{sum_a}");
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(blur_rgba8_premul(&[0; 8], 3, 3, 1, 1.0).is_err());
    }
}
