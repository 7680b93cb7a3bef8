use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::mul_div255_u8;

/// Scale every premultiplied channel by `opacity`.
pub fn apply_opacity_in_place(data: &mut [u8], opacity: f64) {
    let op = opacity_u8(opacity);
    if op == 255 {
        return;
    }
    for c in data.iter_mut() {
        *c = mul_div255_u8(u16::from(*c), op);
    }
}

/// Source-over of a premultiplied layer onto an opaque backdrop color.
pub fn flatten_over(data: &mut [u8], backdrop: Rgba8Premul) {
    let dst = backdrop.to_array();
    for px in data.chunks_exact_mut(4) {
        let out = over(dst, [px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

fn opacity_u8(opacity: f64) -> u16 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u16
}
