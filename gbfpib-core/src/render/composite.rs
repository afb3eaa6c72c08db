use rayon::prelude::*;

use crate::foundation::{
    error::{PibError, PibResult},
    math::mul_div255,
};

/// One straight-alpha RGBA8 pixel.
pub type Rgba8Px = [u8; 4];

/// Porter-Duff "source over destination" on straight-alpha pixels.
pub fn over(dst: Rgba8Px, src: Rgba8Px) -> Rgba8Px {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = mul_div255(u32::from(dst[3]), 255 - sa);
    let oa = sa + da;
    if oa == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * sa + u32::from(dst[i]) * da;
        out[i] = ((c + oa / 2) / oa).min(255) as u8;
    }
    out[3] = oa.min(255) as u8;
    out
}

/// Blend `src` into `dst` using the source alpha as a mask on every channel, alpha included.
pub fn mask_blend(dst: Rgba8Px, src: Rgba8Px) -> Rgba8Px {
    let m = u32::from(src[3]);
    if m == 0 {
        return dst;
    }
    if m == 255 {
        return src;
    }
    let inv = 255 - m;
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = (mul_div255(u32::from(src[i]), m) + mul_div255(u32::from(dst[i]), inv)).min(255)
            as u8;
    }
    out
}

/// Apply `op` for every pixel of `src` placed at `(x, y)` over `dst`, clipped to `dst`.
///
/// Rows are processed in parallel; each destination row is touched by exactly one worker.
pub fn blend_region(
    dst: &mut image::RgbaImage,
    src: &image::RgbaImage,
    x: i64,
    y: i64,
    op: fn(Rgba8Px, Rgba8Px) -> Rgba8Px,
) {
    let (dw, dh) = dst.dimensions();
    let (sw, sh) = src.dimensions();
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(sw)).min(i64::from(dw));
    let y1 = (y + i64::from(sh)).min(i64::from(dh));
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let dst_stride = dw as usize * 4;
    let src_stride = sw as usize * 4;
    let src_raw = src.as_raw();
    let span = (x1 - x0) as usize;
    let src_col = (x0 - x) as usize;

    let rows: &mut [u8] = dst;
    rows.par_chunks_mut(dst_stride)
        .enumerate()
        .skip(y0 as usize)
        .take((y1 - y0) as usize)
        .for_each(|(row, line)| {
            let src_row = (row as i64 - y) as usize;
            let s_off = src_row * src_stride + src_col * 4;
            let d_off = x0 as usize * 4;
            let s = &src_raw[s_off..s_off + span * 4];
            let d = &mut line[d_off..d_off + span * 4];
            for (dp, sp) in d.chunks_exact_mut(4).zip(s.chunks_exact(4)) {
                let out = op([dp[0], dp[1], dp[2], dp[3]], [sp[0], sp[1], sp[2], sp[3]]);
                dp.copy_from_slice(&out);
            }
        });
}

/// Alpha-composite a full-size `layer` over `base`, returning the merged image.
pub fn merge_layers(
    base: &image::RgbaImage,
    layer: &image::RgbaImage,
) -> PibResult<image::RgbaImage> {
    if base.dimensions() != layer.dimensions() {
        return Err(PibError::invalid_argument(format!(
            "cannot merge {}x{} layer over {}x{} image",
            layer.width(),
            layer.height(),
            base.width(),
            base.height()
        )));
    }
    let mut out = base.clone();
    blend_region(&mut out, layer, 0, 0, over);
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
