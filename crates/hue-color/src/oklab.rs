//! Oklab / OKLCH math (Björn Ottosson, <https://bottosson.github.io/posts/oklab/>).
//!
//! Pipeline: OKLCH ↔ Oklab ↔ linear sRGB ↔ sRGB. Everything works on `f64`
//! channels in `0.0..=1.0`; callers quantize to 8 bits at the edges.

/// Normalize a hue angle to `[0, 360)`.
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

/// OKLCH → Oklab.
#[inline]
#[must_use]
pub fn oklch_to_oklab(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let h_rad = h.to_radians();
    (l, c * h_rad.cos(), c * h_rad.sin())
}

/// Oklab → OKLCH. Achromatic colors get hue 0.
#[inline]
#[must_use]
pub fn oklab_to_oklch(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let c = a.hypot(b);
    let h = if c < 1e-8 {
        0.0
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    (l, c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// Both directions go through LMS cone response space.

/// Oklab → linear sRGB (may be outside `0..=1`).
#[must_use]
pub fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let l_ = 0.215_803_757_3_f64.mul_add(b, 0.396_337_777_4_f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_8_f64.mul_add(-b, 0.105_561_345_8_f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_0_f64.mul_add(-b, 0.089_484_177_5_f64.mul_add(-a, l_ok));

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 0.230_969_929_3_f64.mul_add(s, 4.076_741_662_1_f64.mul_add(l, -(3.307_711_591_3 * m)));
    let g = 0.341_319_396_5_f64.mul_add(-s, (-1.268_438_004_6_f64).mul_add(l, 2.609_757_401_1 * m));
    let bl = 1.707_614_701_0_f64.mul_add(s, (-0.004_196_086_3_f64).mul_add(l, -(0.703_418_614_7 * m)));

    (r, g, bl)
}

/// Linear sRGB → Oklab.
#[must_use]
pub fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let l = 0.051_445_992_9_f64.mul_add(b, 0.412_221_470_8_f64.mul_add(r, 0.536_332_536_3 * g));
    let m = 0.107_396_956_6_f64.mul_add(b, 0.211_903_498_2_f64.mul_add(r, 0.680_699_545_1 * g));
    let s = 0.629_978_700_5_f64.mul_add(b, 0.088_302_461_9_f64.mul_add(r, 0.281_718_837_6 * g));

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_046_8_f64.mul_add(-s_, 0.210_454_255_3_f64.mul_add(l_, 0.793_617_785_0 * m_));
    let a = 0.450_593_709_9_f64.mul_add(s_, 1.977_998_495_1_f64.mul_add(l_, -(2.428_592_205_0 * m_)));
    let b_ok = 0.808_675_766_0_f64.mul_add(-s_, 0.025_904_037_1_f64.mul_add(l_, 0.782_771_766_2 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Apply the sRGB transfer curve to one linear component.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055_f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Remove the sRGB transfer curve from one component.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// sRGB (`0..=1` per channel) → Oklab.
#[must_use]
pub fn srgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

/// sRGB (`0..=1` per channel) → OKLCH.
#[must_use]
pub fn srgb_to_oklch(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (l, a, b_ok) = srgb_to_oklab(r, g, b);
    oklab_to_oklch(l, a, b_ok)
}

/// OKLCH → sRGB, gamma encoded but not clamped (may leave `0..=1`).
#[must_use]
pub fn oklch_to_srgb(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let (l, a, b) = oklch_to_oklab(l, c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
