//! Accent-color derivation for the odontogram palette.

/// Neutral gray used whenever a usable accent cannot be derived.
pub const COLOR_FALLBACK: &str = "#94a3b8";

/// Derives a saturated accent from a `#rrggbb` base color.
///
/// The base is converted to HSL, saturation is bumped by 0.4 (capped at 1)
/// and lightness pinned at 0.45, which keeps symbol strokes legible over
/// both pale and dark estado colors. Short, malformed or achromatic input
/// yields [`COLOR_FALLBACK`].
pub fn accent_color(hex: &str) -> String {
    match derivar(hex) {
        Some(color) => color,
        None => COLOR_FALLBACK.to_string(),
    }
}

fn derivar(hex: &str) -> Option<String> {
    if !hex.starts_with('#') || hex.len() < 7 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(1..3)?, 16).ok()? as f64 / 255.0;
    let g = u8::from_str_radix(hex.get(3..5)?, 16).ok()? as f64 / 255.0;
    let b = u8::from_str_radix(hex.get(5..7)?, 16).ok()? as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        // achromatic, no hue to saturate
        return None;
    }

    let l = (max + min) / 2.0;
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if max == g {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };

    let ns = (s + 0.4).min(1.0);
    let nl = 0.45;
    let q = if nl < 0.5 {
        nl * (1.0 + ns)
    } else {
        nl + ns - nl * ns
    };
    let p = 2.0 * nl - q;

    let nr = (hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0).round() as u8;
    let ng = (hue_to_rgb(p, q, h) * 255.0).round() as u8;
    let nb = (hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0).round() as u8;
    Some(format!("#{nr:02x}{ng:02x}{nb:02x}"))
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn es_hex_valido(s: &str) -> bool {
        s.len() == 7
            && s.starts_with('#')
            && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn color_valido_produce_hex_valido() {
        for base in ["#5fb3b0", "#ff0000", "#001122", "#fde68a"] {
            let accent = accent_color(base);
            assert!(es_hex_valido(&accent), "accent de {base} fue {accent}");
        }
    }

    #[test]
    fn entrada_corta_o_invalida_usa_fallback() {
        assert_eq!(accent_color(""), COLOR_FALLBACK);
        assert_eq!(accent_color("#fff"), COLOR_FALLBACK);
        assert_eq!(accent_color("5fb3b0"), COLOR_FALLBACK);
        assert_eq!(accent_color("#zzzzzz"), COLOR_FALLBACK);
    }

    #[test]
    fn gris_usa_fallback() {
        assert_eq!(accent_color("#808080"), COLOR_FALLBACK);
        assert_eq!(accent_color("#ffffff"), COLOR_FALLBACK);
        assert_eq!(accent_color("#000000"), COLOR_FALLBACK);
    }

    #[test]
    fn el_acento_esta_mas_saturado() {
        // teal brand color keeps its hue but gains saturation
        let accent = accent_color("#5fb3b0");
        assert_ne!(accent, "#5fb3b0");
        assert_ne!(accent, COLOR_FALLBACK);
    }
}
