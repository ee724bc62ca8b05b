//! Colour space conversions between ratatui and `coolor`.

use coolor::{Hsl, Rgb};
use ratatui::style::Color;

/// Perceived luminance above which dark text reads better than light text.
const LIGHT_BACKGROUND_LUMA: f32 = 0.55;

/// Colour helpers used to derive the palette from the accent colour.
pub struct ColorConverter;

impl ColorConverter {
    /// Approximates named and indexed colours with the xterm defaults.
    #[must_use]
    pub fn to_rgb(color: Color) -> Rgb {
        let (r, g, b) = match color {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Black => (0, 0, 0),
            Color::Red => (170, 0, 0),
            Color::Green => (0, 170, 0),
            Color::Yellow => (170, 85, 0),
            Color::Blue => (0, 0, 170),
            Color::Magenta => (170, 0, 170),
            Color::Cyan => (0, 170, 170),
            Color::Gray => (170, 170, 170),
            Color::DarkGray => (85, 85, 85),
            Color::LightRed => (255, 85, 85),
            Color::LightGreen => (85, 255, 85),
            Color::LightYellow => (255, 255, 85),
            Color::LightBlue => (85, 85, 255),
            Color::LightMagenta => (255, 85, 255),
            Color::LightCyan => (85, 255, 255),
            Color::Indexed(i) => indexed_to_rgb(i),
            _ => (255, 255, 255),
        };
        Rgb::new(r, g, b)
    }

    /// HSL form of `color`.
    #[must_use]
    pub fn to_hsl(color: Color) -> Hsl {
        Self::to_rgb(color).to_hsl()
    }

    /// Truecolor ratatui colour for `hsl`.
    #[must_use]
    pub fn to_ratatui(hsl: Hsl) -> Color {
        let rgb: Rgb = hsl.to_rgb();
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    /// Same hue, with saturation and lightness replaced.
    #[must_use]
    pub fn shade(color: Color, saturation: f32, lightness: f32) -> Color {
        let mut hsl = Self::to_hsl(color);
        hsl.s = saturation;
        hsl.l = lightness;
        Self::to_ratatui(hsl)
    }

    /// Rec. 601 luma in `0.0..=1.0`.
    #[must_use]
    pub fn luma(color: Color) -> f32 {
        let rgb = Self::to_rgb(color);
        (0.299 * f32::from(rgb.r) + 0.587 * f32::from(rgb.g) + 0.114 * f32::from(rgb.b)) / 255.0
    }

    /// Black or white, whichever stays legible on `background`.
    #[must_use]
    pub fn readable_text_on(background: Color) -> Color {
        if Self::luma(background) > LIGHT_BACKGROUND_LUMA {
            Color::Black
        } else {
            Color::White
        }
    }
}

fn indexed_to_rgb(i: u8) -> (u8, u8, u8) {
    match i {
        0..=15 => {
            const BASE: [(u8, u8, u8); 16] = [
                (0, 0, 0),
                (170, 0, 0),
                (0, 170, 0),
                (170, 85, 0),
                (0, 0, 170),
                (170, 0, 170),
                (0, 170, 170),
                (170, 170, 170),
                (85, 85, 85),
                (255, 85, 85),
                (85, 255, 85),
                (255, 255, 85),
                (85, 85, 255),
                (255, 85, 255),
                (85, 255, 255),
                (255, 255, 255),
            ];
            BASE[usize::from(i)]
        }
        16..=231 => {
            let i = i - 16;
            let level = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        232..=255 => {
            let v = (i - 232) * 10 + 8;
            (v, v, v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_conversion_round_trip() {
        let original = Color::Rgb(100, 150, 200);
        let back = ColorConverter::to_ratatui(ColorConverter::to_hsl(original));

        if let Color::Rgb(r, g, b) = back {
            assert!((i16::from(r) - 100).abs() <= 1);
            assert!((i16::from(g) - 150).abs() <= 1);
            assert!((i16::from(b) - 200).abs() <= 1);
        } else {
            panic!("Expected RGB color");
        }
    }

    #[test_case(208, (255, 135, 0) ; "orange in cube")]
    #[test_case(16, (0, 0, 0) ; "cube start")]
    #[test_case(231, (255, 255, 255) ; "cube end")]
    #[test_case(9, (255, 85, 85) ; "bright red")]
    #[test_case(244, (128, 128, 128) ; "grayscale")]
    fn test_indexed_to_rgb(index: u8, expected: (u8, u8, u8)) {
        assert_eq!(indexed_to_rgb(index), expected);
    }

    #[test_case(Color::Rgb(0xFA, 0xF7, 0xF1), Color::Black ; "cream swatch")]
    #[test_case(Color::Rgb(0x22, 0x30, 0x40), Color::White ; "navy swatch")]
    #[test_case(Color::White, Color::Black ; "white")]
    #[test_case(Color::Black, Color::White ; "black")]
    fn test_readable_text_on(background: Color, expected: Color) {
        assert_eq!(ColorConverter::readable_text_on(background), expected);
    }

    #[test]
    fn test_shade_keeps_hue() {
        let shaded = ColorConverter::shade(Color::Rgb(0, 170, 170), 0.5, 0.2);
        let original = ColorConverter::to_hsl(Color::Rgb(0, 170, 170));
        let hsl = ColorConverter::to_hsl(shaded);

        assert!((hsl.h - original.h).abs() < 2.0);
        assert!((hsl.l - 0.2).abs() < 0.01);
    }
}
