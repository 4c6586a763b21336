//! Text overlay.
//!
//! Glyphs are laid out with `ab_glyph`, rasterised to coverage values and
//! blended source-over into a copy of the source buffer. The caller
//! supplies the font; any [`Font`] implementation works.
//!
//! # Layout
//!
//! - `(x, y)` is the top-left corner of the text box; the first baseline
//!   sits at `y + ascent`
//! - `font_size` is the pixel height of one line (ascent to descent)
//! - `\n` starts a new line one line-height lower
//!
//! # Example
//!
//! ```ignore
//! use photoedit_core::text::{add_text, FontRef};
//! use photoedit_core::Rgba;
//!
//! let font = FontRef::try_from_slice(&font_bytes)?;
//! let captioned = add_text(&image, "Holiday 2024", 10, 10, 24.0, Rgba::WHITE, &font);
//! ```

use ab_glyph::{point, GlyphId, PxScale, ScaleFont};

use crate::buffer::{PixelBuffer, Rgba};

pub use ab_glyph::{Font, FontArc, FontRef, FontVec, InvalidFont};

/// Draw `text` onto a copy of `source`.
///
/// Glyph pixels that fall outside the image are clipped. Empty text, a
/// non-positive or non-finite `font_size`, or a fully transparent `color`
/// return an unchanged copy.
pub fn add_text<F: Font>(
    source: &PixelBuffer,
    text: &str,
    x: i32,
    y: i32,
    font_size: f32,
    color: Rgba,
    font: &F,
) -> PixelBuffer {
    let mut output = source.clone();
    if text.is_empty() || color.a == 0 || !font_size.is_finite() || font_size <= 0.0 {
        return output;
    }

    let scaled = font.as_scaled(PxScale::from(font_size));
    let line_height = scaled.height() + scaled.line_gap();

    for (line_index, line) in text.lines().enumerate() {
        let baseline = y as f32 + scaled.ascent() + line_index as f32 * line_height;
        let mut caret = x as f32;
        let mut previous: Option<GlyphId> = None;

        for ch in line.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(scaled.scale(), point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            // Whitespace has no outline
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                output.blend(left + gx as i32, top + gy as i32, color, coverage);
            });
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT_DATA: &[u8] = include_bytes!("../testdata/DejaVuSans.ttf");

    fn font() -> FontRef<'static> {
        FontRef::try_from_slice(FONT_DATA).unwrap()
    }

    fn white(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::allocate(width, height, Rgba::WHITE).unwrap()
    }

    /// Coordinates of every pixel that differs between two same-size buffers.
    fn changed(a: &PixelBuffer, b: &PixelBuffer) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..a.height() {
            for x in 0..a.width() {
                if a.get(x as i32, y as i32).unwrap() != b.get(x as i32, y as i32).unwrap() {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_add_text_draws_and_keeps_dimensions() {
        let img = white(100, 100);
        let result = add_text(&img, "Test", 10, 10, 12.0, Rgba::BLACK, &font());

        assert_eq!(result.dimensions(), img.dimensions());
        assert!(!changed(&img, &result).is_empty());
    }

    #[test]
    fn test_source_untouched() {
        let img = white(60, 30);
        let snapshot = img.clone();
        let _ = add_text(&img, "Hello", 2, 2, 16.0, Rgba::BLACK, &font());
        assert_eq!(img, snapshot);
    }

    #[test]
    fn test_text_starts_at_origin() {
        let img = white(120, 80);
        let result = add_text(&img, "Hello", 20, 30, 20.0, Rgba::BLACK, &font());
        let pixels = changed(&img, &result);

        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|&(x, y)| x >= 19 && y >= 29), "{pixels:?}");
        assert!(pixels.iter().all(|&(_, y)| y <= 30 + 20), "{pixels:?}");
    }

    #[test]
    fn test_full_coverage_is_text_color() {
        let img = white(40, 40);
        let result = add_text(&img, "\u{2588}", 0, 0, 32.0, Rgba::rgb(0, 0, 255), &font());

        let darkest = result
            .pixels()
            .chunks_exact(4)
            .map(|px| px[0])
            .min()
            .unwrap();
        assert!(darkest <= 2, "darkest red channel {darkest}");
        assert!(result.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_clipped_at_edges() {
        let img = white(20, 20);
        let font = font();

        let partly_left = add_text(&img, "WWW", -15, -10, 30.0, Rgba::BLACK, &font);
        assert_eq!(partly_left.dimensions(), (20, 20));
        assert!(!changed(&img, &partly_left).is_empty());

        let partly_right = add_text(&img, "WWW", 12, 12, 30.0, Rgba::BLACK, &font);
        assert_eq!(partly_right.dimensions(), (20, 20));

        let outside = add_text(&img, "WWW", 500, 500, 30.0, Rgba::BLACK, &font);
        assert_eq!(outside, img);

        let far_left = add_text(&img, "W", -500, 0, 30.0, Rgba::BLACK, &font);
        assert_eq!(far_left, img);
    }

    #[test]
    fn test_nothing_to_draw() {
        let img = white(30, 30);
        let font = font();

        assert_eq!(add_text(&img, "", 0, 0, 12.0, Rgba::BLACK, &font), img);
        assert_eq!(add_text(&img, "   ", 0, 0, 12.0, Rgba::BLACK, &font), img);
        assert_eq!(add_text(&img, "A", 0, 0, 0.0, Rgba::BLACK, &font), img);
        assert_eq!(add_text(&img, "A", 0, 0, -4.0, Rgba::BLACK, &font), img);
        assert_eq!(add_text(&img, "A", 0, 0, f32::NAN, Rgba::BLACK, &font), img);
        assert_eq!(add_text(&img, "A", 0, 0, 12.0, Rgba::TRANSPARENT, &font), img);
    }

    #[test]
    fn test_newline_moves_down() {
        let img = white(60, 80);
        let font = font();

        let one = changed(&img, &add_text(&img, "H", 5, 5, 16.0, Rgba::BLACK, &font));
        let two = changed(&img, &add_text(&img, "H\nH", 5, 5, 16.0, Rgba::BLACK, &font));

        let bottom_one = one.iter().map(|p| p.1).max().unwrap();
        let bottom_two = two.iter().map(|p| p.1).max().unwrap();
        assert!(bottom_two >= bottom_one + 12, "{bottom_one} vs {bottom_two}");
    }

    #[test]
    fn test_translucent_color_blends() {
        let img = white(40, 40);
        let result = add_text(
            &img,
            "\u{2588}",
            0,
            0,
            32.0,
            Rgba::new(0, 0, 0, 128),
            &font(),
        );

        let darkest = result.pixels().chunks_exact(4).map(|px| px[0]).min().unwrap();
        assert!((120..=135).contains(&darkest), "darkest {darkest}");
        assert!(result.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }
}
