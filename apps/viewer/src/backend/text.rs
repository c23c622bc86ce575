use std::fs;
use std::path::Path;

use ab_glyph::{point, Font, FontArc, GlyphId, ScaleFont};

use super::{BackendError, TextStyle};

/// Rasterises single-line labels straight into a `0RGB` framebuffer.
pub struct TextRenderer {
    font: FontArc,
}

impl TextRenderer {
    pub fn load(path: &Path) -> Result<Self, BackendError> {
        let bytes = fs::read(path).map_err(|source| BackendError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|source| BackendError::FontParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { font })
    }

    pub fn draw(
        &self,
        frame: &mut [u32],
        frame_width: usize,
        frame_height: usize,
        text: &str,
        style: &TextStyle,
    ) {
        let scaled = self.font.as_scaled(style.size);
        let (origin_x, origin_y) = style.position;
        let baseline = origin_y + scaled.ascent();

        let mut cursor_x = origin_x;
        let mut last_glyph: Option<GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            if let Some(prev) = last_glyph {
                cursor_x += scaled.kern(prev, glyph_id);
            }
            last_glyph = Some(glyph_id);

            let glyph = glyph_id.with_scale_and_position(style.size, point(cursor_x, baseline));
            cursor_x += scaled.h_advance(glyph_id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                if x < 0 || y < 0 || x as usize >= frame_width || y as usize >= frame_height {
                    return;
                }
                let idx = y as usize * frame_width + x as usize;
                frame[idx] = blend(frame[idx], style.color, coverage);
            });
        }
    }
}

fn blend(dst: u32, color: [u8; 3], coverage: f32) -> u32 {
    let c = coverage.clamp(0.0, 1.0);
    let mix = |shift: u32, src: u8| -> u32 {
        let d = ((dst >> shift) & 0xFF) as f32;
        let v = src as f32 * c + d * (1.0 - c);
        (v.round() as u32).min(255) << shift
    };
    mix(16, color[0]) | mix(8, color[1]) | mix(0, color[2])
}
