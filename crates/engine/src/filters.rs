//! Fixed, ordered catalogue of pixel transforms with a wrapping selection.

use std::fmt;

use core_types::Image;
use tracing::debug;

use crate::{EngineError, Result};

/// Pure transform from one image to a new one.
pub type Transform = fn(&Image) -> Image;

#[derive(Clone, Copy)]
pub struct FilterEntry {
    pub name: &'static str,
    pub transform: Transform,
}

impl FilterEntry {
    pub const fn new(name: &'static str, transform: Transform) -> Self {
        Self { name, transform }
    }
}

impl fmt::Debug for FilterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

pub const IDENTITY: FilterEntry = FilterEntry::new("Identity", identity);
pub const GRAYSCALE: FilterEntry = FilterEntry::new("Grayscale", grayscale);

#[derive(Debug, Clone)]
pub struct FilterPipeline {
    entries: Vec<FilterEntry>,
    current: usize,
}

impl FilterPipeline {
    pub fn new(entries: Vec<FilterEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(EngineError::EmptyPipeline);
        }
        Ok(Self {
            entries,
            current: 0,
        })
    }

    /// The compiled-in catalogue: Identity, then Grayscale.
    pub fn builtin() -> Self {
        Self {
            entries: vec![IDENTITY, GRAYSCALE],
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_name(&self) -> &'static str {
        self.entries[self.current].name
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    /// Select `index` modulo the pipeline length; negative indices count from the end.
    pub fn select(&mut self, index: isize) {
        let len = self.entries.len() as isize;
        self.current = index.rem_euclid(len) as usize;
        debug!("Selected filter {} ({})", self.current, self.current_name());
    }

    pub fn select_previous(&mut self) {
        self.select(self.current as isize - 1);
    }

    pub fn select_next(&mut self) {
        self.select(self.current as isize + 1);
    }

    pub fn apply(&self, image: &Image) -> Image {
        (self.entries[self.current].transform)(image)
    }
}

pub fn identity(image: &Image) -> Image {
    image.clone()
}

/// Sets R, G and B to `floor((R + G + B) / 3)`; alpha passes through.
pub fn grayscale(image: &Image) -> Image {
    let mut out = Vec::with_capacity(image.pixels().len());
    for px in image.pixels().chunks_exact(Image::BYTES_PER_PIXEL) {
        let avg = ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8;
        out.extend_from_slice(&[avg, avg, avg, px[3]]);
    }
    Image::from_vec(image.width(), image.height(), out)
        .expect("grayscale keeps the source dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image {
        let data: Vec<u8> = (0..3 * 2 * 4).map(|i| (i * 37 % 256) as u8).collect();
        Image::from_vec(3, 2, data).unwrap()
    }

    #[test]
    fn builtin_catalogue_order() {
        let pipeline = FilterPipeline::builtin();
        assert_eq!(pipeline.names().collect::<Vec<_>>(), ["Identity", "Grayscale"]);
        assert_eq!(pipeline.current_index(), 0);
        assert_eq!(pipeline.current_name(), "Identity");
    }

    #[test]
    fn empty_pipeline_is_rejected() {
        assert!(matches!(
            FilterPipeline::new(Vec::new()),
            Err(EngineError::EmptyPipeline)
        ));
    }

    #[test]
    fn select_wraps_in_both_directions() {
        let mut pipeline =
            FilterPipeline::new(vec![IDENTITY, GRAYSCALE, IDENTITY, GRAYSCALE, IDENTITY]).unwrap();
        let n = pipeline.len();

        pipeline.select(-1);
        assert_eq!(pipeline.current_index(), n - 1);

        pipeline.select(n as isize);
        assert_eq!(pipeline.current_index(), 0);

        pipeline.select(2);
        for _ in 0..n {
            pipeline.select_previous();
        }
        assert_eq!(pipeline.current_index(), 2);

        for _ in 0..n {
            pipeline.select_next();
        }
        assert_eq!(pipeline.current_index(), 2);

        pipeline.select(-(3 * n as isize) - 2);
        assert_eq!(pipeline.current_index(), n - 2);
    }

    #[test]
    fn previous_from_first_lands_on_last() {
        let mut pipeline = FilterPipeline::builtin();
        pipeline.select_previous();
        assert_eq!(pipeline.current_index(), 1);
        assert_eq!(pipeline.current_name(), "Grayscale");
        pipeline.select_next();
        assert_eq!(pipeline.current_name(), "Identity");
    }

    #[test]
    fn duplicate_names_are_distinct_by_position() {
        let mut pipeline = FilterPipeline::new(vec![GRAYSCALE, GRAYSCALE]).unwrap();
        pipeline.select_next();
        assert_eq!(pipeline.current_index(), 1);
        assert_eq!(pipeline.current_name(), "Grayscale");
    }

    #[test]
    fn identity_is_byte_equal() {
        let src = sample();
        let pipeline = FilterPipeline::builtin();
        assert_eq!(pipeline.apply(&src), src);
    }

    #[test]
    fn apply_is_deterministic() {
        let src = sample();
        let mut pipeline = FilterPipeline::builtin();
        pipeline.select(1);
        assert_eq!(pipeline.apply(&src), pipeline.apply(&src));
    }

    #[test]
    fn grayscale_preserves_alpha_and_equalises_channels() {
        let src = sample();
        let out = grayscale(&src);

        assert_eq!(out.pixels().len(), src.pixels().len());
        assert_eq!((out.width(), out.height()), (src.width(), src.height()));
        for (o, s) in out.pixels().chunks_exact(4).zip(src.pixels().chunks_exact(4)) {
            assert_eq!(o[3], s[3]);
            assert_eq!(o[0], o[1]);
            assert_eq!(o[1], o[2]);
        }
    }

    #[test]
    fn grayscale_averages_rgb() {
        let src = Image::from_raw(2, 1, &[10, 20, 30, 255, 0, 0, 0, 0]).unwrap();
        let out = grayscale(&src);
        assert_eq!(out.pixels(), &[20, 20, 20, 255, 0, 0, 0, 0]);

        let bright = Image::from_raw(1, 1, &[255, 255, 254, 9]).unwrap();
        assert_eq!(grayscale(&bright).pixels(), &[254, 254, 254, 9]);
    }

    #[test]
    fn grayscale_of_empty_image_is_empty() {
        assert!(grayscale(&Image::empty()).is_empty());
    }

    #[test]
    fn grayscale_does_not_touch_input() {
        let src = sample();
        let before = src.clone();
        let _ = grayscale(&src);
        assert_eq!(src, before);
    }
}
