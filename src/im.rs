#![allow(dead_code)]

#[cfg(feature = "im-io")]
use image::ImageResult;
#[cfg(feature = "im-io")]
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Im<T, const N_CH: usize> {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in elements (w * N_CH)
    pub arr: Vec<T>,
}

// Constructors
// ------------------------------------------------------------------------------
impl<T: Copy + Default, const N_CH: usize> Im<T, N_CH> {
    pub fn new(w: usize, h: usize) -> Self {
        let s = w * N_CH;
        let arr = vec![T::default(); s * h];
        Self { w, h, s, arr }
    }
}

impl<T, const N_CH: usize> Im<T, N_CH> {
    pub fn from_vec(w: usize, h: usize, arr: Vec<T>) -> Self {
        let s = w * N_CH;
        assert_eq!(arr.len(), s * h, "buffer length must equal stride * height");
        Self { w, h, s, arr }
    }

    #[inline(always)]
    pub unsafe fn get_unchecked(&self, x: usize, y: usize, ch: usize) -> &T {
        unsafe { self.arr.get_unchecked(y * self.s + x * N_CH + ch) }
    }

    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, x: usize, y: usize, ch: usize) -> &mut T {
        unsafe { self.arr.get_unchecked_mut(y * self.s + x * N_CH + ch) }
    }
}

pub type FieldIm = Im<f32, 1>;
pub type Lum8Im = Im<u8, 1>;
pub type RGBAIm = Im<u8, 4>;

impl Im<f32, 1> {
    /// Maps samples to 8-bit gray, clamping to [0, 1].
    pub fn to_lum8(&self) -> Lum8Im {
        let mut out = Lum8Im::new(self.w, self.h);
        for (dst, &v) in out.arr.iter_mut().zip(self.arr.iter()) {
            *dst = (v.clamp(0.0, 1.0) * 255.0) as u8;
        }
        out
    }
}

// PNG I/O
// ------------------------------------------------------------------------------

#[cfg(feature = "im-io")]
fn dim_mismatch_err() -> image::ImageError {
    image::ImageError::Parameter(image::error::ParameterError::from_kind(
        image::error::ParameterErrorKind::DimensionMismatch,
    ))
}

#[cfg(feature = "im-io")]
impl Im<u8, 1> {
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let img = image::GrayImage::from_raw(self.w as u32, self.h as u32, self.arr.clone())
            .ok_or_else(dim_mismatch_err)?;
        img.save_with_format(path, image::ImageFormat::Png)
    }
}

#[cfg(feature = "im-io")]
impl Im<u8, 4> {
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let img = image::RgbaImage::from_raw(self.w as u32, self.h as u32, self.arr.clone())
            .ok_or_else(dim_mismatch_err)?;
        img.save_with_format(path, image::ImageFormat::Png)
    }
}
