use crate::error::Error;
use crate::im::FieldIm;
use serde::Deserialize;

/// Scene description for synthesizing a scalar field: dimensions, threshold,
/// and a list of analytic blobs rastered in order (later blobs overwrite
/// earlier ones where they overlap).
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDesc {
    pub w: usize,
    pub h: usize,
    pub threshold: f32,
    #[serde(default)]
    pub blobs: Vec<BlobDesc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlobDesc {
    /// Filled disk: samples strictly inside r get `value`.
    Disk {
        cx: f32,
        cy: f32,
        r: f32,
        #[serde(default = "default_value")]
        value: f32,
    },
    /// Filled axis-aligned rectangle, `r`/`b` exclusive.
    Rect {
        l: usize,
        t: usize,
        r: usize,
        b: usize,
        #[serde(default = "default_value")]
        value: f32,
    },
}

fn default_value() -> f32 {
    1.0
}

pub fn parse_field_json(json: &str) -> Result<FieldDesc, Error> {
    Ok(serde_json::from_str(json)?)
}

impl FieldDesc {
    pub fn build_field(&self) -> FieldIm {
        let mut im = FieldIm::new(self.w, self.h);
        for blob in &self.blobs {
            match *blob {
                BlobDesc::Disk { cx, cy, r, value } => {
                    for y in 0..self.h {
                        for x in 0..self.w {
                            let dx = x as f32 - cx;
                            let dy = y as f32 - cy;
                            if dx * dx + dy * dy < r * r {
                                unsafe {
                                    *im.get_unchecked_mut(x, y, 0) = value;
                                }
                            }
                        }
                    }
                }
                BlobDesc::Rect { l, t, r, b, value } => {
                    for y in t..b.min(self.h) {
                        for x in l..r.min(self.w) {
                            unsafe {
                                *im.get_unchecked_mut(x, y, 0) = value;
                            }
                        }
                    }
                }
            }
        }
        im
    }
}
