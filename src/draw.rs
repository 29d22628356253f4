use crate::im::RGBAIm;
use crate::trace::MarchingSquares;

/// Draws every live contour onto `im` as closed polylines.
pub fn draw_contours(ms: &MarchingSquares, im: &mut RGBAIm, rgba: [u8; 4]) {
    let contours = ms.contours();
    for &start in ms.contour_starts() {
        let mut i = start;
        loop {
            let vert = &contours[i as usize];
            let next = &contours[vert.next as usize];
            draw_line(
                im,
                vert.pos.x as i32,
                vert.pos.y as i32,
                next.pos.x as i32,
                next.pos.y as i32,
                rgba,
            );
            i = vert.next;
            if i == start {
                break;
            }
        }
    }
}

// Bresenham's line algorithm
fn draw_line(im: &mut RGBAIm, x0: i32, y0: i32, x1: i32, y1: i32, rgba: [u8; 4]) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && x < im.w as i32 && y >= 0 && y < im.h as i32 {
            for ch in 0..4 {
                unsafe {
                    *im.get_unchecked_mut(x as usize, y as usize, ch) = rgba[ch];
                }
            }
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::field_from_ascii;

    #[test]
    fn overlay_marks_boundary_pixels() {
        let field = field_from_ascii(
            r#"
                ........
                ..####..
                ..####..
                ..####..
                ........
            "#,
        );
        let ms = MarchingSquares::from_im(&field, 0.5);
        assert_eq!(ms.contour_starts().len(), 1);

        let mut im = RGBAIm::new(8, 5);
        draw_contours(&ms, &mut im, [255, 0, 0, 255]);

        // Ring corners land on the outermost foreground samples.
        for (x, y) in [(2usize, 1usize), (5, 1), (5, 3), (2, 3), (3, 1), (2, 2)] {
            let r = unsafe { *im.get_unchecked(x, y, 0) };
            let a = unsafe { *im.get_unchecked(x, y, 3) };
            assert_eq!((r, a), (255, 255), "pixel ({x}, {y})");
        }
        // Background stays untouched.
        let r = unsafe { *im.get_unchecked(0, 0, 0) };
        assert_eq!(r, 0);

        #[cfg(feature = "im-io")]
        {
            std::fs::create_dir_all("./test_data").unwrap();
            im.save_png("./test_data/_overlay_marks_boundary_pixels.png")
                .unwrap();
        }
    }
}
