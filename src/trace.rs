use crate::contour::{calc_cost, calc_length_and_angle, ContourVertex, INVALID};
use crate::error::Error;
use crate::float2::Float2;
use crate::heap::MinHeap;
use crate::im::Im;

/// Cell codes 1..=14 mark boundary cells; 0 and 15 are fully outside/inside.
/// A walked cell is overwritten with VISITED so the raster scan skips it.
const VISITED: u8 = 16;

/// Direction back to the cell the walk arrived from (set by each step).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dir {
    Undefined,
    Up,
    Down,
    Left,
    Right,
}

/// Corner of a 2x2 sample block, as (x, y) offsets from the block's top-left
/// sample. p0 = top-left, p1 = top-right, p2 = bottom-left, p3 = bottom-right.
const P0: (usize, usize) = (0, 0);
const P1: (usize, usize) = (1, 0);
const P2: (usize, usize) = (0, 1);
const P3: (usize, usize) = (1, 1);

/// Marching-squares contour extractor and simplifier.
///
/// The constructor classifies every 2x2 sample block of a scalar field against
/// a threshold (strict `>`), embeds the resulting 4-bit codes in a coded image
/// with an all-zero 1-cell border, and walks every boundary cell once,
/// stitching the emitted corner vertices into closed rings. `simplify_contour`
/// then greedily decimates each ring to a target vertex budget, always
/// removing the globally cheapest vertex first.
///
/// All vertices live in one grow-only arena; removed vertices are tombstoned
/// in place (never compacted) so arena indices stay stable.
#[derive(Debug)]
pub struct MarchingSquares {
    contours: Vec<ContourVertex>,
    contour_starts: Vec<u32>,
    contour_num_elements: Vec<u32>,
    contour_lengths: Vec<f32>,
    w: usize,
    h: usize,
}

impl MarchingSquares {
    /// Extracts every iso-contour of `field` at `threshold`.
    ///
    /// `field` is row-major `w * h`. Fields narrower than one 2x2 block yield
    /// zero contours, not an error. NaN samples compare false under `>` and
    /// classify as background.
    pub fn new<T: Copy + PartialOrd>(
        field: &[T],
        threshold: T,
        w: usize,
        h: usize,
    ) -> Result<Self, Error> {
        if field.len() != w * h {
            return Err(Error::FieldSizeMismatch {
                expected: w * h,
                got: field.len(),
            });
        }

        let mut ms = Self {
            contours: Vec::new(),
            contour_starts: Vec::new(),
            contour_num_elements: Vec::new(),
            contour_lengths: Vec::new(),
            w,
            h,
        };
        if w < 2 || h < 2 {
            return Ok(ms);
        }

        let mut coded = ms.build_coded_image(field, threshold);
        ms.walk_contours(&mut coded);
        ms.cull_degenerate_edges();
        ms.fix_contour_starts();
        Ok(ms)
    }

    /// Convenience over the single-channel raster container.
    pub fn from_im<T: Copy + PartialOrd>(im: &Im<T, 1>, threshold: T) -> Self {
        // Im guarantees arr.len() == w * h for a single channel.
        Self::new(&im.arr, threshold, im.w, im.h).expect("Im dimensions are self-consistent")
    }

    // Accessors
    // -------------------------------------------------------------------------

    /// The shared vertex arena, tombstones included.
    pub fn contours(&self) -> &[ContourVertex] {
        &self.contours
    }

    pub fn contours_mut(&mut self) -> &mut [ContourVertex] {
        &mut self.contours
    }

    /// One anchor index per live contour.
    pub fn contour_starts(&self) -> &[u32] {
        &self.contour_starts
    }

    /// Live vertex count per contour, parallel to `contour_starts`.
    pub fn contour_sizes(&self) -> &[u32] {
        &self.contour_num_elements
    }

    /// Perimeter per contour, parallel to `contour_starts`. Zero until
    /// `simplify_contour` has computed edge lengths.
    pub fn contour_lengths(&self) -> &[f32] {
        &self.contour_lengths
    }

    pub fn debug_print_contours(&self) {
        println!(
            "contours: {} live, {} arena slots",
            self.contour_starts.len(),
            self.contours.len()
        );
        for (ci, &start) in self.contour_starts.iter().enumerate() {
            println!(
                "  contour[{}]: start={}, num_elements={}, length={}",
                ci, start, self.contour_num_elements[ci], self.contour_lengths[ci]
            );
            let mut i = start;
            loop {
                let vert = &self.contours[i as usize];
                println!(
                    "    [{}] pos=({}, {}) prev={} next={}",
                    i, vert.pos.x, vert.pos.y, vert.prev, vert.next
                );
                i = vert.next;
                if i == start {
                    break;
                }
            }
        }
    }

    // Extraction
    // -------------------------------------------------------------------------

    /// Classifies every 2x2 sample block into a 4-bit code: bit0 = top-left
    /// sample > threshold, bit1 = top-right, bit2 = bottom-left, bit3 =
    /// bottom-right. The code for the block with top-left sample (u, v) lands
    /// at padded cell (u+1, v+1); the surrounding frame stays zero so every
    /// contour closes without boundary special cases.
    fn build_coded_image<T: Copy + PartialOrd>(&self, field: &[T], threshold: T) -> Vec<u8> {
        let wp = self.w + 2;
        let hp = self.h + 2;
        let mut coded = vec![0u8; wp * hp];

        let fg = |x: usize, y: usize| -> u8 { (field[y * self.w + x] > threshold) as u8 };
        for v in 0..self.h - 1 {
            for u in 0..self.w - 1 {
                let code = fg(u, v)
                    | (fg(u + 1, v) << 1)
                    | (fg(u, v + 1) << 2)
                    | (fg(u + 1, v + 1) << 3);
                coded[(v + 1) * wp + (u + 1)] = code;
            }
        }
        coded
    }

    /// Raster-scans the padded coded image and starts a contour walk at every
    /// boundary cell not yet consumed by an earlier walk.
    fn walk_contours(&mut self, coded: &mut [u8]) {
        let wp = self.w + 2;
        let hp = self.h + 2;
        for v in 0..hp {
            for u in 0..wp {
                let code = coded[v * wp + u];
                if code == 0 || code == 15 || code == VISITED {
                    continue;
                }
                self.walk_one(coded, u, v);
            }
        }
    }

    /// Walks one contour from the cell at padded (start_u, start_v), stepping
    /// cell to cell until the walk returns to its starting cell.
    ///
    /// Every cell is marked VISITED the moment it is read. Saddle cells
    /// (codes 6 and 9, diagonal foreground) are the exception: a directed pass
    /// writes the original code back because the same cell is legitimately
    /// traversed once per direction. The leftover code is consumed later by
    /// the raster scan as an empty walk: a saddle reached with no arrival
    /// direction emits nothing, steps nowhere, and records no contour.
    fn walk_one(&mut self, coded: &mut [u8], start_u: usize, start_v: usize) {
        let wp = self.w + 2;
        let hp = self.h + 2;
        let contour_i = self.contour_starts.len() as u32;

        let mut u = start_u;
        let mut v = start_v;
        let mut dir_prev = Dir::Undefined;
        let mut first = INVALID;
        let mut last = INVALID;
        let mut count: u32 = 0;

        loop {
            let idx = v * wp + u;
            let code = coded[idx];
            coded[idx] = VISITED;

            // Emitted corners and step direction per code. The traversal keeps
            // foreground on the walk's left; each non-saddle cell emits the
            // exit-edge corner the contour pivots around. Saddles emit two
            // corners and disambiguate on the arrival direction so diagonal
            // foreground stitches into one continuous contour.
            let (emits, step): (&[(usize, usize)], Dir) = match code {
                1 => (&[P0], Dir::Up),
                2 => (&[P1], Dir::Right),
                3 => (&[P1], Dir::Right),
                4 => (&[P2], Dir::Left),
                5 => (&[P0], Dir::Up),
                6 => match dir_prev {
                    Dir::Up => {
                        coded[idx] = 6;
                        (&[P1, P2], Dir::Left)
                    }
                    Dir::Down => {
                        coded[idx] = 6;
                        (&[P2, P1], Dir::Right)
                    }
                    _ => break,
                },
                7 => (&[P3], Dir::Right),
                8 => (&[P3], Dir::Down),
                9 => match dir_prev {
                    Dir::Right => {
                        coded[idx] = 9;
                        (&[P3, P1], Dir::Up)
                    }
                    Dir::Left => {
                        coded[idx] = 9;
                        (&[P0, P3], Dir::Down)
                    }
                    _ => break,
                },
                10 => (&[P3], Dir::Down),
                11 => (&[P2], Dir::Down),
                12 => (&[P2], Dir::Left),
                13 => (&[P1], Dir::Up),
                14 => (&[P0], Dir::Left),
                // 0, 15, or an already-visited cell: nothing to trace here.
                _ => break,
            };

            // Padded cell (u, v) codes the block whose top-left sample is
            // (u-1, v-1); border cells never decode this far.
            debug_assert!(u >= 1 && v >= 1, "coded cell inside the zero frame");
            for &(dx, dy) in emits {
                let pos = Float2::new((u - 1 + dx) as f32, (v - 1 + dy) as f32);
                self.append_vertex(pos, contour_i, &mut first, &mut last);
                count += 1;
            }

            // Step one cell; clamping at the frame is a can't-happen guard.
            let (nu, nv) = match step {
                Dir::Up => (u, v.saturating_sub(1)),
                Dir::Down => (u, (v + 1).min(hp - 1)),
                Dir::Left => (u.saturating_sub(1), v),
                Dir::Right => ((u + 1).min(wp - 1), v),
                Dir::Undefined => unreachable!("step direction always decided above"),
            };
            if (nu, nv) == (u, v) {
                break;
            }
            dir_prev = match step {
                Dir::Up => Dir::Down,
                Dir::Down => Dir::Up,
                Dir::Left => Dir::Right,
                Dir::Right => Dir::Left,
                Dir::Undefined => unreachable!(),
            };
            u = nu;
            v = nv;
            if u == start_u && v == start_v {
                break;
            }
        }

        if dir_prev != Dir::Undefined && first != INVALID {
            // Close the ring and record the anchor.
            self.contours[last as usize].next = first;
            self.contours[first as usize].prev = last;
            self.contour_starts.push(first);
            self.contour_num_elements.push(count);
            self.contour_lengths.push(0.0);
        }
    }

    fn append_vertex(&mut self, pos: Float2, contour_i: u32, first: &mut u32, last: &mut u32) {
        let curr = self.contours.len() as u32;
        let mut vert = ContourVertex::new(pos, curr, contour_i);
        if *first == INVALID {
            *first = curr;
        } else {
            vert.prev = *last;
            self.contours[*last as usize].next = curr;
        }
        *last = curr;
        self.contours.push(vert);
    }

    /// Collapses runs of consecutive vertices at bit-identical positions into
    /// a single vertex. Adjacent cells frequently emit the same corner twice
    /// in a row; this removes the zero-length edges they produce.
    fn cull_degenerate_edges(&mut self) {
        for ci in 0..self.contour_starts.len() {
            let start = self.contour_starts[ci];
            let mut curr = start;
            let mut finished = false;
            while !finished {
                let next = self.contours[curr as usize].next;
                if next == curr {
                    // Collapsed to a self-loop; fix_contour_starts culls it.
                    break;
                }
                if self.contours[curr as usize]
                    .pos
                    .equal(self.contours[next as usize].pos)
                {
                    // The anchor itself can be spliced out mid-run; the stale
                    // starts entry is rebuilt by fix_contour_starts right after.
                    if next == start {
                        finished = true;
                    }
                    let after = self.contours[next as usize].next;
                    self.contours[curr as usize].next = after;
                    self.contours[after as usize].prev = curr;
                    self.contours[next as usize].invalidate();
                    self.contour_num_elements[ci] -= 1;
                } else {
                    curr = next;
                    if curr == start {
                        finished = true;
                    }
                }
            }
        }
    }

    /// Rebuilds `contour_starts` / `contour_num_elements` / per-vertex
    /// `contour_i` from the arena. This is the sole place that re-derives the
    /// externally visible contour bookkeeping; it runs after the degenerate
    /// cull and again after simplification.
    ///
    /// Scans by raw arena index (not by links), skipping tombstones and
    /// invalidating any ring that degenerated to a single self-loop.
    fn fix_contour_starts(&mut self) {
        self.contour_starts.clear();
        self.contour_num_elements.clear();
        self.contour_lengths.clear();

        let n = self.contours.len();
        let mut seen = vec![false; n];
        for i in 0..n {
            if seen[i] {
                continue;
            }
            let vert = self.contours[i];
            if vert.next == INVALID {
                continue;
            }
            if vert.next == vert.curr {
                self.contours[i].invalidate();
                continue;
            }

            let contour_i = self.contour_starts.len() as u32;
            self.contour_starts.push(i as u32);
            let mut count: u32 = 0;
            let mut total = 0.0f32;
            let mut walk = i as u32;
            loop {
                seen[walk as usize] = true;
                self.contours[walk as usize].contour_i = contour_i;
                count += 1;
                total += self.contours[walk as usize].length;
                walk = self.contours[walk as usize].next;
                if walk == i as u32 {
                    break;
                }
            }
            self.contour_num_elements.push(count);
            self.contour_lengths.push(total);
        }
    }

    // Simplification
    // -------------------------------------------------------------------------

    /// Greedily decimates every contour toward `target` vertices, always
    /// removing the globally cheapest vertex first.
    ///
    /// A contour settles once its count reaches `target + 1` or removing its
    /// cheapest vertex would leave fewer than 2 vertices; calling again with
    /// the same target is a no-op.
    pub fn simplify_contour(&mut self, target: u32) {
        let n_contours = self.contour_starts.len();
        if n_contours == 0 {
            return;
        }

        // Geometry pass: lengths and angles for the whole ring first, then
        // costs, which normalize by the ring's total perimeter.
        for ci in 0..n_contours {
            let start = self.contour_starts[ci];
            let mut total = 0.0f32;
            let mut i = start;
            loop {
                calc_length_and_angle(&mut self.contours, i);
                total += self.contours[i as usize].length;
                i = self.contours[i as usize].next;
                if i == start {
                    break;
                }
            }
            self.contour_lengths[ci] = total;

            let mut i = start;
            loop {
                calc_cost(&mut self.contours, i, total);
                i = self.contours[i as usize].next;
                if i == start {
                    break;
                }
            }
        }

        let mut heap = MinHeap::new();
        heap.build(&mut self.contours, &self.contour_starts);

        let mut finished = vec![false; n_contours];
        let mut finished_count = 0usize;

        while finished_count < n_contours {
            let Some(i) = heap.remove_min(&mut self.contours) else {
                break;
            };
            let vert = self.contours[i as usize];
            let ci = vert.contour_i as usize;
            if finished[ci] {
                // Stray heap entry for an already-settled contour.
                continue;
            }

            let next = vert.next;
            let prev = vert.prev;
            let two_left = self.contours[next as usize].next == i;
            if self.contour_num_elements[ci] <= target + 1 || two_left {
                finished[ci] = true;
                finished_count += 1;
                continue;
            }

            // Splice the vertex out of its ring.
            self.contours[prev as usize].next = next;
            self.contours[next as usize].prev = prev;
            self.contour_lengths[ci] -= vert.length + self.contours[prev as usize].length;
            calc_length_and_angle(&mut self.contours, prev);
            calc_length_and_angle(&mut self.contours, next);
            self.contour_lengths[ci] += self.contours[prev as usize].length;
            self.contour_num_elements[ci] -= 1;

            // The splice changed two edges: refresh cost at both new
            // neighbors and at the vertex feeding the splice point, then
            // re-sift each (overwriting the key alone would break heap order).
            let total = self.contour_lengths[ci];
            let prev2 = self.contours[prev as usize].prev;
            for j in [prev2, prev, next] {
                calc_cost(&mut self.contours, j, total);
                let slot = self.contours[j as usize].heap_i;
                if slot != INVALID {
                    heap.fix(&mut self.contours, slot as usize);
                }
            }

            self.contours[i as usize].invalidate();
        }

        self.fix_contour_starts();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{field_from_ascii, signed_area};
    use std::collections::HashSet;
    use std::f32::consts::PI;

    // 20x20 field, foreground disk (u-10)^2 + (v-10)^2 < 49.
    fn disk_field() -> Vec<f32> {
        let mut field = vec![0.0f32; 20 * 20];
        for v in 0..20i32 {
            for u in 0..20i32 {
                if (u - 10).pow(2) + (v - 10).pow(2) < 49 {
                    field[(v * 20 + u) as usize] = 1.0;
                }
            }
        }
        field
    }

    fn assert_ring_invariants(ms: &MarchingSquares) {
        let contours = ms.contours();
        for (ci, &start) in ms.contour_starts().iter().enumerate() {
            let size = ms.contour_sizes()[ci];

            // Following next from the anchor returns after exactly `size` steps.
            let mut i = start;
            for _ in 0..size {
                let vert = &contours[i as usize];
                assert_eq!(vert.curr, i);
                assert_eq!(vert.contour_i as usize, ci);
                assert_eq!(contours[vert.next as usize].prev, i, "next/prev mismatch");
                assert_eq!(contours[vert.prev as usize].next, i, "prev/next mismatch");
                i = vert.next;
            }
            assert_eq!(i, start, "ring did not close after {size} steps");

            // And the same backwards.
            let mut i = start;
            for _ in 0..size {
                i = contours[i as usize].prev;
            }
            assert_eq!(i, start);
        }
    }

    fn live_positions(ms: &MarchingSquares, ci: usize) -> Vec<(f32, f32)> {
        let start = ms.contour_starts()[ci];
        let mut out = Vec::new();
        let mut i = start;
        loop {
            let vert = &ms.contours()[i as usize];
            out.push((vert.pos.x, vert.pos.y));
            i = vert.next;
            if i == start {
                break;
            }
        }
        out
    }

    #[test]
    fn disk_yields_one_closed_contour_with_expected_area() {
        let field = disk_field();
        let ms = MarchingSquares::new(&field, 0.5, 20, 20).unwrap();

        assert_eq!(ms.contour_starts().len(), 1);
        assert_ring_invariants(&ms);

        // The staircase outline has one vertex per unit boundary step, and the
        // digitized disk's outline is 48 steps long.
        assert_eq!(ms.contour_sizes()[0], 48);

        let ring = live_positions(&ms, 0);
        let area = signed_area(&ring);
        assert!(area > 0.0, "outer contour must wind positively");
        // pi * 7^2 ~ 153.9; the discretized outline through sample centers
        // encloses ~132 (an effective radius between 6 and 7).
        assert!((area - PI * 49.0).abs() < 25.0, "area {area}");
        assert!((area - 132.0).abs() < 0.5, "area {area}");
    }

    #[test]
    fn two_disjoint_blobs_yield_two_contours() {
        let field = field_from_ascii(
            r#"
                ..........
                .###......
                .###......
                .###......
                ......###.
                ......###.
                ......###.
                ..........
            "#,
        );
        let ms = MarchingSquares::from_im(&field, 0.5);

        assert_eq!(ms.contour_starts().len(), 2);
        assert_eq!(ms.contour_sizes(), &[8, 8]);
        assert_ring_invariants(&ms);

        // No cross-linking: the two rings touch disjoint vertex sets.
        let ring0: HashSet<u32> = {
            let mut set = HashSet::new();
            let start = ms.contour_starts()[0];
            let mut i = start;
            loop {
                set.insert(i);
                i = ms.contours()[i as usize].next;
                if i == start {
                    break;
                }
            }
            set
        };
        let start = ms.contour_starts()[1];
        let mut i = start;
        loop {
            assert!(!ring0.contains(&i));
            i = ms.contours()[i as usize].next;
            if i == start {
                break;
            }
        }
    }

    #[test]
    fn checkerboard_saddle_stitches_one_contour() {
        // Diagonal foreground through one cell (code 6): a single continuous
        // contour, not two disjoint diamonds.
        let field = field_from_ascii(
            r#"
                .....
                ..#..
                .#...
                .....
            "#,
        );
        let ms = MarchingSquares::from_im(&field, 0.5);

        assert_eq!(ms.contour_starts().len(), 1);
        assert_ring_invariants(&ms);

        let ring = live_positions(&ms, 0);
        assert!(ring.contains(&(2.0, 1.0)));
        assert!(ring.contains(&(1.0, 2.0)));
        for &start in ms.contour_starts() {
            let mut i = start;
            loop {
                assert_eq!(ms.contours()[i as usize].contour_i, 0);
                i = ms.contours()[i as usize].next;
                if i == start {
                    break;
                }
            }
        }
    }

    #[test]
    fn opposite_saddle_also_stitches_one_contour() {
        // Main-diagonal foreground (code 9).
        let field = field_from_ascii(
            r#"
                .....
                .#...
                ..#..
                .....
            "#,
        );
        let ms = MarchingSquares::from_im(&field, 0.5);

        assert_eq!(ms.contour_starts().len(), 1);
        assert_ring_invariants(&ms);

        let ring = live_positions(&ms, 0);
        assert!(ring.contains(&(1.0, 1.0)));
        assert!(ring.contains(&(2.0, 2.0)));
    }

    #[test]
    fn uniform_fields_have_no_iso_boundary() {
        let ms = MarchingSquares::new(&vec![0.0f32; 24], 0.5, 6, 4).unwrap();
        assert_eq!(ms.contour_starts().len(), 0);

        // Every 2x2 block of a uniform foreground codes to 15; the iso-boundary
        // must cross sample values, so the field edge is not a contour.
        let ms = MarchingSquares::new(&vec![1.0f32; 24], 0.5, 6, 4).unwrap();
        assert_eq!(ms.contour_starts().len(), 0);
    }

    #[test]
    fn single_pixel_collapses_to_nothing() {
        // All four emitted corners coincide, the cull folds them into a
        // self-loop, and fix_contour_starts drops it.
        let field = field_from_ascii(
            r#"
                .....
                ..#..
                .....
            "#,
        );
        let ms = MarchingSquares::from_im(&field, 0.5);
        assert_eq!(ms.contour_starts().len(), 0);
    }

    #[test]
    fn degenerate_dims_yield_no_contours() {
        let ms = MarchingSquares::new(&[1.0f32, 1.0, 1.0], 0.5, 3, 1).unwrap();
        assert_eq!(ms.contour_starts().len(), 0);

        let ms = MarchingSquares::new(&[], 0.0f32, 0, 0).unwrap();
        assert_eq!(ms.contour_starts().len(), 0);
    }

    #[test]
    fn field_size_mismatch_errors() {
        let err = MarchingSquares::new(&[0.0f32; 5], 0.5, 3, 2).unwrap_err();
        match err {
            Error::FieldSizeMismatch { expected, got } => {
                assert_eq!(expected, 6);
                assert_eq!(got, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nan_samples_classify_as_background() {
        let clean = field_from_ascii(
            r#"
                ......
                ..##..
                ..##..
                ......
            "#,
        );
        let mut noisy = clean.clone();
        noisy.arr[0] = f32::NAN;
        noisy.arr[5] = f32::NAN;
        noisy.arr[23] = f32::NAN;

        let ms_clean = MarchingSquares::from_im(&clean, 0.5);
        let ms_noisy = MarchingSquares::from_im(&noisy, 0.5);
        assert_eq!(ms_clean.contour_sizes(), ms_noisy.contour_sizes());
        assert_eq!(ms_noisy.contour_sizes(), &[4]);
    }

    #[test]
    fn simplify_reduces_to_target_floor() {
        let field = disk_field();
        let mut ms = MarchingSquares::new(&field, 0.5, 20, 20).unwrap();
        assert_eq!(ms.contour_sizes()[0], 48);

        ms.simplify_contour(8);
        assert_eq!(ms.contour_starts().len(), 1);
        // A contour settles when its count reaches target + 1.
        assert_eq!(ms.contour_sizes()[0], 9);
        assert_ring_invariants(&ms);

        // Perimeter bookkeeping survives the splices.
        let ring = live_positions(&ms, 0);
        let mut total = 0.0f32;
        for k in 0..ring.len() {
            let (x0, y0) = ring[k];
            let (x1, y1) = ring[(k + 1) % ring.len()];
            total += ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        }
        assert!((total - ms.contour_lengths()[0]).abs() < 1e-3);
    }

    #[test]
    fn simplify_is_idempotent() {
        let field = disk_field();
        let mut ms = MarchingSquares::new(&field, 0.5, 20, 20).unwrap();

        ms.simplify_contour(8);
        let sizes = ms.contour_sizes().to_vec();
        let ring = live_positions(&ms, 0);

        ms.simplify_contour(8);
        assert_eq!(ms.contour_sizes(), &sizes[..]);
        assert_eq!(live_positions(&ms, 0), ring);
        assert_ring_invariants(&ms);
    }

    #[test]
    fn simplify_with_large_target_is_noop() {
        let field = disk_field();
        let mut ms = MarchingSquares::new(&field, 0.5, 20, 20).unwrap();
        let before = live_positions(&ms, 0);

        ms.simplify_contour(100);
        assert_eq!(ms.contour_sizes()[0], 48);
        assert_eq!(live_positions(&ms, 0), before);
    }

    #[test]
    fn simplify_never_drops_below_two_vertices() {
        // A 2x2 block extracts as a 4-vertex square; pushing the target below
        // the degeneracy floor settles the ring at 2 vertices.
        let field = field_from_ascii(
            r#"
                ......
                ..##..
                ..##..
                ......
            "#,
        );
        let mut ms = MarchingSquares::from_im(&field, 0.5);
        assert_eq!(ms.contour_sizes(), &[4]);

        ms.simplify_contour(0);
        assert_eq!(ms.contour_sizes(), &[2]);
        assert_ring_invariants(&ms);
    }

    #[test]
    fn simplify_handles_multiple_contours_independently() {
        let field = field_from_ascii(
            r#"
                ............
                .####.......
                .####..###..
                .####..###..
                .####..###..
                ............
            "#,
        );
        let mut ms = MarchingSquares::from_im(&field, 0.5);
        assert_eq!(ms.contour_sizes(), &[12, 8]);

        ms.simplify_contour(4);
        assert_eq!(ms.contour_starts().len(), 2);
        for &size in ms.contour_sizes() {
            assert_eq!(size, 5);
        }
        assert_ring_invariants(&ms);
    }
}
