use crate::im::FieldIm;

/// Builds an f32 scalar field from an ascii grid: '#' = 1.0, '.' = 0.0.
pub fn field_from_ascii(grid: &str) -> FieldIm {
    let rows: Vec<&str> = grid
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let h = rows.len();
    assert!(h > 0, "grid must have at least one non-empty row");
    let w = rows[0].len();
    assert!(w > 0, "grid rows must be non-empty");
    for r in &rows {
        assert_eq!(r.len(), w, "all rows must have equal length");
    }

    let mut im = FieldIm::new(w, h);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            im.arr[y * im.s + x] = match ch {
                '#' => 1.0,
                '.' => 0.0,
                _ => panic!("invalid field char '{ch}', expected '#' or '.'"),
            };
        }
    }
    im
}

/// Signed polygon area, positive for outer contours (y grows downward and the
/// walk keeps foreground on its left).
pub fn signed_area(ring: &[(f32, f32)]) -> f32 {
    let n = ring.len();
    let mut sum = 0.0f32;
    for k in 0..n {
        let (x0, y0) = ring[k];
        let (x1, y1) = ring[(k + 1) % n];
        sum += (y0 + y1) * (x1 - x0);
    }
    sum / 2.0
}
