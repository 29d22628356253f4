use crate::float2::Float2;

/// Sentinel index for tombstoned links. Arena slots are never compacted, so
/// live indices stay stable across removals.
pub const INVALID: u32 = u32::MAX;

/// Fraction of a contour's perimeter used as the cost-normalization kernel.
pub const COST_KERNEL_LENGTH: f32 = 0.125;

/// One vertex of a closed contour polygon.
///
/// Vertices of every contour live in one growable arena
/// (`MarchingSquares::contours`); `next`/`prev`/`curr` are indices into that
/// arena rather than references, so the arena can reallocate while links stay
/// valid. Live rings are circular and doubly linked: following `next` from any
/// live vertex visits each vertex of its contour once and returns.
#[derive(Clone, Copy, Debug)]
pub struct ContourVertex {
    pub pos: Float2,
    pub next: u32,
    pub prev: u32,
    /// This vertex's own arena index.
    pub curr: u32,
    /// Decimation cost; lower = safer to remove.
    pub cost: f32,
    /// Current slot in the min-heap's backing array, INVALID when not enqueued.
    pub heap_i: u32,
    /// Length of the edge from this vertex to `next`.
    pub length: f32,
    /// Turning angle at this vertex: 0 = straight through, PI = full reversal.
    pub angle: f32,
    /// Index of the owning contour in the starts list.
    pub contour_i: u32,
}

impl ContourVertex {
    pub fn new(pos: Float2, curr: u32, contour_i: u32) -> Self {
        Self {
            pos,
            next: INVALID,
            prev: INVALID,
            curr,
            cost: 0.0,
            heap_i: INVALID,
            length: 0.0,
            angle: 0.0,
            contour_i,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.next != INVALID
    }

    pub fn invalidate(&mut self) {
        self.next = INVALID;
        self.prev = INVALID;
        self.curr = INVALID;
    }
}

/// Recomputes `length` and `angle` of the vertex at `i` from its current
/// neighbors. Both neighbors must be linked before calling.
pub fn calc_length_and_angle(contours: &mut [ContourVertex], i: u32) {
    let vert = contours[i as usize];
    debug_assert!(vert.is_valid(), "geometry of a tombstoned vertex");

    let p_prev = contours[vert.prev as usize].pos;
    let p_next = contours[vert.next as usize].pos;

    let length = vert.pos.distance_to(p_next);
    let din = vert.pos.sub(p_prev).normalized();
    let dout = p_next.sub(vert.pos).normalized();
    let angle = match (din, dout) {
        (Some(a), Some(b)) => a.dot(b).clamp(-1.0, 1.0).acos(),
        // A zero-length edge carries no turn information.
        _ => 0.0,
    };

    let vert = &mut contours[i as usize];
    vert.length = length;
    vert.angle = angle;
}

/// Recomputes the decimation cost of the vertex at `i`:
///
///   cost = (length / (COST_KERNEL_LENGTH * total)) * (1 + angle^2)
///
/// Strictly increasing in both the turning angle (sharp corners are protected)
/// and the edge length relative to the whole contour (short local detail goes
/// first). `contour_total_length` is the owning contour's current perimeter.
pub fn calc_cost(contours: &mut [ContourVertex], i: u32, contour_total_length: f32) {
    let kernel = COST_KERNEL_LENGTH * contour_total_length;
    let vert = &mut contours[i as usize];
    if kernel <= 0.0 {
        vert.cost = 0.0;
        return;
    }
    vert.cost = (vert.length / kernel) * (1.0 + vert.angle * vert.angle);
}
