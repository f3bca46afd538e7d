//! Display easing curves
//!
//! A spring's continuous damping ratio is reduced to one of three cubic
//! bezier curves that a presentation layer can render directly. The reduction
//! trades fidelity for a small vocabulary: two springs with ratios 0.71 and
//! 0.89 share the same curve.

use serde::Serialize;

/// Canonical cubic-bezier curves approximating spring motion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingCurve {
    /// Overshooting curve for springs with ratio <= 0.7
    Bouncy,
    /// Soft curve for springs with ratio <= 0.9
    Smooth,
    /// Standard deceleration for everything stiffer
    QuickSettle,
}

impl EasingCurve {
    pub const ALL: [EasingCurve; 3] = [
        EasingCurve::Bouncy,
        EasingCurve::Smooth,
        EasingCurve::QuickSettle,
    ];

    /// Pick the curve for a damping ratio
    pub fn for_damping_ratio(ratio: f64) -> Self {
        if ratio <= 0.7 {
            EasingCurve::Bouncy
        } else if ratio <= 0.9 {
            EasingCurve::Smooth
        } else {
            EasingCurve::QuickSettle
        }
    }

    /// Control points `[x1, y1, x2, y2]`
    pub fn control_points(&self) -> [f64; 4] {
        match self {
            EasingCurve::Bouncy => [0.175, 0.885, 0.32, 1.275],
            EasingCurve::Smooth => [0.25, 0.46, 0.45, 0.94],
            EasingCurve::QuickSettle => [0.4, 0.0, 0.2, 1.0],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EasingCurve::Bouncy => "bouncy",
            EasingCurve::Smooth => "smooth",
            EasingCurve::QuickSettle => "quick-settle",
        }
    }

    /// CSS `cubic-bezier(...)` timing function
    pub fn css(&self) -> String {
        let [x1, y1, x2, y2] = self.control_points();
        format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
    }

    /// Eased progress for linear progress `t` in `[0, 1]`
    ///
    /// The bouncy curve overshoots 1.0 before settling.
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let curve = UnitBezier::new(self.control_points());
        curve.y(curve.solve_x(t))
    }
}

impl std::fmt::Display for EasingCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const SOLVE_EPSILON: f64 = 1e-7;
const SOLVE_ITERATIONS: usize = 32;

/// Cubic bezier from (0, 0) to (1, 1) as one polynomial per axis,
/// `a·s³ + b·s² + c·s`
#[derive(Clone, Copy, Debug)]
struct UnitBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl UnitBezier {
    fn new([x1, y1, x2, y2]: [f64; 4]) -> Self {
        let (ax, bx, cx) = Self::coefficients(x1, x2);
        let (ay, by, cy) = Self::coefficients(y1, y2);
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn coefficients(p1: f64, p2: f64) -> (f64, f64, f64) {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        (1.0 - c - b, b, c)
    }

    fn x(&self, s: f64) -> f64 {
        ((self.ax * s + self.bx) * s + self.cx) * s
    }

    fn y(&self, s: f64) -> f64 {
        ((self.ay * s + self.by) * s + self.cy) * s
    }

    fn dx(&self, s: f64) -> f64 {
        (3.0 * self.ax * s + 2.0 * self.bx) * s + self.cx
    }

    /// Parameter `s` where `x(s) == x`
    ///
    /// Newton steps confined to a bracket that shrinks every iteration; a
    /// step that would leave the bracket (or a flat slope) bisects instead.
    /// `x(s)` is monotonic because both x control points lie in `[0, 1]`.
    fn solve_x(&self, x: f64) -> f64 {
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        let mut s = x;

        for _ in 0..SOLVE_ITERATIONS {
            let err = self.x(s) - x;
            if err.abs() < SOLVE_EPSILON {
                break;
            }
            if err < 0.0 {
                lo = s;
            } else {
                hi = s;
            }

            let slope = self.dx(s);
            let newton = s - err / slope;
            s = if slope.abs() > SOLVE_EPSILON && newton > lo && newton < hi {
                newton
            } else {
                0.5 * (lo + hi)
            };
        }
        s
    }
}
