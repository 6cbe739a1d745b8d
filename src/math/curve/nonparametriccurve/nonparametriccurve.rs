use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// 同一 x 在 x 軸上的投影點。
    pub fn on_axis(&self) -> Point2D {
        Point2D::new(self.x, 0.0)
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}

/// 由離散取樣點構成的曲線。點依取樣順序排列，不保證 x 遞增
/// （a > b 時為遞減）。
pub trait NonparametricCurve {
    fn points(&self) -> Vec<Point2D>;

    fn min_x(&self) -> f64 {
        self.points().iter().map(Point2D::x).fold(f64::INFINITY, f64::min)
    }

    fn max_x(&self) -> f64 {
        self.points().iter().map(Point2D::x).fold(f64::NEG_INFINITY, f64::max)
    }

    /// 相鄰取樣點兩兩成對，依取樣順序。
    fn segments(&self) -> Vec<(Point2D, Point2D)> {
        self.points()
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}
