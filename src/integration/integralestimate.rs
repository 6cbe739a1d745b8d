use nalgebra::DVector;
use serde::{
    Serialize,
    Serializer
};

use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};

/// 一次梯形法求積的結果；每次呼叫 `integrate` 重新產生，交由呼叫端持有。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegralEstimate {
    area: f64,
    #[serde(rename = "xs", serialize_with = "serialize_samples")]
    sample_xs: DVector<f64>,
    #[serde(rename = "ys", serialize_with = "serialize_samples")]
    sample_ys: DVector<f64>
}

fn serialize_samples<S>(samples: &DVector<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(samples.iter())
}

impl IntegralEstimate {
    pub(crate) fn new(area: f64, sample_xs: DVector<f64>, sample_ys: DVector<f64>) -> IntegralEstimate {
        IntegralEstimate { area, sample_xs, sample_ys }
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn sample_xs(&self) -> &DVector<f64> {
        &self.sample_xs
    }

    pub fn sample_ys(&self) -> &DVector<f64> {
        &self.sample_ys
    }

    /// 梯形個數 N。
    pub fn subdivisions(&self) -> usize {
        self.sample_xs.len() - 1
    }

    pub fn strips(&self) -> Vec<TrapezoidStrip> {
        self.segments()
            .into_iter()
            .map(|(left, right)| TrapezoidStrip::new(left, right))
            .collect()
    }
}

impl NonparametricCurve for IntegralEstimate {
    fn points(&self) -> Vec<Point2D> {
        self.sample_xs
            .iter()
            .zip(self.sample_ys.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect()
    }

    fn min_x(&self) -> f64 {
        self.sample_xs.min()
    }

    fn max_x(&self) -> f64 {
        self.sample_xs.max()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TrapezoidStrip
// ─────────────────────────────────────────────────────────────────────────────

/// 相鄰兩個取樣點與 x 軸圍成的梯形，供繪圖層填色。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrapezoidStrip {
    left: Point2D,
    right: Point2D
}

impl TrapezoidStrip {
    pub fn new(left: Point2D, right: Point2D) -> TrapezoidStrip {
        TrapezoidStrip { left, right }
    }

    pub fn left(&self) -> Point2D {
        self.left
    }

    pub fn right(&self) -> Point2D {
        self.right
    }

    /// 有號面積：(x_r - x_l)·(y_l + y_r)/2。
    pub fn area(&self) -> f64 {
        (self.right.x() - self.left.x()) * (self.left.y() + self.right.y()) / 2.0
    }

    /// 頂端邊的斜率。
    pub fn slope(&self) -> f64 {
        Point2D::slope(&self.left, &self.right)
    }

    /// 封閉多邊形頂點：(x_l, 0) → (x_l, y_l) → (x_r, y_r) → (x_r, 0)。
    pub fn polygon(&self) -> [Point2D; 4] {
        [
            self.left.on_axis(),
            self.left,
            self.right,
            self.right.on_axis(),
        ]
    }

    pub fn max_y(&self) -> f64 {
        self.left.y().max(self.right.y()).max(0.0)
    }
}
