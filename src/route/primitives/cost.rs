use pathfinding::num_traits::Zero;
use std::cmp::Ordering;
use std::ops::Add;

/// The accumulated cost of a (partial) path.
///
/// Paths are ordered on their disutility alone; the travel time is
/// carried along as a secondary metric.
#[derive(Copy, Clone, Debug, Default)]
pub struct PathCost {
    pub cost: f64,
    pub time: f64,
}

impl PathCost {
    #[inline]
    pub const fn new(cost: f64, time: f64) -> Self {
        Self { cost, time }
    }
}

impl Eq for PathCost {}

impl PartialEq<Self> for PathCost {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl PartialOrd for PathCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.total_cmp(&other.cost)
    }
}

impl Add<Self> for PathCost {
    type Output = PathCost;

    fn add(self, rhs: Self) -> Self::Output {
        PathCost::new(self.cost + rhs.cost, self.time + rhs.time)
    }
}

impl Zero for PathCost {
    fn zero() -> Self {
        PathCost::new(0.0, 0.0)
    }

    fn is_zero(&self) -> bool {
        self.cost == 0.0 && self.time == 0.0
    }
}
