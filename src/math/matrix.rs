/// Dense square matrix indexed identically on rows (origin) and columns
/// (destination) by one fixed zone order. Cells start out missing (`None`)
/// so absent input coverage stays distinguishable from a genuine zero value.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    cells: Vec<Option<f64>>,
}

impl SquareMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![None; n * n],
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        debug_assert!(i < self.n && j < self.n);
        self.cells[i * self.n + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.n && j < self.n);
        self.cells[i * self.n + j] = Some(value);
    }
}
