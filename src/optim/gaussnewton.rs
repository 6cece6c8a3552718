use nalgebra::{Cholesky, Const, SMatrix, SVector};

/// Accumulates Gauss Newton normal equations one scalar residual at a time.
///
/// # Type parameters
///
/// * `DIM` - The dimension of the problem.
pub struct GaussNewton<const DIM: usize> {
    hessian: SMatrix<f32, DIM, DIM>,
    gradient: SVector<f32, DIM>,
    squared_residual_sum: f32,
    count: usize,
}

impl<const DIM: usize> Default for GaussNewton<DIM> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DIM: usize> GaussNewton<DIM> {
    /// Creates a new Gauss Newton accumulator.
    pub fn new() -> Self {
        Self {
            hessian: SMatrix::zeros(),
            gradient: SVector::zeros(),
            squared_residual_sum: 0.0,
            count: 0,
        }
    }

    /// Resets the accumulated system.
    pub fn reset(&mut self) {
        self.hessian = SMatrix::zeros();
        self.gradient = SVector::zeros();
        self.squared_residual_sum = 0.0;
        self.count = 0;
    }

    /// Adds one residual and its Jacobian row to the normal equations.
    ///
    /// # Arguments
    ///
    /// * `residual` - The residual of the measurement.
    /// * `jacobian` - The Jacobian row of the measurement.
    pub fn step(&mut self, residual: f32, jacobian: &[f32; DIM]) {
        let jacobian = SVector::<f32, DIM>::from_column_slice(jacobian);

        self.gradient += jacobian * residual;
        self.hessian += jacobian * jacobian.transpose();
        self.squared_residual_sum += residual * residual;
        self.count += 1;
    }

    /// Solves the current system.
    ///
    /// # Returns
    ///
    /// The update vector, or `None` if no residuals were accumulated or the
    /// system is not positive definite.
    pub fn solve(&self) -> Option<SVector<f32, DIM>> {
        if self.count == 0 {
            return None;
        }

        // Solve in f64; the accumulated f32 system gets ill-conditioned.
        let hessian: SMatrix<f64, DIM, DIM> = nalgebra::convert(self.hessian);
        let gradient: SVector<f64, DIM> = nalgebra::convert(self.gradient);

        Cholesky::<f64, Const<DIM>>::new(hessian)
            .map(|cholesky| nalgebra::convert(cholesky.solve(&gradient)))
    }

    /// Returns the mean squared residual.
    pub fn mean_squared_residual(&self) -> f32 {
        self.squared_residual_sum / self.count as f32
    }
}
