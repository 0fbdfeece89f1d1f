use crate::{error::MinimizerError, minimize::ObjFn, point::Point};

/// Starting coordinate and initial step for one dimension of the problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplexConstant {
    pub value: f64,
    pub initial_perturbation: f64,
}

impl SimplexConstant {
    pub fn new(value: f64, initial_perturbation: f64) -> Self {
        Self {
            value,
            initial_perturbation,
        }
    }
}

/// Indices of the worst, second worst and best vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankProfile {
    pub highest: usize,
    pub next_highest: usize,
    pub lowest: usize,
}

impl RankProfile {
    /// Rank an error table holding at least two entries.
    ///
    /// Ties for `lowest` go to the later index. `highest` starts from the
    /// larger of entries 0 and 1, and on a tie there, index 1.
    pub fn from_errors(errors: &[f64]) -> Self {
        let (mut highest, mut next_highest) = if errors[0] > errors[1] {
            (0, 1)
        } else {
            (1, 0)
        };
        let mut lowest = 0;

        for (i, &err) in errors.iter().enumerate() {
            if err <= errors[lowest] {
                lowest = i;
            }
            if err > errors[highest] {
                next_highest = highest;
                highest = i;
            } else if err > errors[next_highest] && i != highest {
                next_highest = i;
            }
        }

        RankProfile {
            highest,
            next_highest,
            lowest,
        }
    }
}

/// The n + 1 vertices of an n-dimensional simplex together with the
/// objective value at each vertex.
///
/// `errors[i]` is always the objective evaluated at `vertices[i]`; both are
/// only written after the objective returned successfully.
#[derive(Debug, Clone)]
pub struct Simplex {
    vertices: Vec<Point>,
    errors: Vec<f64>,
    calls: usize,
}

impl Simplex {
    /// Build the starting vertices: the initial guess plus one vertex per
    /// axis displaced by that axis' perturbation.
    ///
    /// A zero perturbation is accepted and yields a vertex equal to the
    /// initial guess.
    pub fn initial_vertices(constants: &[SimplexConstant]) -> Result<Vec<Point>, MinimizerError> {
        let n = constants.len();
        let p0: Point = constants.iter().map(|s| s.value).collect();

        let mut vertices = Vec::with_capacity(n + 1);
        vertices.push(p0.clone());
        for (i, constant) in constants.iter().enumerate() {
            let mut vertex = p0.clone();
            vertex.add(Point::unit(n, i).scale(constant.initial_perturbation))?;
            vertices.push(vertex);
        }
        Ok(vertices)
    }

    /// Build the starting simplex and evaluate the objective once per vertex
    pub fn initialize<F>(constants: &[SimplexConstant], f: &F) -> Result<Self, MinimizerError>
    where
        F: ObjFn + ?Sized,
    {
        if constants.is_empty() {
            return Err(MinimizerError::InvalidDimension);
        }
        let vertices = Self::initial_vertices(constants)?;
        let errors = vertices
            .iter()
            .map(|v| f.call(v.as_slice()))
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(Simplex {
            calls: vertices.len(),
            vertices,
            errors,
        })
    }

    /// Number of vertices (n + 1)
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Dimension of the search space (n)
    pub fn dim(&self) -> usize {
        self.len() - 1
    }

    pub fn vertex(&self, i: usize) -> &Point {
        &self.vertices[i]
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn error(&self, i: usize) -> f64 {
        self.errors[i]
    }

    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Times the objective has been called by this simplex
    pub fn objective_calls(&self) -> usize {
        self.calls
    }

    pub fn rank(&self) -> RankProfile {
        RankProfile::from_errors(&self.errors)
    }

    /// Relative spread between the worst and best values.
    ///
    /// `jitter` keeps the ratio finite when both values are zero.
    pub fn relative_range(&self, profile: &RankProfile, jitter: f64) -> f64 {
        let high = self.errors[profile.highest];
        let low = self.errors[profile.lowest];
        2.0 * (high - low).abs() / (high.abs() + low.abs() + jitter)
    }

    pub fn has_converged(&self, profile: &RankProfile, tolerance: f64, jitter: f64) -> bool {
        self.relative_range(profile, jitter) < tolerance
    }

    /// Mean of every vertex except the highest
    pub fn centroid(&self, profile: &RankProfile) -> Result<Point, MinimizerError> {
        let mut centroid = Point::zeros(self.dim());
        for (i, vertex) in self.vertices.iter().enumerate() {
            if i != profile.highest {
                centroid.add(vertex)?;
            }
        }
        centroid.scale(1.0 / self.dim() as f64);
        Ok(centroid)
    }

    /// Evaluate `centroid + factor * (highest - centroid)` and swap it in for
    /// the highest vertex when it is strictly better.
    ///
    /// Returns the objective value at the trial point whether or not it was
    /// accepted. A factor of -1 reflects, 2 expands and 0.5 contracts.
    pub fn try_scale<F>(
        &mut self,
        factor: f64,
        profile: &RankProfile,
        f: &F,
    ) -> Result<f64, MinimizerError>
    where
        F: ObjFn + ?Sized,
    {
        let centroid = self.centroid(profile)?;
        let mut trial = self.vertices[profile.highest].clone();
        trial.subtract(&centroid)?.scale(factor).add(&centroid)?;

        let value = self.evaluate(&trial, f)?;
        if value < self.errors[profile.highest] {
            self.vertices[profile.highest] = trial;
            self.errors[profile.highest] = value;
        }
        Ok(value)
    }

    /// Move every vertex except the lowest halfway towards the lowest.
    ///
    /// Calls the objective once per moved vertex.
    pub fn shrink<F>(&mut self, profile: &RankProfile, f: &F) -> Result<(), MinimizerError>
    where
        F: ObjFn + ?Sized,
    {
        let lowest = self.vertices[profile.lowest].clone();
        for i in 0..self.vertices.len() {
            if i == profile.lowest {
                continue;
            }
            let mut moved = self.vertices[i].clone();
            moved.add(&lowest)?.scale(0.5);
            let value = self.evaluate(&moved, f)?;
            self.vertices[i] = moved;
            self.errors[i] = value;
        }
        Ok(())
    }

    fn evaluate<F>(&mut self, p: &Point, f: &F) -> Result<f64, MinimizerError>
    where
        F: ObjFn + ?Sized,
    {
        self.calls += 1;
        f.call(p.as_slice())
    }
}
