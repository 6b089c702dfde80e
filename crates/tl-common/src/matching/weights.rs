/// Default weights used by the scorer.
///
/// `location_salary` scales the *sum* of two 0-10 components, so it counts
/// twice toward the effective share.
pub const DEFAULT_WEIGHTS: Weights = Weights {
    skills: 0.4,
    experience: 0.3,
    career: 0.2,
    location_salary: 0.05,
};

/// Salary gap above the job's maximum that still earns partial salary credit.
pub const DEFAULT_SALARY_TOLERANCE: i64 = 20_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub skills: f64,
    pub experience: f64,
    pub career: f64,
    pub location_salary: f64,
}

impl Weights {
    /// Share of the four factors when location and salary are both counted.
    pub fn effective_sum(&self) -> f64 {
        self.skills + self.experience + self.career + self.location_salary * 2.0
    }
}
