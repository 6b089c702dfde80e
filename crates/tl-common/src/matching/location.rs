use crate::{Candidate, Job, LocationType};

pub const LOCATION_EXACT_POINTS: f64 = 10.0;
pub const LOCATION_HYBRID_POINTS: f64 = 5.0;
pub const SALARY_OVERLAP_POINTS: f64 = 10.0;
pub const SALARY_NEAR_POINTS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LocationSalaryEvaluation {
    pub location_points: f64, // 0, 5 or 10
    pub salary_points: f64,   // 0, 5 or 10
    pub details: String,
}

impl LocationSalaryEvaluation {
    pub fn raw_points(&self) -> f64 {
        self.location_points + self.salary_points
    }
}

/// Exact match first; a HYBRID on either side is half credit.
pub fn location_points(job_location: LocationType, preferred: LocationType) -> f64 {
    if job_location == preferred {
        LOCATION_EXACT_POINTS
    } else if job_location == LocationType::Hybrid || preferred == LocationType::Hybrid {
        LOCATION_HYBRID_POINTS
    } else {
        0.0
    }
}

/// Full credit when the ranges intersect, half credit when the candidate's
/// minimum is within `tolerance` above the job's maximum.
pub fn salary_points(job: &Job, candidate: &Candidate, tolerance: i64) -> f64 {
    let overlap = candidate.expected_salary_min <= job.salary_max
        && candidate.expected_salary_max >= job.salary_min;

    if overlap {
        SALARY_OVERLAP_POINTS
    } else if candidate.expected_salary_min <= job.salary_max.saturating_add(tolerance) {
        SALARY_NEAR_POINTS
    } else {
        0.0
    }
}

pub fn evaluate_location_salary(
    job: &Job,
    candidate: &Candidate,
    tolerance: i64,
) -> LocationSalaryEvaluation {
    let location_points = location_points(job.location_type, candidate.preferred_location);
    let salary_points = salary_points(job, candidate, tolerance);

    LocationSalaryEvaluation {
        location_points,
        salary_points,
        details: format!(
            "location {} vs {} ({location_points}) / salary {}-{} vs {}-{} ({salary_points})",
            job.location_type.as_ref(),
            candidate.preferred_location.as_ref(),
            job.salary_min,
            job.salary_max,
            candidate.expected_salary_min,
            candidate.expected_salary_max,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::weights::DEFAULT_SALARY_TOLERANCE;

    fn job(min: i64, max: i64) -> Job {
        Job {
            salary_min: min,
            salary_max: max,
            ..Job::default()
        }
    }

    fn candidate(min: i64, max: i64) -> Candidate {
        Candidate {
            expected_salary_min: min,
            expected_salary_max: max,
            ..Candidate::default()
        }
    }

    #[test]
    fn location_exact_hybrid_and_mismatch() {
        assert_eq!(location_points(LocationType::OnSite, LocationType::OnSite), 10.0);
        assert_eq!(location_points(LocationType::Hybrid, LocationType::OnSite), 5.0);
        assert_eq!(location_points(LocationType::Remote, LocationType::Hybrid), 5.0);
        assert_eq!(location_points(LocationType::Remote, LocationType::OnSite), 0.0);
    }

    #[test]
    fn overlapping_ranges_get_full_credit() {
        let points = salary_points(
            &job(80_000, 120_000),
            &candidate(90_000, 110_000),
            DEFAULT_SALARY_TOLERANCE,
        );
        assert_eq!(points, 10.0);
    }

    #[test]
    fn touching_ranges_overlap() {
        let points = salary_points(
            &job(80_000, 120_000),
            &candidate(120_000, 150_000),
            DEFAULT_SALARY_TOLERANCE,
        );
        assert_eq!(points, 10.0);
    }

    #[test]
    fn candidate_slightly_above_gets_half_credit() {
        let points = salary_points(
            &job(80_000, 120_000),
            &candidate(135_000, 150_000),
            DEFAULT_SALARY_TOLERANCE,
        );
        assert_eq!(points, 5.0);

        let edge = salary_points(
            &job(80_000, 120_000),
            &candidate(140_000, 150_000),
            DEFAULT_SALARY_TOLERANCE,
        );
        assert_eq!(edge, 5.0);
    }

    #[test]
    fn candidate_far_above_gets_nothing() {
        let points = salary_points(
            &job(80_000, 120_000),
            &candidate(140_001, 160_000),
            DEFAULT_SALARY_TOLERANCE,
        );
        assert_eq!(points, 0.0);
    }

    #[test]
    fn candidate_below_job_range_still_gets_half_credit() {
        // Disjoint below the job minimum: cand.min <= job.max + tolerance holds.
        let points = salary_points(
            &job(80_000, 120_000),
            &candidate(40_000, 60_000),
            DEFAULT_SALARY_TOLERANCE,
        );
        assert_eq!(points, 5.0);
    }

    #[test]
    fn details_mention_both_sides() {
        let eval = evaluate_location_salary(
            &job(80_000, 120_000),
            &candidate(90_000, 110_000),
            DEFAULT_SALARY_TOLERANCE,
        );
        assert_eq!(eval.raw_points(), 20.0);
        assert!(eval.details.contains("REMOTE vs REMOTE"));
        assert!(eval.details.contains("80000-120000"));
    }
}
