use std::cmp::Ordering;

use serde::Serialize;

use super::scoring::{MatchScore, MatchingConfig, Scorer};
use crate::{Candidate, Job};

pub const DEFAULT_TOP_K: usize = 5;

/// One side of a match that can score entities of the other side.
pub trait MatchSubject<T> {
    fn match_score(&self, scorer: &Scorer, other: &T) -> MatchScore;
}

impl MatchSubject<Candidate> for Job {
    fn match_score(&self, scorer: &Scorer, other: &Candidate) -> MatchScore {
        scorer.calculate_match_score(self, other)
    }
}

impl MatchSubject<Job> for Candidate {
    fn match_score(&self, scorer: &Scorer, other: &Job) -> MatchScore {
        scorer.calculate_match_score(other, self)
    }
}

#[derive(Debug, Serialize)]
pub struct RankedMatch<'a, T> {
    pub entity: &'a T,
    pub score: f64,
    pub breakdown: MatchScore,
}

impl<T: Clone> RankedMatch<'_, T> {
    pub fn into_owned(self) -> ScoredMatch<T> {
        ScoredMatch {
            entity: self.entity.clone(),
            score: self.score,
            breakdown: self.breakdown,
        }
    }
}

/// Owned variant of [`RankedMatch`] for results that outlive the input slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch<T> {
    pub entity: T,
    pub score: f64,
    pub breakdown: MatchScore,
}

#[derive(Debug, Clone, Default)]
pub struct Ranker {
    scorer: Scorer,
}

impl Ranker {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            scorer: Scorer::new(config),
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Scores every entity against `subject`, orders by score descending and
    /// keeps the first `top_k`. Equal scores keep their input order.
    pub fn rank<'a, S, T>(
        &self,
        subject: &S,
        entities: &'a [T],
        top_k: usize,
    ) -> Vec<RankedMatch<'a, T>>
    where
        S: MatchSubject<T> + ?Sized,
    {
        if top_k == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<_> = entities
            .iter()
            .map(|entity| {
                let breakdown = subject.match_score(&self.scorer, entity);
                RankedMatch {
                    entity,
                    score: breakdown.total,
                    breakdown,
                }
            })
            .collect();

        // sort_by is stable, which gives the input-order tie break.
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(top_k);
        ranked
    }

    pub fn rank_candidates_for_job<'a>(
        &self,
        job: &Job,
        candidates: &'a [Candidate],
        top_k: usize,
    ) -> Vec<RankedMatch<'a, Candidate>> {
        self.rank(job, candidates, top_k)
    }

    pub fn rank_jobs_for_candidate<'a>(
        &self,
        candidate: &Candidate,
        jobs: &'a [Job],
        top_k: usize,
    ) -> Vec<RankedMatch<'a, Job>> {
        self.rank(candidate, jobs, top_k)
    }
}

/// Ranks with the default scoring config.
pub fn rank<'a, S, T>(subject: &S, entities: &'a [T], top_k: usize) -> Vec<RankedMatch<'a, T>>
where
    S: MatchSubject<T> + ?Sized,
{
    Ranker::default().rank(subject, entities, top_k)
}
