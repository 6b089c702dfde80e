pub mod location;
pub mod ranking;
pub mod scoring;
pub mod skills;
pub mod weights;

pub use ranking::{DEFAULT_TOP_K, MatchSubject, RankedMatch, Ranker, ScoredMatch, rank};
pub use scoring::{
    MatchScore, MatchStatus, MatchingConfig, Scorer, ScoringResult, calculate_match_score, score,
};
