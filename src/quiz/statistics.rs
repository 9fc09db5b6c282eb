//! Quiz statistics aggregation
//!
//! Summary statistics over a user's quiz history: total attempts, rounded
//! average score, and a score distribution.

use crate::domain::QuizResult;
use serde::{Deserialize, Serialize};

/// Score distribution buckets
///
/// Buckets are evaluated in precedence order per result, first match wins:
/// score >= 90 is excellent, 70-89 is good, 50-69 is fair, below 50 is
/// poor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    /// Results with score >= 90
    pub excellent: usize,

    /// Results with 70 <= score < 90
    pub good: usize,

    /// Results with 50 <= score < 70
    pub fair: usize,

    /// Results with score < 50
    pub poor: usize,
}

impl ScoreDistribution {
    fn count(&mut self, score: u8) {
        if score >= 90 {
            self.excellent += 1;
        } else if score >= 70 {
            self.good += 1;
        } else if score >= 50 {
            self.fair += 1;
        } else {
            self.poor += 1;
        }
    }
}

/// Aggregated quiz statistics for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizStatistics {
    /// Number of results aggregated
    pub total_quizzes: usize,

    /// Rounded average score; 0 when there are no results
    pub average_score: u32,

    /// Score distribution over all results
    pub score_distribution: ScoreDistribution,
}

/// Aggregates statistics over a set of quiz results
///
/// An empty input yields all-zero statistics; there is no division-by-zero
/// path.
///
/// # Examples
///
/// ```
/// use medrecall::quiz::aggregate;
///
/// let stats = aggregate(&[]);
/// assert_eq!(stats.total_quizzes, 0);
/// assert_eq!(stats.average_score, 0);
/// ```
pub fn aggregate(results: &[QuizResult]) -> QuizStatistics {
    if results.is_empty() {
        return QuizStatistics::default();
    }

    let total_quizzes = results.len();
    let score_sum: u64 = results.iter().map(|r| r.score as u64).sum();
    let average_score = (score_sum as f64 / total_quizzes as f64).round() as u32;

    let mut score_distribution = ScoreDistribution::default();
    for result in results {
        score_distribution.count(result.score);
    }

    QuizStatistics {
        total_quizzes,
        average_score,
        score_distribution,
    }
}
