//! Human-readable strength and weakness statements per category.

use scoring_core::Category;
use serde::{Deserialize, Serialize};

use crate::categories::CategoryScores;

const EXCELLENT: f64 = 80.0;
const GOOD: f64 = 65.0;
const WEAK: f64 = 30.0;
const BELOW_AVERAGE: f64 = 45.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Classify each category in fixed order. Scores between 45 and 65 produce
/// no statement.
pub fn assess(scores: &CategoryScores) -> Assessment {
    let mut assessment = Assessment::default();

    for category in Category::ALL {
        let score = scores.get(category);
        let label = category.label();

        if score >= EXCELLENT {
            assessment.strengths.push(format!("Excellent {} ({:.1})", label, score));
        } else if score >= GOOD {
            assessment.strengths.push(format!("Good {} ({:.1})", label, score));
        } else if score <= WEAK {
            assessment.weaknesses.push(format!("Weak {} ({:.1})", label, score));
        } else if score <= BELOW_AVERAGE {
            assessment
                .weaknesses
                .push(format!("Below average {} ({:.1})", label, score));
        }
    }

    assessment
}
