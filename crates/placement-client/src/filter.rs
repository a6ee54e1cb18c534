//! Candidate filtering for the recruiter dashboard.

use placement_shared::constants::QUALIFICATION_ALL;
use placement_shared::validation::parse_min_marks;
use placement_shared::Candidate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateFilter {
    pub min_marks: f64,
    /// `None` matches every qualification.
    pub qualification: Option<String>,
}

impl CandidateFilter {
    /// Build a filter from raw form input.  Unparseable marks mean no
    /// threshold.  Only "All" means any qualification; anything else is
    /// compared verbatim.
    pub fn from_inputs(min_marks: &str, qualification: &str) -> Self {
        Self {
            min_marks: parse_min_marks(min_marks),
            qualification: (qualification != QUALIFICATION_ALL).then(|| qualification.to_string()),
        }
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        candidate.marks >= self.min_marks
            && self
                .qualification
                .as_deref()
                .map_or(true, |q| candidate.qualification.as_deref() == Some(q))
    }

    /// Matching candidates in source order.
    pub fn apply(&self, candidates: &[Candidate]) -> Vec<Candidate> {
        candidates
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}

pub fn filter_candidates(
    candidates: &[Candidate],
    min_marks: &str,
    qualification: &str,
) -> Vec<Candidate> {
    CandidateFilter::from_inputs(min_marks, qualification).apply(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, marks: f64, qualification: &str) -> Candidate {
        Candidate {
            marks,
            qualification: Some(qualification.to_string()),
            ..Candidate::blank(id.into())
        }
    }

    fn ids(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_min_marks_keeps_source_order() {
        let all = vec![
            candidate("a", 50.0, "B.Tech"),
            candidate("b", 70.0, "B.Tech"),
            candidate("c", 90.0, "B.Tech"),
        ];
        assert_eq!(ids(&filter_candidates(&all, "60", "All")), vec!["b", "c"]);
    }

    #[test]
    fn test_bad_min_marks_means_no_threshold() {
        let all = vec![candidate("a", 0.0, "BA"), candidate("b", 35.5, "BA")];
        assert_eq!(ids(&filter_candidates(&all, "", "All")), vec!["a", "b"]);
        assert_eq!(ids(&filter_candidates(&all, "abc", "All")), vec!["a", "b"]);
    }

    #[test]
    fn test_qualification_exact_match() {
        let all = vec![
            candidate("a", 80.0, "B.Tech"),
            candidate("b", 80.0, "M.Tech"),
            Candidate {
                marks: 80.0,
                ..Candidate::blank("c".into())
            },
        ];
        assert_eq!(ids(&filter_candidates(&all, "0", "M.Tech")), vec!["b"]);
        assert_eq!(ids(&filter_candidates(&all, "0", "b.tech")), Vec::<&str>::new());
        assert_eq!(ids(&filter_candidates(&all, "0", "All")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_only_all_selector_matches_everything() {
        let all = vec![candidate("a", 80.0, "M.Tech"), candidate("b", 80.0, "B.Tech")];
        assert_eq!(ids(&filter_candidates(&all, "0", "")), Vec::<&str>::new());
        assert_eq!(ids(&filter_candidates(&all, "0", " M.Tech")), Vec::<&str>::new());
        assert_eq!(CandidateFilter::from_inputs("0", "").qualification.as_deref(), Some(""));
        assert_eq!(CandidateFilter::from_inputs("0", "All").qualification, None);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let filter = CandidateFilter::from_inputs("70", "All");
        assert!(filter.matches(&candidate("a", 70.0, "BE")));
        assert!(!filter.matches(&candidate("b", 69.99, "BE")));
    }
}
