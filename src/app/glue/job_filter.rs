use super::service::GlueJobSummary;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Jobs matching the search box, best match first. An empty query keeps service order.
pub fn filter_jobs<'a>(
    matcher: &SkimMatcherV2,
    jobs: &'a [GlueJobSummary],
    query: &str,
) -> Vec<&'a GlueJobSummary> {
    let query = query.trim();
    if query.is_empty() {
        return jobs.iter().collect();
    }

    let mut scored: Vec<(i64, usize, &GlueJobSummary)> = jobs
        .iter()
        .enumerate()
        .filter_map(|(index, job)| {
            matcher
                .fuzzy_match(&job.name, query)
                .map(|score| (score, index, job))
        })
        .collect();
    // Stable on ties: earlier jobs first
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, job)| job).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(jobs: &[&'a GlueJobSummary]) -> Vec<&'a str> {
        jobs.iter().map(|job| job.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let jobs = vec![GlueJobSummary::named("b"), GlueJobSummary::named("a")];
        let matcher = SkimMatcherV2::default();

        assert_eq!(names(&filter_jobs(&matcher, &jobs, "  ")), vec!["b", "a"]);
    }

    #[test]
    fn test_query_filters_non_matches() {
        let jobs = vec![
            GlueJobSummary::named("nightly-etl"),
            GlueJobSummary::named("customer-export"),
            GlueJobSummary::named("etl-backfill"),
        ];
        let matcher = SkimMatcherV2::default();

        let matched = names(&filter_jobs(&matcher, &jobs, "etl"));
        assert_eq!(matched.len(), 2);
        assert!(matched.contains(&"nightly-etl"));
        assert!(matched.contains(&"etl-backfill"));
    }
}
