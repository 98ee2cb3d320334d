//! Integration tests for the ATS engine

use ats_engine::cache::PredictionCache;
use ats_engine::catalog::{Keyword, KeywordCatalog, KeywordCategory};
use ats_engine::config::{CacheConfig, EngineConfig};
use ats_engine::engine::AnalysisEngine;
use ats_engine::features::FeatureVector;
use ats_engine::fluff::FluffSeverity;
use ats_engine::trie::KeywordTrie;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

const RESUME: &str = "\
Jane Doe
jane.doe@example.com | 555-123-4567 | linkedin.com/in/janedoe

Experience:
- Led migration of 12 services to Kubernetes, cutting deploy time by 40%
- Built Python tooling adopted by 5 teams
- Reduced infrastructure spend by $250K annually

Skills:
Python, Docker, Kubernetes, SQL";

const JOB_DESCRIPTION: &str = "\
We are hiring a platform engineer. Python and Kubernetes experience is
required, along with Docker and SQL. Leadership of large migrations is a
strong plus.";

#[test]
fn scoring_is_deterministic_across_cold_engines() {
    let first = AnalysisEngine::new()
        .unwrap()
        .analyze(RESUME, JOB_DESCRIPTION, "software", false, None);
    let second = AnalysisEngine::new()
        .unwrap()
        .analyze(RESUME, JOB_DESCRIPTION, "software", false, None);

    assert_eq!(first, second);
}

#[test]
fn duplicated_resume_keeps_jd_overlap_unchanged() {
    let engine = AnalysisEngine::new().unwrap();
    let doubled = format!("{}\n{}", RESUME, RESUME);

    let single = engine.extract_features(RESUME, Some(JOB_DESCRIPTION));
    let double = engine.extract_features(&doubled, Some(JOB_DESCRIPTION));

    assert_eq!(single.get("jd_overlap"), double.get("jd_overlap"));
}

#[test]
fn trie_reports_every_keyword_exactly_once() {
    let keywords = ["python", "kubernetes", "terraform", "graphql", "ansible"];
    let trie = KeywordTrie::build(keywords);
    let document = "python kubernetes terraform graphql ansible";

    let matches = trie.scan(document);
    assert_eq!(matches.len(), keywords.len());
    assert!(matches.iter().all(|m| m.count == 1));
}

#[test]
fn adding_a_jd_keyword_never_lowers_saturation() {
    let engine = AnalysisEngine::new().unwrap();

    let base = engine
        .analyze_keyword_saturation(RESUME, JOB_DESCRIPTION, "software")
        .overall_score;

    let enriched = format!("{}\nDemonstrated leadership across programs", RESUME);
    let improved = engine
        .analyze_keyword_saturation(&enriched, JOB_DESCRIPTION, "software")
        .overall_score;

    assert!(improved >= base);
}

#[test]
fn compatibility_score_is_bounded_for_wild_inputs() {
    let engine = AnalysisEngine::new().unwrap();
    let inputs = [
        (-1000.0, -1000.0, -1000.0),
        (1000.0, 1000.0, 1000.0),
        (0.0, 0.0, 0.0),
        (55.5, 44.4, 33.3),
    ];

    for (kw, fmt, comp) in inputs {
        for premium in [false, true] {
            for boost in [None, Some(150.0), Some(-20.0)] {
                let score = engine.score_compatibility(kw, fmt, comp, premium, boost);
                assert!(score <= 100);
            }
        }
    }
}

#[test]
fn leadership_scenario_reports_missing_and_fluff() {
    let catalog = KeywordCatalog {
        generic: vec![Keyword::new(
            "leadership",
            KeywordCategory::Leadership,
            1.0,
        )],
        industries: HashMap::new(),
        category_weights: Default::default(),
    };
    let engine = AnalysisEngine::with_config(EngineConfig::default(), catalog).unwrap();

    let saturation = engine.analyze_keyword_saturation(
        "Managed various teams",
        "Leadership is required",
        "generic",
    );
    assert!(saturation.matched_keywords.is_empty());
    assert_eq!(saturation.missing_keywords.len(), 1);
    assert_eq!(saturation.missing_keywords[0].term, "Leadership");

    let fluff = engine.detect_weak_phrases("Managed various teams");
    assert!(fluff.weak_phrases.iter().any(|h| h.phrase == "various"));
    assert!(fluff.fluff_percentage > 0.0);
    // One flagged word out of three crosses the 15% line.
    assert_eq!(fluff.severity, FluffSeverity::Critical);
}

#[test]
fn empty_resume_takes_the_early_exit_floor() {
    let engine = AnalysisEngine::new().unwrap();

    let features = engine.extract_features("", None);
    for (_, value) in features.iter() {
        assert_eq!(value, 0.0);
    }

    assert_eq!(engine.score_compatibility(0.0, 0.0, 0.0, false, None), 25);
    assert_eq!(engine.score_compatibility(0.0, 0.0, 0.0, true, None), 35);
}

#[test]
fn cache_capacity_overflow_evicts_exactly_the_oldest() {
    let ticks = Arc::new(AtomicI64::new(0));
    let clock_ticks = ticks.clone();
    let config = CacheConfig {
        ttl_secs: 3600,
        capacity: 1000,
    };
    let cache: PredictionCache<f64> = PredictionCache::with_clock(
        &config,
        Arc::new(move || {
            Utc.timestamp_opt(clock_ticks.load(Ordering::SeqCst), 0)
                .unwrap()
        }),
    );

    let vector = |i: usize| {
        let mut fv = FeatureVector::new();
        fv.set("index", i as f64);
        fv
    };

    for i in 0..=1000 {
        ticks.store(i as i64, Ordering::SeqCst);
        cache.get_or_compute(&vector(i), || i as f64);
    }
    assert_eq!(cache.len(), 1000);

    // The very first key (smallest created_at) is the one that was evicted.
    let recomputed = cache.get_or_compute(&vector(0), || -1.0);
    assert_eq!(recomputed, -1.0);
    let survivor = cache.get_or_compute(&vector(2), || -1.0);
    assert_eq!(survivor, 2.0);
}

#[test]
fn cache_is_transparent_within_ttl() {
    let engine = AnalysisEngine::new().unwrap();
    let calls = AtomicUsize::new(0);

    let features = engine.extract_features(RESUME, Some(JOB_DESCRIPTION));
    let direct = engine.score_compatibility(70.0, 80.0, 60.0, false, None);

    let scorer =
        ats_engine::scorer::CompatibilityScorer::new(engine.config().scoring.clone());

    // Two wrapped calls within the TTL window, one computation.
    let first = engine.get_or_compute(&features, || {
        calls.fetch_add(1, Ordering::SeqCst);
        scorer.score_breakdown(70.0, 80.0, 60.0, false, None)
    });
    let second = engine.get_or_compute(&features, || {
        calls.fetch_add(1, Ordering::SeqCst);
        panic!("must be served from cache")
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
    assert_eq!(first.final_score, direct);
}

#[test]
fn contact_extraction_finds_profile_links() {
    let engine = AnalysisEngine::new().unwrap();
    let info = engine.extract_contact_info(RESUME);

    assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
    assert_eq!(info.phone.as_deref(), Some("555-123-4567"));
    assert_eq!(
        info.linkedin.as_deref(),
        Some("https://linkedin.com/in/janedoe")
    );
}

#[test]
fn batch_analysis_preserves_input_order() {
    let engine = AnalysisEngine::new().unwrap();
    let weak_resume = "A plain text with no relevant skills at all";

    let reports =
        engine.analyze_batch(&[RESUME, weak_resume, RESUME], JOB_DESCRIPTION, "software", false);

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0], reports[2]);
    assert!(
        reports[0].breakdown.final_score >= reports[1].breakdown.final_score
    );
}

#[test]
fn report_serializes_to_json() {
    let engine = AnalysisEngine::new().unwrap();
    let report = engine.analyze(RESUME, JOB_DESCRIPTION, "software", true, Some(80.0));

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("final_score"));

    let parsed: ats_engine::MatchReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.breakdown.final_score, report.breakdown.final_score);
}
