use super::*;
use crate::config::Config;
use crate::ranking::CandidateRecord;

fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

fn record(text: &str) -> CandidateRecord {
    CandidateRecord::new("r", Some(text.to_string()))
}

#[test]
fn test_count_tokens() {
    assert_eq!(count_tokens(""), 0);
    assert_eq!(count_tokens("   \n\t "), 0);
    assert_eq!(count_tokens("one"), 1);
    assert_eq!(count_tokens("  one\ttwo\n\nthree  "), 3);
}

#[test]
fn test_truncate_tokens_joins_with_single_spaces() {
    assert_eq!(truncate_tokens("a  b\n\nc\td e", 4), "a b c d");
    assert_eq!(truncate_tokens("a b", 10), "a b");
    assert_eq!(truncate_tokens("a b", 0), "");
}

#[test]
fn test_exactly_max_tokens_is_untouched() {
    let policy = PenaltyPolicy::default().with_max_tokens(5);
    let text = words(5);

    let outcome = policy.assess(&record(&text));

    assert_eq!(outcome.factor, 1.0);
    assert_eq!(outcome.note, PenaltyNote::None);
    assert_eq!(outcome.text.as_deref(), Some(text.as_str()));
}

#[test]
fn test_one_over_max_tokens_is_truncated() {
    let policy = PenaltyPolicy::default().with_max_tokens(5);

    let outcome = policy.assess(&record(&words(6)));

    assert_eq!(outcome.factor, 0.8);
    assert!(outcome.is_truncated());
    assert_eq!(outcome.text.as_deref(), Some(words(5).as_str()));
}

#[test]
fn test_default_boundary() {
    let policy = PenaltyPolicy::default();
    assert_eq!(policy.max_tokens(), 3500);

    let at_limit = policy.assess(&record(&words(3500)));
    assert_eq!(at_limit.factor, 1.0);

    let over = policy.assess(&record(&words(3501)));
    assert_eq!(over.factor, 0.8);
    assert_eq!(over.text.as_deref().map(count_tokens), Some(3500));
}

#[test]
fn test_untruncated_text_is_kept_verbatim() {
    let policy = PenaltyPolicy::default();
    let text = "Jane Doe\n\n  Rust,   Go\n";

    let outcome = policy.assess(&record(text));

    assert_eq!(outcome.text.as_deref(), Some(text));
}

#[test]
fn test_unreadable() {
    let policy = PenaltyPolicy::default();

    let outcome = policy.assess(&CandidateRecord::unreadable("scan.pdf"));

    assert_eq!(outcome.factor, 0.0);
    assert!(outcome.text.is_none());
    assert!(outcome.is_unreadable());
}

#[test]
fn test_compute_penalty_uses_given_count() {
    let policy = PenaltyPolicy::default().with_max_tokens(2);
    let candidate = record("a b c");

    assert_eq!(policy.compute_penalty(&candidate, 2).factor, 1.0);
    assert_eq!(policy.compute_penalty(&candidate, 3).factor, 0.8);
}

#[test]
fn test_custom_penalties() {
    let policy = PenaltyPolicy::new(1, 0.5, 0.25);

    assert_eq!(policy.assess(&record("a b")).factor, 0.5);
    assert_eq!(
        policy.assess(&CandidateRecord::unreadable("x")).factor,
        0.25
    );
}

#[test]
#[should_panic(expected = "truncation_penalty must be between 0.0 and 1.0")]
fn test_new_rejects_out_of_range_penalty() {
    PenaltyPolicy::new(10, 1.5, 0.0);
}

#[test]
fn test_from_config() {
    let config = Config {
        max_tokens: 42,
        truncation_penalty: 0.7,
        unreadable_penalty: 0.1,
        ..Config::default()
    };

    let policy = PenaltyPolicy::from_config(&config);

    assert_eq!(policy.max_tokens(), 42);
    assert_eq!(policy.truncation_penalty(), 0.7);
    assert_eq!(policy.unreadable_penalty(), 0.1);
}

#[test]
fn test_note_display_and_serialize() {
    assert_eq!(PenaltyNote::Truncated.to_string(), "truncated");
    assert_eq!(
        serde_json::to_string(&PenaltyNote::Unreadable).unwrap(),
        "\"unreadable\""
    );
    assert_eq!(PenaltyNote::None.as_str(), "none");
}
