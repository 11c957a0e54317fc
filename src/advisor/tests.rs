use super::*;
use crate::condition::Urgency;
use crate::constants::MAX_SUGGESTIONS;
use crate::pipeline::{PotentialCondition, Relevance};

fn prediction(name: &str, relevance: Relevance, urgency: Urgency) -> PotentialCondition {
    PotentialCondition {
        name: name.to_string(),
        description: String::new(),
        relevance,
        symptoms: vec![],
        visual_cues: vec![],
        score: match relevance {
            Relevance::High => 0.8,
            Relevance::Medium => 0.5,
            Relevance::Low => 0.2,
        },
        urgency,
        recommendation: String::new(),
        reasoning_notes: vec![],
        matched_factors: vec![],
    }
}

fn consult_count(steps: &[NextStep]) -> usize {
    steps.iter().filter(|s| s.kind == NextStepKind::Consult).count()
}

#[test]
fn test_empty_conditions_give_consult_and_general() {
    let advisor = RecommendationAdvisor::new();
    let steps = advisor.advise(&[], None);

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].kind, NextStepKind::Consult);
    assert_eq!(steps[1].kind, NextStepKind::General);
    assert_eq!(steps[0].title, "Consult a healthcare provider");
}

#[test]
fn test_empty_conditions_ignore_location() {
    let steps = RecommendationAdvisor::new().advise(&[], Some("skin"));
    assert_eq!(steps.len(), 2);
}

#[test]
fn test_urgent_condition_drives_consult_title() {
    let advisor = RecommendationAdvisor::new();
    let conditions = vec![
        prediction("Appendicitis", Relevance::High, Urgency::High),
        prediction("Gastroenteritis", Relevance::Medium, Urgency::LowMedium),
    ];

    assert!(advisor.needs_urgent_care(&conditions));
    let steps = advisor.advise(&conditions, None);
    assert_eq!(steps[0].title, "Seek urgent medical care");
    assert!(steps[0].description.contains("Appendicitis"));
    assert!(steps[0].description.contains("urgency: high"));
    assert!(steps[0].suggestions.is_some());
}

#[test]
fn test_urgent_condition_only_counts_when_high() {
    let advisor = RecommendationAdvisor::new();
    let conditions = vec![prediction("Meningitis", Relevance::Medium, Urgency::High)];

    assert!(!advisor.needs_urgent_care(&conditions));
    assert_eq!(advisor.advise(&conditions, None)[0].title, "Consult a healthcare provider");
}

#[test]
fn test_routine_consult_names_highest_urgency() {
    let conditions = vec![
        prediction("Migraine", Relevance::High, Urgency::Medium),
        prediction("Common Cold", Relevance::High, Urgency::Low),
    ];
    let steps = RecommendationAdvisor::new().advise(&conditions, None);

    assert!(steps[0].description.contains("medium"));
}

#[test]
fn test_step_order_with_specialist() {
    let conditions = vec![prediction("Contact Dermatitis", Relevance::High, Urgency::Low)];
    let steps = RecommendationAdvisor::new().advise(&conditions, Some("Skin"));

    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0].kind, NextStepKind::Consult);
    assert_eq!(steps[1].kind, NextStepKind::General);
    assert!(steps[1].title.contains("Dermatologist"));
    assert_eq!(steps[2].title, "General self-care");
    assert_eq!(steps[3].title, "Care for likely conditions");
    assert_eq!(consult_count(&steps), 1);
}

#[test]
fn test_unknown_location_has_no_specialist() {
    let advisor = RecommendationAdvisor::new();
    assert_eq!(advisor.specialist_suggestion(Some("elbow crease")), None);
    assert_eq!(advisor.specialist_suggestion(None), None);
    assert_eq!(advisor.specialist_suggestion(Some("lower back")), Some("Orthopedic specialist"));
    assert_eq!(specialist_for("forehead"), None);
}

#[test]
fn test_no_high_relevance_skips_condition_specific_step() {
    let conditions = vec![prediction("Common Cold", Relevance::Medium, Urgency::Low)];
    let steps = RecommendationAdvisor::new().advise(&conditions, None);

    assert_eq!(steps.len(), 2);
}

#[test]
fn test_suggestions_are_unioned_and_capped() {
    let advisor = RecommendationAdvisor::new();
    let conditions = vec![
        prediction("Eczema", Relevance::High, Urgency::Low),
        prediction("Influenza", Relevance::High, Urgency::Medium),
        prediction("Ankle Sprain", Relevance::High, Urgency::Low),
    ];

    let suggestions = advisor.condition_specific_suggestions(&conditions);
    assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    assert_eq!(suggestions[0], "Keep the affected area clean and dry");

    let steps = advisor.advise(&conditions, None);
    for step in &steps {
        if let Some(s) = &step.suggestions {
            assert!(s.len() <= MAX_SUGGESTIONS);
        }
    }
}

#[test]
fn test_categorize_by_name() {
    assert_eq!(categorize("Contact Dermatitis"), CareCategory::Dermatological);
    assert_eq!(categorize("Common Cold"), CareCategory::Respiratory);
    assert_eq!(categorize("Gastroenteritis"), CareCategory::Gastrointestinal);
    assert_eq!(categorize("Ankle Sprain"), CareCategory::Musculoskeletal);
    assert_eq!(categorize("Heart Attack"), CareCategory::General);
}

#[test]
fn test_urgent_list_matches_substrings() {
    assert!(is_urgent_condition("Ischemic Stroke"));
    assert!(is_urgent_condition("SEPSIS"));
    assert!(!is_urgent_condition("Migraine"));
}

#[test]
fn test_next_step_serializes_type_field() {
    let step = NextStep::consult("t", "d");
    let json = serde_json::to_value(&step).unwrap();

    assert_eq!(json["type"], "consult");
    assert!(json.get("suggestions").is_none());
}

#[test]
fn test_with_suggestions_caps_every_step() {
    let many = (1..=8).map(|i| format!("Suggestion {}", i));
    let step = NextStep::general("General self-care", "Rest").with_suggestions(many);

    let suggestions = step.suggestions.unwrap();
    assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    assert_eq!(suggestions[0], "Suggestion 1");
    assert_eq!(suggestions[4], "Suggestion 5");
}

#[test]
fn test_specialist_lookup_uses_whole_words() {
    let advisor = RecommendationAdvisor::new();
    assert_eq!(advisor.specialist_suggestion(Some("left ear")), Some("Otolaryngologist (ENT)"));
    assert_eq!(advisor.specialist_suggestion(Some("near")), None);
}
