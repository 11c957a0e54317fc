//! Built-in reference conditions used when the backing store is unavailable.

use super::types::{MedicalCondition, SymptomRelationships, Urgency};

struct Seed {
    name: &'static str,
    description: &'static str,
    symptoms: &'static [&'static str],
    visual_cues: &'static [&'static str],
    urgency: Urgency,
    recommendation: &'static str,
    required: &'static [&'static str],
    commonly_together: &'static [&'static str],
    rarely_together: &'static [&'static str],
    body_locations: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        name: "Common Cold",
        description: "A viral infection of the nose and throat.",
        symptoms: &["runny nose", "sore throat", "cough", "congestion", "sneezing"],
        visual_cues: &[],
        urgency: Urgency::Low,
        recommendation: "Rest, stay hydrated, and use over-the-counter remedies for symptom relief.",
        required: &[],
        commonly_together: &["runny nose", "sneezing"],
        rarely_together: &[],
        body_locations: &["nose", "throat"],
    },
    Seed {
        name: "Influenza",
        description: "A contagious respiratory illness caused by influenza viruses.",
        symptoms: &["fever", "body aches", "fatigue", "cough", "headache", "chills"],
        visual_cues: &[],
        urgency: Urgency::Medium,
        recommendation: "Rest, fluids, and antiviral medication if started early; see a doctor if breathing becomes difficult.",
        required: &["fever"],
        commonly_together: &["fever", "body aches"],
        rarely_together: &[],
        body_locations: &["chest", "throat"],
    },
    Seed {
        name: "Migraine",
        description: "Recurring headaches of moderate to severe intensity, often one-sided.",
        symptoms: &["headache", "nausea", "sensitivity to light", "visual disturbances"],
        visual_cues: &[],
        urgency: Urgency::Medium,
        recommendation: "Rest in a dark, quiet room; consider pain relievers and track triggers.",
        required: &["headache"],
        commonly_together: &["headache", "sensitivity to light"],
        rarely_together: &["fever"],
        body_locations: &["head"],
    },
    Seed {
        name: "Contact Dermatitis",
        description: "Skin inflammation caused by contact with an irritant or allergen.",
        symptoms: &["rash", "itching", "redness", "blisters"],
        visual_cues: &["red rash", "blisters", "dry patches"],
        urgency: Urgency::Low,
        recommendation: "Avoid the trigger, wash the area, and apply a soothing or anti-itch cream.",
        required: &[],
        commonly_together: &["rash", "itching"],
        rarely_together: &["fever"],
        body_locations: &["skin", "hands", "arms"],
    },
    Seed {
        name: "Eczema",
        description: "A chronic condition that makes skin red, dry and itchy.",
        symptoms: &["dry skin", "itching", "rash", "scaly patches"],
        visual_cues: &["scaly patches", "redness", "cracked skin"],
        urgency: Urgency::Low,
        recommendation: "Moisturize regularly, use gentle soaps, and avoid known irritants.",
        required: &[],
        commonly_together: &["dry skin", "itching"],
        rarely_together: &[],
        body_locations: &["skin"],
    },
    Seed {
        name: "Gastroenteritis",
        description: "Inflammation of the stomach and intestines, usually from infection.",
        symptoms: &["diarrhea", "nausea", "vomiting", "abdominal cramps", "fever"],
        visual_cues: &[],
        urgency: Urgency::LowMedium,
        recommendation: "Drink fluids with electrolytes and eat bland food once vomiting stops.",
        required: &[],
        commonly_together: &["diarrhea", "vomiting"],
        rarely_together: &[],
        body_locations: &["abdomen", "stomach"],
    },
    Seed {
        name: "Appendicitis",
        description: "Inflammation of the appendix, a surgical emergency.",
        symptoms: &["abdominal pain", "nausea", "fever", "loss of appetite", "vomiting"],
        visual_cues: &[],
        urgency: Urgency::High,
        recommendation: "Seek emergency care immediately; do not eat, drink or take pain relievers.",
        required: &["abdominal pain"],
        commonly_together: &["abdominal pain", "nausea"],
        rarely_together: &["diarrhea"],
        body_locations: &["abdomen"],
    },
    Seed {
        name: "Meningitis",
        description: "Inflammation of the membranes surrounding the brain and spinal cord.",
        symptoms: &["fever", "stiff neck", "headache", "sensitivity to light", "confusion"],
        visual_cues: &["rash"],
        urgency: Urgency::High,
        recommendation: "Seek emergency care immediately.",
        required: &["stiff neck"],
        commonly_together: &["fever", "stiff neck", "headache"],
        rarely_together: &[],
        body_locations: &["head", "neck"],
    },
    Seed {
        name: "Stroke",
        description: "Interrupted blood supply to part of the brain.",
        symptoms: &["facial drooping", "arm weakness", "speech difficulty", "confusion", "dizziness"],
        visual_cues: &["facial drooping"],
        urgency: Urgency::High,
        recommendation: "Call emergency services immediately and note the time symptoms started.",
        required: &[],
        commonly_together: &["facial drooping", "arm weakness"],
        rarely_together: &[],
        body_locations: &["head", "face"],
    },
    Seed {
        name: "Heart Attack",
        description: "Blocked blood flow to the heart muscle.",
        symptoms: &["chest pain", "shortness of breath", "arm pain", "sweating", "nausea"],
        visual_cues: &[],
        urgency: Urgency::High,
        recommendation: "Call emergency services immediately.",
        required: &["chest pain"],
        commonly_together: &["chest pain", "shortness of breath"],
        rarely_together: &[],
        body_locations: &["chest", "heart"],
    },
    Seed {
        name: "Anaphylaxis",
        description: "A severe, potentially life-threatening allergic reaction.",
        symptoms: &["difficulty breathing", "swelling", "hives", "dizziness", "rapid pulse"],
        visual_cues: &["hives", "swelling"],
        urgency: Urgency::High,
        recommendation: "Use an epinephrine auto-injector if available and call emergency services.",
        required: &[],
        commonly_together: &["difficulty breathing", "swelling"],
        rarely_together: &[],
        body_locations: &["throat", "skin", "face"],
    },
    Seed {
        name: "Pneumonia",
        description: "Infection that inflames the air sacs in one or both lungs.",
        symptoms: &["cough", "fever", "shortness of breath", "chest pain", "fatigue"],
        visual_cues: &[],
        urgency: Urgency::MediumHigh,
        recommendation: "See a doctor promptly; antibiotics may be needed for bacterial pneumonia.",
        required: &[],
        commonly_together: &["cough", "fever", "shortness of breath"],
        rarely_together: &["runny nose"],
        body_locations: &["chest", "lungs"],
    },
    Seed {
        name: "Ankle Sprain",
        description: "Stretched or torn ligaments around the ankle.",
        symptoms: &["ankle pain", "swelling", "bruising", "limited mobility"],
        visual_cues: &["swelling", "bruising"],
        urgency: Urgency::Low,
        recommendation: "Rest, ice, compression and elevation; see a doctor if you cannot bear weight.",
        required: &[],
        commonly_together: &["ankle pain", "swelling"],
        rarely_together: &["fever"],
        body_locations: &["ankle", "foot", "joints"],
    },
    Seed {
        name: "Conjunctivitis",
        description: "Inflammation of the outer membrane of the eye.",
        symptoms: &["red eyes", "itchy eyes", "discharge", "tearing"],
        visual_cues: &["red eyes", "discharge"],
        urgency: Urgency::Low,
        recommendation: "Keep the eyes clean, avoid touching them, and see a doctor if vision changes.",
        required: &[],
        commonly_together: &["red eyes", "discharge"],
        rarely_together: &[],
        body_locations: &["eyes"],
    },
    Seed {
        name: "Severe Dehydration",
        description: "Dangerous loss of body fluids.",
        symptoms: &["extreme thirst", "dizziness", "dry mouth", "confusion", "dark urine"],
        visual_cues: &["sunken eyes"],
        urgency: Urgency::High,
        recommendation: "Seek medical care; intravenous fluids may be required.",
        required: &[],
        commonly_together: &["extreme thirst", "dry mouth"],
        rarely_together: &[],
        body_locations: &[],
    },
];

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| (*t).to_string()).collect()
}

/// The fallback reference set, in a fixed order.
pub fn default_conditions() -> Vec<MedicalCondition> {
    SEEDS
        .iter()
        .map(|seed| {
            let relationships = SymptomRelationships {
                required: owned(seed.required),
                commonly_together: owned(seed.commonly_together),
                rarely_together: owned(seed.rarely_together),
            };
            MedicalCondition {
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                symptoms: owned(seed.symptoms),
                visual_cues: owned(seed.visual_cues),
                urgency: seed.urgency,
                recommendation: seed.recommendation.to_string(),
                symptom_relationships: (!relationships.is_empty()).then_some(relationships),
                body_locations: owned(seed.body_locations),
            }
        })
        .collect()
}
