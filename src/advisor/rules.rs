//! Fixed lookup tables for next-step guidance.

use crate::scoring::location_words;

use super::types::CareCategory;

/// Condition names that warrant urgent care when ranked high.
pub const URGENT_CONDITIONS: &[&str] = &[
    "appendicitis",
    "meningitis",
    "stroke",
    "heart attack",
    "pulmonary embolism",
    "anaphylaxis",
    "severe dehydration",
    "sepsis",
];

/// Body-location word → specialist. Checked in order; first hit wins.
pub const SPECIALISTS: &[(&str, &str)] = &[
    ("skin", "Dermatologist"),
    ("eye", "Ophthalmologist"),
    ("eyes", "Ophthalmologist"),
    ("ear", "Otolaryngologist (ENT)"),
    ("ears", "Otolaryngologist (ENT)"),
    ("nose", "Otolaryngologist (ENT)"),
    ("throat", "Otolaryngologist (ENT)"),
    ("heart", "Cardiologist"),
    ("chest", "Cardiologist"),
    ("lung", "Pulmonologist"),
    ("lungs", "Pulmonologist"),
    ("stomach", "Gastroenterologist"),
    ("abdomen", "Gastroenterologist"),
    ("abdominal", "Gastroenterologist"),
    ("head", "Neurologist"),
    ("brain", "Neurologist"),
    ("joint", "Orthopedic specialist"),
    ("knee", "Orthopedic specialist"),
    ("ankle", "Orthopedic specialist"),
    ("back", "Orthopedic specialist"),
    ("shoulder", "Orthopedic specialist"),
    ("mouth", "Dentist"),
    ("teeth", "Dentist"),
];

const CATEGORY_RULES: &[(CareCategory, &[&str])] = &[
    (
        CareCategory::Dermatological,
        &["dermatitis", "eczema", "rash", "psoriasis", "hives", "acne", "skin", "fungal"],
    ),
    (
        CareCategory::Respiratory,
        &["cold", "flu", "influenza", "pneumonia", "bronch", "asthma", "sinus", "throat"],
    ),
    (
        CareCategory::Gastrointestinal,
        &["gastro", "appendic", "stomach", "food poisoning", "reflux", "colitis", "bowel"],
    ),
    (
        CareCategory::Musculoskeletal,
        &["sprain", "strain", "fracture", "arthritis", "tendin", "back pain"],
    ),
];

pub fn is_urgent_condition(name: &str) -> bool {
    let name = name.to_lowercase();
    URGENT_CONDITIONS.iter().any(|urgent| name.contains(urgent))
}

/// Specialist for a free-text body location, matched word by word.
pub fn specialist_for(body_location: &str) -> Option<&'static str> {
    let words = location_words(body_location);
    SPECIALISTS
        .iter()
        .find(|(key, _)| words.iter().any(|w| w == key))
        .map(|(_, specialist)| *specialist)
}

pub fn categorize(condition_name: &str) -> CareCategory {
    let name = condition_name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| name.contains(n)))
        .map(|(category, _)| *category)
        .unwrap_or(CareCategory::General)
}

pub fn category_suggestions(category: CareCategory) -> &'static [&'static str] {
    match category {
        CareCategory::Dermatological => &[
            "Keep the affected area clean and dry",
            "Avoid scratching or rubbing the skin",
            "Use a fragrance-free moisturizer",
            "Avoid known irritants and allergens",
        ],
        CareCategory::Respiratory => &[
            "Drink plenty of warm fluids",
            "Use a humidifier or breathe in steam",
            "Get extra sleep and rest your voice",
            "Avoid smoke and other airway irritants",
        ],
        CareCategory::Gastrointestinal => &[
            "Sip clear fluids in small amounts",
            "Eat bland foods as tolerated",
            "Avoid alcohol, caffeine and fatty foods",
        ],
        CareCategory::Musculoskeletal => &[
            "Rest the affected area",
            "Apply ice for 15-20 minutes at a time",
            "Use compression and elevation to limit swelling",
        ],
        CareCategory::General => &[
            "Monitor your symptoms closely",
            "Get adequate rest",
        ],
    }
}

pub const GENERAL_CARE_SUGGESTIONS: &[&str] = &[
    "Rest and stay hydrated",
    "Write down when symptoms started and how they change",
    "Avoid self-medicating beyond over-the-counter directions",
    "Seek care promptly if symptoms get worse",
];

pub const URGENT_CARE_SUGGESTIONS: &[&str] = &[
    "Call emergency services if symptoms are severe or worsening",
    "Do not drive yourself if you feel faint or confused",
    "Bring a list of your symptoms and when they started",
];
