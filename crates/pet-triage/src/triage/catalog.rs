//! Static reference data for the triage conversation.
//!
//! Every option offered to the owner lives here: the RAP (respiration / alertness /
//! perfusion) answers with their emergency tags, the critical-symptom checklist, the
//! concern categories with their primary symptoms, the additional symptom groups and
//! the severity / duration / progression scales.

use serde::{Deserialize, Serialize};

/// A selectable answer on one of the RAP axes.
pub trait RapOption: Copy {
    fn key(self) -> &'static str;
    fn label(self) -> &'static str;
    /// Clinical convention: whether picking this answer alone signals an emergency.
    fn is_emergency(self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespirationOption {
    Normal,
    Rapid,
    Labored,
    OpenMouth,
}

impl RespirationOption {
    pub const fn ordered() -> [Self; 4] {
        [Self::Normal, Self::Rapid, Self::Labored, Self::OpenMouth]
    }
}

impl RapOption for RespirationOption {
    fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Rapid => "rapid",
            Self::Labored => "labored",
            Self::OpenMouth => "open_mouth",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal, relaxed breathing",
            Self::Rapid => "Faster than usual but not struggling",
            Self::Labored => "Labored breathing or struggling for air",
            Self::OpenMouth => "Open-mouth breathing at rest",
        }
    }

    fn is_emergency(self) -> bool {
        matches!(self, Self::Labored | Self::OpenMouth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertnessOption {
    Normal,
    Quiet,
    Disoriented,
    Unresponsive,
}

impl AlertnessOption {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Normal,
            Self::Quiet,
            Self::Disoriented,
            Self::Unresponsive,
        ]
    }
}

impl RapOption for AlertnessOption {
    fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Quiet => "quiet",
            Self::Disoriented => "disoriented",
            Self::Unresponsive => "unresponsive",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Alert and responsive",
            Self::Quiet => "Quieter than usual but responds",
            Self::Disoriented => "Confused, wobbly or disoriented",
            Self::Unresponsive => "Barely responsive or unresponsive",
        }
    }

    fn is_emergency(self) -> bool {
        matches!(self, Self::Disoriented | Self::Unresponsive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerfusionOption {
    Normal,
    Unsure,
    Pale,
    BlueGray,
    BrightRed,
}

impl PerfusionOption {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Normal,
            Self::Unsure,
            Self::Pale,
            Self::BlueGray,
            Self::BrightRed,
        ]
    }
}

impl RapOption for PerfusionOption {
    fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Unsure => "unsure",
            Self::Pale => "pale",
            Self::BlueGray => "blue_gray",
            Self::BrightRed => "bright_red",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Normal => "Pink gums, color returns within two seconds",
            Self::Unsure => "Unable to check the gums",
            Self::Pale => "Pale or white gums",
            Self::BlueGray => "Blue or gray gums",
            Self::BrightRed => "Brick or bright red gums",
        }
    }

    fn is_emergency(self) -> bool {
        matches!(self, Self::Pale | Self::BlueGray | Self::BrightRed)
    }
}

/// Checklist of signs that always require immediate veterinary care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalSymptom {
    Seizures,
    Collapse,
    ActiveBleeding,
    SuspectedPoisoning,
    BloatedAbdomen,
    UnableToUrinate,
    SevereTrauma,
    Choking,
    Heatstroke,
    DifficultBirth,
    SuddenParalysis,
    EyeInjury,
}

impl CriticalSymptom {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Seizures,
            Self::Collapse,
            Self::ActiveBleeding,
            Self::SuspectedPoisoning,
            Self::BloatedAbdomen,
            Self::UnableToUrinate,
            Self::SevereTrauma,
            Self::Choking,
            Self::Heatstroke,
            Self::DifficultBirth,
            Self::SuddenParalysis,
            Self::EyeInjury,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Seizures => "seizures",
            Self::Collapse => "collapse",
            Self::ActiveBleeding => "active_bleeding",
            Self::SuspectedPoisoning => "suspected_poisoning",
            Self::BloatedAbdomen => "bloated_abdomen",
            Self::UnableToUrinate => "unable_to_urinate",
            Self::SevereTrauma => "severe_trauma",
            Self::Choking => "choking",
            Self::Heatstroke => "heatstroke",
            Self::DifficultBirth => "difficult_birth",
            Self::SuddenParalysis => "sudden_paralysis",
            Self::EyeInjury => "eye_injury",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Seizures => "Seizures or uncontrolled shaking",
            Self::Collapse => "Collapse or inability to stand",
            Self::ActiveBleeding => "Bleeding that will not stop",
            Self::SuspectedPoisoning => "Ate something toxic",
            Self::BloatedAbdomen => "Swollen, hard belly with retching",
            Self::UnableToUrinate => "Straining without producing urine",
            Self::SevereTrauma => "Hit by a car, fall or attack",
            Self::Choking => "Choking or something stuck in the throat",
            Self::Heatstroke => "Overheated, heavy panting, hot to the touch",
            Self::DifficultBirth => "Labor with no delivery progress",
            Self::SuddenParalysis => "Sudden loss of use of the legs",
            Self::EyeInjury => "Eye injury or eye bulging out",
        }
    }
}

/// A selectable symptom: stable key plus owner-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymptomEntry {
    pub key: &'static str,
    pub label: &'static str,
}

const fn entry(key: &'static str, label: &'static str) -> SymptomEntry {
    SymptomEntry { key, label }
}

const DIGESTIVE_SYMPTOMS: &[SymptomEntry] = &[
    entry("vomiting", "Vomiting"),
    entry("diarrhea", "Diarrhea"),
    entry("loss_of_appetite", "Loss of appetite"),
    entry("constipation", "Constipation"),
    entry("blood_in_stool", "Blood in stool"),
    entry("excessive_drooling", "Excessive drooling"),
    entry("abdominal_pain", "Painful or tense belly"),
];

const RESPIRATORY_SYMPTOMS: &[SymptomEntry] = &[
    entry("coughing", "Coughing"),
    entry("sneezing", "Sneezing"),
    entry("nasal_discharge", "Nasal discharge"),
    entry("wheezing", "Wheezing"),
    entry("reverse_sneezing", "Reverse sneezing"),
    entry("exercise_intolerance", "Tires quickly on exercise"),
];

const SKIN_COAT_SYMPTOMS: &[SymptomEntry] = &[
    entry("itching", "Itching or scratching"),
    entry("hair_loss", "Hair loss or bald patches"),
    entry("rash", "Rash or redness"),
    entry("lumps", "Lumps or bumps"),
    entry("hot_spots", "Hot spots"),
    entry("fleas_or_ticks", "Fleas or ticks"),
];

const BEHAVIORAL_SYMPTOMS: &[SymptomEntry] = &[
    entry("aggression", "New aggression"),
    entry("hiding", "Hiding more than usual"),
    entry("excessive_vocalizing", "Excessive vocalizing"),
    entry("restlessness", "Restlessness or pacing"),
    entry("lethargy", "Lethargy"),
    entry("confusion", "Confusion"),
];

const MOVEMENT_SYMPTOMS: &[SymptomEntry] = &[
    entry("limping", "Limping"),
    entry("stiffness", "Stiffness"),
    entry("reluctance_to_jump", "Reluctant to jump or climb"),
    entry("swollen_joint", "Swollen joint or limb"),
    entry("weakness", "Weakness"),
    entry("dragging_legs", "Dragging legs"),
];

const EYES_EARS_SYMPTOMS: &[SymptomEntry] = &[
    entry("eye_discharge", "Eye discharge"),
    entry("red_eyes", "Red eyes"),
    entry("squinting", "Squinting"),
    entry("cloudy_eyes", "Cloudy eyes"),
    entry("ear_scratching", "Scratching at ears"),
    entry("head_shaking", "Head shaking"),
    entry("ear_odor", "Ear odor or discharge"),
];

const URINARY_SYMPTOMS: &[SymptomEntry] = &[
    entry("frequent_urination", "Frequent urination"),
    entry("straining_to_urinate", "Straining to urinate"),
    entry("blood_in_urine", "Blood in urine"),
    entry("accidents_indoors", "Accidents indoors"),
    entry("excessive_licking_genitals", "Licking genital area"),
];

const ORAL_DENTAL_SYMPTOMS: &[SymptomEntry] = &[
    entry("bad_breath", "Bad breath"),
    entry("difficulty_chewing", "Difficulty chewing"),
    entry("bleeding_gums", "Bleeding gums"),
    entry("pawing_at_mouth", "Pawing at the mouth"),
    entry("broken_tooth", "Broken tooth"),
];

const OTHER_SYMPTOMS: &[SymptomEntry] = &[
    entry("weight_loss", "Weight loss"),
    entry("weight_gain", "Weight gain"),
    entry("increased_thirst", "Drinking more than usual"),
    entry("swelling", "Swelling"),
    entry("general_unwell", "Just not acting right"),
];

const GENERAL_ADDITIONAL_SYMPTOMS: &[SymptomEntry] = &[
    entry("fever", "Feels warm or feverish"),
    entry("lethargy", "Lethargy"),
    entry("vomiting", "Vomiting"),
    entry("diarrhea", "Diarrhea"),
    entry("loss_of_appetite", "Loss of appetite"),
    entry("weight_loss", "Weight loss"),
    entry("increased_thirst", "Drinking more than usual"),
    entry("hiding", "Hiding more than usual"),
    entry("trembling", "Trembling"),
    entry("pain_when_touched", "Pain when touched"),
];

const BIRD_SYMPTOMS: &[SymptomEntry] = &[
    entry("drooping_wing", "Drooping wing"),
    entry("fluffed_feathers", "Fluffed-up feathers"),
    entry("tail_bobbing", "Tail bobbing while breathing"),
    entry("sitting_on_cage_floor", "Sitting on the cage floor"),
    entry("feather_plucking", "Feather plucking"),
    entry("abnormal_droppings", "Change in droppings"),
];

const FISH_SYMPTOMS: &[SymptomEntry] = &[
    entry("gasping_at_surface", "Gasping at the surface"),
    entry("clamped_fins", "Clamped fins"),
    entry("white_spots", "White spots on body or fins"),
    entry("floating_abnormally", "Floating or sinking abnormally"),
    entry("fin_rot", "Frayed or rotting fins"),
];

const RABBIT_SYMPTOMS: &[SymptomEntry] = &[
    entry("no_droppings", "No droppings in 12 hours"),
    entry("teeth_grinding", "Loud teeth grinding"),
    entry("head_tilt", "Head tilt"),
    entry("hunched_posture", "Hunched posture"),
    entry("soiled_bottom", "Soiled bottom"),
];

const SMALL_MAMMAL_SYMPTOMS: &[SymptomEntry] = &[
    entry("wet_tail", "Wet tail"),
    entry("overgrown_teeth", "Overgrown teeth"),
    entry("crusty_eyes", "Crusty eyes"),
    entry("labored_squeaking", "Wheezing or clicking sounds"),
    entry("patchy_fur", "Patchy fur"),
];

/// The owner's main reason for starting the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainConcern {
    Digestive,
    Respiratory,
    SkinCoat,
    Behavioral,
    Movement,
    EyesEars,
    Urinary,
    OralDental,
    Other,
}

impl MainConcern {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Digestive,
            Self::Respiratory,
            Self::SkinCoat,
            Self::Behavioral,
            Self::Movement,
            Self::EyesEars,
            Self::Urinary,
            Self::OralDental,
            Self::Other,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Digestive => "digestive",
            Self::Respiratory => "respiratory",
            Self::SkinCoat => "skin_coat",
            Self::Behavioral => "behavioral",
            Self::Movement => "movement",
            Self::EyesEars => "eyes_ears",
            Self::Urinary => "urinary",
            Self::OralDental => "oral_dental",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Digestive => "Digestive Issues",
            Self::Respiratory => "Breathing Problems",
            Self::SkinCoat => "Skin & Coat",
            Self::Behavioral => "Behavior Changes",
            Self::Movement => "Movement & Mobility",
            Self::EyesEars => "Eyes & Ears",
            Self::Urinary => "Urinary Issues",
            Self::OralDental => "Mouth & Teeth",
            Self::Other => "Something Else",
        }
    }

    /// Triage category forwarded to the diagnosis service.
    pub const fn vtl_category(self) -> &'static str {
        match self {
            Self::Digestive => "Gastrointestinal",
            Self::Respiratory => "Respiratory",
            Self::SkinCoat => "Dermatological",
            Self::Behavioral => "Neurological",
            Self::Movement => "Musculoskeletal",
            Self::EyesEars => "Ophthalmic/Otic",
            Self::Urinary => "Urological",
            Self::OralDental => "Dental",
            Self::Other => "General",
        }
    }

    pub const fn primary_symptoms(self) -> &'static [SymptomEntry] {
        match self {
            Self::Digestive => DIGESTIVE_SYMPTOMS,
            Self::Respiratory => RESPIRATORY_SYMPTOMS,
            Self::SkinCoat => SKIN_COAT_SYMPTOMS,
            Self::Behavioral => BEHAVIORAL_SYMPTOMS,
            Self::Movement => MOVEMENT_SYMPTOMS,
            Self::EyesEars => EYES_EARS_SYMPTOMS,
            Self::Urinary => URINARY_SYMPTOMS,
            Self::OralDental => ORAL_DENTAL_SYMPTOMS,
            Self::Other => OTHER_SYMPTOMS,
        }
    }

    pub fn offers_symptom(self, key: &str) -> bool {
        self.primary_symptoms().iter().any(|entry| entry.key == key)
    }
}

/// Species families that carry their own additional symptom group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesCategory {
    Bird,
    Fish,
    Rabbit,
    SmallMammal,
}

impl SpeciesCategory {
    /// Maps a free-form species string onto a category. Unknown species (dogs, cats,
    /// reptiles, ...) have no dedicated group and yield `None`.
    pub fn from_species(species: &str) -> Option<Self> {
        match species.trim().to_ascii_lowercase().as_str() {
            "bird" | "parrot" | "budgie" | "parakeet" | "cockatiel" | "canary" | "finch"
            | "lovebird" | "cockatoo" => Some(Self::Bird),
            "fish" | "goldfish" | "betta" | "koi" | "guppy" => Some(Self::Fish),
            "rabbit" | "bunny" => Some(Self::Rabbit),
            "small mammal" | "small_mammal" | "hamster" | "guinea pig" | "guinea_pig"
            | "gerbil" | "rat" | "mouse" | "chinchilla" | "ferret" | "degu" => {
                Some(Self::SmallMammal)
            }
            _ => None,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Bird => "bird",
            Self::Fish => "fish",
            Self::Rabbit => "rabbit",
            Self::SmallMammal => "small_mammal",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bird => "Bird-specific signs",
            Self::Fish => "Fish-specific signs",
            Self::Rabbit => "Rabbit-specific signs",
            Self::SmallMammal => "Small mammal signs",
        }
    }

    pub const fn symptoms(self) -> &'static [SymptomEntry] {
        match self {
            Self::Bird => BIRD_SYMPTOMS,
            Self::Fish => FISH_SYMPTOMS,
            Self::Rabbit => RABBIT_SYMPTOMS,
            Self::SmallMammal => SMALL_MAMMAL_SYMPTOMS,
        }
    }
}

pub fn general_additional_symptoms() -> &'static [SymptomEntry] {
    GENERAL_ADDITIONAL_SYMPTOMS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "category")]
pub enum SymptomGroupKind {
    General,
    Species(SpeciesCategory),
}

/// One toggleable block of optional symptoms offered in the extras step.
#[derive(Debug, Clone, Serialize)]
pub struct SymptomGroup {
    pub kind: SymptomGroupKind,
    pub label: &'static str,
    pub symptoms: &'static [SymptomEntry],
}

/// Additional symptom groups for a species: always the general group, plus the
/// species group when the species maps to a known category.
pub fn additional_symptom_groups(species: &str) -> Vec<SymptomGroup> {
    let mut groups = vec![SymptomGroup {
        kind: SymptomGroupKind::General,
        label: "General signs",
        symptoms: general_additional_symptoms(),
    }];

    if let Some(category) = SpeciesCategory::from_species(species) {
        groups.push(SymptomGroup {
            kind: SymptomGroupKind::Species(category),
            label: category.label(),
            symptoms: category.symptoms(),
        });
    }

    groups
}

pub fn offers_additional_symptom(species: &str, key: &str) -> bool {
    additional_symptom_groups(species)
        .iter()
        .flat_map(|group| group.symptoms.iter())
        .any(|entry| entry.key == key)
}

/// Looks up owner-facing wording for any symptom key in the catalog.
pub fn symptom_label(key: &str) -> Option<&'static str> {
    let primary = MainConcern::ordered()
        .into_iter()
        .flat_map(|concern| concern.primary_symptoms().iter());
    let species = [
        SpeciesCategory::Bird,
        SpeciesCategory::Fish,
        SpeciesCategory::Rabbit,
        SpeciesCategory::SmallMammal,
    ]
    .into_iter()
    .flat_map(|category| category.symptoms().iter());

    primary
        .chain(GENERAL_ADDITIONAL_SYMPTOMS.iter())
        .chain(species)
        .find(|entry| entry.key == key)
        .map(|entry| entry.label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const fn ordered() -> [Self; 3] {
        [Self::Mild, Self::Moderate, Self::Severe]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild - noticeable but eating and acting mostly normal",
            Self::Moderate => "Moderate - clearly uncomfortable or off routine",
            Self::Severe => "Severe - very distressed or unable to function",
        }
    }
}

/// How long the problem has been going on, bucketed for risk weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "lt_24h")]
    UnderOneDay,
    #[serde(rename = "1_3d")]
    OneToThreeDays,
    #[serde(rename = "4_7d")]
    FourToSevenDays,
    #[serde(rename = "gt_1w")]
    OverOneWeek,
}

impl DurationBucket {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::UnderOneDay,
            Self::OneToThreeDays,
            Self::FourToSevenDays,
            Self::OverOneWeek,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::UnderOneDay => "lt_24h",
            Self::OneToThreeDays => "1_3d",
            Self::FourToSevenDays => "4_7d",
            Self::OverOneWeek => "gt_1w",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderOneDay => "Less than 24 hours",
            Self::OneToThreeDays => "1-3 days",
            Self::FourToSevenDays => "4-7 days",
            Self::OverOneWeek => "More than a week",
        }
    }

    /// Representative number of days used downstream for risk weighting.
    pub const fn days(self) -> f64 {
        match self {
            Self::UnderOneDay => 0.5,
            Self::OneToThreeDays => 2.0,
            Self::FourToSevenDays => 5.0,
            Self::OverOneWeek => 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progression {
    GettingWorse,
    StayingSame,
    GettingBetter,
    Intermittent,
}

impl Progression {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::GettingWorse,
            Self::StayingSame,
            Self::GettingBetter,
            Self::Intermittent,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::GettingWorse => "getting_worse",
            Self::StayingSame => "staying_same",
            Self::GettingBetter => "getting_better",
            Self::Intermittent => "intermittent",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GettingWorse => "Getting worse",
            Self::StayingSame => "Staying about the same",
            Self::GettingBetter => "Getting better",
            Self::Intermittent => "Comes and goes",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_emergency: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConcernView {
    pub key: &'static str,
    pub label: &'static str,
    pub vtl_category: &'static str,
    pub symptoms: &'static [SymptomEntry],
}

#[derive(Debug, Clone, Serialize)]
pub struct DurationView {
    pub key: &'static str,
    pub label: &'static str,
    pub days: f64,
}

/// Serializable snapshot of the whole catalog for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub respiration: Vec<OptionView>,
    pub alertness: Vec<OptionView>,
    pub perfusion: Vec<OptionView>,
    pub critical_symptoms: Vec<OptionView>,
    pub concerns: Vec<ConcernView>,
    pub severities: Vec<OptionView>,
    pub durations: Vec<DurationView>,
    pub progressions: Vec<OptionView>,
    pub additional_symptoms: Vec<SymptomGroup>,
}

fn rap_views<O: RapOption>(options: impl IntoIterator<Item = O>) -> Vec<OptionView> {
    options
        .into_iter()
        .map(|option| OptionView {
            key: option.key(),
            label: option.label(),
            is_emergency: Some(option.is_emergency()),
        })
        .collect()
}

impl CatalogView {
    pub fn for_species(species: &str) -> Self {
        Self {
            respiration: rap_views(RespirationOption::ordered()),
            alertness: rap_views(AlertnessOption::ordered()),
            perfusion: rap_views(PerfusionOption::ordered()),
            critical_symptoms: CriticalSymptom::ordered()
                .into_iter()
                .map(|symptom| OptionView {
                    key: symptom.key(),
                    label: symptom.label(),
                    is_emergency: Some(true),
                })
                .collect(),
            concerns: MainConcern::ordered()
                .into_iter()
                .map(|concern| ConcernView {
                    key: concern.key(),
                    label: concern.label(),
                    vtl_category: concern.vtl_category(),
                    symptoms: concern.primary_symptoms(),
                })
                .collect(),
            severities: Severity::ordered()
                .into_iter()
                .map(|severity| OptionView {
                    key: severity.key(),
                    label: severity.label(),
                    is_emergency: None,
                })
                .collect(),
            durations: DurationBucket::ordered()
                .into_iter()
                .map(|duration| DurationView {
                    key: duration.key(),
                    label: duration.label(),
                    days: duration.days(),
                })
                .collect(),
            progressions: Progression::ordered()
                .into_iter()
                .map(|progression| OptionView {
                    key: progression.key(),
                    label: progression.label(),
                    is_emergency: None,
                })
                .collect(),
            additional_symptoms: additional_symptom_groups(species),
        }
    }
}
