//! Scan dossiers: the descriptive record revealed when a body is scanned.
//!
//! A dossier is a pure function of `(seed, is_moon, explicit_name)`. Values
//! are drawn from one stream in this order:
//!
//! 1. life roll
//! 2. population roll
//! 3. temperature roll
//! 4. moon temperature jitter (moons only)
//! 5. temperature variation
//! 6. age
//! 7. day length
//! 8. year length
//! 9. name table index and numeric suffix (only without an explicit name)
//! 10. species: category, sub-category, descriptor, prefix, suffix, form
//!     (only when life is present and the name is not reserved)
//!
//! Every roll is drawn even when a branch ignores it, so the reserved name
//! changes the outputs but never shifts the cursor of later draws.

use serde::Serialize;

use crate::rng::Mulberry32;

/// Case-insensitive name that forces a fixed palette and dossier.
const RESERVED_NAME: &str = "ollivia";

/// Species of every body carrying the reserved name.
pub const RESERVED_SPECIES: &str = "Aesthetiflora (Luminescent, Harmonious Ecosystem)";

/// Lowest population of a body carrying the reserved name.
const RESERVED_POPULATION_FLOOR: u64 = 100_000_000;

const MAX_POPULATION: f64 = 10_000_000_000.0;

const PLANET_NAMES: [&str; 24] = [
    "Xylos", "Aelon", "Veridian", "Obsidian", "Celestia", "Aethel", "Solara", "Lunara",
    "Titanus", "Zephyr", "Astra", "Orion", "Lyra", "Nebula", "Terra", "Yeawn", "Xia",
    "Sylus", "Calypso", "Aether", "Lumine", "Vesper", "Halcyon", "Meridian",
];

const MOON_NAMES: [&str; 16] = [
    "Lune", "Paimon", "Tsuko", "Io", "Callisto", "Triton", "Elxi", "Oberon", "Hae",
    "Umbriel", "Xue", "Ariel", "Rhea", "Iapetus", "Daiso", "Phobe",
];

const CATEGORIES: [&str; 5] = ["Flora", "Fauna", "Fungi", "Microbial", "Sentient"];

const FLORA: [&str; 10] = [
    "Photosynthetic", "Chemosynthetic", "Carnivorous", "Arboreal", "Aquatic",
    "Crystalline", "Bioluminescent", "Parasitic", "Symbiotic", "Epiphytic",
];
const FAUNA: [&str; 14] = [
    "Mammalian", "Reptilian", "Avian", "Insectoid", "Aquatic", "Amphibious", "Arachnid",
    "Cephalopod", "Exoskeletal", "Endoskeletal", "Flying", "Burrowing", "Gliding",
    "Bioluminescent",
];
const FUNGI: [&str; 9] = [
    "Mycorrhizal", "Saprophytic", "Parasitic", "Symbiotic", "Bioluminescent",
    "Carnivorous", "Spore-based", "Hyphal", "Yeast-based",
];
const MICROBIAL: [&str; 9] = [
    "Bacterial", "Viral", "Archaeal", "Protist", "Nanobiotic", "Plasmid-based",
    "Extremophilic", "Photosynthetic", "Chemosynthetic",
];
const SENTIENT: [&str; 10] = [
    "Bipedal", "Quadrupedal", "Avianoid", "Aquatic-Intelligent", "Arboreal",
    "Subterranean", "Aerial", "Hive-mind", "Telepathic", "Technological",
];

const DESCRIPTORS: [&str; 30] = [
    "Bio-luminescent", "Cryo-tolerant", "Hydrophilic", "Xenomorphic", "Symbiotic",
    "Silicate-based", "Carbon-based", "Silicon-based", "Metallic", "Crystalline",
    "Radiotrophic", "Thermophilic", "Psychrophilic", "Acidophilic", "Halophilic",
    "Barophilic", "Electrogenic", "Magnetic", "Gaseous", "Plasmic", "Chitinous",
    "Amorphous", "Modular", "Colonial", "Psionic", "Energy-based", "Phase-shifting",
    "Quantum-entangled", "Time-perceptive", "Gravity-resistant",
];

const PREFIXES: [&str; 24] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Theta", "Kappa", "Lambda",
    "Sigma", "Omega", "Nova", "Quasar", "Pulsar", "Nebula", "Cosmo", "Astro", "Stellar",
    "Lunar", "Solar", "Void", "Aether", "Chrono", "Hyper",
];

const SUFFIXES: [&str; 24] = [
    "phage", "vore", "morph", "pod", "nid", "form", "oid", "ite", "ling", "spore",
    "cyte", "phyll", "root", "stem", "spike", "scale", "shell", "wing", "tentacle",
    "flagella", "spine", "claw", "fin", "node",
];

fn sub_categories(category: &str) -> &'static [&'static str] {
    match category {
        "Flora" => &FLORA,
        "Fauna" => &FAUNA,
        "Fungi" => &FUNGI,
        "Microbial" => &MICROBIAL,
        _ => &SENTIENT,
    }
}

/// True if `name` is the reserved name, ignoring case and surrounding space.
pub fn is_reserved_name(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(RESERVED_NAME)
}

/// Revealed scan record of a planet or moon.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dossier {
    /// Display name: the explicit name, or a table name with numeric suffix.
    pub name: String,
    /// Whether the body was generated as a moon.
    pub is_moon: bool,
    /// Life present.
    pub has_life: bool,
    /// Population, zero without life.
    pub population: u64,
    /// Surface temperature in degrees Celsius.
    pub temperature_c: i32,
    /// Age in billions of years, in `[1, 11)`.
    pub age_billion_years: f64,
    /// Dominant species, `None` without life.
    pub species: Option<String>,
    /// Length of a day in hours.
    pub day_length_hours: f64,
    /// Length of a year in days.
    pub year_length_days: u32,
}

impl Dossier {
    /// Overlay text, one entry per line.
    ///
    /// `moon_count` is appended for planets; moons ignore it.
    pub fn lines(&self, moon_count: usize) -> Vec<String> {
        let mut lines = vec![
            format!("Code: {}", self.name),
            format!("Life form: {}", if self.has_life { "Yes" } else { "No" }),
            format!("Species: {}", self.species.as_deref().unwrap_or("None")),
            format!("Population: {}", group_thousands(self.population)),
            format!("Temperature: {}°C", self.temperature_c),
            format!("Age: {:.2} billion years", self.age_billion_years),
        ];
        if !self.is_moon {
            lines.push(format!("Day Length: {:.1} hours", self.day_length_hours));
            lines.push(format!("Year Length: {} days", self.year_length_days));
            lines.push(format!("Number of Moons: {moon_count}"));
        }
        lines
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Generate the dossier of a body.
pub fn generate_dossier(seed: u32, is_moon: bool, explicit_name: Option<&str>) -> Dossier {
    let mut rng = Mulberry32::new(seed);

    let life_roll = rng.next_f64();
    let population_roll = rng.next_f64();
    let temperature_roll = rng.next_f64();
    let moon_jitter = if is_moon {
        (rng.next_f64() - 0.5) * 50.0
    } else {
        0.0
    };
    let variation = rng.next_f64() * 50.0 - 25.0;
    let age_billion_years = rng.next_f64() * 10.0 + 1.0;
    let day_length_hours = ((rng.next_f64() * 100.0 + 5.0) * 10.0).round() / 10.0;
    let year_length_days = (rng.next_f64() * 1000.0 + 50.0).round() as u32;

    let name = match explicit_name {
        Some(name) => name.trim().to_string(),
        None if is_moon => format!("{}-{}", rng.pick(&MOON_NAMES), rng.below(9)),
        None => format!("{}-{}", rng.pick(&PLANET_NAMES), rng.below(999)),
    };
    let reserved = is_reserved_name(&name);

    let has_life = reserved || life_roll > 0.65;
    let mut population = if has_life {
        (population_roll * MAX_POPULATION).floor() as u64
    } else {
        0
    };
    let temperature_c = if reserved {
        population = population.max(RESERVED_POPULATION_FLOOR);
        (15.0 + temperature_roll * 10.0).round() as i32
    } else {
        let base = -100.0 + temperature_roll * 200.0 + moon_jitter;
        (base + variation).round() as i32
    };

    let species = if reserved {
        Some(RESERVED_SPECIES.to_string())
    } else if has_life {
        Some(generate_species(&mut rng))
    } else {
        None
    };

    Dossier {
        name,
        is_moon,
        has_life,
        population,
        temperature_c,
        age_billion_years,
        species,
        day_length_hours,
        year_length_days,
    }
}

fn generate_species(rng: &mut Mulberry32) -> String {
    let category = *rng.pick(&CATEGORIES);
    let sub_category = *rng.pick(sub_categories(category));
    let descriptor = *rng.pick(&DESCRIPTORS);
    let prefix = *rng.pick(&PREFIXES);
    let suffix = *rng.pick(&SUFFIXES);

    if rng.chance(0.7) {
        format!("{prefix}-{sub_category} {descriptor} {suffix}")
    } else {
        format!("{descriptor} {sub_category} {category}")
    }
}
