//! Narrative flavor: adventurer names and trap descriptions.
//!
//! Flavor draws from its own stream so that naming characters or describing
//! deaths never shifts the loot the generator produces.

use rustc_hash::FxHashSet;

use crate::core::GameRng;

const FIRST_NAMES: &[&str] = &[
    "Eddard", "Rob", "Jon", "Sansa", "Theon", "Arya", "Brandon", "Hodor", "Jaime", "Tyrion",
    "Samwell", "Stannis", "Bilbo", "Frodo", "Legolas", "Gandalf", "Lyn", "Eliwood", "Hector",
    "Fiora", "Marth", "Lucina", "Chrom", "Anna", "Deborah", "Rebecca", "Zeus", "Athena",
    "Apollo", "Juno", "Icarus", "Chell", "Gordon", "Samus", "Link", "Winry", "Mario", "Luigi",
    "Misty", "Brock", "Kirby", "Lucy", "Aerith", "Cloud", "Tifa", "Morgan", "Harry", "Homer",
    "Lisa", "Elsa", "Regina", "Sonja", "Ryu", "Olivia", "Quinn", "Elmer",
];

const LAST_NAMES: &[&str] = &[
    "Stark", "Lannister", "Snow", "Tarley", "Bolton", "Stormborn", "Targaryen", "Baggins",
    "Churchill", "Freeman", "Elric", "Rockbell", "McCloud", "Smith", "Ketchum", "Miyamoto",
    "Heartfilia", "Oak", "Elm", "Birch", "Strife", "Lockheart", "Potter", "Sparrow", "Simpson",
    "Young", "Swan", "Parker", "Moore", "Barnes", "Ridley",
];

const SUFFIXES: &[&str] = &[
    "I", "II", "III", "IV", "V", "VI", "IX", "X", "Jr.", "Sr.", "PhD", "MD", "DDS",
];

const MONIKERS: &[&str] = &[
    "the Great", "the Smuggler", "the Cat Burglar", "the Insomniac", "the Forgettable",
    "the Orphan", "the Wizard", "the Lazy", "the Untamed", "the Pirate", "the Hero",
    "the Unkempt", "the Peasant", "the Impaler", "of Arendale", "the Simpleton",
];

const TRAPS: &[&str] = &[
    "was sliced in half by a swinging blade trap.",
    "fell into a pit of spikes.",
    "was crushed by a boulder.",
    "was eaten by a wild shriekbat.",
    "was shot by a crossbow trap.",
    "fell into a bottomless pit.",
    "was devoured by a mimic.",
    "was incinerated by a fire trap.",
    "got sucked into a dimensional vortex.",
    "mysteriously vanished.",
    "was flung into a pool of acid.",
    "was stung by a giant bee.",
    "was absorbed by a gelatinous monster.",
    "was bitten by a swarm of venomous snakes.",
    "was decapitated by a sword trap.",
];

/// Flavor text source for one game.
#[derive(Clone, Debug)]
pub struct Flavor {
    rng: GameRng,
    used_names: FxHashSet<String>,
}

impl Flavor {
    /// Create a flavor source on its own stream.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            used_names: FxHashSet::default(),
        }
    }

    /// A fresh adventurer name, unique within this game.
    ///
    /// Three in four names get a surname (one in five of those also a
    /// suffix); the rest get a moniker.
    ///
    /// After eight collisions the first candidate gets a regnal numeral
    /// instead ("Jon Snow II").
    pub fn adventurer_name(&mut self) -> String {
        let first = self.random_name();
        let mut name = first.clone();
        let mut attempts = 1;
        while self.used_names.contains(&name) && attempts < 8 {
            name = self.random_name();
            attempts += 1;
        }
        let mut numeral = 2;
        while self.used_names.contains(&name) {
            name = format!("{first} {}", roman(numeral));
            numeral += 1;
        }
        self.used_names.insert(name.clone());
        name
    }

    fn random_name(&mut self) -> String {
        let roll = self.rng.gen_f64();
        let mut parts = vec![self.pick(FIRST_NAMES)];
        if roll < 0.75 {
            parts.push(self.pick(LAST_NAMES));
            if roll < 0.15 {
                parts.push(self.pick(SUFFIXES));
            }
        } else {
            parts.push(self.pick(MONIKERS));
        }
        parts.join(" ")
    }

    /// A random trap death, phrased to follow the victim's name.
    pub fn trap(&mut self) -> &'static str {
        self.pick(TRAPS)
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        self.rng.choose(options).copied().unwrap_or_default()
    }
}

fn roman(mut n: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}
