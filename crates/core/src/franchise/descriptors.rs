//! Built-in franchise descriptor table.
//!
//! Descriptors are static per process lifetime. All pattern strings are
//! stored pre-normalized (lowercase, no diacritics, no punctuation) so
//! the detector can compare against `text::normalize` output directly.
//! Declaration order matters: it breaks ties between equally specific
//! matches.

/// A known franchise: match patterns plus expansion queries.
#[derive(Debug)]
pub struct SeriesDescriptor {
    /// Canonical display name.
    pub canonical_name: &'static str,
    /// Stable identifier used in cache keys and diagnostics.
    pub slug: &'static str,
    /// Literal franchise names (normalized).
    pub names: &'static [&'static str],
    /// Character names mapping to this franchise (normalized).
    pub characters: &'static [&'static str],
    /// Sub-series / spin-off line names (normalized). More specific than
    /// the base franchise name.
    pub sub_series: &'static [&'static str],
    /// Expansion queries issued against the store, in priority order.
    pub expansions: &'static [&'static str],
}

pub static SERIES: &[SeriesDescriptor] = &[
    SeriesDescriptor {
        canonical_name: "Pokemon",
        slug: "pokemon",
        names: &["pokemon", "pocket monsters"],
        characters: &["pikachu", "eevee", "charizard", "mewtwo"],
        sub_series: &["pokemon mystery dungeon", "pokemon ranger", "pokemon stadium"],
        expansions: &[
            "pokemon",
            "pokemon version",
            "pokemon mystery dungeon",
            "pokemon stadium",
            "pokemon ranger",
            "pokemon snap",
            "pokemon pinball",
            "pokemon trading card game",
        ],
    },
    SeriesDescriptor {
        canonical_name: "Super Mario",
        slug: "mario",
        names: &["super mario", "mario bros", "mario"],
        characters: &["luigi", "peach", "bowser", "yoshi", "wario", "toad"],
        sub_series: &["mario kart", "mario party", "paper mario", "mario golf", "mario tennis"],
        expansions: &[
            "super mario",
            "mario bros",
            "mario kart",
            "mario party",
            "paper mario",
            "mario golf",
            "mario tennis",
            "mario rpg",
        ],
    },
    SeriesDescriptor {
        canonical_name: "The Legend of Zelda",
        slug: "zelda",
        names: &["the legend of zelda", "legend of zelda", "zelda"],
        characters: &["link", "ganon", "ganondorf", "midna"],
        sub_series: &["hyrule warriors"],
        expansions: &[
            "the legend of zelda",
            "zelda",
            "links awakening",
            "ocarina of time",
            "majoras mask",
            "breath of the wild",
            "hyrule warriors",
        ],
    },
    SeriesDescriptor {
        canonical_name: "Final Fantasy",
        slug: "final-fantasy",
        names: &["final fantasy", "ff"],
        characters: &["cloud strife", "sephiroth", "chocobo"],
        sub_series: &["final fantasy tactics", "crystal chronicles", "chocobo racing"],
        expansions: &[
            "final fantasy",
            "final fantasy vii",
            "final fantasy tactics",
            "crystal chronicles",
            "chocobo",
        ],
    },
    SeriesDescriptor {
        canonical_name: "Sonic the Hedgehog",
        slug: "sonic",
        names: &["sonic the hedgehog", "sonic"],
        characters: &["tails", "knuckles", "shadow the hedgehog", "dr robotnik", "eggman"],
        sub_series: &["sonic riders", "sonic rush"],
        expansions: &[
            "sonic the hedgehog",
            "sonic",
            "sonic adventure",
            "sonic riders",
            "sonic rush",
            "sonic mania",
        ],
    },
    SeriesDescriptor {
        canonical_name: "Metroid",
        slug: "metroid",
        names: &["metroid"],
        characters: &["samus", "samus aran", "ridley"],
        sub_series: &["metroid prime"],
        expansions: &[
            "metroid",
            "super metroid",
            "metroid prime",
            "metroid fusion",
            "metroid dread",
        ],
    },
    SeriesDescriptor {
        canonical_name: "Mega Man",
        slug: "mega-man",
        names: &["mega man", "megaman", "rockman"],
        characters: &["zero", "protoman", "dr wily"],
        sub_series: &["mega man x", "mega man battle network", "mega man zero"],
        expansions: &[
            "mega man",
            "mega man x",
            "mega man battle network",
            "mega man zero",
            "mega man legends",
        ],
    },
    SeriesDescriptor {
        canonical_name: "Kirby",
        slug: "kirby",
        names: &["kirby"],
        characters: &["meta knight", "king dedede"],
        sub_series: &["kirby air ride"],
        expansions: &[
            "kirby",
            "kirbys dream land",
            "kirby super star",
            "kirby air ride",
            "kirbys adventure",
        ],
    },
    SeriesDescriptor {
        canonical_name: "Dragon Quest",
        slug: "dragon-quest",
        names: &["dragon quest", "dragon warrior"],
        characters: &["slime"],
        sub_series: &["dragon quest monsters", "dragon quest builders"],
        expansions: &[
            "dragon quest",
            "dragon warrior",
            "dragon quest monsters",
            "dragon quest builders",
        ],
    },
    SeriesDescriptor {
        canonical_name: "Castlevania",
        slug: "castlevania",
        names: &["castlevania", "akumajo dracula"],
        characters: &["simon belmont", "alucard", "dracula"],
        sub_series: &[],
        expansions: &[
            "castlevania",
            "symphony of the night",
            "aria of sorrow",
            "rondo of blood",
        ],
    },
];
