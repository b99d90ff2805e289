//! Fixed classification taxonomies.
//!
//! Every taxonomy is an ordered list of rules; the first rule whose term list
//! matches a value supplies its label. The tables are plain data and the
//! matching itself lives in `shelter-transform`.

use serde::Serialize;

use crate::vocab::UNKNOWN;

/// How the terms of a rule are compared against a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The whole value equals a term.
    Exact,
    /// A term occurs anywhere in the value.
    Contains,
    /// A term occurs in the value between word boundaries, ignoring case.
    Word,
}

/// One labelled term list.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Rule {
    pub label: &'static str,
    pub terms: &'static [&'static str],
}

/// An ordered rule list, with the label of values no rule matches.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Taxonomy {
    pub name: &'static str,
    pub match_kind: MatchKind,
    pub rules: &'static [Rule],
    /// `None` when an unmatched value carries no label at all.
    pub default: Option<&'static str>,
}

impl Taxonomy {
    /// Every label the taxonomy can emit, in rule order, default last if any.
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<&'static str> = Vec::with_capacity(self.rules.len() + 1);
        for rule in self.rules {
            if !labels.contains(&rule.label) {
                labels.push(rule.label);
            }
        }
        if let Some(default) = self.default
            && !labels.contains(&default)
        {
            labels.push(default);
        }
        labels
    }
}

/// Intake conditions that set the pregnant-or-nursing flag.
pub const REPRODUCTIVE_CONDITIONS: &[&str] = &["pregnant", "nursing"];

pub static INTAKE_CONDITION: Taxonomy = Taxonomy {
    name: "intake_condition",
    match_kind: MatchKind::Exact,
    rules: &[
        Rule {
            label: "medical",
            terms: &["sick", "injured", "medical", "aged", "pregnant", "nursing"],
        },
        Rule {
            label: "behavior",
            terms: &["feral", "behavior"],
        },
        Rule {
            label: "routine",
            terms: &["normal"],
        },
    ],
    default: Some(UNKNOWN),
};

pub static OUTCOME_TYPE: Taxonomy = Taxonomy {
    name: "outcome_type",
    match_kind: MatchKind::Exact,
    rules: &[
        Rule {
            label: UNKNOWN,
            terms: &["nan", "missing"],
        },
        Rule {
            label: "alive",
            terms: &["rto-adopt", "adoption", "return to owner"],
        },
        Rule {
            label: "admin",
            terms: &["transfer", "relocate"],
        },
        Rule {
            label: "deceased",
            terms: &["euthanasia", "died", "disposal"],
        },
    ],
    default: Some(UNKNOWN),
};

pub static OUTCOME_SUBTYPE: Taxonomy = Taxonomy {
    name: "outcome_subtype",
    match_kind: MatchKind::Exact,
    rules: &[
        // physical location or temporary status
        Rule {
            label: "location",
            terms: &[
                "in kennel",
                "offsite",
                "at vet",
                "barn",
                "enroute",
                "in surgery",
            ],
        },
        // reason behind the outcome
        Rule {
            label: "behavior",
            terms: &[
                "suffering",
                "medical",
                "aggressive",
                "rabies risk",
                "behavior",
            ],
        },
        // shelter programs and transfer partners
        Rule {
            label: "program",
            terms: &[
                "partner",
                "underage",
                "foster",
                "in foster",
                "snr",
                "scrp",
                "prc",
            ],
        },
        Rule {
            label: "admin",
            terms: &[
                "field",
                "possible theft",
                "customer s",
                "court/investigation",
                "emer",
            ],
        },
        Rule {
            label: UNKNOWN,
            terms: &["nan"],
        },
    ],
    default: Some(UNKNOWN),
};

/// Species label that is refined by breed.
pub const OTHER_SPECIES: &str = "other";

pub static OTHER_SPECIES_BREED: Taxonomy = Taxonomy {
    name: "other_species_breed",
    match_kind: MatchKind::Exact,
    rules: &[
        Rule {
            label: "rabbit",
            terms: &[
                "polish",
                "rabbit sh",
                "ringtail",
                "californian",
                "lionhead",
                "dutch",
                "angora-french",
                "lop-holland",
                "angora-satin",
                "rex",
                "rhinelander",
                "havana",
                "new zealand wht",
                "netherlnd dwarf",
                "lop-english",
                "english spot",
                "rabbit lh",
                "cinnamon",
                "american",
                "hotot",
                "lop-amer fuzzy",
                "lop-mini",
                "checkered giant",
                "american sable",
                "flemish giant",
                "harlequin",
                "chinchilla-stnd",
                "rex-mini",
                "jersey wooly",
                "silver",
                "cottontail",
                "britannia petit",
                "beveren",
                "dwarf hotot",
                "himalayan",
                "angora-english",
                "belgian hare",
            ],
        },
        Rule {
            label: "rodent_small_pet",
            terms: &[
                "guinea pig",
                "ferret",
                "chinchilla",
                "hamster",
                "rat",
                "mouse",
                "hedgehog",
                "gerbil",
                "sugar glider",
                "prairie dog",
                "chinchilla-amer",
            ],
        },
        Rule {
            label: "reptile_amphibian",
            terms: &["snake", "lizard", "tortoise", "turtle", "frog"],
        },
        Rule {
            label: "arthropod_aquatic",
            terms: &["tarantula", "hermit crab", "cold water", "tropical"],
        },
        Rule {
            label: "wildlife",
            terms: &[
                "raccoon",
                "opossum",
                "bat",
                "fox",
                "squirrel",
                "skunk",
                "armadillo",
                "coyote",
                "otter",
                "deer",
                "bobcat",
            ],
        },
    ],
    default: Some(UNKNOWN),
};

/// Substring of the species label that marks a dog.
pub const DOG_SPECIES: &str = "dog";

pub static AKC_GROUP: Taxonomy = Taxonomy {
    name: "akc_group",
    match_kind: MatchKind::Exact,
    rules: &[
        Rule {
            label: "toy",
            terms: &[
                "affenpinscher",
                "cavalier span",
                "chihuahua longhair",
                "chihuahua shorthair",
                "chinese crested",
                "entlebucher",
                "havanese",
                "italian greyhound",
                "jack russell terrier",
                "japanese chin",
                "maltese",
                "manchester terrier",
                "miniature pinscher",
                "miniature poodle",
                "papillon",
                "pekingese",
                "pomeranian",
                "pug",
                "shih tzu",
                "silky terrier",
                "toy fox terrier",
                "toy poodle",
                "yorkshire terrier",
            ],
        },
        Rule {
            label: "hound",
            terms: &[
                "afghan hound",
                "american eskimo",
                "american foxhound",
                "basenji",
                "basset hound",
                "beagle",
                "black mouth cur",
                "bloodhound",
                "blue lacy",
                "bluetick hound",
                "dachshund",
                "dachshund longhair",
                "dachshund stan",
                "dachshund wirehair",
                "english foxhound",
                "english pointer",
                "greyhound",
                "harrier",
                "ibizan hound",
                "irish wolfhound",
                "norwegian elkhound",
                "otterhound",
                "pharaoh hound",
                "picardy sheepdog",
                "pit bull",
                "plott hound",
                "podengo pequeno",
                "redbone hound",
                "rhod ridgeback",
                "saluki",
                "treeing walker coonhound",
                "whippet",
            ],
        },
        Rule {
            label: "terrier",
            terms: &[
                "airedale terrier",
                "akbash",
                "american staffordshire terrier",
                "australian terrier",
                "border terrier",
                "bull terrier",
                "bull terrier miniature",
                "cairn terrier",
                "chesa bay retr",
                "irish terrier",
                "lakeland terrier",
                "miniature schnauzer",
                "norfolk terrier",
                "norwich terrier",
                "parson russell terrier",
                "patterdale terr",
                "pbgv",
                "rat terrier",
                "scottish terrier",
                "sealyham terr",
                "skye terrier",
                "smooth fox terrier",
                "soft coated wheaten terrier",
                "standard poodle",
                "welsh terrier",
                "west highland",
                "wire hair fox terrier",
            ],
        },
        Rule {
            label: "working",
            terms: &[
                "akita",
                "alaskan husky",
                "alaskan klee kai",
                "alaskan malamute",
                "bernese mountain dog",
                "boerboel",
                "boxer",
                "boykin span",
                "bullmastiff",
                "cane corso",
                "dogo argentino",
                "dogue de bordeaux",
                "german pinscher",
                "german shepherd",
                "glen of imaal",
                "great dane",
                "great pyrenees",
                "greater swiss mountain dog",
                "kuvasz",
                "leonberger",
                "mastiff",
                "mexican hairless",
                "neapolitan mastiff",
                "newfoundland",
                "presa canario",
                "rottweiler",
                "samoyed",
                "siberian husky",
                "standard schnauzer",
                "sussex span",
                "tibetan mastiff",
            ],
        },
        Rule {
            label: "foundation",
            terms: &[
                "american bulldog",
                "american pit bull terrier",
                "australian kelpie",
                "bruss griffon",
                "carolina dog",
                "catahoula",
                "doberman pinsch",
                "dutch sheepdog",
                "feist",
                "hovawart",
                "jindo",
                "kangal",
                "port water dog",
                "spanish mastiff",
                "staffordshire",
                "treeing cur",
                "treeing tennesse brindle",
            ],
        },
        Rule {
            label: "sporting",
            terms: &[
                "anatol shepherd",
                "brittany",
                "clumber spaniel",
                "cocker spaniel",
                "english cocker spaniel",
                "english coonhound",
                "english setter",
                "english shepherd",
                "english springer spaniel",
                "field spaniel",
                "german wirehaired pointer",
                "golden retriever",
                "gordon setter",
                "grand basset griffon vendeen",
                "irish setter",
                "labrador retriever",
                "nova scotia duck tolling retriever",
                "old english bulldog",
                "pointer",
                "spinone italiano",
                "st. bernard rough coat",
                "st. bernard smooth coat",
                "vizsla",
                "weimaraner",
                "welsh springer spaniel",
                "wirehaired pointing griffon",
                "wolf hybrid",
            ],
        },
        Rule {
            label: "herding",
            terms: &[
                "australian cattle dog",
                "australian shepherd",
                "bearded collie",
                "beauceron",
                "bedlington terr",
                "belgian malinois",
                "belgian sheepdog",
                "belgian tervuren",
                "border collie",
                "briard",
                "canaan dog",
                "cardigan welsh corgi",
                "collie rough",
                "collie smooth",
                "german shorthair pointer",
                "old english sheepdog",
                "pembroke welsh corgi",
                "queensland heeler",
                "shetland sheepdog",
                "spanish water dog",
                "swedish vallhund",
                "swiss hound",
            ],
        },
        Rule {
            label: "non_sporting",
            terms: &[
                "bichon frise",
                "boston terrier",
                "bouv flandres",
                "bulldog",
                "chinese sharpei",
                "chow chow",
                "coton de tulear",
                "dalmatian",
                "dandie dinmont",
                "finnish spitz",
                "flat coat retriever",
                "french bulldog",
                "keeshond",
                "lhasa apso",
                "lowchen",
                "schipperke",
                "schnauzer giant",
                "shiba inu",
                "tibetan spaniel",
                "tibetan terrier",
            ],
        },
    ],
    default: Some(UNKNOWN),
};

/// Species label that enables the coat-length grouping.
pub const CAT_SPECIES: &str = "cat";

/// Domestic short/medium/long hair. No default: an unmatched cat breed is
/// unreliable and stays null.
pub static CAT_COAT_LENGTH: Taxonomy = Taxonomy {
    name: "cat_breed_group",
    match_kind: MatchKind::Contains,
    rules: &[
        Rule {
            label: "dsh",
            terms: &["short"],
        },
        Rule {
            label: "dmh",
            terms: &["medium"],
        },
        Rule {
            label: "dlh",
            terms: &["long"],
        },
    ],
    default: None,
};

pub static HAIR_LENGTH: Taxonomy = Taxonomy {
    name: "hair_length",
    match_kind: MatchKind::Word,
    rules: &[
        Rule {
            label: "short",
            terms: &["short", "shorthair", "short-hair", "sh hair", "sd", "s hair"],
        },
        Rule {
            label: "medium",
            terms: &["medium", "med hair", "medium hair", "md hair", "m hair", "mh"],
        },
        Rule {
            label: "long",
            terms: &["long", "longhair", "long-hair", "lg hair", "l hair", "lh"],
        },
    ],
    default: Some(UNKNOWN),
};

/// Label every patterned coat color collapses to.
pub const PATTERNED: &str = "patterned";

/// Color values treated as data-entry errors.
pub const INVALID_COLORS: &[&str] = &["pink"];

/// No default: colors without a pattern keyword keep their value.
pub static COLOR_PATTERN: Taxonomy = Taxonomy {
    name: "color_pattern",
    match_kind: MatchKind::Contains,
    rules: &[Rule {
        label: PATTERNED,
        terms: &[
            "tabby",
            "tiger",
            "calico",
            "tortie",
            "torbie",
            "brindle",
            "tricolor",
            "tri-color",
            "tri color",
            "tick",
            "merle",
            "point",
            "lynx",
        ],
    }],
    default: None,
};

/// Every taxonomy, in the order the pipeline applies them.
pub fn all_taxonomies() -> [&'static Taxonomy; 8] {
    [
        &INTAKE_CONDITION,
        &OUTCOME_TYPE,
        &OUTCOME_SUBTYPE,
        &OTHER_SPECIES_BREED,
        &AKC_GROUP,
        &CAT_COAT_LENGTH,
        &HAIR_LENGTH,
        &COLOR_PATTERN,
    ]
}
