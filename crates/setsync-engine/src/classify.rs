use setsync_types::MuscleGroup;

// NOTE: Classification Design Rationale
//
// Why an ordered rule table (not imperative set mutation)?
// - Rules are pure data; adding or correcting one is a one-line diff with a
//   matching unit test, not a new branch in a conditional cascade
// - Several rules may fire for one name; that is how compound movements
//   earn both a prime-mover and a synergist label
//
// Why a terminal rehab override?
// - Rehab/mobility work must never be counted toward a training group, so
//   a rehab match discards every other contribution regardless of rule order

/// How a positive keyword matches against a normalized name.
#[derive(Debug)]
enum Keyword {
    /// Substring match anywhere in the name.
    Sub(&'static str),
    /// Whole-token match, for short words that appear inside other words.
    Word(&'static str),
}

impl Keyword {
    fn matches(&self, name: &str) -> bool {
        match self {
            Keyword::Sub(kw) => name.contains(kw),
            Keyword::Word(kw) => name.split(' ').any(|token| token == *kw),
        }
    }
}

/// One classification rule: fires when at least one positive keyword
/// matches and no negative keyword does, contributing its group label.
struct Rule {
    any_of: &'static [Keyword],
    none_of: &'static [&'static str],
    group: MuscleGroup,
}

impl Rule {
    fn fires(&self, name: &str) -> bool {
        self.any_of.iter().any(|kw| kw.matches(name))
            && !self.none_of.iter().any(|kw| name.contains(kw))
    }
}

use Keyword::{Sub, Word};

// Pressing compounds contribute both Chest and Triceps.
const PRESSING: &[Keyword] = &[
    Sub("bench"),
    Sub("press"),
    Sub("dip"),
    Sub("bulgarian pushup"),
    Sub("pushup"),
    Sub("push up"),
    Sub("rto"),
    Sub("ring hold"),
    Sub("pec deck"),
];
const PRESSING_EXCLUDES: &[&str] = &["leg", "row", "overhead", "shoulder", "calf"];

// Pulling compounds contribute both Back and Biceps.
const PULLING: &[Keyword] = &[
    Sub("row"),
    Sub("pulldown"),
    Sub("pull up"),
    Sub("pullup"),
    Sub("chinup"),
    Sub("chin up"),
];

const RULES: &[Rule] = &[
    Rule {
        any_of: PRESSING,
        none_of: PRESSING_EXCLUDES,
        group: MuscleGroup::Chest,
    },
    Rule {
        any_of: PRESSING,
        none_of: PRESSING_EXCLUDES,
        group: MuscleGroup::Triceps,
    },
    Rule {
        any_of: &[Sub("fly"), Sub("pec")],
        none_of: &["rear delt"],
        group: MuscleGroup::Chest,
    },
    Rule {
        any_of: PULLING,
        none_of: &[],
        group: MuscleGroup::Back,
    },
    Rule {
        any_of: PULLING,
        none_of: &[],
        group: MuscleGroup::Biceps,
    },
    Rule {
        any_of: &[Sub("curl")],
        none_of: &["hamstring", "leg", "tricep"],
        group: MuscleGroup::Biceps,
    },
    Rule {
        any_of: &[Sub("bicep")],
        none_of: &[],
        group: MuscleGroup::Biceps,
    },
    // Triceps isolation is split over three rows: "back" must exclude (back
    // extensions are legs/back work) without suppressing kickbacks, whose
    // name contains "back" as a substring.
    Rule {
        any_of: &[
            Sub("triceps"),
            Sub("tricep"),
            Sub("extension"),
            Sub("katana"),
            Sub("cross cable extension"),
            Sub("skullcrusher"),
            Sub("skull crusher"),
        ],
        none_of: &["leg", "calf", "overhead", "shoulder", "back"],
        group: MuscleGroup::Triceps,
    },
    Rule {
        any_of: &[Sub("kickback")],
        none_of: &["leg", "calf", "overhead", "shoulder"],
        group: MuscleGroup::Triceps,
    },
    Rule {
        any_of: &[Sub("press")],
        none_of: &["leg", "calf", "overhead", "shoulder", "back"],
        group: MuscleGroup::Triceps,
    },
    Rule {
        any_of: &[
            Sub("lateral"),
            Sub("overhead"),
            Sub("raise"),
            Sub("face pull"),
            Sub("rear delt"),
            Sub("shoulder"),
        ],
        none_of: &["leg", "row", "chest", "calf", "unilateral cable fly"],
        group: MuscleGroup::Delts,
    },
    Rule {
        any_of: &[
            Sub("squat"),
            Sub("lunge"),
            Sub("leg press"),
            Sub("rdl"),
            Sub("deadlift"),
            Sub("hamstring"),
            Sub("leg curl"),
            Sub("leg extension"),
            Sub("hip adductor"),
            Sub("seated leg curl"),
            Sub("lying leg curl"),
            Sub("back extension"),
            Sub("calf"),
        ],
        none_of: &["forearm leg raise"],
        group: MuscleGroup::Legs,
    },
    Rule {
        any_of: &[
            Sub("crunch"),
            Sub("plank"),
            Sub("rollout"),
            Sub("gar hammer"),
            Sub("l sit"),
            Sub("leg raise"),
            Word("abs"),
        ],
        none_of: &[],
        group: MuscleGroup::Abs,
    },
    Rule {
        any_of: &[Sub("dead hang"), Sub("forearm"), Sub("false grip hang")],
        none_of: &["leg"],
        group: MuscleGroup::Forearms,
    },
];

/// Rehab/mobility work. Authoritative: when this rule fires the result is
/// exactly `[Rehab]`, whatever else matched.
const REHAB: Rule = Rule {
    any_of: &[
        Sub("rotator cuff"),
        Sub("band pull"),
        Sub("external rotation"),
        Sub("ytw"),
        Sub("physio"),
        Sub("serratus walks"),
        Sub("pec stretch"),
        Sub("timeout"),
        Sub("trx"),
        Sub("foam"),
        Sub("thoracic"),
        Sub("mobilization"),
    ],
    none_of: &[],
    group: MuscleGroup::Rehab,
};

/// Normalize a free-text exercise name for keyword matching: lowercase,
/// letters and spaces only, runs of whitespace collapsed, trimmed.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;
    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else if c == ' ' {
            pending_space = true;
        }
        // every other character is dropped without leaving a gap
    }
    out
}

/// Map a free-text exercise name to its muscle-group labels.
///
/// Pure and deterministic: labels are collected from every firing rule,
/// deduplicated in rule order, then stably sorted by priority so the first
/// two entries are the (primary, secondary) pair. An empty result is a
/// classification miss; callers treat it as advisory, not an error.
pub fn classify(exercise_name: &str) -> Vec<MuscleGroup> {
    let name = normalize_name(exercise_name);

    if REHAB.fires(&name) {
        return vec![MuscleGroup::Rehab];
    }

    let mut groups: Vec<MuscleGroup> = Vec::new();
    for rule in RULES {
        if rule.fires(&name) && !groups.contains(&rule.group) {
            groups.push(rule.group);
        }
    }

    // stable: equal priorities keep rule-table order
    groups.sort_by_key(|group| group.priority());
    groups
}
