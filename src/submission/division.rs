use std::fmt;

/// Recruitment category chosen by an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    Tech,
    Operations,
    Design,
    Photography,
}

/// Extra requirements a division places on a recruitment submission.
pub struct DivisionRules {
    pub division: Division,
    /// Required whenever this division is selected.
    pub required: &'static [&'static str],
    /// `(trigger, dependent)`: `dependent` is required when `trigger` is `true`.
    pub conditional: &'static [(&'static str, &'static str)],
    /// Flags filled with `false` when absent. Never reported missing.
    pub defaults: &'static [&'static str],
    /// Sheet columns owned by this division.
    pub columns: &'static [&'static str],
    /// Subset of `columns` holding yes/no answers.
    pub flags: &'static [&'static str],
}

pub const RULES: &[DivisionRules] = &[
    DivisionRules {
        division: Division::Tech,
        required: &["programmingLanguages", "techContributions"],
        conditional: &[("familiarWithFrameworks", "frameworksList")],
        defaults: &[],
        columns: &[
            "programmingLanguages",
            "techProject",
            "familiarWithFrameworks",
            "frameworksList",
            "techContributions",
        ],
        flags: &["familiarWithFrameworks"],
    },
    DivisionRules {
        division: Division::Operations,
        required: &["taskManagement", "eventSuggestion"],
        conditional: &[("hasEventExperience", "eventExperience")],
        defaults: &[],
        columns: &[
            "hasEventExperience",
            "eventExperience",
            "taskManagement",
            "eventSuggestion",
        ],
        flags: &["hasEventExperience"],
    },
    DivisionRules {
        division: Division::Design,
        required: &["designTools", "designWorkInterest"],
        conditional: &[],
        defaults: &[],
        columns: &["designTools", "designWorkInterest"],
        flags: &[],
    },
    DivisionRules {
        division: Division::Photography,
        required: &["cameraPreference", "contentType"],
        conditional: &[],
        defaults: &["comfortableWithReels"],
        columns: &["cameraPreference", "contentType", "comfortableWithReels"],
        flags: &["comfortableWithReels"],
    },
];

impl Division {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tech" => Some(Division::Tech),
            "operations" => Some(Division::Operations),
            "design" => Some(Division::Design),
            "photography" => Some(Division::Photography),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Division::Tech => "tech",
            Division::Operations => "operations",
            Division::Design => "design",
            Division::Photography => "photography",
        }
    }

    /// Role name shown to applicants in the confirmation email.
    pub fn role_name(&self) -> &'static str {
        match self {
            Division::Tech => "Technical",
            Division::Operations => "Management",
            Division::Design => "Designing",
            Division::Photography => "Photo and Videography",
        }
    }

    pub fn rules(&self) -> &'static DivisionRules {
        match self {
            Division::Tech => &RULES[0],
            Division::Operations => &RULES[1],
            Division::Design => &RULES[2],
            Division::Photography => &RULES[3],
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every division column, in table order. Recruitment rows always carry all of them.
pub fn all_columns() -> impl Iterator<Item = &'static str> {
    RULES.iter().flat_map(|r| r.columns.iter().copied())
}
