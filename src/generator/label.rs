use crate::model::StaffId;
use serde::{Deserialize, Serialize};

/// Suffixe utilisé au-delà de deux noms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuffixStyle {
    /// `A, B & 2 more`
    #[default]
    Count,
    /// `A, B & others`
    Others,
}

/// Règle de formatage du titre d'un shift, surchargeable par département.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelPolicy {
    pub empty_label: String,
    pub closed_label: String,
    pub suffix: SuffixStyle,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            empty_label: "Available".to_string(),
            closed_label: "Closed".to_string(),
            suffix: SuffixStyle::Count,
        }
    }
}

impl LabelPolicy {
    /// 0 → libellé vide ; 1 → nom ; 2 → `A & B` ; 3+ → deux noms + suffixe.
    pub fn format_title(&self, staff: &[StaffId]) -> String {
        match staff {
            [] => self.empty_label.clone(),
            [a] => a.to_string(),
            [a, b] => format!("{a} & {b}"),
            [a, b, rest @ ..] => match self.suffix {
                SuffixStyle::Count => format!("{a}, {b} & {} more", rest.len()),
                SuffixStyle::Others => format!("{a}, {b} & others"),
            },
        }
    }
}
