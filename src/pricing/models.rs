//! Reference data models for pricing.
//!
//! A [`ServiceDescriptor`] is one row of the rate table, already parsed into
//! typed values by the catalog loader.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rules::ConditionalRule;

/// Service type for cut letters; the only type eligible for custom color
pub const CUT_LETTERS: &str = "LETRAS RECORTADAS";

/// Service type for formed (channel) letters
pub const FORMED_LETTERS: &str = "LETRAS FORMADAS";

/// Category marker for ACM (Alucobond) letters with lighting
pub const ACM_WITH_LIGHTING_MARKER: &str = "ALUCOBOND (ACM) CON LUZ";

/// Service row from the reference rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub service_type: String,
    pub category: String,
    pub thickness: String,
    #[serde(default)]
    pub gauge: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_sq_ft: Decimal,
    pub with_lighting: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub minimum_sq_ft: Decimal,
    #[serde(default)]
    pub installation_included: Option<String>,
    /// Raw condition text, kept for display only
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub rule: ConditionalRule,
}

impl ServiceDescriptor {
    pub fn is_cut_letters(&self) -> bool {
        self.service_type == CUT_LETTERS
    }

    /// Formed letters in lit ACM need a reinforced aluminum structure
    pub fn is_reinforced_aluminum(&self) -> bool {
        self.category.contains(ACM_WITH_LIGHTING_MARKER) && self.service_type == FORMED_LETTERS
    }

    /// Short label used in logs and history searches
    pub fn label(&self) -> String {
        if self.thickness.is_empty() {
            format!("{} / {}", self.service_type, self.category)
        } else {
            format!("{} / {} / {}", self.service_type, self.category, self.thickness)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service(service_type: &str, category: &str) -> ServiceDescriptor {
        ServiceDescriptor {
            service_type: service_type.to_string(),
            category: category.to_string(),
            thickness: String::new(),
            gauge: String::new(),
            price_per_sq_ft: dec!(40),
            with_lighting: false,
            minimum_sq_ft: dec!(1.5),
            installation_included: None,
            condition: None,
            rule: ConditionalRule::None,
        }
    }

    #[test]
    fn test_cut_letters_is_exact_match() {
        assert!(service("LETRAS RECORTADAS", "PVC").is_cut_letters());
        assert!(!service("LETRAS RECORTADAS PREMIUM", "PVC").is_cut_letters());
        assert!(!service("LETRAS FORMADAS", "PVC").is_cut_letters());
    }

    #[test]
    fn test_reinforced_aluminum_needs_type_and_category() {
        assert!(service("LETRAS FORMADAS", "ALUCOBOND (ACM) CON LUZ").is_reinforced_aluminum());
        assert!(!service("LETRAS RECORTADAS", "ALUCOBOND (ACM) CON LUZ").is_reinforced_aluminum());
        assert!(!service("LETRAS FORMADAS", "ALUCOBOND (ACM) SIN LUZ").is_reinforced_aluminum());
    }

    #[test]
    fn test_label() {
        let mut svc = service("LETRAS FORMADAS", "ACRILICO");
        assert_eq!(svc.label(), "LETRAS FORMADAS / ACRILICO");
        svc.thickness = "4.5MM".to_string();
        assert_eq!(svc.label(), "LETRAS FORMADAS / ACRILICO / 4.5MM");
    }
}
