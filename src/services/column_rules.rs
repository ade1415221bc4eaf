/// Core order fields a spreadsheet column can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    City,
    Volume,
    OrderType,
    BaseCost,
    OrderId,
}

/// A header matches when it contains at least one of `any_of` (if non-empty)
/// and every entry of `all_of`. Matching is done on the lower-cased header.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub target: TargetField,
    pub any_of: &'static [&'static str],
    pub all_of: &'static [&'static str],
}

impl ColumnRule {
    pub fn matches(&self, lowered_header: &str) -> bool {
        let any = self.any_of.is_empty()
            || self
                .any_of
                .iter()
                .any(|needle| lowered_header.contains(needle));
        let all = self
            .all_of
            .iter()
            .all(|needle| lowered_header.contains(needle));
        any && all
    }
}

/// Evaluated top to bottom, first match wins.
pub const COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule {
        target: TargetField::City,
        any_of: &["city", "location", "place"],
        all_of: &[],
    },
    ColumnRule {
        target: TargetField::Volume,
        any_of: &["demand", "volume", "quantity"],
        all_of: &[],
    },
    ColumnRule {
        target: TargetField::OrderType,
        any_of: &["type"],
        all_of: &[],
    },
    ColumnRule {
        target: TargetField::BaseCost,
        any_of: &["cost", "price"],
        all_of: &[],
    },
    ColumnRule {
        target: TargetField::OrderId,
        any_of: &[],
        all_of: &["id", "order"],
    },
];

pub fn classify_column(header: &str) -> Option<TargetField> {
    classify_with(COLUMN_RULES, header)
}

pub fn classify_with(rules: &[ColumnRule], header: &str) -> Option<TargetField> {
    let lowered = header.trim().to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.target)
}

/// Key under which an unmapped column is carried through.
pub fn sanitize_key(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}
