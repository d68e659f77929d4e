/// How a wire property name (or enum string) is compared with the declared one.
///
/// The management API is not consistent about this, so the mode is declared
/// per type and may be overridden per field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NameMatch {
    #[default]
    Ordinal,
    /// ASCII case-insensitive.
    IgnoreCase,
}

impl NameMatch {
    pub fn matches(self, declared: &str, actual: &str) -> bool {
        match self {
            Self::Ordinal => declared == actual,
            Self::IgnoreCase => declared.eq_ignore_ascii_case(actual),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_is_exact() {
        assert!(NameMatch::Ordinal.matches("MinCount", "MinCount"));
        assert!(!NameMatch::Ordinal.matches("MinCount", "minCount"));
    }

    #[test]
    fn ignore_case_folds_ascii() {
        assert!(NameMatch::IgnoreCase.matches("minCount", "MINCOUNT"));
        assert!(!NameMatch::IgnoreCase.matches("minCount", "minCounts"));
    }
}
