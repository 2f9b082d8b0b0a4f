// src/engine/filter.rs
//
// OKVED prefix filter. Plain string-prefix test on the codes as rendered;
// no normalisation of dots or spacing.

use crate::data::Organization;

/// True when `prefixes` is empty, or when the primary code or any additional
/// code starts with one of them.
pub fn matches(org: &Organization, prefixes: &[String]) -> bool {
    if prefixes.is_empty() {
        return true;
    }
    org.okved
        .iter()
        .chain(org.okved_additional.iter())
        .any(|code| prefixes.iter().any(|p| code.starts_with(p.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(okved: Option<&str>, extra: &[&str]) -> Organization {
        let mut o = Organization::new("ООО Тест").unwrap();
        o.okved = okved.map(str::to_string);
        o.okved_additional = extra.iter().map(|s| s.to_string()).collect();
        o
    }

    fn p(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn primary_code_prefix() {
        let o = org(Some("41.20"), &[]);
        assert!(matches(&o, &p(&["41"])));
        assert!(!matches(&o, &p(&["42"])));
        assert!(matches(&o, &[]));
        assert!(matches(&o, &p(&["42", "41.2"])));
    }

    #[test]
    fn additional_codes_count_without_primary() {
        let o = org(None, &["43.1"]);
        assert!(matches(&o, &p(&["43"])));
        assert!(!matches(&o, &p(&["41"])));
    }

    #[test]
    fn prefix_is_textual_not_numeric() {
        let o = org(Some("410"), &["34.1"]);
        assert!(matches(&o, &p(&["4"])));
        assert!(!matches(&o, &p(&["3.4"])));
        assert!(!matches(&org(Some("34"), &[]), &p(&["4"])));
        // no dot normalisation
        assert!(!matches(&org(Some("4120"), &[]), &p(&["41.2"])));
    }

    #[test]
    fn no_codes_never_match_a_non_empty_filter() {
        assert!(!matches(&org(None, &[]), &p(&["4"])));
    }
}
