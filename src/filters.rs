use std::collections::BTreeSet;

/// Month codes as the checkboxes carry them, with display abbreviations.
pub const MONTHS: [(&str, &str); 12] = [
    ("01", "Jan"),
    ("02", "Feb"),
    ("03", "Mar"),
    ("04", "Apr"),
    ("05", "May"),
    ("06", "Jun"),
    ("07", "Jul"),
    ("08", "Aug"),
    ("09", "Sep"),
    ("10", "Oct"),
    ("11", "Nov"),
    ("12", "Dec"),
];

pub fn month_abbrev(code: &str) -> Option<&'static str> {
    MONTHS.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// The client-side filter state: checked month codes plus free-text
/// search. Recomputed into a query string on every expense load.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FilterState {
    pub months: BTreeSet<String>,
    pub search: String,
}

impl FilterState {
    pub fn toggle_month(&mut self, code: &str) {
        if !self.months.remove(code) {
            self.months.insert(code.to_string());
        }
    }

    pub fn set_all(&mut self, checked: bool) {
        self.months.clear();
        if checked {
            for (code, _) in MONTHS {
                self.months.insert(code.to_string());
            }
        }
    }

    pub fn all_selected(&self) -> bool {
        self.months.len() == MONTHS.len()
    }

    /// Label for the month-filter button. Zero selected reads the same
    /// as all twelve selected, even though the queries differ.
    pub fn label(&self) -> String {
        match self.months.len() {
            0 | 12 => "All Months".to_string(),
            n if n <= 3 => self
                .months
                .iter()
                .filter_map(|code| month_abbrev(code))
                .collect::<Vec<_>>()
                .join(", "),
            n => format!("{} Selected", n),
        }
    }

    /// Query path for `GET /api/expenses`. The timestamp defeats
    /// intermediary caching; months and search are appended only when
    /// they actually narrow the result.
    pub fn query(&self, cache_bust: u64) -> String {
        let mut url = format!("/api/expenses?t={}", cache_bust);
        if !self.months.is_empty() {
            let csv = self.months.iter().cloned().collect::<Vec<_>>().join(",");
            url.push_str(&format!("&months={}", csv));
        }
        if !self.search.is_empty() {
            url.push_str(&format!("&search={}", encode_component(&self.search)));
        }
        url
    }
}

/// Percent-encoding with `encodeURIComponent` semantics, which is what
/// the backend expects for the search parameter.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_months(codes: &[&str]) -> FilterState {
        let mut state = FilterState::default();
        for code in codes {
            state.months.insert(code.to_string());
        }
        state
    }

    #[test]
    fn label_all_months_for_zero_and_twelve() {
        assert_eq!(FilterState::default().label(), "All Months");
        let mut all = FilterState::default();
        all.set_all(true);
        assert_eq!(all.label(), "All Months");
    }

    #[test]
    fn label_lists_up_to_three_sorted_abbrevs() {
        assert_eq!(with_months(&["01"]).label(), "Jan");
        // insertion order must not matter
        assert_eq!(with_months(&["02", "01"]).label(), "Jan, Feb");
        assert_eq!(with_months(&["12", "03", "07"]).label(), "Mar, Jul, Dec");
    }

    #[test]
    fn label_counts_four_to_eleven() {
        assert_eq!(with_months(&["01", "02", "03", "04"]).label(), "4 Selected");
        let mut eleven = FilterState::default();
        eleven.set_all(true);
        eleven.toggle_month("06");
        assert_eq!(eleven.label(), "11 Selected");
    }

    #[test]
    fn query_omits_months_when_none_selected() {
        let state = FilterState::default();
        assert_eq!(state.query(42), "/api/expenses?t=42");
    }

    #[test]
    fn query_joins_selected_months_csv() {
        let state = with_months(&["02", "01"]);
        assert_eq!(state.query(7), "/api/expenses?t=7&months=01,02");
    }

    #[test]
    fn query_encodes_search_text() {
        let mut state = with_months(&["05"]);
        state.search = "coffee & chai".into();
        assert_eq!(
            state.query(1),
            "/api/expenses?t=1&months=05&search=coffee%20%26%20chai"
        );
    }

    #[test]
    fn toggle_is_symmetric() {
        let mut state = FilterState::default();
        state.toggle_month("04");
        assert!(state.months.contains("04"));
        state.toggle_month("04");
        assert!(state.months.is_empty());
    }

    #[test]
    fn encode_keeps_unreserved_characters() {
        assert_eq!(encode_component("abc-_.!~*'()"), "abc-_.!~*'()");
        assert_eq!(encode_component("a/b?c=d"), "a%2Fb%3Fc%3Dd");
    }
}
