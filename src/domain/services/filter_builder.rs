use crate::domain::{Filter, LookupRequest};

const NESTED: &str = "data";

fn nested(field: &str) -> String {
    format!("{}.{}", NESTED, field)
}

/// Month spellings accepted for a requested month: the value itself plus its
/// zero-padded ("5" -> "05") or unpadded ("05" -> "5") twin.
pub fn month_variants(month: &str) -> Vec<String> {
    let mut variants = vec![month.to_string()];
    let bytes = month.as_bytes();

    match bytes {
        [d] if (b'1'..=b'9').contains(d) => variants.push(format!("0{}", month)),
        [b'0', d] if (b'1'..=b'9').contains(d) => variants.push((*d as char).to_string()),
        _ => {}
    }

    variants
}

/// Root-level or nested match for each accepted value.
fn root_or_nested(root: &str, nested_field: &str, values: &[String]) -> Filter {
    let mut alternatives = Vec::with_capacity(values.len() * 2);
    for value in values {
        alternatives.push(Filter::eq(root, value.as_str()));
        alternatives.push(Filter::eq(nested(nested_field), value.as_str()));
    }
    Filter::Or(alternatives)
}

/// Translate a lookup request into a document filter.
///
/// Every supplied field adds one clause to a conjunction:
/// - `month`: root or nested, for each spelling from [`month_variants`]
/// - `year`: root or nested
/// - `username`, currency: nested only
/// - `web`: root `client_name` or nested `web`
///
/// No supplied fields yields [`Filter::All`].
pub fn build_lookup_filter(request: &LookupRequest) -> Filter {
    let mut clauses = Vec::new();

    if let Some(month) = &request.month {
        clauses.push(root_or_nested("month", "month", &month_variants(month)));
    }

    if let Some(year) = &request.year {
        clauses.push(root_or_nested("year", "year", std::slice::from_ref(year)));
    }

    if let Some(username) = &request.username {
        clauses.push(Filter::eq(nested("username"), username.as_str()));
    }

    if let Some(currency) = &request.currency {
        clauses.push(Filter::eq(nested("currency"), currency.as_str()));
    }

    if let Some(web) = &request.web {
        clauses.push(Filter::Or(vec![
            Filter::eq("client_name", web.as_str()),
            Filter::eq(nested("web"), web.as_str()),
        ]));
    }

    if clauses.is_empty() {
        Filter::All
    } else {
        Filter::And(clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_variants() {
        assert_eq!(month_variants("5"), vec!["5", "05"]);
        assert_eq!(month_variants("05"), vec!["05", "5"]);
        assert_eq!(month_variants("10"), vec!["10"]);
        assert_eq!(month_variants("0"), vec!["0"]);
        assert_eq!(month_variants("00"), vec!["00"]);
        assert_eq!(month_variants("5X"), vec!["5X"]);
    }

    #[test]
    fn test_empty_request_matches_everything() {
        assert_eq!(build_lookup_filter(&LookupRequest::default()), Filter::All);
    }

    #[test]
    fn test_single_digit_month_has_four_alternatives() {
        let filter = build_lookup_filter(&LookupRequest::default().with_month("1"));

        assert_eq!(
            filter,
            Filter::And(vec![Filter::Or(vec![
                Filter::eq("month", "1"),
                Filter::eq("data.month", "1"),
                Filter::eq("month", "01"),
                Filter::eq("data.month", "01"),
            ])])
        );
    }

    #[test]
    fn test_two_digit_month_has_two_alternatives() {
        let filter = build_lookup_filter(&LookupRequest::default().with_month("11"));

        assert_eq!(filter.leaf_count(), 2);
    }

    #[test]
    fn test_username_and_currency_are_nested_only() {
        let filter = build_lookup_filter(
            &LookupRequest::default()
                .with_username("user_demo")
                .with_currency("THB"),
        );

        assert_eq!(
            filter,
            Filter::And(vec![
                Filter::eq("data.username", "user_demo"),
                Filter::eq("data.currency", "THB"),
            ])
        );
    }

    #[test]
    fn test_full_request_clause_order() {
        let filter = build_lookup_filter(
            &LookupRequest::default()
                .with_currency("THB")
                .with_month("01")
                .with_year("2026")
                .with_username("user_demo")
                .with_web("WEB1"),
        );

        let Filter::And(clauses) = &filter else {
            panic!("expected conjunction, got {}", filter);
        };
        assert_eq!(clauses.len(), 5);
        assert_eq!(
            clauses[1],
            Filter::Or(vec![
                Filter::eq("year", "2026"),
                Filter::eq("data.year", "2026"),
            ])
        );
        assert_eq!(
            clauses[4],
            Filter::Or(vec![
                Filter::eq("client_name", "WEB1"),
                Filter::eq("data.web", "WEB1"),
            ])
        );
        assert_eq!(filter.leaf_count(), 4 + 2 + 1 + 1 + 2);
    }
}
