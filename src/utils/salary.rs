use regex::Regex;
use std::sync::LazyLock;

// Grouped amounts ("120,000") win over plain digit runs ("120000"), so an
// unseparated figure is read whole instead of stopping after three digits.
static SALARY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?((?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{2})?)").expect("salary pattern is valid")
});

/// First currency-like amount in a free-text salary, or 0 when there is none.
pub fn extract_salary(raw: Option<&str>) -> f64 {
    raw.and_then(|text| SALARY_AMOUNT.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|amount| amount.as_str().replace(',', "").parse::<f64>().ok())
        .unwrap_or(0.0)
}
