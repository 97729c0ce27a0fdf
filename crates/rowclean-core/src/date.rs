//! Date normalizer — infers a loose date layout and rewrites it as `YYYY-MM-DD`
//!
//! # Pipeline
//!
//! `raw → strip to digits and separators → layout matchers → range check → canonical`
//!
//! Layout matchers run in order and each returns [`LayoutMatch::Matched`],
//! [`LayoutMatch::NoMatch`] or [`LayoutMatch::Rejected`]. The first match wins;
//! a rejection stops the chain. A match that fails the range check, a
//! rejection, or no match at all yields [`DateOutcome::Unchanged`] holding
//! the trimmed input. The normalizer never fails and never drops data.
//!
//! Ranges are checked per component only: day 1-31, month 1-12, year
//! 1900-2100. `31/02/2020` is accepted.

const SEPARATORS: [char; 3] = ['-', '/', '.'];

const MIN_YEAR: u32 = 1900;
const MAX_YEAR: u32 = 2100;

/// Layout a matcher recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `YYYY-MM-DD` style, three separated parts with a 4-digit first part
    YearFirst,
    /// `DD-MM-YYYY` or `DD-MM-YY` style
    DayFirst,
    /// `YYYYMMDD`, eight bare digits with a plausible leading year
    PackedYearFirst,
    /// `DDMMYYYY`, eight bare digits otherwise
    PackedDayFirst,
}

/// Date components as text, before range checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub layout: DateLayout,
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateParts {
    fn new(layout: DateLayout, year: &str, month: &str, day: &str) -> Self {
        Self {
            layout,
            year: year.to_string(),
            month: month.to_string(),
            day: day.to_string(),
        }
    }

    /// Canonical `YYYY-MM-DD` form, or `None` if a component is out of range
    pub fn to_canonical(&self) -> Option<String> {
        let day: u32 = self.day.parse().ok()?;
        let month: u32 = self.month.parse().ok()?;
        let year: u32 = self.year.parse().ok()?;

        let valid = (1..=31).contains(&day)
            && (1..=12).contains(&month)
            && (MIN_YEAR..=MAX_YEAR).contains(&year);
        valid.then(|| format!("{}-{:02}-{:02}", year, month, day))
    }
}

/// Result of a single layout matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutMatch {
    Matched(DateParts),
    /// Not this layout, try the next matcher
    NoMatch,
    /// Recognised shape that cannot be a date; later matchers are skipped
    Rejected,
}

/// Result of normalizing one date value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOutcome {
    /// Rewritten to `YYYY-MM-DD`
    Canonical(String),
    /// Left as the trimmed original
    Unchanged(String),
}

impl DateOutcome {
    pub fn is_canonical(&self) -> bool {
        matches!(self, DateOutcome::Canonical(_))
    }

    pub fn into_string(self) -> String {
        match self {
            DateOutcome::Canonical(s) | DateOutcome::Unchanged(s) => s,
        }
    }
}

type Matcher = fn(&str) -> LayoutMatch;

/// Matchers in priority order
const MATCHERS: [Matcher; 2] = [match_separated, match_packed];

// ── Public API ─────────────────────────────────────────────

/// Normalize a date string, returning the trimmed input when unsure
pub fn normalize_date(raw: &str) -> String {
    classify_date(raw).into_string()
}

/// Normalize a date string and report whether it was rewritten
pub fn classify_date(raw: &str) -> DateOutcome {
    let original = raw.trim();
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || SEPARATORS.contains(c))
        .collect();

    if cleaned.is_empty() {
        return DateOutcome::Unchanged(original.to_string());
    }

    let parts = match match_layout(&cleaned) {
        LayoutMatch::Matched(parts) => parts,
        LayoutMatch::NoMatch | LayoutMatch::Rejected => {
            return DateOutcome::Unchanged(original.to_string())
        }
    };

    match parts.to_canonical() {
        Some(canonical) => DateOutcome::Canonical(canonical),
        None => {
            tracing::trace!(value = original, layout = ?parts.layout, "date out of range, left unchanged");
            DateOutcome::Unchanged(original.to_string())
        }
    }
}

/// Run the matchers over a digits-and-separators string
///
/// Returns the first `Matched` or `Rejected` outcome, `NoMatch` if every
/// matcher passes.
pub fn match_layout(cleaned: &str) -> LayoutMatch {
    MATCHERS
        .iter()
        .map(|matcher| matcher(cleaned))
        .find(|m| !matches!(m, LayoutMatch::NoMatch))
        .unwrap_or(LayoutMatch::NoMatch)
}

// ── Matchers ───────────────────────────────────────────────

/// Three parts split on `-`, `/` or `.`
///
/// Three parts with an empty one are rejected outright rather than handed to
/// the packed matcher.
fn match_separated(cleaned: &str) -> LayoutMatch {
    let parts: Vec<&str> = cleaned.split(|c: char| SEPARATORS.contains(&c)).collect();
    let [first, second, third] = parts.as_slice() else {
        return LayoutMatch::NoMatch;
    };
    if parts.iter().any(|p| p.is_empty()) {
        return LayoutMatch::Rejected;
    }

    if first.len() == 4 {
        return LayoutMatch::Matched(DateParts::new(DateLayout::YearFirst, first, second, third));
    }

    let year = if third.len() == 2 {
        format!("20{}", third)
    } else {
        third.to_string()
    };
    LayoutMatch::Matched(DateParts::new(DateLayout::DayFirst, &year, second, first))
}

/// Exactly eight digits once separators are removed
fn match_packed(cleaned: &str) -> LayoutMatch {
    let digits: String = cleaned.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 8 {
        return LayoutMatch::NoMatch;
    }

    let leading_year = digits[0..4].parse::<u32>().map(|y| y > MIN_YEAR).unwrap_or(false);
    let parts = if leading_year {
        DateParts::new(DateLayout::PackedYearFirst, &digits[0..4], &digits[4..6], &digits[6..8])
    } else {
        DateParts::new(DateLayout::PackedDayFirst, &digits[4..8], &digits[2..4], &digits[0..2])
    };
    LayoutMatch::Matched(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(cleaned: &str) -> DateParts {
        match match_layout(cleaned) {
            LayoutMatch::Matched(parts) => parts,
            other => panic!("expected a layout match for {:?}, got {:?}", cleaned, other),
        }
    }

    // ── End to end ─────────────────────────────────────

    #[test]
    fn test_canonical_date_unchanged() {
        assert_eq!(normalize_date("1995-08-20"), "1995-08-20");
        assert!(classify_date("1995-08-20").is_canonical());
    }

    #[test]
    fn test_day_first_slashes() {
        assert_eq!(normalize_date("20/08/1995"), "1995-08-20");
    }

    #[test]
    fn test_day_first_dots_and_padding() {
        assert_eq!(normalize_date("5.8.1995"), "1995-08-05");
        assert_eq!(normalize_date(" 1995/8/5 "), "1995-08-05");
    }

    #[test]
    fn test_two_digit_year_gets_century() {
        assert_eq!(normalize_date("20-08-95"), "2095-08-20");
        assert_eq!(normalize_date("01/02/03"), "2003-02-01");
    }

    #[test]
    fn test_packed_year_first() {
        assert_eq!(normalize_date("19950820"), "1995-08-20");
    }

    #[test]
    fn test_packed_day_first() {
        assert_eq!(normalize_date("05081995"), "1995-08-05");
        assert_eq!(normalize_date("01121999"), "1999-12-01");
    }

    #[test]
    fn test_packed_out_of_range_returns_original() {
        // 2008 > 1900 so read as YYYYMMDD; month 19 is invalid
        let outcome = classify_date("20081995");
        assert_eq!(outcome, DateOutcome::Unchanged("20081995".into()));
    }

    #[test]
    fn test_text_noise_is_stripped_before_matching() {
        assert_eq!(normalize_date("DOB: 20/08/1995"), "1995-08-20");
        assert_eq!(normalize_date("Aug 20th"), "Aug 20th");
    }

    #[test]
    fn test_no_digits_returns_trimmed_original() {
        assert_eq!(normalize_date("  unknown "), "unknown");
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("   "), "");
    }

    #[test]
    fn test_range_checks() {
        assert_eq!(normalize_date("32/01/2000"), "32/01/2000");
        assert_eq!(normalize_date("00/01/2000"), "00/01/2000");
        assert_eq!(normalize_date("10/13/2000"), "10/13/2000");
        assert_eq!(normalize_date("10/12/1899"), "10/12/1899");
        assert_eq!(normalize_date("10/12/2101"), "10/12/2101");
        assert_eq!(normalize_date("10/12/2100"), "2100-12-10");
    }

    #[test]
    fn test_no_calendar_validation() {
        assert_eq!(normalize_date("31/02/2020"), "2020-02-31");
    }

    #[test]
    fn test_wrong_part_count_without_eight_digits() {
        assert_eq!(normalize_date("2020-08"), "2020-08");
        assert_eq!(normalize_date("1-2-3-4"), "1-2-3-4");
    }

    #[test]
    fn test_huge_component_does_not_overflow() {
        assert_eq!(normalize_date("1/1/99999999999999999999"), "1/1/99999999999999999999");
    }

    #[test]
    fn test_idempotent_on_output() {
        for raw in ["20/08/1995", "19950820", "bad", "31-12-99"] {
            let once = normalize_date(raw);
            assert_eq!(normalize_date(&once), once, "not idempotent for {:?}", raw);
        }
    }

    // ── Matchers in isolation ──────────────────────────

    #[test]
    fn test_separated_year_first_layout() {
        let parts = matched("1995-08-20");
        assert_eq!(parts.layout, DateLayout::YearFirst);
        assert_eq!((parts.year.as_str(), parts.month.as_str(), parts.day.as_str()), ("1995", "08", "20"));
    }

    #[test]
    fn test_separated_day_first_layout() {
        let parts = matched("20/08/95");
        assert_eq!(parts.layout, DateLayout::DayFirst);
        assert_eq!(parts.year, "2095");
        assert_eq!(parts.day, "20");
    }

    #[test]
    fn test_separated_mixed_separators() {
        assert_eq!(matched("20-08.1995").layout, DateLayout::DayFirst);
    }

    #[test]
    fn test_empty_part_stops_matching() {
        // three parts but one empty; eight digits remain but packed never runs
        assert_eq!(match_layout("2020--0820"), LayoutMatch::Rejected);
        assert_eq!(normalize_date("2020--0820"), "2020--0820");
        assert_eq!(match_layout("-19950820-"), LayoutMatch::Rejected);
        assert_eq!(normalize_date("-19950820-"), "-19950820-");
        assert!(!classify_date("19950820-.").is_canonical());
    }

    #[test]
    fn test_packed_counts_digits_without_separators() {
        assert_eq!(matched("2020/0820").layout, DateLayout::PackedYearFirst);
        assert_eq!(normalize_date("2020/0820"), "2020-08-20");
    }

    #[test]
    fn test_packed_layout_boundary_year() {
        // 1900 is not > 1900, so read day first
        assert_eq!(matched("19001231").layout, DateLayout::PackedDayFirst);
        assert_eq!(matched("19011231").layout, DateLayout::PackedYearFirst);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_layout("123"), LayoutMatch::NoMatch);
        assert_eq!(match_layout("1/2"), LayoutMatch::NoMatch);
    }

    #[test]
    fn test_to_canonical_rejects_non_numeric() {
        let parts = DateParts::new(DateLayout::DayFirst, "", "01", "01");
        assert_eq!(parts.to_canonical(), None);
    }
}
