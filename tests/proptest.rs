//! Property-based tests for chatlens.
//!
//! These tests generate random exports to find edge cases.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use chatlens::prelude::*;

const SENDERS: &[&str] = &["Alice", "Bob", "Charlie", "Иван", "User 123"];

const BODIES: &[&str] = &[
    "Hello",
    "Hi there!",
    "How are you?",
    "<Media omitted>",
    "This message was deleted",
    "check https://example.com",
    "Привет мир",
    "🎉🔥 party",
    "",
    "   ",
];

/// A message as (sender or notice, body, timestamp).
fn arb_line() -> impl Strategy<Value = (Option<&'static str>, &'static str, NaiveDateTime)> {
    (
        prop::option::weighted(0.9, prop::sample::select(SENDERS)),
        prop::sample::select(BODIES),
        2019i32..2026,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
    )
        .prop_map(|(sender, body, year, month, day, hour, minute)| {
            let ts = NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            (sender, body, ts)
        })
}

/// Renders lines in the Android day-first layout.
fn render_export(lines: &[(Option<&str>, &str, NaiveDateTime)]) -> String {
    lines
        .iter()
        .map(|(sender, body, ts)| {
            let stamp = ts.format("%d/%m/%Y, %H:%M");
            match sender {
                Some(s) => format!("{stamp} - {s}: {body}"),
                None => format!("{stamp} - Alice left"),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn arb_export(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..max_len).prop_map(|lines| render_export(&lines))
}

fn boundary_lines(text: &str) -> usize {
    text.lines()
        .filter(|l| l.len() > 2 && l.as_bytes()[2] == b'/')
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSING PROPERTIES
    // ============================================

    /// Never more records than boundary lines
    #[test]
    fn records_never_exceed_boundaries(text in arb_export(30)) {
        let table = MessageTable::from_export(&text);
        prop_assert!(table.len() + table.dropped() <= boundary_lines(&text));
    }

    /// Every generated line is a message
    #[test]
    fn every_line_parses(text in arb_export(30)) {
        let table = MessageTable::from_export(&text);
        prop_assert_eq!(table.len(), text.lines().count());
        prop_assert_eq!(table.dropped(), 0);
    }

    /// Parsing never panics on arbitrary text
    #[test]
    fn parse_arbitrary_text(text in "\\PC{0,200}") {
        let table = MessageTable::from_export(&text);
        let _ = fetch_stats(&filter(&table, &UserSelection::Overall));
    }

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// Overall is the identity
    #[test]
    fn overall_is_identity(text in arb_export(30)) {
        let table = MessageTable::from_export(&text);
        let view = filter(&table, &UserSelection::Overall);
        prop_assert_eq!(view.len(), table.len());
    }

    /// User views partition the non-notification records
    #[test]
    fn user_views_partition(text in arb_export(30)) {
        let table = MessageTable::from_export(&text);
        let per_user: usize = table
            .users()
            .into_iter()
            .map(|u| filter(&table, &UserSelection::from(u)).len())
            .sum();
        let notices = table.iter().filter(|r| r.is_notification()).count();
        prop_assert_eq!(per_user + notices, table.len());
    }

    /// A user's counts never exceed the whole chat's
    #[test]
    fn user_stats_bounded_by_overall(text in arb_export(30), who in prop::sample::select(SENDERS)) {
        let table = MessageTable::from_export(&text);
        let all = fetch_stats(&filter(&table, &UserSelection::Overall));
        let one = fetch_stats(&filter(&table, &UserSelection::from(who)));

        prop_assert!(one.messages <= all.messages);
        prop_assert!(one.words <= all.words);
        prop_assert!(one.media <= all.media);
        prop_assert!(one.links <= all.links);
    }

    /// Date filters only keep dates inside the range
    #[test]
    fn date_filter_respects_bounds(text in arb_export(30), year in 2019i32..2026) {
        let table = MessageTable::from_export(&text);
        let from = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(year, 12, 31).unwrap();
        let config = FilterConfig::new().with_after(from).with_before(to);

        for record in apply_filters(&table, &config).iter() {
            prop_assert!(record.date_only >= from && record.date_only <= to);
        }
    }

    // ============================================
    // AGGREGATION PROPERTIES
    // ============================================

    /// Timelines and maps sum to the view size
    #[test]
    fn aggregations_sum_to_total(text in arb_export(30)) {
        let table = MessageTable::from_export(&text);
        let view = filter(&table, &UserSelection::Overall);

        let monthly: usize = monthly_timeline(&view).iter().map(|m| m.count).sum();
        let daily: usize = daily_timeline(&view).iter().map(|d| d.count).sum();
        let weekly: usize = week_activity_map(&view).iter().map(|c| c.count).sum();
        let months: usize = month_activity_map(&view).iter().map(|c| c.count).sum();
        let heat: usize = activity_heatmap(&view).values.iter().flatten().sum();

        prop_assert_eq!(monthly, view.len());
        prop_assert_eq!(daily, view.len());
        prop_assert_eq!(weekly, view.len());
        prop_assert_eq!(months, view.len());
        prop_assert_eq!(heat, view.len());
    }

    /// Monthly timeline is strictly chronological
    #[test]
    fn monthly_timeline_sorted(text in arb_export(30)) {
        let table = MessageTable::from_export(&text);
        let timeline = monthly_timeline(&filter(&table, &UserSelection::Overall));
        for pair in timeline.windows(2) {
            prop_assert!(pair[0].period < pair[1].period);
        }
    }

    /// Busy-user shares add up to 100 percent
    #[test]
    fn busy_shares_sum_to_hundred(text in arb_export(30)) {
        let table = MessageTable::from_export(&text);
        let busy = most_busy_users(&filter(&table, &UserSelection::Overall), 3);

        prop_assert!(busy.top.len() <= 3);
        if !busy.shares.is_empty() {
            let total: f64 = busy.shares.iter().map(|s| s.percent).sum();
            prop_assert!((total - 100.0).abs() < 0.05 * busy.shares.len() as f64);
        }
    }

    /// Word rankings are sorted and never contain stop words
    #[test]
    fn common_words_sorted(text in arb_export(30), n in 0usize..10) {
        let table = MessageTable::from_export(&text);
        let stop_words = StopWords::english();
        let words = most_common_words(&filter(&table, &UserSelection::Overall), &stop_words, n);

        prop_assert!(words.len() <= n);
        for pair in words.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
        for word in &words {
            prop_assert!(!stop_words.contains(&word.word));
        }
    }

    // ============================================
    // SENTIMENT PROPERTIES
    // ============================================

    /// Compound scores stay in [-1, 1]
    #[test]
    fn sentiment_bounded(text in "[a-zA-Z !]{0,80}") {
        let score = SentimentAnalyzer::default().compound(&text);
        prop_assert!((-1.0..=1.0).contains(&score));
    }

    /// Label counts cover every row
    #[test]
    fn sentiment_counts_match_rows(text in arb_export(30)) {
        let table = MessageTable::from_export(&text);
        let report = sentiment_analysis(
            &filter(&table, &UserSelection::Overall),
            &SentimentAnalyzer::default(),
        );
        prop_assert_eq!(report.counts.total(), report.rows.len());
        prop_assert_eq!(report.rows.len(), table.len());
    }
}
