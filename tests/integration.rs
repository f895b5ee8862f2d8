//! Integration tests: export text in, report values out.

use chatlens::config::{CustomFormat, ParserConfig};
use chatlens::parsing::DateFormat;
use chatlens::prelude::*;
use chrono::NaiveDate;

const SAMPLE: &str = "1/1/24, 10:00 - Alice: hello world
1/1/24, 10:05 - Bob: <Media omitted>
1/1/24, 10:06 - group_notification: Alice added Bob";

const GROUP_CHAT: &str = "[1/15/24, 10:30:00 AM] Alice: Hello everyone! 🎉
[1/15/24, 10:31:00 AM] Bob: Hi Alice, great to see you 😂
[1/15/24, 10:32:00 AM] Alice: How is everyone doing?
[1/15/24, 10:33:00 AM] Charlie: Check this https://example.com and www.rust-lang.org 😂😂
[1/16/24, 9:00:00 PM] Bob: This message was deleted
[1/16/24, 9:05:00 PM] Alice: <Media omitted>
[2/20/24, 8:15:00 AM] Alice: pizza tonight?
pizza pasta pizza
[2/20/24, 8:16:00 AM] Bob: this is terrible";

fn overall(table: &MessageTable) -> TableView<'_> {
    filter(table, &UserSelection::Overall)
}

// ============================================================================
// The documented three-line example
// ============================================================================

mod sample_export {
    use super::*;

    #[test]
    fn test_sample_stats() {
        let table = MessageTable::from_export(SAMPLE);
        let stats = fetch_stats(&overall(&table));

        assert_eq!(stats.messages, 3);
        assert_eq!(stats.words, 2);
        assert_eq!(stats.media, 1);
        assert_eq!(stats.links, 0);
    }

    #[test]
    fn test_sample_busy_users() {
        let table = MessageTable::from_export(SAMPLE);
        let busy = most_busy_users(&overall(&table), 5);

        let names: Vec<_> = busy.top.iter().map(|u| u.user.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert!(busy.top.iter().all(|u| u.count == 1));
        assert!(busy.shares.iter().all(|s| (s.percent - 50.0).abs() < 1e-9));
    }

    #[test]
    fn test_sample_notification_record() {
        let table = MessageTable::from_export(SAMPLE);
        let last = &table.records()[2];

        assert_eq!(last.sender, GROUP_NOTIFICATION);
        assert_eq!(last.body, "Alice added Bob");
        assert_eq!(last.day_name, "Monday");
        assert_eq!(table.user_options(), vec!["Overall", "Alice", "Bob"]);
    }
}

// ============================================================================
// Format detection
// ============================================================================

mod detection {
    use super::*;

    #[test]
    fn test_detects_each_builtin_format() {
        let cases = [
            ("[1/15/24, 10:30:00 AM] Alice: hi", "us", 1, 15),
            ("[15.01.24, 10:30:00] Alice: hi", "eu_dot_bracketed", 1, 15),
            ("26.10.2025, 20:40 - Alice: hi", "eu_dot_no_bracket", 10, 26),
            ("15/01/2024, 10:30 - Alice: hi", "eu_slash", 1, 15),
            ("[15/01/2024, 10:30:45] Alice: hi", "eu_slash_bracketed", 1, 15),
            ("1/15/24, 10:30 AM - Alice: hi", "us_dash", 1, 15),
        ];

        for (line, format, month, day) in cases {
            let table = MessageTable::from_export(line);
            assert_eq!(table.format(), Some(format), "line: {line}");
            assert_eq!(table.len(), 1);
            assert_eq!(table.records()[0].month_number, month);
            assert_eq!(table.records()[0].day, day);
        }
    }

    #[test]
    fn test_ambiguous_android_dates_are_day_first() {
        let table = MessageTable::from_export("1/2/24, 10:00 - Alice: hi");
        assert_eq!(table.records()[0].month_name, "February");
    }

    /// More ambiguous lines than the detection sample, then `tail`.
    fn long_ambiguous_export(tail: &[&str]) -> String {
        let mut lines: Vec<String> = (0..110)
            .map(|i| format!("1/{}/24, 10:{:02} - Alice: msg {i}", 1 + i / 10, i % 60))
            .collect();
        lines.extend(tail.iter().map(|l| (*l).to_string()));
        lines.join("\n")
    }

    #[test]
    fn test_month_first_settled_after_sample() {
        let tail: Vec<String> = (20..26)
            .map(|d| format!("1/{d}/24, 10:00 - Bob: late"))
            .collect();
        let tail: Vec<&str> = tail.iter().map(String::as_str).collect();
        let table = MessageTable::from_export(&long_ambiguous_export(&tail));

        assert_eq!(table.format(), Some("us_dash"));
        assert_eq!(table.len(), 116);
        assert_eq!(table.dropped(), 0);
        assert_eq!(table.users(), vec!["Alice", "Bob"]);

        let monthly = monthly_timeline(&overall(&table));
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].label, "January-2024");
        assert_eq!(monthly[0].count, 116);
    }

    #[test]
    fn test_day_first_settled_after_sample() {
        let table = MessageTable::from_export(&long_ambiguous_export(&["25/1/24, 10:00 - Bob: late"]));

        assert_eq!(table.format(), Some("eu_slash"));
        assert_eq!(table.len(), 111);
        assert_eq!(table.dropped(), 0);
        assert_eq!(monthly_timeline(&overall(&table)).len(), 11);
    }

    #[test]
    fn test_restricted_formats() {
        let config = ParserConfig::default().with_formats(vec![DateFormat::UsDash]);
        let parser = LineParser::new(&config).unwrap();
        let table = MessageTable::from_export_with("1/2/24, 10:00 - Alice: hi", &parser);

        assert_eq!(table.format(), Some("us_dash"));
        assert_eq!(table.records()[0].month_name, "January");
    }

    #[test]
    fn test_custom_format() {
        let custom = CustomFormat::new(
            r"^(?P<date>\d{4}-\d{2}-\d{2}) (?P<time>\d{2}:\d{2}) \| (?P<rest>.*)$",
            vec!["%Y-%m-%d, %H:%M".to_string()],
        );
        let config = ParserConfig::default()
            .with_formats(Vec::new())
            .with_custom_format(custom);
        let parser = LineParser::new(&config).unwrap();

        let table = MessageTable::from_export_with(
            "2024-03-05 08:00 | Alice: morning\n2024-03-05 08:01 | Bob: hey",
            &parser,
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].sender, "Bob");
        assert_eq!(table.records()[0].month_name, "March");
    }

    #[test]
    fn test_invalid_custom_format_is_rejected() {
        let custom = CustomFormat::new(r"^(?P<date>.*)$", vec!["%Y".to_string()]);
        let config = ParserConfig::default().with_custom_format(custom);
        assert!(LineParser::new(&config).unwrap_err().is_config());

        let broken = CustomFormat::new(r"^(?P<date>[$", vec!["%Y".to_string()]);
        let config = ParserConfig::default().with_custom_format(broken);
        assert!(LineParser::new(&config).unwrap_err().is_invalid_pattern());
    }
}

// ============================================================================
// Whole-chat queries
// ============================================================================

mod queries {
    use super::*;

    #[test]
    fn test_group_chat_stats() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let stats = fetch_stats(&overall(&table));

        assert_eq!(stats.messages, 8);
        assert_eq!(stats.media, 1);
        assert_eq!(stats.links, 2);
    }

    #[test]
    fn test_multiline_body_joined() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let pizza = table
            .iter()
            .find(|r| r.body.starts_with("pizza"))
            .unwrap();
        assert_eq!(pizza.body, "pizza tonight?\npizza pasta pizza");
    }

    #[test]
    fn test_common_words_skip_deleted_and_media() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let words = most_common_words(&overall(&table), &StopWords::english(), 3);

        assert_eq!(words[0].word, "pizza");
        assert_eq!(words[0].count, 3);
        assert!(words.iter().all(|w| w.word != "deleted" && w.word != "<media"));
    }

    #[test]
    fn test_emojis_ranked() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let emojis = emoji_helper(&overall(&table));

        assert_eq!(emojis[0].emoji, "😂");
        assert_eq!(emojis[0].count, 3);
        assert_eq!(emojis[1].emoji, "🎉");
    }

    #[test]
    fn test_activity_maps() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let view = overall(&table);

        let week = week_activity_map(&view);
        let labels: Vec<_> = week.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Monday", "Tuesday"]);
        assert_eq!(week[0].count, 4);
        assert_eq!(week[1].count, 4);

        let months = month_activity_map(&view);
        assert_eq!(months.len(), 2);
        assert_eq!(months[1].label, "February");

        let heatmap = activity_heatmap(&view);
        assert_eq!(heatmap.get("Monday", "10-11"), Some(4));
        assert_eq!(heatmap.get("Tuesday", "21-22"), Some(2));
        assert_eq!(heatmap.get("Sunday", "10-11"), None);
    }

    #[test]
    fn test_timelines() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let view = overall(&table);

        let monthly = monthly_timeline(&view);
        let labels: Vec<_> = monthly.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["January-2024", "February-2024"]);
        assert_eq!(monthly[0].count, 6);

        let daily = daily_timeline(&view);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_sentiment_counts() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let view = filter(&table, &UserSelection::from("Bob"));
        let report = sentiment_analysis(&view, &SentimentAnalyzer::default());

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.counts.positive, 1);
        assert_eq!(report.counts.negative, 1);
        assert_eq!(report.counts.neutral, 1);
    }
}

// ============================================================================
// Filters and the full report
// ============================================================================

mod reports {
    use super::*;

    #[test]
    fn test_user_report_has_no_busy_users() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let filter = FilterConfig::new().with_user("Alice");
        let report = analyze(&table, &filter, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.stats.messages, 4);
        assert!(report.busy_users.is_none());
    }

    #[test]
    fn test_overall_report_has_busy_users() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let config = AnalysisConfig::default().with_top_users(2);
        let report = analyze(&table, &FilterConfig::new(), &config).unwrap();

        let busy = report.busy_users.unwrap();
        assert_eq!(busy.top.len(), 2);
        assert_eq!(busy.top[0].user, "Alice");
        assert_eq!(busy.shares.len(), 3);
    }

    #[test]
    fn test_date_filter() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let filter = FilterConfig::new().with_date_from("2024-02-01").unwrap();
        let view = apply_filters(&table, &filter);

        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.month_name == "February"));
    }

    #[test]
    fn test_extra_stop_words() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let config = AnalysisConfig::default()
            .with_extra_stop_words(vec!["pizza".to_string()])
            .with_top_words(50);
        let report = analyze(&table, &FilterConfig::new(), &config).unwrap();

        assert!(report.common_words.iter().all(|w| w.word != "pizza"));
        assert_eq!(report.word_cloud.get("pizza"), None);
    }

    #[test]
    fn test_top_emojis_limit() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let config = AnalysisConfig::default().with_top_emojis(1);
        let report = analyze(&table, &FilterConfig::new(), &config).unwrap();
        assert_eq!(report.emojis.len(), 1);
    }

    #[test]
    fn test_render_both_formats() {
        let table = MessageTable::from_export(GROUP_CHAT);
        let report = analyze(&table, &FilterConfig::new(), &AnalysisConfig::default()).unwrap();

        let text = render(&report, OutputFormat::Text).unwrap();
        assert!(text.contains("Total Messages: 8"));
        assert!(text.contains("February-2024"));

        let json: serde_json::Value =
            serde_json::from_str(&render(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["stats"]["links"], 2);
    }

    #[test]
    fn test_config_from_json() {
        let config = Config::from_json_str(
            r#"{"analysis": {"top_words": 2, "extra_stop_words": ["pasta"]}}"#,
        )
        .unwrap();
        let table = MessageTable::from_export(GROUP_CHAT);
        let report = analyze(&table, &FilterConfig::new(), &config.analysis).unwrap();

        assert_eq!(report.common_words.len(), 2);
        assert!(report.common_words.iter().all(|w| w.word != "pasta"));
    }
}
