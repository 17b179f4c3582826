// ═══════════════════════════════════════════════════════════════════
// Advisory Tests — reply parsing, classification mapping, prompt
// ═══════════════════════════════════════════════════════════════════

use btc_dashboard_core::errors::CoreError;
use btc_dashboard_core::models::advisory::Recommendation;
use btc_dashboard_core::models::metric::{DashboardSnapshot, Metric, PriceSnapshot};
use btc_dashboard_core::services::advisory::{build_prompt, parse_reply};

fn sample_snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        price: PriceSnapshot {
            usd: 65000.0,
            brl: 330000.0,
        },
        metrics: vec![Metric {
            name: "Mayer Multiple".to_string(),
            current_value: "1.29".to_string(),
            description: "Price / 200-day moving average".to_string(),
            tooltip: "Multiple of the current price over its 200-day moving average.".to_string(),
            history: None,
        }],
    }
}

// ═══════════════════════════════════════════════════════════════════
// parse_reply
// ═══════════════════════════════════════════════════════════════════

mod reply_parsing {
    use super::*;

    #[test]
    fn plain_json_reply() {
        let advisory =
            parse_reply(r#"{"recommendation": "HOLD", "justification": "Metrics are mixed."}"#)
                .unwrap();
        assert_eq!(advisory.recommendation, Recommendation::Hold);
        assert_eq!(advisory.justification, "Metrics are mixed.");
    }

    #[test]
    fn json_fenced_reply_is_unwrapped() {
        let text = "```json\n{\"recommendation\": \"BUY\", \"justification\": \"Undervalued.\"}\n```";
        let advisory = parse_reply(text).unwrap();
        assert_eq!(advisory.recommendation, Recommendation::Buy);
    }

    #[test]
    fn bare_fenced_reply_is_unwrapped() {
        let text = "```\n{\"recommendation\": \"SELL\", \"justification\": \"Overheated.\"}\n```";
        let advisory = parse_reply(text).unwrap();
        assert_eq!(advisory.recommendation, Recommendation::Sell);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let advisory =
            parse_reply("  \n{\"recommendation\":\"HOLD\",\"justification\":\"Flat.\"}\n  ")
                .unwrap();
        assert_eq!(advisory.recommendation, Recommendation::Hold);
    }

    #[test]
    fn missing_justification_is_malformed() {
        let err = parse_reply(r#"{"recommendation": "BUY"}"#).unwrap_err();
        match err {
            CoreError::AdvisoryMalformed(msg) => assert!(msg.contains("justification")),
            other => panic!("Expected AdvisoryMalformed, got {other:?}"),
        }
    }

    #[test]
    fn missing_recommendation_is_malformed() {
        let err = parse_reply(r#"{"justification": "Because."}"#).unwrap_err();
        match err {
            CoreError::AdvisoryMalformed(msg) => assert!(msg.contains("recommendation")),
            other => panic!("Expected AdvisoryMalformed, got {other:?}"),
        }
    }

    #[test]
    fn non_json_reply_is_malformed() {
        let err = parse_reply("I think you should buy.").unwrap_err();
        assert!(matches!(err, CoreError::AdvisoryMalformed(_)));
    }

    #[test]
    fn unrecognized_classification_maps_to_error_variant() {
        let advisory =
            parse_reply(r#"{"recommendation": "MOON", "justification": "To the moon."}"#).unwrap();
        assert_eq!(advisory.recommendation, Recommendation::Error);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Recommendation mapping
// ═══════════════════════════════════════════════════════════════════

mod classification {
    use super::*;

    #[test]
    fn exact_values() {
        assert_eq!(Recommendation::from_external("BUY"), Recommendation::Buy);
        assert_eq!(Recommendation::from_external("SELL"), Recommendation::Sell);
        assert_eq!(Recommendation::from_external("HOLD"), Recommendation::Hold);
    }

    #[test]
    fn case_insensitive_and_trimmed() {
        assert_eq!(Recommendation::from_external(" buy "), Recommendation::Buy);
        assert_eq!(Recommendation::from_external("Hold"), Recommendation::Hold);
    }

    #[test]
    fn anything_else_is_error() {
        assert_eq!(Recommendation::from_external(""), Recommendation::Error);
        assert_eq!(
            Recommendation::from_external("STRONG BUY"),
            Recommendation::Error
        );
    }

    #[test]
    fn display_round_trip() {
        for r in [
            Recommendation::Buy,
            Recommendation::Sell,
            Recommendation::Hold,
        ] {
            assert_eq!(Recommendation::from_external(&r.to_string()), r);
        }
        assert_eq!(Recommendation::Error.to_string(), "ERROR");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Prompt construction
// ═══════════════════════════════════════════════════════════════════

mod prompt {
    use super::*;

    #[test]
    fn includes_both_prices() {
        let prompt = build_prompt(&sample_snapshot());
        assert!(prompt.contains("$65000.00"));
        assert!(prompt.contains("R$330000.00"));
    }

    #[test]
    fn includes_one_line_per_metric() {
        let prompt = build_prompt(&sample_snapshot());
        assert!(prompt.contains("- Mayer Multiple: 1.29"));
    }

    #[test]
    fn demands_a_json_only_reply() {
        let prompt = build_prompt(&sample_snapshot());
        assert!(prompt.contains("\"recommendation\""));
        assert!(prompt.contains("\"justification\""));
        assert!(prompt.contains("JSON object only"));
    }
}
