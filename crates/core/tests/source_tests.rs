// ═══════════════════════════════════════════════════════════════════
// Source Tests — per-feed payload parsing and ordering normalization
// ═══════════════════════════════════════════════════════════════════

use btc_dashboard_core::errors::CoreError;
use btc_dashboard_core::sources::alternative_me::parse_sentiment;
use btc_dashboard_core::sources::blockchain_info::parse_chart;
use btc_dashboard_core::sources::coingecko::parse_spot_price;

fn expect_source_unavailable(err: CoreError, source: &str) -> String {
    match err {
        CoreError::SourceUnavailable {
            source: got,
            reason,
        } => {
            assert_eq!(got, source);
            reason
        }
        other => panic!("Expected SourceUnavailable, got {other:?}"),
    }
}

// ═══════════════════════════════════════════════════════════════════
// CoinGecko — spot price
// ═══════════════════════════════════════════════════════════════════

mod spot_price {
    use super::*;

    #[test]
    fn parses_both_currencies() {
        let body = r#"{"bitcoin":{"usd":65000.5,"brl":330100.25}}"#;
        let price = parse_spot_price(body).unwrap();
        assert_eq!(price.usd, 65000.5);
        assert_eq!(price.brl, 330100.25);
    }

    #[test]
    fn ignores_extra_fields() {
        let body = r#"{"bitcoin":{"usd":1.0,"brl":5.0,"eur":0.9}}"#;
        assert!(parse_spot_price(body).is_ok());
    }

    #[test]
    fn missing_currency_is_source_unavailable() {
        let body = r#"{"bitcoin":{"usd":65000.5}}"#;
        let reason = expect_source_unavailable(parse_spot_price(body).unwrap_err(), "spot-price");
        assert!(reason.contains("unparseable payload"));
    }

    #[test]
    fn garbage_body_is_source_unavailable() {
        let err = parse_spot_price("<html>rate limited</html>").unwrap_err();
        expect_source_unavailable(err, "spot-price");
    }
}

// ═══════════════════════════════════════════════════════════════════
// alternative.me — Fear & Greed
// ═══════════════════════════════════════════════════════════════════

mod sentiment {
    use super::*;

    // Feed order is most-recent-first; timestamps are unix seconds.
    const BODY: &str = r#"{
        "name": "Fear and Greed Index",
        "data": [
            {"value": "72", "value_classification": "Greed", "timestamp": "172800"},
            {"value": "55", "value_classification": "Neutral", "timestamp": "86400"},
            {"value": "31", "value_classification": "Fear", "timestamp": "0"}
        ]
    }"#;

    #[test]
    fn normalizes_to_oldest_first() {
        let series = parse_sentiment(BODY).unwrap();
        let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![31.0, 55.0, 72.0]);
    }

    #[test]
    fn labels_are_dates_from_unix_timestamps() {
        let series = parse_sentiment(BODY).unwrap();
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1970-01-01", "1970-01-02", "1970-01-03"]);
    }

    #[test]
    fn classification_comes_from_the_latest_reading() {
        let series = parse_sentiment(BODY).unwrap();
        assert_eq!(series.classification, "Greed");
    }

    #[test]
    fn unparseable_entries_are_skipped() {
        let body = r#"{"data":[
            {"value": "60", "value_classification": "Greed", "timestamp": "86400"},
            {"value": "not-a-number", "value_classification": "?", "timestamp": "0"}
        ]}"#;
        let series = parse_sentiment(body).unwrap();
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.points[0].value, 60.0);
    }

    #[test]
    fn empty_data_is_source_unavailable() {
        let reason = expect_source_unavailable(
            parse_sentiment(r#"{"data":[]}"#).unwrap_err(),
            "sentiment-index",
        );
        assert!(reason.contains("empty"));
    }

    #[test]
    fn garbage_body_is_source_unavailable() {
        let err = parse_sentiment("not json").unwrap_err();
        expect_source_unavailable(err, "sentiment-index");
    }
}

// ═══════════════════════════════════════════════════════════════════
// blockchain.info — charts
// ═══════════════════════════════════════════════════════════════════

mod charts {
    use super::*;

    #[test]
    fn parses_ascending_values() {
        let body = r#"{"values":[
            {"x": 0, "y": 100.0},
            {"x": 86400, "y": 110.0},
            {"x": 172800, "y": 120.0}
        ]}"#;
        let points = parse_chart("hash-rate", body).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value, 100.0);
        assert_eq!(points[0].label, "1970-01-01");
        assert_eq!(points[2].value, 120.0);
    }

    #[test]
    fn sorts_out_of_order_values_by_timestamp() {
        let body = r#"{"values":[
            {"x": 172800, "y": 120.0},
            {"x": 0, "y": 100.0},
            {"x": 86400, "y": 110.0}
        ]}"#;
        let points = parse_chart("market-price", body).unwrap();
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100.0, 110.0, 120.0]);
    }

    #[test]
    fn empty_chart_is_source_unavailable() {
        let reason = expect_source_unavailable(
            parse_chart("miners-revenue", r#"{"values":[]}"#).unwrap_err(),
            "miners-revenue",
        );
        assert!(reason.contains("empty"));
    }

    #[test]
    fn error_carries_the_chart_name_as_source() {
        let err = parse_chart("n-transactions", "oops").unwrap_err();
        expect_source_unavailable(err, "n-transactions");
    }
}
