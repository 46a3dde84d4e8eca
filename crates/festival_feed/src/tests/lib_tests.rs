use super::*;
use rand::{rngs::StdRng, SeedableRng};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn today() -> NaiveDate {
    date(2024, 6, 1)
}

fn festival(name: &str, start: Option<&str>) -> FestivalRecord {
    FestivalRecord::named(name, start)
}

fn scenario() -> Vec<FestivalRecord> {
    vec![
        festival("A", Some("2099-01-10")),
        festival("B", Some("2000-01-10")),
        festival("C", None),
    ]
}

fn names(records: &[FestivalRecord]) -> Vec<&str> {
    records.iter().map(|record| record.name.as_str()).collect()
}

#[test]
fn classification_matches_direct_comparison_with_today() {
    for (text, expected_past) in [
        ("2024-05-31", true),
        ("2024-06-01", false),
        ("2024-06-02", false),
        ("1999-12-31", true),
    ] {
        let record = festival("x", Some(text));
        assert_eq!(is_past(&record, today()), expected_past, "{text}");
        let parsed = parse_festival_date(Some(text)).expect("parseable");
        assert_eq!(is_past(&record, today()), parsed < today());
    }
}

#[test]
fn time_of_day_is_truncated_before_comparing() {
    let record = festival("x", Some("2024-06-01T09:30:00"));
    assert_eq!(start_date(&record), Some(today()));
    assert_eq!(classify(&record, today()), FestivalStatus::Upcoming);
}

#[test]
fn classification_follows_the_supplied_clock() {
    let record = festival("x", Some("2024-06-10"));
    assert!(!is_past(&record, today()));
    assert!(is_past(&record, date(2024, 6, 11)));
}

#[test]
fn missing_and_malformed_dates_are_upcoming() {
    for start in [None, Some("soon"), Some("2024-13-45"), Some("")] {
        let record = festival("x", start);
        assert_eq!(classify(&record, today()), FestivalStatus::Upcoming);
    }
}

#[test]
fn scenario_sorts_upcoming_then_undated_then_past() {
    let records = scenario();
    let sorted = sort_for_display(&records, today());
    assert_eq!(names(&sorted), vec!["A", "C", "B"]);
    assert_eq!(names(&records), vec!["A", "B", "C"], "input must be untouched");
}

#[test]
fn undated_records_sort_last_within_their_group() {
    let records = vec![
        festival("undated", None),
        festival("past-late", Some("2023-12-01")),
        festival("garbled", Some("tbd")),
        festival("upcoming", Some("2030-03-03")),
        festival("past-early", Some("2021-01-01")),
    ];
    let sorted = sort_for_display(&records, today());
    assert_eq!(
        names(&sorted),
        vec!["upcoming", "undated", "garbled", "past-early", "past-late"]
    );
}

#[test]
fn sorting_is_stable_and_idempotent() {
    let records = vec![
        festival("first", Some("2030-05-05")),
        festival("second", Some("2030-05-05")),
        festival("old", Some("2001-01-01")),
        festival("third", Some("2030-05-05")),
    ];
    let once = sort_for_display(&records, today());
    assert_eq!(names(&once), vec!["first", "second", "third", "old"]);
    let twice = sort_for_display(&once, today());
    assert_eq!(once, twice);
}

#[test]
fn month_extraction_fails_soft() {
    assert_eq!(month_of(Some("2024-07-15")), 7);
    assert_eq!(month_of(Some("2024-1")), 1);
    assert_eq!(month_of(Some("2024-11x-02")), 11);
    assert_eq!(month_of(Some("20240715")), 0);
    assert_eq!(month_of(Some("2024--15")), 0);
    assert_eq!(month_of(Some("")), 0);
    assert_eq!(month_of(None), 0);
}

#[test]
fn scenario_month_filter_keeps_january_and_upcoming_pool_keeps_only_a() {
    let sorted = sort_for_display(&scenario(), today());
    let january = filter_by_month(&sorted, 1);
    assert_eq!(names(&january), vec!["A", "B"]);

    let upcoming_january: Vec<FestivalRecord> = january
        .into_iter()
        .filter(|record| !is_past(record, today()))
        .collect();
    assert_eq!(names(&upcoming_january), vec!["A"]);
}

#[test]
fn month_filter_excludes_undated_and_is_idempotent() {
    let records = scenario();
    let once = filter_by_month(&records, 1);
    assert!(once.iter().all(|record| record.name != "C"));
    assert_eq!(filter_by_month(&once, 1), once);
}

#[test]
fn pool_prefers_upcoming_in_selected_month() {
    let records = vec![
        festival("jan-upcoming", Some("2099-01-10")),
        festival("feb-upcoming", Some("2099-02-10")),
        festival("jan-past", Some("2000-01-10")),
    ];
    let pool = recommendation_pool(&records, Some(1), today());
    assert_eq!(pool.tier, PoolTier::UpcomingInMonth);
    assert_eq!(pool.indices, vec![0]);
}

#[test]
fn pool_falls_back_to_all_upcoming_then_everything() {
    let records = vec![
        festival("feb-upcoming", Some("2099-02-10")),
        festival("undated", None),
        festival("jan-past", Some("2000-01-10")),
    ];
    let pool = recommendation_pool(&records, Some(1), today());
    assert_eq!(pool.tier, PoolTier::Upcoming);
    assert_eq!(pool.indices, vec![0, 1]);

    let all_past = vec![
        festival("old", Some("2000-01-10")),
        festival("older", Some("1990-01-10")),
    ];
    let pool = recommendation_pool(&all_past, Some(1), today());
    assert_eq!(pool.tier, PoolTier::Everything);
    assert_eq!(pool.indices, vec![0, 1]);

    let pool = recommendation_pool(&records, None, today());
    assert_eq!(pool.tier, PoolTier::Upcoming);
}

#[test]
fn recommendation_always_comes_from_input() {
    let records = scenario();
    let mut rng = StdRng::seed_from_u64(42);
    for month in [None, Some(1), Some(6)] {
        for _ in 0..50 {
            let index = recommend(&records, month, today(), &mut rng).expect("non-empty input");
            assert!(index < records.len());
            assert!(!is_past(&records[index], today()));
        }
    }
}

#[test]
fn recommendation_reaches_every_candidate() {
    let records = vec![
        festival("a", Some("2099-01-01")),
        festival("b", Some("2099-01-02")),
        festival("c", Some("2099-01-03")),
    ];
    let mut rng = StdRng::seed_from_u64(11);
    let mut seen = [false; 3];
    for _ in 0..200 {
        let index = recommend(&records, None, today(), &mut rng).expect("pick");
        seen[index] = true;
    }
    assert_eq!(seen, [true; 3]);
}

#[test]
fn empty_input_recommends_nothing() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(recommend(&[], Some(3), today(), &mut rng), None);
    assert!(sort_for_display(&[], today()).is_empty());
}

#[test]
fn region_label_is_first_address_word() {
    let mut record = festival("x", None);
    assert_eq!(region_label(&record), None);
    record.road_address = Some("Jeju-do Seogwipo-si Jungang-ro 1".to_string());
    assert_eq!(region_label(&record), Some("Jeju-do"));
}

#[test]
fn search_url_encodes_festival_name() {
    let url = search_url("Hwacheon Sancheoneo Ice Festival & more").expect("url");
    assert_eq!(url.host_str(), Some("search.naver.com"));
    let query: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    assert_eq!(
        query,
        vec![(
            "query".to_string(),
            "Hwacheon Sancheoneo Ice Festival & more".to_string()
        )]
    );
}

#[test]
fn feed_payload_with_numeric_and_blank_fields_sorts_cleanly() {
    let payload = serde_json::json!({
        "response": { "body": { "items": [
            { "fstvlNm": "Lantern Night", "fstvlStartDate": "2024-05-20" },
            { "fstvlNm": "Mud Festival", "fstvlStartDate": "", "latitude": 36.3 },
            { "fstvlNm": "Fireworks", "fstvlStartDate": "2024-10-05" }
        ] } }
    });
    let envelope: shared::protocol::FestivalsEnvelope =
        serde_json::from_value(payload).expect("envelope");
    let records = envelope.into_items();
    let sorted = sort_for_display(&records, today());
    assert_eq!(names(&sorted), vec!["Fireworks", "Mud Festival", "Lantern Night"]);
    assert_eq!(month_of(sorted[1].start_date.as_deref()), 0);
}
