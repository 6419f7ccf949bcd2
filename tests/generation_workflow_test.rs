use chrono::NaiveDate;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};
use std::{io::Write, sync::Arc, time::Duration};
use tripify::{
    services::synthetic_plan,
    types::{CatalogPlace, DayPeriod, MealSlot, PlaceKind},
    AccommodationType, FallbackReason, GenerationOutcome, GenerationStep, GeneratorConfig,
    InMemoryCatalog, ItineraryGenerator, TripRequest,
};

const API_KEY: &str = "test-key";

fn busan_trip() -> TripRequest {
    TripRequest {
        budget: 500_000,
        people_count: 2,
        start_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(),
        departure_location: "서울특별시".to_string(),
        region: "부산".to_string(),
        travel_style: "힐링".to_string(),
        accommodation_type: AccommodationType::Hotel,
    }
}

fn catalog() -> Arc<InMemoryCatalog> {
    let mut catalog = InMemoryCatalog::new();
    catalog.insert_place(CatalogPlace {
        content_id: "126081".to_string(),
        title: "해운대해수욕장".to_string(),
        place_type: PlaceKind::Tourist,
        category: "자연관광지".to_string(),
        address: "부산광역시 해운대구 우동".to_string(),
        region: "부산광역시".to_string(),
        latitude: Some(35.1587),
        longitude: Some(129.1604),
        image_url: String::new(),
        tel: String::new(),
    });
    Arc::new(catalog)
}

fn generator(server: &ServerGuard) -> ItineraryGenerator {
    let config = GeneratorConfig::new()
        .with_api_key(API_KEY)
        .with_base_url(format!("{}/generate", server.url()));
    ItineraryGenerator::new(config, catalog())
}

fn itinerary(day_cost: i64, days: u32) -> Value {
    let days: Vec<Value> = (1..=days)
        .map(|day_number| {
            json!({
                "day_number": day_number,
                "description": format!("부산 {day_number}일차"),
                "attractions": [{"name": "해운대해수욕장", "time": "10:00", "duration": "2시간"}],
                "transportation_info": {"오전": "KTX", "오후": "지하철", "저녁": "도보"},
                "accommodation_info": {"name": "해운대 호텔", "cost": 90000},
                "meals_info": {
                    "아침": {"restaurant": "호텔 조식", "cost": 10000},
                    "점심": {"restaurant": "돼지국밥", "cost": 9000},
                    "저녁": {"restaurant": "횟집", "cost": 40000}
                },
                "events_info": [],
                "estimated_cost": day_cost
            })
        })
        .collect();
    json!({ "days": days })
}

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
    })
    .to_string()
}

fn fenced(value: &Value) -> String {
    format!("```json\n{}\n```", serde_json::to_string_pretty(value).unwrap())
}

fn mock_generate(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/generate")
        .match_query(Matcher::UrlEncoded("key".into(), API_KEY.into()))
        .match_header("content-type", "application/json")
}

#[tokio::test]
async fn no_credential_returns_synthetic_plan_without_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = GeneratorConfig::new().with_base_url(format!("{}/generate", server.url()));
    let generator = ItineraryGenerator::new(config, catalog());
    let (plan, report) = generator.generate_with_report(&busan_trip()).await;

    mock.assert_async().await;
    assert_eq!(plan, synthetic_plan(&busan_trip()));
    assert_eq!(report.requests_sent, 0);
    assert_eq!(
        report.fallback_reason(),
        Some(&FallbackReason::MissingCredential)
    );
}

#[tokio::test]
async fn busan_scenario_without_credential() {
    let generator = ItineraryGenerator::new(GeneratorConfig::new(), catalog());
    let plan = generator.generate(&busan_trip()).await;

    assert_eq!(plan.days.len(), 3);
    for day in &plan.days {
        assert_eq!(day.accommodation_info.cost, Some(80_000));
        assert!(day.missing_meals().is_empty());
        assert!(day.description.contains("부산"));
        assert!(day.description.contains("힐링"));
    }
    assert!(plan.days[0]
        .transport(DayPeriod::Morning)
        .unwrap()
        .contains("부산"));
}

#[tokio::test]
async fn fenced_response_within_budget_is_returned() {
    let mut server = Server::new_async().await;
    let expected = itinerary(150_000, 3);
    let mock = mock_generate(&mut server)
        .match_body(Matcher::Regex("해운대해수욕장".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(&fenced(&expected)))
        .expect(1)
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    mock.assert_async().await;
    assert_eq!(report.outcome, GenerationOutcome::Generated);
    assert_eq!(report.requests_sent, 1);
    assert!(report.conformance.is_empty());
    assert_eq!(plan.days.len(), 3);
    assert_eq!(plan.total_estimated_cost(), 450_000);
    assert_eq!(
        plan.days[1].meal(MealSlot::Lunch).unwrap().restaurant,
        "돼지국밥"
    );
}

#[tokio::test]
async fn server_error_falls_back_to_synthetic_plan() {
    let mut server = Server::new_async().await;
    let mock = mock_generate(&mut server)
        .with_status(500)
        .with_body(r#"{"error": {"code": 500, "message": "internal"}}"#)
        .expect(1)
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    mock.assert_async().await;
    assert_eq!(plan, synthetic_plan(&busan_trip()));
    match report.fallback_reason() {
        Some(FallbackReason::TransportFailure(message)) => {
            assert!(message.contains("500"), "{message}")
        }
        other => panic!("unexpected fallback: {other:?}"),
    }
}

#[tokio::test]
async fn slow_endpoint_times_out_into_synthetic_plan() {
    let mut server = Server::new_async().await;
    let body = gemini_body(&fenced(&itinerary(100_000, 3)));
    let _mock = mock_generate(&mut server)
        .with_status(200)
        .with_chunked_body(move |writer| {
            std::thread::sleep(Duration::from_millis(800));
            writer.write_all(body.as_bytes())
        })
        .create_async()
        .await;

    let generator = generator(&server).with_timeout(Duration::from_millis(150));
    let (plan, report) = generator.generate_with_report(&busan_trip()).await;

    assert_eq!(plan, synthetic_plan(&busan_trip()));
    assert!(matches!(
        report.fallback_reason(),
        Some(FallbackReason::TransportFailure(_))
    ));
}

#[tokio::test]
async fn connection_failure_does_not_leak_api_key() {
    let config = GeneratorConfig::new()
        .with_api_key("SUPER-SECRET-KEY")
        .with_base_url("http://127.0.0.1:1/generate");
    let generator = ItineraryGenerator::new(config, catalog());
    let (plan, report) = generator.generate_with_report(&busan_trip()).await;

    assert_eq!(plan, synthetic_plan(&busan_trip()));
    match report.fallback_reason() {
        Some(FallbackReason::TransportFailure(message)) => {
            assert!(!message.contains("SUPER-SECRET-KEY"), "{message}")
        }
        other => panic!("unexpected fallback: {other:?}"),
    }
    let serialized = serde_json::to_string(&report).unwrap();
    assert!(!serialized.contains("SUPER-SECRET-KEY"));
    assert!(!report.replay().contains("SUPER-SECRET-KEY"));
}

#[tokio::test]
async fn prose_around_fenced_plan_is_ignored() {
    let mut server = Server::new_async().await;
    let text = format!(
        "다음은 요청하신 일정입니다:\n{}\n즐거운 여행 되세요!",
        fenced(&itinerary(150_000, 3))
    );
    let mock = mock_generate(&mut server)
        .with_status(200)
        .with_body(gemini_body(&text))
        .expect(1)
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    mock.assert_async().await;
    assert_eq!(report.outcome, GenerationOutcome::Generated);
    assert_eq!(plan.days.len(), 3);
    assert_eq!(plan.total_estimated_cost(), 450_000);
}

#[tokio::test]
async fn unparseable_text_falls_back_without_second_request() {
    let mut server = Server::new_async().await;
    let mock = mock_generate(&mut server)
        .with_status(200)
        .with_body(gemini_body("죄송하지만 요청을 처리할 수 없습니다."))
        .expect(1)
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    mock.assert_async().await;
    assert_eq!(plan, synthetic_plan(&busan_trip()));
    assert_eq!(report.requests_sent, 1);
    assert!(matches!(
        report.fallback_reason(),
        Some(FallbackReason::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn response_without_candidates_falls_back() {
    let mut server = Server::new_async().await;
    let _mock = mock_generate(&mut server)
        .with_status(200)
        .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
        .create_async()
        .await;

    let plan = generator(&server).generate(&busan_trip()).await;
    assert_eq!(plan, synthetic_plan(&busan_trip()));
}

#[tokio::test]
async fn over_budget_plan_is_regenerated_exactly_once() {
    let mut server = Server::new_async().await;
    // 3 x 250,000 = 750,000 > 550,000 ceiling, and the retry is still over.
    let first = mock_generate(&mut server)
        .match_body(Matcher::Regex("상세한 JSON 형식".into()))
        .with_status(200)
        .with_body(gemini_body(&fenced(&itinerary(250_000, 3))))
        .expect(1)
        .create_async()
        .await;
    let retry = mock_generate(&mut server)
        .match_body(Matcher::Regex("예산을 초과".into()))
        .with_status(200)
        .with_body(gemini_body(&itinerary(200_000, 3).to_string()))
        .expect(1)
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    first.assert_async().await;
    retry.assert_async().await;
    assert_eq!(report.outcome, GenerationOutcome::Regenerated);
    assert_eq!(report.requests_sent, 2);
    assert_eq!(plan.total_estimated_cost(), 600_000);
    assert!(!report.budget.unwrap().within);
}

#[tokio::test]
async fn failed_budget_retry_falls_back() {
    let mut server = Server::new_async().await;
    let mock = mock_generate(&mut server)
        .match_body(Matcher::Regex("상세한 JSON 형식".into()))
        .with_status(200)
        .with_body(gemini_body(&fenced(&itinerary(400_000, 3))))
        .expect(1)
        .create_async()
        .await;
    let retry = mock_generate(&mut server)
        .match_body(Matcher::Regex("예산을 초과".into()))
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    retry.assert_async().await;
    mock.assert_async().await;
    assert_eq!(plan, synthetic_plan(&busan_trip()));
    assert_eq!(report.requests_sent, 2);
    assert!(report.is_synthetic());
}

#[tokio::test]
async fn short_plan_is_logged_not_rejected() {
    let mut server = Server::new_async().await;
    let _mock = mock_generate(&mut server)
        .with_status(200)
        .with_body(gemini_body(&fenced(&itinerary(100_000, 2))))
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    assert_eq!(plan.days.len(), 2);
    assert_eq!(report.outcome, GenerationOutcome::Generated);
    assert_eq!(report.conformance.len(), 1);
}

#[tokio::test]
async fn synthetic_costs_do_not_scale_with_party_size() {
    let generator = ItineraryGenerator::new(GeneratorConfig::new(), catalog());

    let mut solo = busan_trip();
    solo.people_count = 1;
    let mut group = busan_trip();
    group.people_count = 8;

    let solo_plan = generator.generate(&solo).await;
    let group_plan = generator.generate(&group).await;
    assert_eq!(
        solo_plan.total_estimated_cost(),
        group_plan.total_estimated_cost()
    );
    assert_eq!(group_plan.total_estimated_cost(), 390_000);
}

#[tokio::test]
async fn overflowing_costs_count_as_over_budget() {
    let mut server = Server::new_async().await;
    let mut huge = itinerary(10, 3);
    huge["days"][0]["estimated_cost"] = json!(i64::MAX);
    let first = mock_generate(&mut server)
        .match_body(Matcher::Regex("상세한 JSON 형식".into()))
        .with_status(200)
        .with_body(gemini_body(&fenced(&huge)))
        .expect(1)
        .create_async()
        .await;
    let retry = mock_generate(&mut server)
        .match_body(Matcher::Regex("예산을 초과".into()))
        .with_status(200)
        .with_body(gemini_body(&fenced(&itinerary(150_000, 3))))
        .expect(1)
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    first.assert_async().await;
    retry.assert_async().await;
    assert_eq!(report.outcome, GenerationOutcome::Regenerated);
    assert_eq!(plan.total_estimated_cost(), 450_000);
    let first_check = report
        .steps
        .iter()
        .find_map(|step| match step {
            GenerationStep::BudgetChecked { check } => Some(*check),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_check.total, i64::MAX);
    assert!(!first_check.within);
}

#[tokio::test]
async fn over_budget_first_plan_is_still_checked_for_conformance() {
    let mut server = Server::new_async().await;
    let _first = mock_generate(&mut server)
        .match_body(Matcher::Regex("상세한 JSON 형식".into()))
        .with_status(200)
        .with_body(gemini_body(&fenced(&itinerary(400_000, 2))))
        .create_async()
        .await;
    let _retry = mock_generate(&mut server)
        .match_body(Matcher::Regex("예산을 초과".into()))
        .with_status(200)
        .with_body(gemini_body(&fenced(&itinerary(150_000, 3))))
        .create_async()
        .await;

    let (plan, report) = generator(&server)
        .generate_with_report(&busan_trip())
        .await;

    assert_eq!(plan.days.len(), 3);
    assert_eq!(report.outcome, GenerationOutcome::Regenerated);
    assert!(report.conformance.is_empty());
    let flagged = report
        .steps
        .iter()
        .filter(|step| matches!(step, GenerationStep::Nonconformance { .. }))
        .count();
    assert_eq!(flagged, 1);
}
