//! Deterministic itinerary used when the generation endpoint cannot be used.

use std::collections::BTreeMap;

use crate::types::{
    AccommodationInfo, Attraction, DayPeriod, GeneratedDay, ItineraryResponse, MealInfo, MealSlot,
    TripRequest,
};

const ATTRACTIONS_PER_DAY: u32 = 3;
const LODGING_COST: i64 = 80_000;
const DAY_COST: i64 = 130_000;
const LOCAL_TRANSIT: &str = "대중교통 이용 (예상 비용: 5,000원)";
const WALK_OR_TAXI: &str = "도보 또는 택시";

/// Build a plan with one day per trip day from the request alone.
///
/// Costs are flat per day and do not depend on the party size.
pub fn synthetic_plan(trip: &TripRequest) -> ItineraryResponse {
    let days = (1..=trip.duration_days())
        .map(|day_number| synthetic_day(trip, day_number))
        .collect();
    ItineraryResponse { days }
}

fn synthetic_day(trip: &TripRequest, day_number: u32) -> GeneratedDay {
    let region = &trip.region;

    let attractions = (0..ATTRACTIONS_PER_DAY)
        .map(|idx| Attraction {
            name: format!("{region} 대표 관광지 {}", idx + 1),
            time: format!("{}:00", 9 + idx * 2),
            duration: "2시간".to_string(),
            description: format!("{region}의 유명한 명소"),
        })
        .collect();

    let transport = if day_number == 1 {
        [
            format!(
                "{} → {region} 이동 (KTX 또는 고속버스, 예상 비용: 50,000원)",
                trip.departure_location
            ),
            LOCAL_TRANSIT.to_string(),
            WALK_OR_TAXI.to_string(),
        ]
    } else {
        [
            LOCAL_TRANSIT.to_string(),
            WALK_OR_TAXI.to_string(),
            "대중교통".to_string(),
        ]
    };
    let transportation_info = DayPeriod::ALL
        .iter()
        .zip(transport)
        .map(|(period, text)| (period.key().to_string(), text))
        .collect();

    let meals = [
        ("호텔 조식 또는 근처 식당".to_string(), 10_000),
        (format!("{region} 맛집"), 15_000),
        (format!("{region} 특선 요리"), 20_000),
    ];
    let meals_info: BTreeMap<String, MealInfo> = MealSlot::ALL
        .iter()
        .zip(meals)
        .map(|(slot, (restaurant, cost))| {
            (
                slot.key().to_string(),
                MealInfo {
                    restaurant,
                    cost: Some(cost),
                },
            )
        })
        .collect();

    GeneratedDay {
        day_number,
        description: format!("{region} {} 여행 {day_number}일차", trip.travel_style),
        attractions,
        transportation_info,
        accommodation_info: AccommodationInfo {
            name: format!("{region} 지역 숙소"),
            cost: Some(LODGING_COST),
            check_in: "15:00".to_string(),
            check_out: "11:00".to_string(),
        },
        meals_info,
        events_info: Vec::new(),
        estimated_cost: Some(DAY_COST),
    }
}
