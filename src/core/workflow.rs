use std::time::Instant;

use tracing::{info, warn};

use crate::{
    core::{generator::ItineraryGenerator, steps::GenerationStep, trace::GenerationTrace},
    error::{PlannerError, Result},
    services::{
        budget::check_budget,
        conformance::check_conformance,
        generation_client::GenerationClient,
        prompt::{CatalogListings, PromptContext, PromptKind, TEMPLATE_VERSION},
        response_parser::parse_itinerary,
        synthetic::synthetic_plan,
    },
    types::{
        BudgetCheck, ConformanceIssue, FallbackReason, GeneratedDay, GenerationOutcome,
        GenerationReport, ItineraryResponse, PlaceKind, TripRequest,
    },
};

pub const TOURIST_SPOT_LIMIT: usize = 15;
pub const RESTAURANT_LIMIT: usize = 10;
pub const ACCOMMODATION_LIMIT: usize = 5;
pub const FESTIVAL_LIMIT: usize = 5;

#[derive(Clone, Copy)]
enum Request<'a> {
    Initial,
    Modify {
        current: &'a [GeneratedDay],
        requirements: &'a str,
    },
}

impl Request<'_> {
    fn first_prompt(&self, context: &PromptContext) -> (PromptKind, String) {
        match self {
            Request::Initial => (PromptKind::Initial, context.render_initial()),
            Request::Modify {
                current,
                requirements,
            } => (
                PromptKind::Modify,
                context.render_modify(current, requirements),
            ),
        }
    }

    fn budget_retry_prompt(&self, context: &PromptContext) -> String {
        match self {
            Request::Initial => context.render_budget_retry(),
            Request::Modify {
                current,
                requirements,
            } => context.render_modify_budget_retry(current, requirements),
        }
    }
}

impl ItineraryGenerator {
    /// Generate an itinerary for `trip`. Never fails: every failure path ends
    /// in the synthetic plan.
    pub async fn generate(&self, trip: &TripRequest) -> ItineraryResponse {
        self.generate_with_report(trip).await.0
    }

    pub async fn generate_with_report(
        &self,
        trip: &TripRequest,
    ) -> (ItineraryResponse, GenerationReport) {
        self.run(trip, Request::Initial).await
    }

    /// Regenerate `existing_days` with free-text `requirements` applied.
    pub async fn modify(
        &self,
        existing_days: &[GeneratedDay],
        requirements: &str,
        trip: &TripRequest,
    ) -> ItineraryResponse {
        self.modify_with_report(existing_days, requirements, trip)
            .await
            .0
    }

    pub async fn modify_with_report(
        &self,
        existing_days: &[GeneratedDay],
        requirements: &str,
        trip: &TripRequest,
    ) -> (ItineraryResponse, GenerationReport) {
        self.run(
            trip,
            Request::Modify {
                current: existing_days,
                requirements,
            },
        )
        .await
    }

    async fn run(
        &self,
        trip: &TripRequest,
        request: Request<'_>,
    ) -> (ItineraryResponse, GenerationReport) {
        let start_time = Instant::now();
        let mut trace = GenerationTrace::new();

        trace.add_step(GenerationStep::Task {
            content: format!(
                "{} → {}, {} ~ {} ({} days), {} people, {} KRW, {}",
                trip.departure_location,
                trip.region,
                trip.start_date,
                trip.end_date,
                trip.duration_days(),
                trip.people_count,
                trip.budget,
                trip.travel_style
            ),
        });

        let Some(client) = self.client() else {
            return fallback(trip, FallbackReason::MissingCredential, trace, start_time);
        };

        let context = PromptContext::new(trip, self.fetch_listings(trip, &mut trace).await);
        let (kind, prompt) = request.first_prompt(&context);

        let first = match self.request_plan(client, kind, &prompt, &mut trace).await {
            Ok(plan) => plan,
            Err(err) => return fallback(trip, fallback_reason(&err), trace, start_time),
        };

        let first_issues = conformance(&first, trip, &mut trace);
        let budget = check_budget(&first, trip);
        trace.add_step(GenerationStep::BudgetChecked { check: budget });

        if budget.within {
            return finish(
                first,
                GenerationOutcome::Generated,
                Some(budget),
                first_issues,
                trace,
                start_time,
            );
        }

        info!(
            total = budget.total,
            ceiling = budget.ceiling,
            "regenerating once with budget constraints"
        );
        let retry_prompt = request.budget_retry_prompt(&context);

        match self
            .request_plan(client, PromptKind::BudgetRetry, &retry_prompt, &mut trace)
            .await
        {
            Ok(plan) => {
                let budget = check_budget(&plan, trip);
                trace.add_step(GenerationStep::BudgetChecked { check: budget });
                if !budget.within {
                    warn!(
                        total = budget.total,
                        ceiling = budget.ceiling,
                        "regenerated plan still exceeds budget, returning it anyway"
                    );
                }
                let issues = conformance(&plan, trip, &mut trace);
                finish(
                    plan,
                    GenerationOutcome::Regenerated,
                    Some(budget),
                    issues,
                    trace,
                    start_time,
                )
            }
            Err(err) => fallback(trip, fallback_reason(&err), trace, start_time),
        }
    }

    /// Catalog listings for the prompt; lookup errors degrade to empty listings.
    async fn fetch_listings(
        &self,
        trip: &TripRequest,
        trace: &mut GenerationTrace,
    ) -> CatalogListings {
        let catalog = self.catalog();
        let region = trip.region.as_str();

        let tourist_spots = or_empty(
            "tourist spots",
            catalog
                .find_places(region, PlaceKind::Tourist, TOURIST_SPOT_LIMIT)
                .await,
        );
        let restaurants = or_empty(
            "restaurants",
            catalog
                .find_places(region, PlaceKind::Restaurant, RESTAURANT_LIMIT)
                .await,
        );
        let accommodations = or_empty(
            "accommodations",
            catalog
                .find_places(region, PlaceKind::Accommodation, ACCOMMODATION_LIMIT)
                .await,
        );
        let festivals = or_empty(
            "festivals",
            catalog
                .find_festivals(region, trip.start_month(), FESTIVAL_LIMIT)
                .await,
        );

        trace.add_step(GenerationStep::CatalogFetched {
            tourist_spots: tourist_spots.len(),
            restaurants: restaurants.len(),
            accommodations: accommodations.len(),
            festivals: festivals.len(),
        });

        CatalogListings::new(&tourist_spots, &restaurants, &accommodations, &festivals)
    }

    /// Send one request and parse its text into a schema-valid itinerary.
    async fn request_plan(
        &self,
        client: &GenerationClient,
        kind: PromptKind,
        prompt: &str,
        trace: &mut GenerationTrace,
    ) -> Result<ItineraryResponse> {
        trace.add_step(GenerationStep::PromptRendered {
            kind,
            length: prompt.chars().count(),
        });
        trace.add_step(GenerationStep::RequestSent {
            attempt: trace.count_requests() + 1,
        });
        info!(template = TEMPLATE_VERSION, ?kind, "sending generation request");

        let text = client.generate_text(prompt, self.timeout()).await?;
        let plan = parse_itinerary(&text)?;

        trace.add_step(GenerationStep::ResponseParsed {
            days: plan.days.len(),
        });
        Ok(plan)
    }
}

fn or_empty<T>(listing: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        warn!(listing, "catalog lookup failed, continuing without it: {}", err);
        Vec::new()
    })
}

fn fallback_reason(err: &PlannerError) -> FallbackReason {
    match err {
        PlannerError::Transport(_) | PlannerError::Timeout(_) | PlannerError::Io(_) => {
            FallbackReason::TransportFailure(err.to_string())
        }
        _ => FallbackReason::MalformedResponse(err.to_string()),
    }
}

fn fallback(
    trip: &TripRequest,
    reason: FallbackReason,
    mut trace: GenerationTrace,
    start_time: Instant,
) -> (ItineraryResponse, GenerationReport) {
    warn!("using synthetic itinerary: {}", reason);
    trace.add_step(GenerationStep::Fallback {
        reason: reason.clone(),
    });
    finish(
        synthetic_plan(trip),
        GenerationOutcome::Synthetic { reason },
        None,
        Vec::new(),
        trace,
        start_time,
    )
}

fn conformance(
    plan: &ItineraryResponse,
    trip: &TripRequest,
    trace: &mut GenerationTrace,
) -> Vec<ConformanceIssue> {
    let issues = check_conformance(plan, trip.duration_days());
    for issue in &issues {
        trace.add_step(GenerationStep::Nonconformance {
            issue: issue.clone(),
        });
    }
    issues
}

fn finish(
    plan: ItineraryResponse,
    outcome: GenerationOutcome,
    budget: Option<BudgetCheck>,
    conformance: Vec<ConformanceIssue>,
    mut trace: GenerationTrace,
    start_time: Instant,
) -> (ItineraryResponse, GenerationReport) {
    trace.add_step(GenerationStep::Completed {
        outcome: outcome.clone(),
        days: plan.days.len(),
    });

    let report = GenerationReport {
        outcome,
        budget,
        conformance,
        requests_sent: trace.count_requests(),
        steps: trace.into_steps(),
        duration: start_time.elapsed(),
    };
    (plan, report)
}
