use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u16 = 1000;
/// Points available to each weighted component (60% / 20% / 20%).
pub const ON_TIME_MAX: f64 = 600.0;
pub const VERIFICATION_MAX: f64 = 200.0;
pub const RENT_TO_INCOME_MAX: f64 = 200.0;

/// Raw sub-scores as produced by the statistics source. Any may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Share of payments made on time, 0-100.
    #[serde(default)]
    pub on_time_percentage: Option<f64>,
    /// Verification contribution, pre-scaled to 0-200.
    #[serde(default)]
    pub verification_score: Option<f64>,
    /// Rent-to-income contribution, pre-scaled to 0-200.
    #[serde(default)]
    pub rent_to_income_score: Option<f64>,
}

/// One labelled, weighted contribution to the rent score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub label: &'static str,
    pub weight_pct: u8,
    pub points: f64,
    pub max_points: f64,
}

/// Weighted rent score out of 1000 with its labelled sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub on_time: ScoreComponent,
    pub verification: ScoreComponent,
    pub rent_to_income: ScoreComponent,
    pub total: u16,
    /// Total mapped onto a 0-100 progress bar.
    pub progress_pct: f64,
}

impl ScoreBreakdown {
    pub fn components(&self) -> [&ScoreComponent; 3] {
        [&self.on_time, &self.verification, &self.rent_to_income]
    }
}

fn sanitize(value: Option<f64>, max: f64) -> f64 {
    match value {
        Some(value) if value.is_finite() => value.clamp(0.0, max),
        _ => 0.0,
    }
}

/// Combine the three sub-scores into the rent score.
///
/// Missing or non-finite inputs count as zero and out-of-range inputs are
/// clamped, so the result always lies in `0..=1000`.
pub fn compute_score(inputs: ScoreInputs) -> ScoreBreakdown {
    let on_time = sanitize(inputs.on_time_percentage, 100.0) * (ON_TIME_MAX / 100.0);
    let verification = sanitize(inputs.verification_score, VERIFICATION_MAX);
    let rent_to_income = sanitize(inputs.rent_to_income_score, RENT_TO_INCOME_MAX);

    let total = (on_time + verification + rent_to_income)
        .round()
        .clamp(0.0, f64::from(MAX_SCORE)) as u16;

    ScoreBreakdown {
        on_time: ScoreComponent {
            label: "On-time payments",
            weight_pct: 60,
            points: on_time,
            max_points: ON_TIME_MAX,
        },
        verification: ScoreComponent {
            label: "Verification",
            weight_pct: 20,
            points: verification,
            max_points: VERIFICATION_MAX,
        },
        rent_to_income: ScoreComponent {
            label: "Rent-to-income",
            weight_pct: 20,
            points: rent_to_income,
            max_points: RENT_TO_INCOME_MAX,
        },
        total,
        progress_pct: f64::from(total) / 10.0,
    }
}
