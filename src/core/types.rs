use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContributionTiming {
    StartOfYear,
    EndOfYear,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilingStatus {
    Single,
    HeadOfHousehold,
    MarriedFilingJointly,
    MarriedFilingSeparately,
}

#[derive(Copy, Clone, Debug)]
pub struct PhaseOutBand {
    pub lower: f64,
    pub upper: f64,
}

impl FilingStatus {
    /// 2024 traditional-IRA deduction phase-out range for filers covered by a
    /// workplace plan.
    pub fn phase_out_band(self) -> PhaseOutBand {
        match self {
            FilingStatus::Single | FilingStatus::HeadOfHousehold => PhaseOutBand {
                lower: 77_000.0,
                upper: 87_000.0,
            },
            FilingStatus::MarriedFilingJointly => PhaseOutBand {
                lower: 123_000.0,
                upper: 143_000.0,
            },
            FilingStatus::MarriedFilingSeparately => PhaseOutBand {
                lower: 0.0,
                upper: 10_000.0,
            },
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum BetterOption {
    #[serde(rename = "A")]
    OptionA,
    #[serde(rename = "B")]
    OptionB,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayoffRecommendation {
    PayOffDebt,
    Invest,
}

#[derive(Debug, Clone, Copy)]
pub struct GrowthParameters {
    pub present_value: f64,
    pub annual_contribution: f64,
    pub annual_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct CollegePlan {
    pub current_savings: f64,
    pub annual_contribution: f64,
    pub annual_return: f64,
    pub years_until_college: u32,
    pub college_cost_today: f64,
    pub cost_inflation: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub future_value: f64,
    pub total_contributed: f64,
    pub total_gain: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub option_a: ProjectionResult,
    pub option_b: ProjectionResult,
    pub better_option: BetterOption,
    pub difference: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffResult {
    pub months: u32,
    pub total_interest_paid: f64,
    pub paid_off: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtVsInvestResult {
    pub payoff: DebtPayoffResult,
    pub investment_value: f64,
    pub investment_contributed: f64,
    pub investment_interest: f64,
    pub interest_saved: f64,
    pub recommendation: PayoffRecommendation,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerYear {
    pub year: u32,
    pub starting_balance: f64,
    pub withdrawal: f64,
    pub earnings: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepletionResult {
    pub yearly_ledger: Vec<LedgerYear>,
    pub depletion_year: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IraEligibility {
    pub eligible: bool,
    pub max_contribution: f64,
    pub max_deductible: f64,
    pub phase_out_applies: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeSavingsResult {
    pub savings: ProjectionResult,
    pub future_college_cost: f64,
    pub surplus: f64,
    pub fully_funded: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthResult {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResult {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_cash_flow: f64,
}
