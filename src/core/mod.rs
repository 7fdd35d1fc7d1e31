mod engine;
mod fields;
mod types;

pub use engine::{
    COLLEGE_TIMING, COMPARISON_TIMING, DEPLETION_HORIZON_YEARS, IRA_CONTRIBUTION_LIMIT, IRA_TIMING,
    MAX_PAYOFF_MONTHS, RETIREMENT_TIMING, compare_debt_vs_invest, compare_growth,
    evaluate_ira_deduction, monthly_budget, net_worth, project_college_savings, project_growth,
    simulate_debt_payoff, simulate_depletion,
};
pub use fields::{Advisory, FieldError, FieldKind, FieldSpec, RawField, SanitizedForm};
pub use types::{
    BetterOption, BudgetResult, CollegePlan, CollegeSavingsResult, ComparisonResult,
    ContributionTiming, DebtPayoffResult, DebtVsInvestResult, DepletionResult, FilingStatus,
    GrowthParameters, IraEligibility, LedgerYear, NetWorthResult, PayoffRecommendation,
    PhaseOutBand, ProjectionResult,
};
