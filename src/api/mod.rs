use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    Advisory, CollegePlan, ComparisonResult, DEPLETION_HORIZON_YEARS, DebtVsInvestResult,
    FieldError, FieldSpec, FilingStatus, GrowthParameters, IRA_CONTRIBUTION_LIMIT, IRA_TIMING,
    IraEligibility, LedgerYear, PayoffRecommendation, ProjectionResult, RETIREMENT_TIMING,
    RawField, SanitizedForm, compare_debt_vs_invest, compare_growth, evaluate_ira_deduction,
    monthly_budget, net_worth, project_college_savings, project_growth, simulate_depletion,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiFilingStatus {
    Single,
    #[serde(alias = "headOfHousehold", alias = "head_of_household")]
    HeadOfHousehold,
    #[serde(
        alias = "marriedJoint",
        alias = "married_joint",
        alias = "married-filing-jointly",
        alias = "marriedFilingJointly"
    )]
    MarriedJoint,
    #[serde(
        alias = "marriedSeparate",
        alias = "married_separate",
        alias = "married-filing-separately",
        alias = "marriedFilingSeparately"
    )]
    MarriedSeparate,
}

impl From<ApiFilingStatus> for FilingStatus {
    fn from(value: ApiFilingStatus) -> Self {
        match value {
            ApiFilingStatus::Single => FilingStatus::Single,
            ApiFilingStatus::HeadOfHousehold => FilingStatus::HeadOfHousehold,
            ApiFilingStatus::MarriedJoint => FilingStatus::MarriedFilingJointly,
            ApiFilingStatus::MarriedSeparate => FilingStatus::MarriedFilingSeparately,
        }
    }
}

// Form field bounds, one spec per input box.
const CURRENT_AGE: FieldSpec = FieldSpec::integer("currentAge", 0.0, 120.0).required();
const RETIREMENT_AGE: FieldSpec = FieldSpec::integer("retirementAge", 0.0, 120.0).required();
const CURRENT_SAVINGS: FieldSpec = FieldSpec::currency("currentSavings", 10_000_000.0);
const ANNUAL_CONTRIBUTION: FieldSpec = FieldSpec::currency("annualContribution", 1_000_000.0);
const ANNUAL_RETURN: FieldSpec = FieldSpec::percent("annualReturn", 50.0);

const YEARS: FieldSpec = FieldSpec::years("years", 0.0, 100.0).required();
const INITIAL_AMOUNT_A: FieldSpec = FieldSpec::currency("initialAmountA", 10_000_000.0);
const CONTRIBUTION_A: FieldSpec = FieldSpec::currency("annualContributionA", 1_000_000.0);
const RETURN_A: FieldSpec = FieldSpec::percent("annualReturnA", 50.0);
const INITIAL_AMOUNT_B: FieldSpec = FieldSpec::currency("initialAmountB", 10_000_000.0);
const CONTRIBUTION_B: FieldSpec = FieldSpec::currency("annualContributionB", 1_000_000.0);
const RETURN_B: FieldSpec = FieldSpec::percent("annualReturnB", 50.0);

const MAGI: FieldSpec = FieldSpec::currency("magi", 10_000_000.0).required();
const IRA_ANNUAL_CONTRIBUTION: FieldSpec =
    FieldSpec::currency("annualContribution", IRA_CONTRIBUTION_LIMIT);
const CURRENT_BALANCE: FieldSpec = FieldSpec::currency("currentBalance", 10_000_000.0);
const EXPECTED_RETURN: FieldSpec = FieldSpec::percent("expectedReturn", 50.0);

const TOTAL_DEBT: FieldSpec = FieldSpec::currency("totalDebt", 1_000_000.0).required();
const ANNUAL_RATE: FieldSpec = FieldSpec::percent("annualRate", 100.0);
const MONTHLY_PAYMENT: FieldSpec = FieldSpec::currency("monthlyPayment", 100_000.0).required();
const INVESTMENT_RATE: FieldSpec = FieldSpec::percent("investmentRate", 50.0);

const INITIAL_BALANCE: FieldSpec = FieldSpec::currency("initialBalance", 10_000_000.0).required();
const ANNUAL_WITHDRAWAL: FieldSpec =
    FieldSpec::currency("annualWithdrawal", 10_000_000.0).required();
const RATE_OF_RETURN: FieldSpec = FieldSpec::percent("rateOfReturn", 50.0);
const INFLATION_RATE: FieldSpec = FieldSpec::percent("inflationRate", 20.0);

const YEARS_UNTIL_COLLEGE: FieldSpec = FieldSpec::years("yearsUntilCollege", 0.0, 50.0).required();
const COLLEGE_COST: FieldSpec = FieldSpec::currency("collegeCost", 10_000_000.0).required();
const COST_INFLATION: FieldSpec = FieldSpec::percent("costInflation", 20.0);

const INCOME: FieldSpec = FieldSpec::currency("income", 1_000_000.0);
const EXPENSES: FieldSpec = FieldSpec::currency("expenses", 1_000_000.0);

const ASSETS: FieldSpec = FieldSpec::currency("assets", 10_000_000.0);
const LIABILITIES: FieldSpec = FieldSpec::currency("liabilities", 10_000_000.0);

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetirementPayload {
    current_age: Option<RawField>,
    retirement_age: Option<RawField>,
    current_savings: Option<RawField>,
    annual_contribution: Option<RawField>,
    annual_return: Option<RawField>,
}

#[derive(Debug)]
struct RetirementRequest {
    params: GrowthParameters,
    advisories: Vec<Advisory>,
}

fn retirement_request_from_payload(
    payload: RetirementPayload,
) -> Result<RetirementRequest, Vec<FieldError>> {
    let mut form = SanitizedForm::new();
    let current_age = form.count(&CURRENT_AGE, payload.current_age.as_ref());
    let retirement_age = form.count(&RETIREMENT_AGE, payload.retirement_age.as_ref());
    let current_savings = form.value(&CURRENT_SAVINGS, payload.current_savings.as_ref());
    let annual_contribution =
        form.value(&ANNUAL_CONTRIBUTION, payload.annual_contribution.as_ref());
    let annual_return = form.value(&ANNUAL_RETURN, payload.annual_return.as_ref());
    if retirement_age < current_age {
        form.error("retirementAge", "retirementAge must be at least currentAge");
    }
    let advisories = form.finish()?;
    Ok(RetirementRequest {
        params: GrowthParameters {
            present_value: current_savings,
            annual_contribution,
            annual_rate: annual_return / 100.0,
            years: retirement_age - current_age,
        },
        advisories,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RetirementResponse {
    years: u32,
    projection: ProjectionResult,
    advisories: Vec<Advisory>,
}

fn build_retirement_response(request: RetirementRequest) -> RetirementResponse {
    let projection = project_growth(&request.params, RETIREMENT_TIMING);
    RetirementResponse {
        years: request.params.years,
        projection,
        advisories: request.advisories,
    }
}

async fn retirement_get_handler(Query(payload): Query<RetirementPayload>) -> Response {
    retirement_handler_impl(payload)
}

async fn retirement_post_handler(Json(payload): Json<RetirementPayload>) -> Response {
    retirement_handler_impl(payload)
}

fn retirement_handler_impl(payload: RetirementPayload) -> Response {
    match retirement_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_retirement_response(request)),
        Err(fields) => validation_error_response(fields),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparisonPayload {
    years: Option<RawField>,
    initial_amount_a: Option<RawField>,
    annual_contribution_a: Option<RawField>,
    annual_return_a: Option<RawField>,
    initial_amount_b: Option<RawField>,
    annual_contribution_b: Option<RawField>,
    annual_return_b: Option<RawField>,
}

#[derive(Debug)]
struct ComparisonRequest {
    years: u32,
    option_a: GrowthParameters,
    option_b: GrowthParameters,
    advisories: Vec<Advisory>,
}

fn comparison_request_from_payload(
    payload: ComparisonPayload,
) -> Result<ComparisonRequest, Vec<FieldError>> {
    let mut form = SanitizedForm::new();
    let years = form.count(&YEARS, payload.years.as_ref());
    let initial_a = form.value(&INITIAL_AMOUNT_A, payload.initial_amount_a.as_ref());
    let contribution_a = form.value(&CONTRIBUTION_A, payload.annual_contribution_a.as_ref());
    let return_a = form.value(&RETURN_A, payload.annual_return_a.as_ref());
    let initial_b = form.value(&INITIAL_AMOUNT_B, payload.initial_amount_b.as_ref());
    let contribution_b = form.value(&CONTRIBUTION_B, payload.annual_contribution_b.as_ref());
    let return_b = form.value(&RETURN_B, payload.annual_return_b.as_ref());
    let advisories = form.finish()?;
    Ok(ComparisonRequest {
        years,
        option_a: GrowthParameters {
            present_value: initial_a,
            annual_contribution: contribution_a,
            annual_rate: return_a / 100.0,
            years,
        },
        option_b: GrowthParameters {
            present_value: initial_b,
            annual_contribution: contribution_b,
            annual_rate: return_b / 100.0,
            years,
        },
        advisories,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonResponse {
    years: u32,
    comparison: ComparisonResult,
    advisories: Vec<Advisory>,
}

fn build_comparison_response(request: ComparisonRequest) -> ComparisonResponse {
    let comparison = compare_growth(&request.option_a, &request.option_b);
    ComparisonResponse {
        years: request.years,
        comparison,
        advisories: request.advisories,
    }
}

async fn comparison_get_handler(Query(payload): Query<ComparisonPayload>) -> Response {
    comparison_handler_impl(payload)
}

async fn comparison_post_handler(Json(payload): Json<ComparisonPayload>) -> Response {
    comparison_handler_impl(payload)
}

fn comparison_handler_impl(payload: ComparisonPayload) -> Response {
    match comparison_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_comparison_response(request)),
        Err(fields) => validation_error_response(fields),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct IraPayload {
    magi: Option<RawField>,
    filing_status: Option<ApiFilingStatus>,
    has_workplace_plan: Option<bool>,
    annual_contribution: Option<RawField>,
    current_age: Option<RawField>,
    retirement_age: Option<RawField>,
    current_balance: Option<RawField>,
    expected_return: Option<RawField>,
}

#[derive(Debug)]
struct IraRequest {
    magi: f64,
    filing_status: FilingStatus,
    has_workplace_plan: bool,
    annual_contribution: f64,
    projection: GrowthParameters,
    advisories: Vec<Advisory>,
}

fn ira_request_from_payload(payload: IraPayload) -> Result<IraRequest, Vec<FieldError>> {
    let mut form = SanitizedForm::new();
    let magi = form.value(&MAGI, payload.magi.as_ref());
    // An omitted contribution means the full annual limit.
    let annual_contribution = match payload.annual_contribution.as_ref() {
        Some(raw) => form.value(&IRA_ANNUAL_CONTRIBUTION, Some(raw)),
        None => IRA_CONTRIBUTION_LIMIT,
    };
    let current_age = form.count(&CURRENT_AGE, payload.current_age.as_ref());
    let retirement_age = form.count(&RETIREMENT_AGE, payload.retirement_age.as_ref());
    let current_balance = form.value(&CURRENT_BALANCE, payload.current_balance.as_ref());
    let expected_return = form.value(&EXPECTED_RETURN, payload.expected_return.as_ref());
    if retirement_age < current_age {
        form.error("retirementAge", "retirementAge must be at least currentAge");
    }
    let advisories = form.finish()?;
    Ok(IraRequest {
        magi,
        filing_status: payload
            .filing_status
            .unwrap_or(ApiFilingStatus::Single)
            .into(),
        has_workplace_plan: payload.has_workplace_plan.unwrap_or(false),
        annual_contribution,
        projection: GrowthParameters {
            present_value: current_balance,
            annual_contribution,
            annual_rate: expected_return / 100.0,
            years: retirement_age - current_age,
        },
        advisories,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IraResponse {
    eligibility: IraEligibility,
    years_to_retirement: u32,
    projection: ProjectionResult,
    advisories: Vec<Advisory>,
}

fn build_ira_response(request: IraRequest) -> IraResponse {
    let eligibility = evaluate_ira_deduction(
        request.magi,
        request.filing_status,
        request.has_workplace_plan,
        request.annual_contribution,
    );
    let projection = project_growth(&request.projection, IRA_TIMING);
    IraResponse {
        eligibility,
        years_to_retirement: request.projection.years,
        projection,
        advisories: request.advisories,
    }
}

async fn ira_get_handler(Query(payload): Query<IraPayload>) -> Response {
    ira_handler_impl(payload)
}

async fn ira_post_handler(Json(payload): Json<IraPayload>) -> Response {
    ira_handler_impl(payload)
}

fn ira_handler_impl(payload: IraPayload) -> Response {
    match ira_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_ira_response(request)),
        Err(fields) => validation_error_response(fields),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DebtVsInvestPayload {
    total_debt: Option<RawField>,
    annual_rate: Option<RawField>,
    monthly_payment: Option<RawField>,
    investment_rate: Option<RawField>,
}

#[derive(Debug)]
struct DebtVsInvestRequest {
    total_debt: f64,
    annual_rate: f64,
    monthly_payment: f64,
    investment_rate: f64,
    advisories: Vec<Advisory>,
}

fn debt_request_from_payload(
    payload: DebtVsInvestPayload,
) -> Result<DebtVsInvestRequest, Vec<FieldError>> {
    let mut form = SanitizedForm::new();
    let total_debt = form.value(&TOTAL_DEBT, payload.total_debt.as_ref());
    let annual_rate = form.value(&ANNUAL_RATE, payload.annual_rate.as_ref());
    let monthly_payment = form.value(&MONTHLY_PAYMENT, payload.monthly_payment.as_ref());
    let investment_rate = form.value(&INVESTMENT_RATE, payload.investment_rate.as_ref());
    let advisories = form.finish()?;
    Ok(DebtVsInvestRequest {
        total_debt,
        annual_rate: annual_rate / 100.0,
        monthly_payment,
        investment_rate: investment_rate / 100.0,
        advisories,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DebtVsInvestResponse {
    comparison: DebtVsInvestResult,
    message: String,
    advisories: Vec<Advisory>,
}

fn build_debt_response(request: DebtVsInvestRequest) -> DebtVsInvestResponse {
    let comparison = compare_debt_vs_invest(
        request.total_debt,
        request.annual_rate,
        request.monthly_payment,
        request.investment_rate,
    );
    let message = debt_summary_message(&comparison);
    DebtVsInvestResponse {
        comparison,
        message,
        advisories: request.advisories,
    }
}

fn debt_summary_message(comparison: &DebtVsInvestResult) -> String {
    let verdict = match comparison.recommendation {
        PayoffRecommendation::PayOffDebt => {
            "Paying the debt down first saves more than the same payments would earn invested."
        }
        PayoffRecommendation::Invest => {
            "Investing the payments earns more than paying the debt down early would save."
        }
    };
    if comparison.payoff.paid_off {
        verdict.to_string()
    } else {
        format!("The debt is not paid off within 50 years. {verdict}")
    }
}

async fn debt_get_handler(Query(payload): Query<DebtVsInvestPayload>) -> Response {
    debt_handler_impl(payload)
}

async fn debt_post_handler(Json(payload): Json<DebtVsInvestPayload>) -> Response {
    debt_handler_impl(payload)
}

fn debt_handler_impl(payload: DebtVsInvestPayload) -> Response {
    match debt_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_debt_response(request)),
        Err(fields) => validation_error_response(fields),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LongevityPayload {
    initial_balance: Option<RawField>,
    annual_withdrawal: Option<RawField>,
    rate_of_return: Option<RawField>,
    inflation_rate: Option<RawField>,
}

#[derive(Debug)]
struct LongevityRequest {
    initial_balance: f64,
    annual_withdrawal: f64,
    rate_of_return: f64,
    inflation_rate: f64,
    advisories: Vec<Advisory>,
}

fn longevity_request_from_payload(
    payload: LongevityPayload,
) -> Result<LongevityRequest, Vec<FieldError>> {
    let mut form = SanitizedForm::new();
    let initial_balance = form.value(&INITIAL_BALANCE, payload.initial_balance.as_ref());
    let annual_withdrawal = form.value(&ANNUAL_WITHDRAWAL, payload.annual_withdrawal.as_ref());
    let rate_of_return = form.value(&RATE_OF_RETURN, payload.rate_of_return.as_ref());
    let inflation_rate = form.value(&INFLATION_RATE, payload.inflation_rate.as_ref());
    let advisories = form.finish()?;
    Ok(LongevityRequest {
        initial_balance,
        annual_withdrawal,
        rate_of_return: rate_of_return / 100.0,
        inflation_rate: inflation_rate / 100.0,
        advisories,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LongevityResponse {
    horizon_years: u32,
    depletion_year: Option<u32>,
    message: String,
    yearly_ledger: Vec<LedgerYear>,
    advisories: Vec<Advisory>,
}

fn build_longevity_response(request: LongevityRequest) -> LongevityResponse {
    let result = simulate_depletion(
        request.initial_balance,
        request.annual_withdrawal,
        request.rate_of_return,
        request.inflation_rate,
    );
    let message = longevity_message(result.depletion_year);
    LongevityResponse {
        horizon_years: DEPLETION_HORIZON_YEARS,
        depletion_year: result.depletion_year,
        message,
        yearly_ledger: result.yearly_ledger,
        advisories: request.advisories,
    }
}

fn longevity_message(depletion_year: Option<u32>) -> String {
    match depletion_year {
        Some(year) => format!("The savings run out in year {year}."),
        None => format!("The savings last the full {DEPLETION_HORIZON_YEARS}-year horizon."),
    }
}

async fn longevity_get_handler(Query(payload): Query<LongevityPayload>) -> Response {
    longevity_handler_impl(payload)
}

async fn longevity_post_handler(Json(payload): Json<LongevityPayload>) -> Response {
    longevity_handler_impl(payload)
}

fn longevity_handler_impl(payload: LongevityPayload) -> Response {
    match longevity_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_longevity_response(request)),
        Err(fields) => validation_error_response(fields),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CollegePayload {
    current_savings: Option<RawField>,
    annual_contribution: Option<RawField>,
    years_until_college: Option<RawField>,
    annual_return: Option<RawField>,
    college_cost: Option<RawField>,
    cost_inflation: Option<RawField>,
}

#[derive(Debug)]
struct CollegeRequest {
    plan: CollegePlan,
    advisories: Vec<Advisory>,
}

fn college_request_from_payload(
    payload: CollegePayload,
) -> Result<CollegeRequest, Vec<FieldError>> {
    let mut form = SanitizedForm::new();
    let current_savings = form.value(&CURRENT_SAVINGS, payload.current_savings.as_ref());
    let annual_contribution =
        form.value(&ANNUAL_CONTRIBUTION, payload.annual_contribution.as_ref());
    let years_until_college =
        form.count(&YEARS_UNTIL_COLLEGE, payload.years_until_college.as_ref());
    let annual_return = form.value(&ANNUAL_RETURN, payload.annual_return.as_ref());
    let college_cost = form.value(&COLLEGE_COST, payload.college_cost.as_ref());
    let cost_inflation = form.value(&COST_INFLATION, payload.cost_inflation.as_ref());
    let advisories = form.finish()?;
    Ok(CollegeRequest {
        plan: CollegePlan {
            current_savings,
            annual_contribution,
            annual_return: annual_return / 100.0,
            years_until_college,
            college_cost_today: college_cost,
            cost_inflation: cost_inflation / 100.0,
        },
        advisories,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollegeResponse {
    savings: ProjectionResult,
    future_college_cost: f64,
    surplus: f64,
    fully_funded: bool,
    advisories: Vec<Advisory>,
}

fn build_college_response(request: CollegeRequest) -> CollegeResponse {
    let result = project_college_savings(&request.plan);
    CollegeResponse {
        savings: result.savings,
        future_college_cost: result.future_college_cost,
        surplus: result.surplus,
        fully_funded: result.fully_funded,
        advisories: request.advisories,
    }
}

async fn college_get_handler(Query(payload): Query<CollegePayload>) -> Response {
    college_handler_impl(payload)
}

async fn college_post_handler(Json(payload): Json<CollegePayload>) -> Response {
    college_handler_impl(payload)
}

fn college_handler_impl(payload: CollegePayload) -> Response {
    match college_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_college_response(request)),
        Err(fields) => validation_error_response(fields),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BudgetPayload {
    income: Option<Vec<RawField>>,
    expenses: Option<Vec<RawField>>,
}

#[derive(Debug)]
struct BudgetRequest {
    income: Vec<f64>,
    expenses: Vec<f64>,
    advisories: Vec<Advisory>,
}

fn budget_request_from_payload(payload: BudgetPayload) -> Result<BudgetRequest, Vec<FieldError>> {
    let mut form = SanitizedForm::new();
    let income = form.values(&INCOME, payload.income.as_deref());
    let expenses = form.values(&EXPENSES, payload.expenses.as_deref());
    let advisories = form.finish()?;
    Ok(BudgetRequest {
        income,
        expenses,
        advisories,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetResponse {
    total_income: f64,
    total_expenses: f64,
    net_cash_flow: f64,
    advisories: Vec<Advisory>,
}

fn build_budget_response(request: BudgetRequest) -> BudgetResponse {
    let result = monthly_budget(&request.income, &request.expenses);
    BudgetResponse {
        total_income: result.total_income,
        total_expenses: result.total_expenses,
        net_cash_flow: result.net_cash_flow,
        advisories: request.advisories,
    }
}

async fn budget_post_handler(Json(payload): Json<BudgetPayload>) -> Response {
    match budget_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_budget_response(request)),
        Err(fields) => validation_error_response(fields),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NetWorthPayload {
    assets: Option<Vec<RawField>>,
    liabilities: Option<Vec<RawField>>,
}

#[derive(Debug)]
struct NetWorthRequest {
    assets: Vec<f64>,
    liabilities: Vec<f64>,
    advisories: Vec<Advisory>,
}

fn net_worth_request_from_payload(
    payload: NetWorthPayload,
) -> Result<NetWorthRequest, Vec<FieldError>> {
    let mut form = SanitizedForm::new();
    let assets = form.values(&ASSETS, payload.assets.as_deref());
    let liabilities = form.values(&LIABILITIES, payload.liabilities.as_deref());
    let advisories = form.finish()?;
    Ok(NetWorthRequest {
        assets,
        liabilities,
        advisories,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NetWorthResponse {
    total_assets: f64,
    total_liabilities: f64,
    net_worth: f64,
    advisories: Vec<Advisory>,
}

fn build_net_worth_response(request: NetWorthRequest) -> NetWorthResponse {
    let result = net_worth(&request.assets, &request.liabilities);
    NetWorthResponse {
        total_assets: result.total_assets,
        total_liabilities: result.total_liabilities,
        net_worth: result.net_worth,
        advisories: request.advisories,
    }
}

async fn net_worth_post_handler(Json(payload): Json<NetWorthPayload>) -> Response {
    match net_worth_request_from_payload(payload) {
        Ok(request) => json_response(StatusCode::OK, build_net_worth_response(request)),
        Err(fields) => validation_error_response(fields),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EndpointInfo {
    path: &'static str,
    calculator: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexResponse {
    service: &'static str,
    version: &'static str,
    endpoints: Vec<EndpointInfo>,
}

fn build_index_response() -> IndexResponse {
    IndexResponse {
        service: "fincalc",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            EndpointInfo { path: "/api/retirement", calculator: "retirement-savings" },
            EndpointInfo { path: "/api/investment-comparison", calculator: "growth-comparison" },
            EndpointInfo { path: "/api/ira", calculator: "ira-deduction" },
            EndpointInfo { path: "/api/debt-vs-invest", calculator: "debt-vs-invest" },
            EndpointInfo { path: "/api/savings-longevity", calculator: "savings-longevity" },
            EndpointInfo { path: "/api/college-savings", calculator: "college-savings" },
            EndpointInfo { path: "/api/budget", calculator: "monthly-budget" },
            EndpointInfo { path: "/api/net-worth", calculator: "net-worth" },
        ],
    }
}

async fn index_handler() -> Response {
    json_response(StatusCode::OK, build_index_response())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct ValidationErrorResponse {
    error: String,
    fields: Vec<FieldError>,
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header value"),
    );
    response
}

fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: message.to_string(),
        },
    )
}

fn validation_error_response(fields: Vec<FieldError>) -> Response {
    log::warn!("rejected request with {} invalid field(s)", fields.len());
    json_response(
        StatusCode::BAD_REQUEST,
        ValidationErrorResponse {
            error: "invalid input".to_string(),
            fields,
        },
    )
}

/// Serves the calculator API on `0.0.0.0:port` until the process exits.
pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    // Query strings cannot carry the list fields, so the two list
    // calculators are POST only.
    let app = Router::new()
        .route("/", get(index_handler))
        .route(
            "/api/retirement",
            get(retirement_get_handler).post(retirement_post_handler),
        )
        .route(
            "/api/investment-comparison",
            get(comparison_get_handler).post(comparison_post_handler),
        )
        .route("/api/ira", get(ira_get_handler).post(ira_post_handler))
        .route(
            "/api/debt-vs-invest",
            get(debt_get_handler).post(debt_post_handler),
        )
        .route(
            "/api/savings-longevity",
            get(longevity_get_handler).post(longevity_post_handler),
        )
        .route(
            "/api/college-savings",
            get(college_get_handler).post(college_post_handler),
        )
        .route("/api/budget", post(budget_post_handler))
        .route("/api/net-worth", post(net_worth_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on http://{addr}");

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).expect("payload should parse")
    }

    #[test]
    fn retirement_payload_accepts_numbers_and_formatted_text() {
        let payload: RetirementPayload = from_json(
            r#"{"currentAge": 30, "retirementAge": "65", "currentSavings": "$12,500",
                "annualContribution": 2400, "annualReturn": "7"}"#,
        );
        let request = retirement_request_from_payload(payload).unwrap();
        assert_eq!(request.params.years, 35);
        assert_approx(request.params.present_value, 12_500.0);
        assert_approx(request.params.annual_contribution, 2_400.0);
        assert_approx(request.params.annual_rate, 0.07);
        assert!(request.advisories.is_empty());
    }

    #[test]
    fn retirement_requires_both_ages() {
        let errors = retirement_request_from_payload(RetirementPayload::default()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"currentAge"));
        assert!(fields.contains(&"retirementAge"));
    }

    #[test]
    fn retirement_rejects_retiring_before_the_current_age() {
        let payload: RetirementPayload = from_json(r#"{"currentAge": 50, "retirementAge": 40}"#);
        let errors = retirement_request_from_payload(payload).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "retirementAge");
    }

    #[test]
    fn retirement_allows_retiring_in_the_current_year() {
        let payload: RetirementPayload = from_json(r#"{"currentAge": 40, "retirementAge": 40}"#);
        let request = retirement_request_from_payload(payload).unwrap();
        assert_eq!(request.params.years, 0);
    }

    #[test]
    fn retirement_caps_oversized_savings_with_an_advisory() {
        let payload: RetirementPayload = from_json(
            r#"{"currentAge": 30, "retirementAge": 60, "currentSavings": "999,999,999,999"}"#,
        );
        let request = retirement_request_from_payload(payload).unwrap();
        assert_approx(request.params.present_value, 10_000_000.0);
        assert_eq!(request.advisories.len(), 1);
        assert_eq!(request.advisories[0].field, "currentSavings");
    }

    #[test]
    fn retirement_response_serializes_camel_case_fields() {
        let payload: RetirementPayload = from_json(
            r#"{"currentAge": 30, "retirementAge": 40, "currentSavings": 1000, "annualReturn": 5}"#,
        );
        let request = retirement_request_from_payload(payload).unwrap();
        let json = serde_json::to_string(&build_retirement_response(request)).unwrap();
        assert!(json.contains("\"futureValue\""));
        assert!(json.contains("\"totalContributed\""));
        assert!(json.contains("\"totalGain\""));
        assert!(json.contains("\"advisories\""));
    }

    #[test]
    fn retirement_query_string_parses_currency_and_percent_text() {
        let uri: axum::http::Uri =
            "/api/retirement?currentAge=30&retirementAge=65&currentSavings=%2412%2C500\
             &annualContribution=2%2C400&annualReturn=7.5"
                .parse()
                .unwrap();
        let Query(payload) = Query::<RetirementPayload>::try_from_uri(&uri).unwrap();
        let request = retirement_request_from_payload(payload).unwrap();
        assert_eq!(request.params.years, 35);
        assert_approx(request.params.present_value, 12_500.0);
        assert_approx(request.params.annual_contribution, 2_400.0);
        assert_approx(request.params.annual_rate, 0.075);
        assert!(request.advisories.is_empty());
    }

    #[test]
    fn comparison_reports_the_outright_winner() {
        let payload: ComparisonPayload = from_json(
            r#"{"years": 10, "initialAmountA": 10000, "annualReturnA": 5,
                "initialAmountB": 10000, "annualReturnB": "7.5"}"#,
        );
        let request = comparison_request_from_payload(payload).unwrap();
        assert_approx(request.option_b.annual_rate, 0.075);
        let json = serde_json::to_string(&build_comparison_response(request)).unwrap();
        assert!(json.contains("\"betterOption\":\"B\""));
    }

    #[test]
    fn ira_contribution_defaults_to_the_annual_limit() {
        let payload: IraPayload =
            from_json(r#"{"magi": 50000, "currentAge": 40, "retirementAge": 65}"#);
        let request = ira_request_from_payload(payload).unwrap();
        assert_approx(request.annual_contribution, 7_000.0);
        assert_eq!(request.filing_status, FilingStatus::Single);
        assert!(!request.has_workplace_plan);
    }

    #[test]
    fn ira_without_workplace_plan_deducts_in_full() {
        let payload: IraPayload = from_json(
            r#"{"magi": 200000, "currentAge": 40, "retirementAge": 65, "annualContribution": 5000}"#,
        );
        let response = build_ira_response(ira_request_from_payload(payload).unwrap());
        assert!(response.eligibility.eligible);
        assert_approx(response.eligibility.max_deductible, 5_000.0);
        assert!(!response.eligibility.phase_out_applies);
    }

    #[test]
    fn ira_filing_status_accepts_aliases() {
        let payload: IraPayload = from_json(
            r#"{"magi": 130000, "filingStatus": "married-filing-jointly",
                "hasWorkplacePlan": true, "currentAge": 40, "retirementAge": 65}"#,
        );
        let request = ira_request_from_payload(payload).unwrap();
        assert_eq!(request.filing_status, FilingStatus::MarriedFilingJointly);

        let payload: IraPayload = from_json(r#"{"magi": 1, "filingStatus": "marriedJoint"}"#);
        assert_eq!(payload.filing_status, Some(ApiFilingStatus::MarriedJoint));
    }

    #[test]
    fn ira_phase_out_scenario_reaches_the_partial_deduction() {
        let payload: IraPayload = from_json(
            r#"{"magi": 130000, "filingStatus": "married-joint", "hasWorkplacePlan": true,
                "currentAge": 40, "retirementAge": 65}"#,
        );
        let response = build_ira_response(ira_request_from_payload(payload).unwrap());
        assert!(response.eligibility.phase_out_applies);
        assert_approx_tol(response.eligibility.max_deductible, 4_550.0, 1e-9);
        assert_eq!(response.years_to_retirement, 25);
    }

    #[test]
    fn ira_query_string_parses_the_filing_status_and_plan_flag() {
        let uri: axum::http::Uri =
            "/api/ira?magi=130000&filingStatus=married-joint&hasWorkplacePlan=true\
             &currentAge=40&retirementAge=65"
                .parse()
                .unwrap();
        let Query(payload) = Query::<IraPayload>::try_from_uri(&uri).unwrap();
        let request = ira_request_from_payload(payload).unwrap();
        assert_eq!(request.filing_status, FilingStatus::MarriedFilingJointly);
        assert!(request.has_workplace_plan);
        let response = build_ira_response(request);
        assert_approx_tol(response.eligibility.max_deductible, 4_550.0, 1e-9);
    }

    #[test]
    fn debt_scenario_caps_the_balance_and_reports_the_horizon() {
        let payload: DebtVsInvestPayload = from_json(
            r#"{"totalDebt": "2,000,000", "annualRate": 10, "monthlyPayment": 5000,
                "investmentRate": 7}"#,
        );
        let request = debt_request_from_payload(payload).unwrap();
        assert_approx(request.total_debt, 1_000_000.0);
        assert_eq!(request.advisories.len(), 1);
        assert_eq!(request.advisories[0].field, "totalDebt");

        let response = build_debt_response(request);
        assert_eq!(response.comparison.payoff.months, 600);
        assert!(!response.comparison.payoff.paid_off);
        assert_approx(response.comparison.interest_saved, 0.0);
        assert!(response.message.contains("50 years"));
    }

    #[test]
    fn debt_payload_requires_the_balance_and_payment() {
        let errors = debt_request_from_payload(DebtVsInvestPayload::default()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"totalDebt"));
        assert!(fields.contains(&"monthlyPayment"));
    }

    #[test]
    fn longevity_reports_the_depletion_year() {
        let payload: LongevityPayload =
            from_json(r#"{"initialBalance": 10000, "annualWithdrawal": 20000}"#);
        let response = build_longevity_response(longevity_request_from_payload(payload).unwrap());
        assert_eq!(response.depletion_year, Some(1));
        assert_eq!(response.yearly_ledger.len(), 1);
        assert!(response.message.contains("year 1"));
    }

    #[test]
    fn longevity_reports_a_full_horizon() {
        let payload: LongevityPayload = from_json(
            r#"{"initialBalance": 100000, "annualWithdrawal": 0, "rateOfReturn": 5}"#,
        );
        let response = build_longevity_response(longevity_request_from_payload(payload).unwrap());
        assert_eq!(response.depletion_year, None);
        assert_eq!(response.horizon_years, 30);
        assert_eq!(response.yearly_ledger.len(), 30);
        assert!(response.message.contains("30-year"));
    }

    #[test]
    fn college_scenario_is_fully_funded() {
        let payload: CollegePayload = from_json(
            r#"{"currentSavings": 5000, "annualContribution": 2400, "annualReturn": 7,
                "yearsUntilCollege": 10, "collegeCost": 25000, "costInflation": 4}"#,
        );
        let response = build_college_response(college_request_from_payload(payload).unwrap());
        assert_approx_tol(response.savings.future_value, 42_995.23, 0.05);
        assert_approx_tol(response.future_college_cost, 37_006.11, 0.05);
        assert!(response.fully_funded);
        assert!(response.surplus > 0.0);
    }

    #[test]
    fn college_requires_the_cost_and_years() {
        let errors = college_request_from_payload(CollegePayload::default()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"yearsUntilCollege"));
        assert!(fields.contains(&"collegeCost"));
    }

    #[test]
    fn budget_sums_sanitized_lists() {
        let payload: BudgetPayload =
            from_json(r#"{"income": [3000, "1,200"], "expenses": ["850", 125.5]}"#);
        let response = build_budget_response(budget_request_from_payload(payload).unwrap());
        assert_approx(response.total_income, 4_200.0);
        assert_approx(response.total_expenses, 975.5);
        assert_approx(response.net_cash_flow, 3_224.5);
        assert!(response.advisories.is_empty());
    }

    #[test]
    fn net_worth_defaults_to_empty_lists() {
        let request = net_worth_request_from_payload(NetWorthPayload::default()).unwrap();
        let response = build_net_worth_response(request);
        assert_approx(response.total_assets, 0.0);
        assert_approx(response.total_liabilities, 0.0);
        assert_approx(response.net_worth, 0.0);
        assert!(response.advisories.is_empty());
    }

    #[test]
    fn net_worth_subtracts_liabilities_from_assets() {
        let payload: NetWorthPayload =
            from_json(r#"{"assets": [250000, 30000], "liabilities": ["180,000"]}"#);
        let response = build_net_worth_response(net_worth_request_from_payload(payload).unwrap());
        assert_approx(response.total_assets, 280_000.0);
        assert_approx(response.total_liabilities, 180_000.0);
        assert_approx(response.net_worth, 100_000.0);
    }

    #[test]
    fn validation_failures_become_bad_requests() {
        let response = validation_error_response(vec![FieldError {
            field: "currentAge",
            message: "currentAge is required".to_string(),
        }]);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_error_body_lists_each_field() {
        let body = serde_json::to_string(&ValidationErrorResponse {
            error: "invalid input".to_string(),
            fields: vec![FieldError {
                field: "currentAge",
                message: "currentAge is required".to_string(),
            }],
        })
        .unwrap();
        assert!(body.contains("\"fields\""));
        assert!(body.contains("\"currentAge\""));
    }

    #[test]
    fn json_responses_disable_caching() {
        let response = json_response(StatusCode::OK, build_index_response());
        assert_eq!(response.status(), StatusCode::OK);
        let cache = response.headers().get(header::CACHE_CONTROL);
        assert_eq!(cache.map(|v| v.to_str().unwrap()), Some("no-store"));
    }

    #[test]
    fn index_lists_every_calculator() {
        let index = build_index_response();
        assert_eq!(index.service, "fincalc");
        assert_eq!(index.endpoints.len(), 8);
        assert!(index.endpoints.iter().any(|e| e.path == "/api/debt-vs-invest"));
        assert!(index.endpoints.iter().any(|e| e.path == "/api/net-worth"));
    }
}
