use super::types::{
    BetterOption, BudgetResult, CollegePlan, CollegeSavingsResult, ComparisonResult,
    ContributionTiming, DebtPayoffResult, DebtVsInvestResult, DepletionResult, FilingStatus,
    GrowthParameters, IraEligibility, LedgerYear, NetWorthResult, PayoffRecommendation,
    ProjectionResult,
};

pub const IRA_CONTRIBUTION_LIMIT: f64 = 7_000.0;
pub const MAX_PAYOFF_MONTHS: u32 = 600;
pub const DEPLETION_HORIZON_YEARS: u32 = 30;

pub const RETIREMENT_TIMING: ContributionTiming = ContributionTiming::EndOfYear;
pub const COMPARISON_TIMING: ContributionTiming = ContributionTiming::EndOfYear;
pub const COLLEGE_TIMING: ContributionTiming = ContributionTiming::EndOfYear;
pub const IRA_TIMING: ContributionTiming = ContributionTiming::StartOfYear;

pub fn project_growth(params: &GrowthParameters, timing: ContributionTiming) -> ProjectionResult {
    let future_value = match timing {
        ContributionTiming::EndOfYear => end_of_year_future_value(params),
        ContributionTiming::StartOfYear => start_of_year_future_value(params),
    };
    let total_contributed = params.present_value + params.annual_contribution * params.years as f64;
    ProjectionResult {
        future_value,
        total_contributed,
        total_gain: future_value - total_contributed,
    }
}

fn end_of_year_future_value(params: &GrowthParameters) -> f64 {
    let growth = (1.0 + params.annual_rate).powi(params.years as i32);
    let principal = params.present_value * growth;
    let contributions = if params.annual_rate > 0.0 {
        params.annual_contribution * (growth - 1.0) / params.annual_rate
    } else {
        params.annual_contribution * params.years as f64
    };
    principal + contributions
}

fn start_of_year_future_value(params: &GrowthParameters) -> f64 {
    let mut balance = params.present_value;
    for _ in 0..params.years {
        balance = (balance + params.annual_contribution) * (1.0 + params.annual_rate);
    }
    balance
}

pub fn compare_growth(
    option_a: &GrowthParameters,
    option_b: &GrowthParameters,
) -> ComparisonResult {
    let a = project_growth(option_a, COMPARISON_TIMING);
    let b = project_growth(option_b, COMPARISON_TIMING);
    // Ties go to option A; B has to win outright.
    let better_option = if b.future_value > a.future_value {
        BetterOption::OptionB
    } else {
        BetterOption::OptionA
    };
    ComparisonResult {
        option_a: a,
        option_b: b,
        better_option,
        difference: (a.future_value - b.future_value).abs(),
    }
}

pub fn simulate_debt_payoff(
    total_debt: f64,
    annual_rate: f64,
    monthly_payment: f64,
) -> DebtPayoffResult {
    let monthly_rate = annual_rate / 12.0;
    let mut remaining = total_debt;
    let mut total_interest_paid = 0.0;
    let mut months = 0_u32;

    while remaining > 0.0 && months < MAX_PAYOFF_MONTHS {
        let interest_charge = remaining * monthly_rate;
        let principal_payment = monthly_payment - interest_charge;
        if principal_payment <= 0.0 {
            // The payment never catches up with interest, so report the
            // horizon without crediting the month that made no progress.
            return DebtPayoffResult {
                months: MAX_PAYOFF_MONTHS,
                total_interest_paid,
                paid_off: false,
            };
        }
        remaining -= principal_payment;
        total_interest_paid += interest_charge;
        months += 1;
    }

    DebtPayoffResult {
        months,
        total_interest_paid,
        paid_off: remaining <= 0.0,
    }
}

pub fn compare_debt_vs_invest(
    total_debt: f64,
    annual_rate: f64,
    monthly_payment: f64,
    investment_rate: f64,
) -> DebtVsInvestResult {
    let payoff = simulate_debt_payoff(total_debt, annual_rate, monthly_payment);

    // The alternative invests the same payment for the same number of
    // months, deposited at the start of each month.
    let monthly_rate = investment_rate / 12.0;
    let mut investment_value = 0.0;
    for _ in 0..payoff.months {
        investment_value = (investment_value + monthly_payment) * (1.0 + monthly_rate);
    }
    let investment_contributed = monthly_payment * payoff.months as f64;
    let investment_interest = investment_value - investment_contributed;
    let interest_saved = payoff.total_interest_paid;

    let recommendation = if investment_interest > interest_saved {
        PayoffRecommendation::Invest
    } else {
        PayoffRecommendation::PayOffDebt
    };

    DebtVsInvestResult {
        payoff,
        investment_value,
        investment_contributed,
        investment_interest,
        interest_saved,
        recommendation,
    }
}

pub fn simulate_depletion(
    initial_balance: f64,
    annual_withdrawal: f64,
    rate_of_return: f64,
    inflation_rate: f64,
) -> DepletionResult {
    let mut yearly_ledger = Vec::with_capacity(DEPLETION_HORIZON_YEARS as usize);
    let mut depletion_year = None;
    let mut starting_balance = initial_balance;

    for year in 1..=DEPLETION_HORIZON_YEARS {
        let withdrawal = annual_withdrawal * (1.0 + inflation_rate).powi(year as i32 - 1);
        let after_withdrawal = starting_balance - withdrawal;
        // Growth is earned on what remains after the year's withdrawal.
        let earnings = after_withdrawal * rate_of_return;
        let ending_balance = after_withdrawal + earnings;

        yearly_ledger.push(LedgerYear {
            year,
            starting_balance,
            withdrawal,
            earnings,
            ending_balance,
        });

        if ending_balance <= 0.0 {
            depletion_year = Some(year);
            break;
        }
        starting_balance = ending_balance;
    }

    DepletionResult {
        yearly_ledger,
        depletion_year,
    }
}

pub fn evaluate_ira_deduction(
    magi: f64,
    filing_status: FilingStatus,
    has_workplace_plan: bool,
    annual_contribution: f64,
) -> IraEligibility {
    let (ceiling, phase_out_applies, message) = if !has_workplace_plan {
        (
            IRA_CONTRIBUTION_LIMIT,
            false,
            "Without a workplace retirement plan the full contribution is deductible at any income.",
        )
    } else {
        let band = filing_status.phase_out_band();
        if magi < band.lower {
            (
                IRA_CONTRIBUTION_LIMIT,
                false,
                "Income is below the phase-out range, so the full contribution is deductible.",
            )
        } else if magi >= band.upper {
            (
                0.0,
                false,
                "Income is above the phase-out range, so contributions are not deductible.",
            )
        } else {
            let fraction = (magi - band.lower) / (band.upper - band.lower);
            (
                IRA_CONTRIBUTION_LIMIT * (1.0 - fraction),
                true,
                "Income falls inside the phase-out range, so only part of the contribution is deductible.",
            )
        }
    };

    IraEligibility {
        eligible: ceiling > 0.0,
        max_contribution: IRA_CONTRIBUTION_LIMIT,
        max_deductible: ceiling.min(annual_contribution),
        phase_out_applies,
        message: message.to_string(),
    }
}

pub fn project_college_savings(plan: &CollegePlan) -> CollegeSavingsResult {
    let savings = project_growth(
        &GrowthParameters {
            present_value: plan.current_savings,
            annual_contribution: plan.annual_contribution,
            annual_rate: plan.annual_return,
            years: plan.years_until_college,
        },
        COLLEGE_TIMING,
    );
    // The cost side is the same projection with no contribution stream and
    // inflation as the growth rate.
    let future_college_cost = project_growth(
        &GrowthParameters {
            present_value: plan.college_cost_today,
            annual_contribution: 0.0,
            annual_rate: plan.cost_inflation,
            years: plan.years_until_college,
        },
        COLLEGE_TIMING,
    )
    .future_value;

    let surplus = savings.future_value - future_college_cost;
    CollegeSavingsResult {
        savings,
        future_college_cost,
        surplus,
        fully_funded: surplus >= 0.0,
    }
}

pub fn net_worth(assets: &[f64], liabilities: &[f64]) -> NetWorthResult {
    let total_assets: f64 = assets.iter().sum();
    let total_liabilities: f64 = liabilities.iter().sum();
    NetWorthResult {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    }
}

pub fn monthly_budget(income: &[f64], expenses: &[f64]) -> BudgetResult {
    let total_income: f64 = income.iter().sum();
    let total_expenses: f64 = expenses.iter().sum();
    BudgetResult {
        total_income,
        total_expenses,
        net_cash_flow: total_income - total_expenses,
    }
}
