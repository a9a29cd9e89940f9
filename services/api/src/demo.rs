use crate::infra::{parse_pay_rule, RecordingLeadGateway};
use clap::Args;
use reform_diagnostic::config::AppConfig;
use reform_diagnostic::error::AppError;
use reform_diagnostic::workflows::diagnostic::{
    simulate_incentive, simulate_roi, AnswerSet, ChallengeCount, DiagnosticError,
    DiagnosticResult, HttpLeadGateway, LeadField, LeadFormSession, LeadGateway, PayRule,
    PayRuleComparison, Payback, QuestionId, RoiInput, RoiOutcome, WizardEffect, WizardEvent,
    WizardState,
};

#[derive(Args, Debug)]
pub(crate) struct HealthCheckArgs {
    /// Chosen option index per question, in question order (e.g. 0,1,0,2,1,0)
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) answers: Vec<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluationArgs {
    /// Improvement challenges attempted in the month (0-20)
    #[arg(long)]
    pub(crate) challenges: u32,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PayRulesArgs {
    /// Pay rule to show (current | outcome); both are shown when omitted
    #[arg(long, value_parser = parse_pay_rule)]
    pub(crate) rule: Option<PayRule>,
}

#[derive(Args, Debug)]
pub(crate) struct RoiArgs {
    /// Number of employees doing the wasted work
    #[arg(long, default_value_t = 10)]
    pub(crate) employees: u32,
    /// Minutes wasted per employee per day
    #[arg(long, default_value_t = 30.0)]
    pub(crate) waste_minutes: f64,
    /// Hourly wage in yen
    #[arg(long, default_value_t = 1500.0)]
    pub(crate) hourly_wage: f64,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Post the demo lead to the configured endpoint instead of recording it locally
    #[arg(long)]
    pub(crate) submit: bool,
}

pub(crate) fn run_health_check(args: HealthCheckArgs) -> Result<(), AppError> {
    let answers = answers_from_indices(&args.answers)?;
    let progress = answers.progress();
    println!(
        "Health check: {}/{} questions answered",
        progress.answered, progress.total
    );

    match answers.result() {
        Some(result) => render_health_result(&result),
        None => println!("- Answer every question to see the diagnosis"),
    }
    Ok(())
}

pub(crate) fn run_evaluation(args: EvaluationArgs) -> Result<(), AppError> {
    let challenges = ChallengeCount::new(args.challenges).map_err(DiagnosticError::from)?;
    let outcome = simulate_incentive(challenges);
    println!("Incentive model for {} challenges", outcome.challenge_count);
    println!("- Evaluation score: {} pt", outcome.evaluation_score);
    println!("- Company profit: ¥{}", format_yen(outcome.company_profit as i64));
    Ok(())
}

pub(crate) fn run_pay_rules(args: PayRulesArgs) -> Result<(), AppError> {
    let rules = match args.rule {
        Some(rule) => vec![rule],
        None => vec![PayRule::CurrentPayroll, PayRule::OutcomeSharing],
    };
    for rule in rules {
        render_pay_rule(&rule.compare());
    }
    Ok(())
}

pub(crate) fn run_roi(args: RoiArgs) -> Result<(), AppError> {
    let input = RoiInput {
        employee_count: args.employees,
        waste_minutes_per_day: args.waste_minutes,
        hourly_wage: args.hourly_wage,
    };
    let outcome = simulate_roi(&input).map_err(DiagnosticError::from)?;
    render_roi(&input, &outcome);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    if args.submit {
        let config = AppConfig::load()?;
        let gateway = HttpLeadGateway::new(&config.lead);
        println!("Lead endpoint: {}", gateway.endpoint_url());
        walkthrough(&gateway).await
    } else {
        let gateway = RecordingLeadGateway::default();
        walkthrough(&gateway).await?;
        for payload in gateway.sent() {
            println!(
                "  Recorded lead (not sent): {} / {} <{}>",
                payload.company, payload.name, payload.email
            );
        }
        Ok(())
    }
}

async fn walkthrough<G>(gateway: &G) -> Result<(), AppError>
where
    G: LeadGateway + ?Sized,
{
    let mut wizard = WizardState::new();
    println!("Business reform diagnostic demo");

    render_step_heading(&wizard);
    let answers = answers_from_indices(&[0, 1, 0, 1, 1, 0])?;
    if let Some(result) = answers.result() {
        render_health_result(&result);
        wizard.apply(WizardEvent::HealthCheckCompleted { result });
    }
    advance(&mut wizard);

    let challenges = ChallengeCount::new(8).map_err(DiagnosticError::from)?;
    let incentive = simulate_incentive(challenges);
    println!(
        "- {} challenges -> {} pt, ¥{} profit",
        incentive.challenge_count,
        incentive.evaluation_score,
        format_yen(incentive.company_profit as i64)
    );
    render_pay_rule(&PayRule::CurrentPayroll.compare());
    render_pay_rule(&PayRule::OutcomeSharing.compare());
    advance(&mut wizard);

    let input = RoiInput::default();
    let roi = simulate_roi(&input).map_err(DiagnosticError::from)?;
    render_roi(&input, &roi);
    advance(&mut wizard);

    if let (Some(score), Some(category)) = (
        wizard.carried_health_score(),
        wizard.carried_health_category(),
    ) {
        println!("- Carried health check: {} pt ({})", score, category.label());
    }

    let mut session = LeadFormSession::default();
    session.edit(LeadField::CompanyName, "株式会社さくら工務店");
    session.edit(LeadField::Name, "山田 太郎");
    session.edit(LeadField::Email, "taro@sakura-koumuten.jp");
    session.edit(
        LeadField::Concerns,
        "見積作成と日報の集計に毎日時間がかかっています",
    );

    match session.submit(gateway).await {
        Ok(ack) => println!("- Order sheet dispatched at {}", ack.dispatched_at.to_rfc3339()),
        Err(err) => println!("- Order sheet not sent: {}", err),
    }
    if let Some(banner) = session.banner() {
        println!("  {}", banner);
    }

    Ok(())
}

fn advance(wizard: &mut WizardState) {
    if let Some(WizardEffect::ScrollTo { step }) = wizard.apply(WizardEvent::Next) {
        tracing::debug!(step = step.number(), "scrolled to step");
    }
    render_step_heading(wizard);
}

fn render_step_heading(wizard: &WizardState) {
    let step = wizard.active_step();
    println!("\nStep {}: {}", step.number(), step.title());
}

fn answers_from_indices(indices: &[usize]) -> Result<AnswerSet, AppError> {
    let mut answers = AnswerSet::new();
    // Question ids run from 1 in bank order.
    for (position, option_index) in indices.iter().enumerate() {
        let id = u8::try_from(position + 1).unwrap_or(u8::MAX);
        answers
            .record(QuestionId(id), *option_index)
            .map_err(DiagnosticError::from)?;
    }
    Ok(answers)
}

fn render_health_result(result: &DiagnosticResult) {
    let view = result.view();
    println!(
        "- Score {} -> {} ({})",
        view.total_score, view.label, view.message
    );
    println!("  {}", view.explanation);
}

fn render_pay_rule(comparison: &PayRuleComparison) {
    println!("{} [{}]", comparison.rule_label, comparison.headline);
    for employee in &comparison.employees {
        println!(
            "  - {}: {}h (overtime {}h) | sales ¥{} | {} ¥{} | total ¥{}",
            employee.name,
            employee.work_hours,
            employee.overtime_hours,
            format_yen(employee.sales as i64),
            employee.allowance_label,
            format_yen(employee.allowance as i64),
            format_yen(employee.total_pay as i64)
        );
    }
    println!("  {}", comparison.summary);
}

fn render_roi(input: &RoiInput, outcome: &RoiOutcome) {
    println!(
        "ROI for {} employees wasting {} min/day at ¥{}/h",
        input.employee_count, input.waste_minutes_per_day, input.hourly_wage
    );
    println!(
        "- Daily loss: ¥{} per person, ¥{} total",
        format_yen(outcome.daily_loss_per_person_yen),
        format_yen(outcome.daily_loss_total_yen)
    );
    println!(
        "- Annual loss ¥{} | monthly ¥{} | net after template ¥{}",
        format_yen(outcome.annual_loss),
        format_yen(outcome.monthly_loss),
        format_yen(outcome.net_monthly_savings)
    );
    match outcome.payback {
        Payback::Days { days } => println!("- Template pays for itself in {} days", days),
        Payback::NotRecoverable => println!("- Template cost is not recovered at this scale"),
    }
}

pub(crate) fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
