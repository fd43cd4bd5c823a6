use crate::infra::{parse_amount, parse_date};
use chrono::{Datelike, Duration, NaiveDate};
use clap::Args;
use rent_ledger::config::AppConfig;
use rent_ledger::error::AppError;
use rent_ledger::ledger::{
    Clock, LedgerReport, Payment, PaymentCsvImporter, PaymentId, PaymentLifecycle, Property,
    PropertyId, ReportInputs, SystemClock,
};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Payment CSV export (id,amount,due_date,paid_date,verified,status)
    #[arg(long)]
    pub(crate) payments_csv: PathBuf,
    /// Evaluation date for the report (defaults to today in APP_TIMEZONE)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Tenant's gross monthly income, used for the rent-to-income score
    #[arg(long, value_parser = parse_amount)]
    pub(crate) monthly_income: Option<Decimal>,
    /// Monthly rent for the rent-to-income score
    #[arg(long, value_parser = parse_amount)]
    pub(crate) monthly_rent: Option<Decimal>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today in APP_TIMEZONE)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Override the sample tenant's monthly income
    #[arg(long, value_parser = parse_amount)]
    pub(crate) monthly_income: Option<Decimal>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        payments_csv,
        today,
        monthly_income,
        monthly_rent,
    } = args;

    let ledger = AppConfig::load()?.ledger;
    let today = today.unwrap_or_else(|| SystemClock::new(ledger.timezone).today());
    let payments = PaymentCsvImporter::from_path(&payments_csv, ledger.timezone)?;

    let inputs = ReportInputs {
        payments,
        properties: Vec::new(),
        monthly_income,
        monthly_rent,
    };
    let report = LedgerReport::build(&inputs, today);

    println!("Tenant payment report");
    println!("Source: {}", payments_csv.display());
    render_report(&report);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        monthly_income,
    } = args;

    let ledger = AppConfig::load()?.ledger;
    let today = today.unwrap_or_else(|| SystemClock::new(ledger.timezone).today());
    let inputs = demo_inputs(today, monthly_income.unwrap_or_else(|| Decimal::new(3400, 0)));
    let report = LedgerReport::build(&inputs, today);

    println!("RentLedger demo tenant");
    for property in &inputs.properties {
        let since = property
            .tenancy_start
            .map(|date| format!(" since {date}"))
            .unwrap_or_default();
        let rent = property
            .monthly_rent
            .map(|rent| format!("£{rent}/month"))
            .unwrap_or_else(|| "rent not recorded".to_string());
        println!("Property: {} ({}{})", property.address, rent, since);
    }
    render_report(&report);

    Ok(())
}

fn first_of_month_back(today: NaiveDate, months_back: u32) -> NaiveDate {
    let months = today.year() * 12 + today.month0() as i32 - months_back as i32;
    NaiveDate::from_ymd_opt(months.div_euclid(12), months.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(today)
}

/// Eleven months of history ending with the current month.
fn demo_inputs(today: NaiveDate, monthly_income: Decimal) -> ReportInputs {
    let rent = Decimal::new(95000, 2);
    let tenancy_start = first_of_month_back(today, 11) - Duration::days(14);

    let mut payments = Vec::new();
    for months_back in (0..=10u32).rev() {
        let due = first_of_month_back(today, months_back);
        let (paid, verified) = match months_back {
            0 if due >= today => (None, false),
            0 => (Some(due + Duration::days(1)), false),
            7 => (Some(due + Duration::days(9)), true),
            _ => (Some(due - Duration::days(2)), true),
        };
        payments.push(Payment {
            id: PaymentId(format!("demo-{}", due.format("%Y-%m"))),
            amount: rent,
            due_date: due,
            paid_date: paid,
            verified,
            lifecycle: if paid.is_some() {
                PaymentLifecycle::Paid
            } else {
                PaymentLifecycle::Pending
            },
        });
    }

    ReportInputs {
        payments,
        properties: vec![Property {
            id: PropertyId("demo-property".to_string()),
            address: "Flat 3, 18 Canal Street, Manchester".to_string(),
            monthly_rent: Some(rent),
            tenancy_start: Some(tenancy_start),
        }],
        monthly_income: Some(monthly_income),
        monthly_rent: None,
    }
}

pub(crate) fn render_report(report: &LedgerReport) {
    println!("Evaluated {}", report.today);

    println!("\nPayments");
    if report.payments.is_empty() {
        println!("- none recorded");
    }
    for payment in &report.payments {
        let paid_note = match (payment.paid_date, payment.days_late) {
            (Some(date), Some(days)) if days > 0 => format!(" paid {date} ({days} day(s) late)"),
            (Some(date), _) => format!(" paid {date}"),
            (None, _) => String::new(),
        };
        println!(
            "- {} | £{} | due {}{} | {}",
            payment.id, payment.amount, payment.due_date, paid_note, payment.status_label
        );
    }

    println!("\nStatus counts");
    for entry in &report.status_counts {
        println!("- {}: {}", entry.status_label, entry.count);
    }

    println!(
        "\nPayment streak: {} (grace window {} days)",
        report.streak.current, report.streak.grace_days
    );
    println!(
        "Total paid £{} | outstanding £{}",
        report.total_paid, report.total_outstanding
    );
    match report.on_time_percentage {
        Some(pct) => println!("On-time rate: {:.0}%", pct),
        None => println!("On-time rate: no paid payments yet"),
    }
    match (report.rent_to_income_ratio, report.monthly_rent) {
        (Some(ratio), Some(rent)) => println!(
            "Rent-to-income: {:.0}% of income (£{}/month rent)",
            ratio * 100.0,
            rent
        ),
        (_, None) => println!("Rent-to-income: monthly rent not provided"),
        (None, Some(_)) => println!("Rent-to-income: income not provided"),
    }

    println!(
        "\nRent score: {}/1000 ({:.0}% bar)",
        report.score.total, report.score.progress_pct
    );
    for component in report.score.components() {
        println!(
            "- {} ({}%): {:.0}/{:.0}",
            component.label, component.weight_pct, component.points, component.max_points
        );
    }

    if !report.review_notes.is_empty() {
        println!("\nReview notes");
        for note in &report.review_notes {
            println!("- [{}] {}: {}", note.kind_label, note.payment_id, note.detail);
        }
    }
}
