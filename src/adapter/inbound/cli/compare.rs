//! Handler for the `compare` command.

use tokio::signal;
use tracing::info;

use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::present::{format_delta, format_rate, side_label};
use crate::app::{CompareService, Config};
use crate::domain::{Analysis, ComparisonReport, IndeterminateReason};
use crate::error::{Error, Result};

/// Run one comparison and print it. Ctrl-C drops the run, which cancels
/// every in-flight fetch.
pub async fn execute(config: &Config) -> Result<()> {
    let service = CompareService::from_config(config)?;
    let pb = output::spinner("Fetching FX rates");

    let result = tokio::select! {
        result = service.compare() => result,
        _ = signal::ctrl_c() => {
            info!("Interrupted, cancelling fetches");
            Err(Error::Cancelled)
        }
    };

    let report = match result {
        Ok(report) => {
            output::spinner_success(&pb, "Rates fetched");
            report
        }
        Err(e) => {
            output::spinner_fail(&pb, "Comparison failed");
            return Err(e);
        }
    };

    if output::is_json() {
        output::document(&report)?;
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ComparisonReport) {
    for section in report.sections() {
        output::section(&format!("{} rates", section.pair));
        for quote in &section.quotes {
            output::field(quote.source.name(), rate(quote.value));
        }
    }

    let (first, second) = report.cross().legs();
    output::section("Cross rate");
    output::field(&first.pair().to_string(), rate(first.value()));
    output::field(&second.pair().to_string(), rate(second.value()));
    output::field(
        &format!("Calc {}", report.cross().derived_pair()),
        rate(report.cross().value()),
    );
    output::field(
        &format!("Direct {}", report.direct().pair()),
        rate(report.direct().value()),
    );

    output::section("Analysis");
    match report.analysis() {
        Analysis::Verdict(verdict) => {
            let delta = format_delta(verdict.delta);
            if verdict.delta.is_sign_positive() {
                output::field("Cross - direct", output::positive(delta));
            } else {
                output::field("Cross - direct", output::negative(delta));
            }
            output::field("Threshold", report.threshold());
        }
        Analysis::Indeterminate { reason } => {
            output::field("Cross - direct", output::muted(indeterminate(*reason)));
        }
    }

    match report.opportunity() {
        Some(verdict) => {
            output::warning("Arbitrage opportunity detected");
            output::field("Buy", side_label(verdict.buy, report));
            output::field("Sell", side_label(verdict.sell, report));
            output::field(
                "Profit",
                format!(
                    "{} {} per {}",
                    format_rate(Some(verdict.potential_profit())),
                    report.cross().derived_pair().quote(),
                    report.cross().derived_pair().base(),
                ),
            );
        }
        None => output::success("No arbitrage above threshold"),
    }

    let (ok, failed) = report.reading_counts();
    output::field(
        "Fetched",
        report.generated_at().format("%Y-%m-%d %H:%M:%S UTC"),
    );
    if failed > 0 {
        output::warning(&format!("{failed} of {} readings unavailable", ok + failed));
    }
}

fn rate(value: Option<rust_decimal::Decimal>) -> String {
    match value {
        Some(_) => format_rate(value),
        None => output::muted(format_rate(None)),
    }
}

fn indeterminate(reason: IndeterminateReason) -> &'static str {
    match reason {
        IndeterminateReason::MissingCross => "N/A (cross rate unavailable)",
        IndeterminateReason::MissingDirect => "N/A (direct rate unavailable)",
        IndeterminateReason::NoSpread => "0 (no spread)",
    }
}
