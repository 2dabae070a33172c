//! Message formatting for Telegram replies (MarkdownV2).

use crate::adapter::inbound::present::{format_delta, format_rate, side_label};
use crate::domain::{Analysis, ComparisonReport, SourceId};

/// Sent before a comparison starts.
pub const WAIT_TEXT: &str = "Fetching FX data, please wait... 🕒";

/// Sent when a comparison fails outright.
pub const APOLOGY_TEXT: &str =
    "Sorry, an error occurred while fetching data. Please try again later.";

/// Plain-text welcome for `/start` and `/help`, listing only `sources`.
#[must_use]
pub fn welcome_text(report_target: &str, legs: (&str, &str), sources: &[SourceId]) -> String {
    let mut text = String::from("Welcome to FX Rate Comparator Bot! 💵\n\n");
    text.push_str(&format!(
        "Use /compare to get the current {report_target} rate differences from:\n"
    ));
    for &source in sources {
        text.push_str(&format!("- {}\n", source_description(source)));
    }
    text.push_str(&format!(
        "- Calculated Cross-Rate (via {} and {})\n\n",
        legs.0, legs.1
    ));
    text.push_str("I'll help you find arbitrage opportunities! 🔬");
    text
}

fn source_description(source: SourceId) -> &'static str {
    match source {
        SourceId::CentralBank => "CBR (Central Bank of Russia)",
        SourceId::Investing => "Investing.com",
        SourceId::Profinance => "Profinance.ru",
    }
}

/// Render a comparison report as a MarkdownV2 message.
#[must_use]
pub fn format_report(report: &ComparisonReport) -> String {
    let mut msg = String::from("💱 *FX Rate Comparison*\n");

    for section in report.sections() {
        msg.push_str(&format!(
            "\n*{} Rates:*\n",
            escape_markdown(&section.pair.to_string())
        ));
        for quote in &section.quotes {
            msg.push_str(&format!(
                "{}: {}\n",
                escape_markdown(quote.source.name()),
                escape_markdown(&format_rate(quote.value))
            ));
        }
    }

    let cross = report.cross();
    let (first, _) = cross.legs();
    msg.push_str("\n*Cross Rates:*\n");
    msg.push_str(&format!(
        "{}: {}\n",
        escape_markdown(&first.pair().to_string()),
        escape_markdown(&format_rate(first.value()))
    ));
    msg.push_str(&format!(
        "Calculated {}: {}\n",
        escape_markdown(&cross.derived_pair().to_string()),
        escape_markdown(&format_rate(cross.value()))
    ));

    if let Analysis::Verdict(verdict) = report.analysis() {
        let arrow = if verdict.delta.is_sign_positive() {
            "⬆️"
        } else {
            "⬇️"
        };
        msg.push_str(&format!(
            "\n*Cross vs Direct:* {} {arrow}",
            escape_markdown(&format_delta(verdict.delta))
        ));
    }

    if let Some(verdict) = report.opportunity() {
        let pair = cross.derived_pair();
        msg.push_str("\n\n⚡ *Arbitrage opportunity detected\\!*");
        msg.push_str(&format!(
            "\nBuy: {}",
            escape_markdown(&side_label(verdict.buy, report))
        ));
        msg.push_str(&format!(
            "\nSell: {}",
            escape_markdown(&side_label(verdict.sell, report))
        ));
        msg.push_str(&format!(
            "\nPotential profit: {} {} per {}",
            escape_markdown(&format_rate(Some(verdict.potential_profit()))),
            pair.quote(),
            pair.base()
        ));
    }

    msg
}

/// Characters `MarkdownV2` reserves outside code spans.
const RESERVED: &str = "_*[]()~`>#+-=|{}.!\\";

/// Backslash-escape every reserved character in `text`.
pub fn escape_markdown(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len() + 8), |mut out, c| {
        if RESERVED.contains(c) {
            out.push('\\');
        }
        out.push(c);
        out
    })
}
