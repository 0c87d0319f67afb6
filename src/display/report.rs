//! Summary email rendering
//!
//! Turns a [`Summary`] into the subject, plain-text body and HTML body of
//! the monthly summary email. Rendering uses fixed currency and date
//! formats only, so the same summary always renders the same bytes.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

use crate::models::{Category, Group, Money};
use crate::reports::{Balance, PersonSummary, StatementPeriod, Summary};

/// Date format used in subject lines
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%y";

const SUBJECT_PREFIX: &str = "Transactions Summary";

const TABLE_STYLE: &str = "table {border-collapse: collapse; width: 100%} \
    th, td {border: 1px solid black; padding: 8px 12px; text-align: left;} \
    th {background-color: #f2f2f2;}";

const LABEL_WIDTH: usize = 24;
const AMOUNT_WIDTH: usize = 14;

/// A rendered summary ready to hand to a mail transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Address the summary is sent from (the household owner)
    pub sender: String,
    /// Owner followed by every member, without repeats
    pub recipients: Vec<String>,
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// HTML body
    pub html: String,
}

impl Report {
    /// Render a summary for a household
    pub fn render(summary: &Summary, group: &Group) -> Self {
        let subject = format_subject(summary.period);
        Self {
            sender: group.owner().to_string(),
            recipients: recipients(group),
            body: render_text(summary, &subject),
            html: render_html(summary, &subject).into_string(),
            subject,
        }
    }
}

/// Format the subject line for a statement period
pub fn format_subject(period: Option<StatementPeriod>) -> String {
    match period {
        Some(period) => format!(
            "{}: {} - {}",
            SUBJECT_PREFIX,
            period.start.format(DISPLAY_DATE_FORMAT),
            period.end.format(DISPLAY_DATE_FORMAT)
        ),
        None => format!("{}: no transactions", SUBJECT_PREFIX),
    }
}

/// Describe a balance in words, never as a bare negative number
///
/// `first` and `second` are the two members in configuration order.
pub fn balance_sentence(first: &str, second: &str, balance: &Balance) -> String {
    let amount = balance.amount;
    if amount.is_positive() {
        format!("{} owes {} {}.", second, first, amount)
    } else if amount.is_negative() {
        format!("{} owes {} {}.", first, second, amount.abs())
    } else {
        format!("{} and {} are even.", first, second)
    }
}

fn recipients(group: &Group) -> Vec<String> {
    let mut recipients = vec![group.owner().to_string()];
    for person in group.members() {
        let email = person.email.to_string();
        if !recipients.contains(&email) {
            recipients.push(email);
        }
    }
    recipients
}

fn balance_line(summary: &Summary) -> Option<String> {
    match (summary.balance, summary.people.as_slice()) {
        (Some(balance), [first, second]) => {
            Some(balance_sentence(&first.name, &second.name, &balance))
        }
        _ => None,
    }
}

fn unattributed_note(summary: &Summary) -> Option<String> {
    match summary.unattributed_count {
        0 => None,
        1 => Some("1 transaction did not match a configured account.".to_string()),
        n => Some(format!(
            "{} transactions did not match a configured account.",
            n
        )),
    }
}

fn amount_line(label: &str, amount: Money) -> String {
    format!(
        "  {:<label$}{:>amount$}\n",
        label,
        amount.format_accounting(),
        label = LABEL_WIDTH,
        amount = AMOUNT_WIDTH
    )
}

fn render_person_text(person: &PersonSummary) -> String {
    let mut output = format!("{}\n", person.name);

    let mut any = false;
    for (category, amount) in person.nonzero_categories() {
        output.push_str(&amount_line(category.label(), amount));
        any = true;
    }
    if !any {
        output.push_str("  No shared expenses\n");
    }
    output.push_str(&amount_line("Total", person.total));
    output
}

/// Render the plain-text body
pub fn render_text(summary: &Summary, subject: &str) -> String {
    let mut output = String::new();

    output.push_str(subject);
    output.push('\n');
    output.push_str(&"=".repeat(subject.len()));
    output.push_str("\n\n");

    for person in &summary.people {
        output.push_str(&render_person_text(person));
        output.push('\n');
    }

    if let Some(line) = balance_line(summary) {
        output.push_str(&line);
        output.push('\n');
    }

    if let Some(note) = unattributed_note(summary) {
        output.push_str(&note);
        output.push('\n');
    }

    output
}

/// Render the HTML body
pub fn render_html(summary: &Summary, subject: &str) -> Markup {
    let categories: Vec<Category> = summary.active_categories();

    let difference = match (summary.balance, summary.people.as_slice()) {
        (Some(balance), [first, second]) => Some((
            format!("Difference ({} - {})", first.name, second.name),
            categories
                .iter()
                .map(|c| summary.category_difference(*c).unwrap_or_default())
                .collect::<Vec<_>>(),
            balance.amount,
        )),
        _ => None,
    };

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (subject) }
                style { (PreEscaped(TABLE_STYLE)) }
            }
            body {
                table border="1" {
                    thead {
                        tr {
                            th {}
                            @for category in &categories {
                                th { (category.label()) }
                            }
                            th { "Total" }
                        }
                    }
                    tbody {
                        @for person in &summary.people {
                            tr {
                                td { (person.name) }
                                @for category in &categories {
                                    td { (person.category_total(*category).format_accounting()) }
                                }
                                td { (person.total.format_accounting()) }
                            }
                        }
                        @if let Some((label, amounts, total)) = &difference {
                            tr {
                                td { (label) }
                                @for amount in amounts {
                                    td { (amount.format_accounting()) }
                                }
                                td { (total.format_accounting()) }
                            }
                        }
                    }
                }
                @if let Some(line) = balance_line(summary) {
                    p { (line) }
                }
                @if let Some(note) = unattributed_note(summary) {
                    p { (note) }
                }
            }
        }
    }
}
