//! # Quotation Rendering
//!
//! Turns a priced quotation into terminal text or JSON.
//!
//! ```text
//! Quotation Desk
//! Quotation QT-482913
//! Date: 2026-10-17   Valid until: 2026-11-16
//! Customer: Acme <buyer@acme.test>
//!
//! ╭─────────┬─────┬──────────────────────────┬─────────┬────────────┬─────┬────────╮
//! │ Item    │ Qty │ Details                  │ Weight  │ Unit Price │ Tax │ Total  │
//! ├─────────┼─────┼──────────────────────────┼─────────┼────────────┼─────┼────────┤
//! │ Setup   │ 5   │ Fixed cost               │ -       │ $10.00     │ -   │ $50.00 │
//! ╰─────────┴─────┴──────────────────────────┴─────────┴────────────┴─────┴────────╯
//!
//! Subtotal: $50.00
//! Total:    $50.00
//! ```

use quote_core::quotation::STANDARD_TERMS;
use quote_core::{
    Adjustments, Customer, Item, LineSummary, Pricing, QuotationHeader, QuotationSummary,
    UnitFamily, UnitRegistry,
};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::state::ConfigState;

/// Everything printed for one quotation. Also the `--json` output shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedQuotation {
    pub company: String,
    pub header: QuotationHeader,
    pub customer: Customer,
    pub adjustments: Adjustments,
    pub summary: QuotationSummary,
    pub terms: Vec<String>,
}

impl RenderedQuotation {
    pub fn new(
        config: &ConfigState,
        header: QuotationHeader,
        customer: Customer,
        adjustments: Adjustments,
        summary: QuotationSummary,
    ) -> Self {
        RenderedQuotation {
            company: config.company_name.clone(),
            header,
            customer,
            adjustments,
            summary,
            terms: standard_terms(config.validity_days),
        }
    }
}

/// Standard terms, with the validity line following the configured days.
pub fn standard_terms(validity_days: i64) -> Vec<String> {
    let mut terms: Vec<String> = STANDARD_TERMS.iter().map(|t| t.to_string()).collect();
    if let Some(first) = terms.first_mut() {
        *first = format!("Validity: {} days from the date of quotation", validity_days);
    }
    terms
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Renders the quotation as text.
///
/// `items` are the source items, in the same order as `summary.lines`; they
/// supply the dimensions and units shown in the details column.
pub fn render_text(
    quotation: &RenderedQuotation,
    items: &[Item],
    units: &UnitRegistry,
    config: &ConfigState,
) -> String {
    let summary = &quotation.summary;
    let currency = summary.display_currency.as_str();
    let money = |amount: f64| config.format_currency(amount, currency);

    let mut out = String::new();
    out.push_str(&quotation.company);
    out.push('\n');
    out.push_str(&format!("Quotation {}\n", quotation.header.number));
    out.push_str(&format!(
        "Date: {}   Valid until: {}\n",
        quotation.header.issued_on, quotation.header.valid_until
    ));
    out.push_str(&format!("Customer: {}\n\n", customer_line(&quotation.customer)));

    if summary.lines.is_empty() {
        out.push_str("(no items)\n");
    } else {
        let rows: Vec<LineRow> = summary
            .lines
            .iter()
            .zip(items)
            .map(|(line, item)| line_row(line, item, units, &money))
            .collect();
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!("Subtotal: {}\n", money(summary.subtotal)));
    if summary.item_tax != 0.0 {
        out.push_str(&format!("  incl. item tax: {}\n", money(summary.item_tax)));
    }
    let adjustments = &quotation.adjustments;
    if adjustments.discount_rate != 0.0 {
        out.push_str(&format!(
            "Discount ({}%): -{}\n",
            adjustments.discount_rate,
            money(summary.discount)
        ));
    }
    if adjustments.tax_rate != 0.0 {
        out.push_str(&format!(
            "Tax ({}%): {}\n",
            adjustments.tax_rate,
            money(summary.overall_tax)
        ));
    }
    out.push_str(&format!("Total: {}\n", money(summary.total)));

    out.push_str("\nTerms & Conditions\n");
    for (i, term) in quotation.terms.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, term));
    }

    out
}

fn customer_line(customer: &Customer) -> String {
    match (customer.name.is_empty(), customer.email.is_empty()) {
        (true, true) => "-".to_string(),
        (false, true) => customer.name.clone(),
        (true, false) => customer.email.clone(),
        (false, false) => format!("{} <{}>", customer.name, customer.email),
    }
}

fn line_row(
    line: &LineSummary,
    item: &Item,
    units: &UnitRegistry,
    money: &dyn Fn(f64) -> String,
) -> LineRow {
    let (details, unit_price) = match &item.pricing {
        Pricing::Fixed(_) => ("Fixed cost".to_string(), money(line.unit_price)),
        Pricing::WeightBased(w) => {
            let d = &w.dimensions;
            let details = format!(
                "{} {} × {} {}, {} {}",
                d.length.value,
                d.length.unit,
                d.width.value,
                d.width.unit,
                d.weight_per_area.value,
                d.weight_per_area.unit
            );
            let per = units.unit_label(UnitFamily::Weight, &w.price_per_weight.weight_unit);
            (details, format!("{} / {}", money(line.unit_price), per))
        }
    };

    LineRow {
        name: line.name.clone(),
        quantity: line.quantity.to_string(),
        details,
        weight: line
            .weight_kg
            .map(|kg| format!("{:.2} kg", kg))
            .unwrap_or_else(|| "-".to_string()),
        unit_price,
        tax: line
            .tax
            .map(|t| format!("{} ({}%)", money(t), line.tax_rate))
            .unwrap_or_else(|| "-".to_string()),
        total: money(line.total),
    }
}
