//! Terminal tables for every report.

use allocation::AllocationReport;
use analytics::{InventoryReport, ProfitReport, Statement};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::{Employee, Permission, Settings, Transaction, TransactionType, User};
use engine::Dashboard;
use pricing::{round_currency, AssayEstimate, MarketAdvice, PriceQuote};
use rust_decimal::Decimal;

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn money(value: Decimal, currency: &str) -> String {
    format!("{} {currency}", round_currency(value))
}

fn grams(value: Decimal) -> String {
    format!("{} g", value.round_dp(3).normalize())
}

fn optional(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn quote(kind: TransactionType, karat: Decimal, quote: &PriceQuote, currency: &str) {
    let mut t = table(vec!["Operation", "Karat", "Base", "Spread", "Price / g"]);
    t.add_row(vec![
        kind.to_string(),
        karat.normalize().to_string(),
        quote.base.round_dp(2).normalize().to_string(),
        quote.spread.to_string(),
        money(quote.price_per_gram, currency),
    ]);
    println!("{t}");
}

pub fn assay(weight: Decimal, karat: Decimal, estimate: &AssayEstimate, currency: &str) {
    let mut t = table(vec!["Weight", "Karat", "Pure gold", "Estimated value"]);
    t.add_row(vec![
        grams(weight),
        karat.normalize().to_string(),
        grams(estimate.pure_weight),
        money(estimate.estimated_value, currency),
    ]);
    println!("{t}");
}

pub fn advice_label(advice: MarketAdvice) -> &'static str {
    match advice {
        MarketAdvice::SellOpportunity => "Live price is well above the shop price: a selling opportunity.",
        MarketAdvice::BuyOpportunity => "Live price is well below the shop price: a buying opportunity.",
        MarketAdvice::Stable => "Live price is in line with the shop price.",
    }
}

pub fn saved(tx: &Transaction, currency: &str) {
    println!(
        "Saved {} {} on {}: {} (id {}).",
        tx.kind,
        tx.party(),
        tx.date,
        money(tx.total_amount, currency),
        tx.id
    );
}

pub fn inventory(report: &InventoryReport, currency: &str) {
    let mut t = table(vec!["Bought (pure)", "Sold (pure)", "Net stock", "24k price", "Stock value"]);
    t.add_row(vec![
        grams(report.bought_pure_weight),
        grams(report.sold_pure_weight),
        grams(report.net_pure_weight),
        money(report.spot_price_24k, currency),
        money(report.stock_value, currency),
    ]);
    println!("{t}");
    if report.is_oversold() {
        println!("Warning: more gold sold than bought. Check the ledger for missing purchases.");
    }
}

pub fn profit(report: &ProfitReport, currency: &str) {
    let mut t = table(vec!["Line", "Amount"]);
    let lines = [
        (format!("Sales ({})", report.sell_count), report.sales),
        (format!("Purchases ({})", report.buy_count), report.purchases),
        ("Gross profit".to_string(), report.gross_profit),
        (format!("Analysis revenue ({})", report.analysis_count), report.analysis_revenue),
        (format!("Expenses ({})", report.expense_count), report.expenses),
        ("Operating profit".to_string(), report.operating_profit),
        ("Income tax 23%".to_string(), report.income_tax),
        ("VAT 14%".to_string(), report.vat),
        ("Net profit".to_string(), report.net_profit),
    ];
    for (label, amount) in lines {
        t.add_row(vec![label, money(amount, currency)]);
    }
    println!("{t}");
}

pub fn allocations(report: &AllocationReport, currency: &str) {
    let mut t = table(vec!["Id", "Partner", "Capital", "Share", "Profit"]);
    for share in &report.shares {
        t.add_row(vec![
            share.partner_id.clone(),
            share.name.clone(),
            money(share.capital, currency),
            format!("{}%", share.share_pct.round_dp(2).normalize()),
            format!("{:.2} {currency}", share.profit),
        ]);
    }
    println!("{t}");
    println!(
        "Total capital {}, net profit {}.",
        money(report.total_capital, currency),
        money(report.net_profit, currency)
    );
    if report.is_unfunded() {
        println!("Warning: no partner has contributed capital; nothing is allocated.");
    }
}

pub fn statement(statement: &Statement, currency: &str) {
    let mut t = table(vec!["Type", "Date", "Party", "Weight", "Karat", "Total"]);
    for tx in &statement.rows {
        t.add_row(vec![
            tx.kind.to_string(),
            tx.date.to_string(),
            tx.party().to_string(),
            optional(tx.weight),
            optional(tx.karat),
            money(tx.total_amount, currency),
        ]);
    }
    println!("{t}");
    println!(
        "{} records ({}), total {}.",
        statement.rows.len(),
        statement.filter,
        money(statement.total, currency)
    );
}

pub fn employees(employees: &[Employee]) {
    let mut t = table(vec!["Id", "Code", "Name", "Job title", "Phone", "Email"]);
    for e in employees {
        t.add_row(vec![
            e.id.clone(),
            e.code.clone(),
            e.name.clone(),
            e.job_title.clone(),
            e.phone.clone(),
            e.email.clone().unwrap_or_default(),
        ]);
    }
    println!("{t}");
}

pub fn permissions(permissions: &[Permission]) {
    let mut t = table(vec!["Id", "Date", "Employee", "Destination", "Items", "Status"]);
    for p in permissions {
        t.add_row(vec![
            p.id.clone(),
            p.date.to_string(),
            p.employee_name.clone(),
            p.destination.clone(),
            p.items.clone(),
            format!("{:?}", p.status).to_uppercase(),
        ]);
    }
    println!("{t}");
}

pub fn users(users: &[User]) {
    let mut t = table(vec!["Id", "Username", "Role", "Last login"]);
    for u in users {
        let last_login = if u.last_login.is_empty() { "-" } else { u.last_login.as_str() };
        t.add_row(vec![
            u.id.clone(),
            u.username.clone(),
            format!("{:?}", u.role),
            last_login.to_string(),
        ]);
    }
    println!("{t}");
}

pub fn settings(settings: &Settings) {
    let mut t = table(vec!["Setting", "Value"]);
    t.add_row(vec!["24k price / g".to_string(), settings.gold_price24.to_string()]);
    t.add_row(vec!["21k price / g".to_string(), settings.gold_price21.to_string()]);
    t.add_row(vec!["18k price / g".to_string(), settings.gold_price18.to_string()]);
    t.add_row(vec!["Tax rate (stored only)".to_string(), settings.tax_rate.to_string()]);
    t.add_row(vec!["Currency".to_string(), settings.currency.clone()]);
    println!("{t}");
}

pub fn dashboard(dashboard: &Dashboard) {
    let currency = dashboard.settings.currency.as_str();
    let mut t = table(vec!["Sales", "Purchases", "Analyses", "Net profit", "Net stock", "Stock value"]);
    t.add_row(vec![
        money(dashboard.profit.sales, currency),
        money(dashboard.profit.purchases, currency),
        dashboard.profit.analysis_count.to_string(),
        money(dashboard.profit.net_profit, currency),
        grams(dashboard.inventory.net_pure_weight),
        money(dashboard.inventory.stock_value, currency),
    ]);
    println!("{t}");
    println!(
        "{} partners, {} pending permissions, 24k at {}.",
        dashboard.partner_count,
        dashboard.pending_permissions,
        money(dashboard.settings.gold_price24, currency)
    );

    if !dashboard.recent.is_empty() {
        let mut recent = table(vec!["Type", "Date", "Party", "Total"]);
        for tx in &dashboard.recent {
            recent.add_row(vec![
                tx.kind.to_string(),
                tx.date.to_string(),
                tx.party().to_string(),
                money(tx.total_amount, currency),
            ]);
        }
        println!("{recent}");
    }
}
