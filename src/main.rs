use analytics::StatementFilter;
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use configuration::{AppConfig, ConfigOverrides};
use core_types::{Employee, TransactionType, UserRole};
use database::{backup_file_name, FileBlobStore};
use engine::{ExpenseEntry, NewEmployee, NewPermission, OperationEntry, ShopEngine, DEFAULT_EXPENSE_CATEGORY};
use export::{report_file_name, write_csv_file};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod render;

type Shop = ShopEngine<FileBlobStore>;

/// The main entry point for the Pyramids Gold ledger.
fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config().context("Failed to load configuration")?;
    cli.overrides.apply(&mut config);
    config.validate()?;

    let _log_guard = configuration::init_tracing(&config.logging)?;

    let store = FileBlobStore::open(&config.storage.data_dir)
        .with_context(|| format!("Failed to open data directory {}", config.storage.data_dir.display()))?;
    let mut shop = ShopEngine::with_defaults(store, config.defaults.to_settings())
        .with_csv_quoting(config.export.quoting);

    run(cli.command, &mut shop, &config)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Ledger, pricing and profit-sharing for a gold assay and trading shop.
#[derive(Parser)]
#[command(name = "pyramids-gold", author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the per-gram quote for a BUY or SELL at the current spot price.
    Quote {
        /// BUY or SELL.
        #[arg(long = "type", default_value = "SELL")]
        kind: TransactionType,
        /// Fineness in parts per 1000, e.g. 875 for 21k.
        #[arg(long, default_value = "875")]
        karat: Decimal,
    },
    /// Estimate the pure-gold content and melt value of an ingot.
    Assay {
        #[arg(long)]
        weight: Decimal,
        #[arg(long)]
        karat: Decimal,
    },
    /// Compare an observed live 24k price with the manually set one.
    Advice {
        #[arg(long)]
        live: Decimal,
    },
    /// Record a purchase of gold from a customer.
    Buy(TradeArgs),
    /// Record a sale of gold to a customer.
    Sell(TradeArgs),
    /// Record an assay service.
    Analysis(AnalysisArgs),
    /// Record an operating expense.
    Expense(ExpenseArgs),
    /// Delete every ledger record.
    ClearLedger {
        /// Required; there is no undo.
        #[arg(long)]
        yes: bool,
    },
    /// Show net pure-gold stock and its value.
    Inventory,
    /// Show the profit and tax waterfall.
    Profit,
    /// Manage capital partners and show their profit shares.
    #[command(subcommand)]
    Partners(PartnerCommands),
    /// Manage staff.
    #[command(subcommand)]
    Employees(EmployeeCommands),
    /// Manage gold transport permissions.
    #[command(subcommand)]
    Permissions(PermissionCommands),
    /// Manage application users. Passwords are never shown.
    #[command(subcommand)]
    Users(UserCommands),
    /// Show or change shop settings.
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// List ledger records, optionally filtered by type, and export them as CSV.
    Report {
        /// ALL, BUY, SELL, ANALYSIS or EXPENSE.
        #[arg(long = "type", default_value = "ALL")]
        filter: StatementFilter,
        /// Write a CSV file. Without a path, the dated default name is used.
        #[arg(long, num_args = 0..=1)]
        csv: Option<Option<PathBuf>>,
    },
    /// Write every collection to a JSON backup file.
    Backup {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Restore collections from a JSON backup file.
    Restore { file: PathBuf },
    /// Show the front-page summary.
    Dashboard {
        /// Print as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct TradeArgs {
    /// Gross weight in grams.
    #[arg(long)]
    weight: Decimal,
    /// Fineness in parts per 1000.
    #[arg(long, default_value = "875")]
    karat: Decimal,
    /// Manual per-gram price instead of the derived quote.
    #[arg(long)]
    price: Option<Decimal>,
    /// Discount percentage, 0 to 100.
    #[arg(long)]
    discount: Option<Decimal>,
    #[arg(long)]
    customer: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    technician: Option<String>,
    /// Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    unpaid: bool,
}

#[derive(Args)]
struct AnalysisArgs {
    /// Flat service fee.
    #[arg(long)]
    fee: Decimal,
    #[arg(long)]
    weight: Option<Decimal>,
    #[arg(long)]
    karat: Option<Decimal>,
    /// `cast` or `raw`.
    #[arg(long, default_value = "cast")]
    ingot: String,
    #[arg(long)]
    customer: Option<String>,
    #[arg(long)]
    technician: Option<String>,
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    unpaid: bool,
}

#[derive(Args)]
struct ExpenseArgs {
    #[arg(long)]
    amount: Decimal,
    #[arg(long)]
    description: String,
    #[arg(long, default_value = DEFAULT_EXPENSE_CATEGORY)]
    category: String,
    #[arg(long)]
    payee: Option<String>,
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum PartnerCommands {
    /// List partners with their capital-based profit shares.
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        capital: Decimal,
    },
    Remove { id: String },
}

#[derive(Subcommand)]
enum EmployeeCommands {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long, default_value = "")]
        job_title: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change the given fields of an employee.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        job_title: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Remove { id: String },
}

#[derive(Subcommand)]
enum PermissionCommands {
    List,
    /// Issue a PENDING permission for an employee.
    Add {
        #[arg(long)]
        employee: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        items: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Remove { id: String },
}

#[derive(Subcommand)]
enum UserCommands {
    List,
    Add {
        #[arg(long)]
        username: String,
        /// Grant full access instead of the limited role.
        #[arg(long)]
        admin: bool,
    },
    Remove { id: String },
}

#[derive(Subcommand)]
enum SettingsCommands {
    Show,
    Set {
        #[arg(long)]
        gold24: Option<Decimal>,
        #[arg(long)]
        gold21: Option<Decimal>,
        #[arg(long)]
        gold18: Option<Decimal>,
        /// Stored only; the tax calculation uses fixed rates.
        #[arg(long)]
        tax_rate: Option<Decimal>,
        #[arg(long)]
        currency: Option<String>,
    },
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run(command: Commands, shop: &mut Shop, config: &AppConfig) -> Result<()> {
    let currency = shop.settings()?.currency;

    match command {
        Commands::Quote { kind, karat } => match shop.quote(kind, Some(karat))? {
            Some(quote) => render::quote(kind, karat, &quote, &currency),
            None => bail!("{kind} has no per-gram quote; use BUY or SELL"),
        },
        Commands::Assay { weight, karat } => {
            let estimate = shop.assay(weight, karat)?;
            render::assay(weight, karat, &estimate, &currency);
        }
        Commands::Advice { live } => {
            let advice = shop.advice(live)?;
            println!("{}", render::advice_label(advice));
        }
        Commands::Buy(args) => record_trade(shop, TransactionType::Buy, args, &currency)?,
        Commands::Sell(args) => record_trade(shop, TransactionType::Sell, args, &currency)?,
        Commands::Analysis(args) => {
            let mut entry = OperationEntry::new(TransactionType::Analysis, args.date.unwrap_or_else(today));
            entry.customer_name = args.customer;
            entry.weight = args.weight;
            entry.karat = args.karat;
            entry.price_override = Some(args.fee);
            entry.technician_id = args.technician;
            entry.ingot_type = Some(args.ingot);
            entry.is_paid = !args.unpaid;
            let tx = shop.record_operation(entry)?;
            render::saved(&tx, &currency);
        }
        Commands::Expense(args) => {
            let tx = shop.record_expense(ExpenseEntry {
                date: args.date.unwrap_or_else(today),
                description: args.description,
                amount: args.amount,
                category: args.category,
                payee: args.payee,
            })?;
            render::saved(&tx, &currency);
        }
        Commands::ClearLedger { yes } => {
            if !yes {
                bail!("Refusing to clear the ledger without --yes");
            }
            shop.clear_ledger()?;
            println!("Ledger cleared.");
        }
        Commands::Inventory => render::inventory(&shop.inventory()?, &currency),
        Commands::Profit => render::profit(&shop.profit()?, &currency),
        Commands::Partners(cmd) => run_partners(shop, cmd, &currency)?,
        Commands::Employees(cmd) => run_employees(shop, cmd)?,
        Commands::Permissions(cmd) => run_permissions(shop, cmd)?,
        Commands::Users(cmd) => run_users(shop, cmd)?,
        Commands::Settings(cmd) => run_settings(shop, cmd)?,
        Commands::Report { filter, csv } => {
            let statement = shop.statement(filter)?;
            render::statement(&statement, &currency);

            if let Some(path) = csv {
                let document = shop.statement_csv(filter)?;
                let path = path.unwrap_or_else(|| PathBuf::from(report_file_name(&filter.to_string(), today())));
                write_csv_file(&path, &document)?;
                println!("Exported {} rows to {} ({:?} quoting).", statement.rows.len(), path.display(), config.export.quoting);
            }
        }
        Commands::Backup { out } => {
            let backup = shop.create_backup(Utc::now())?;
            let path = out.unwrap_or_else(|| PathBuf::from(backup_file_name(today())));
            std::fs::write(&path, backup.to_json()?)
                .with_context(|| format!("Failed to write backup to {}", path.display()))?;
            println!("Backup written to {}.", path.display());
        }
        Commands::Restore { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read backup {}", file.display()))?;
            let summary = shop
                .restore_backup(&raw)
                .with_context(|| format!("{} is not a valid backup; nothing was restored", file.display()))?;
            println!("Restored {} collections from {}.", summary.applied(), file.display());
        }
        Commands::Dashboard { json } => {
            let dashboard = shop.dashboard()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                render::dashboard(&dashboard);
            }
        }
    }
    Ok(())
}

fn record_trade(shop: &mut Shop, kind: TransactionType, args: TradeArgs, currency: &str) -> Result<()> {
    let mut entry = OperationEntry::new(kind, args.date.unwrap_or_else(today));
    entry.customer_name = args.customer;
    entry.description = args.description;
    entry.weight = Some(args.weight);
    entry.karat = Some(args.karat);
    entry.price_override = args.price;
    entry.discount = args.discount;
    entry.technician_id = args.technician;
    entry.is_paid = !args.unpaid;

    let tx = shop.record_operation(entry)?;
    render::saved(&tx, currency);
    Ok(())
}

fn run_partners(shop: &mut Shop, cmd: PartnerCommands, currency: &str) -> Result<()> {
    match cmd {
        PartnerCommands::List => render::allocations(&shop.allocations()?, currency),
        PartnerCommands::Add { name, capital } => {
            let partner = shop.add_partner(&name, capital)?;
            println!("Added partner {} ({}).", partner.name, partner.id);
            for share in shop.allocations()?.shares {
                if share.partner_id == partner.id {
                    println!("Current share: {}%", share.share_pct.round_dp(2));
                }
            }
        }
        PartnerCommands::Remove { id } => {
            let partner = shop.remove_partner(&id)?;
            println!("Removed partner {}.", partner.name);
        }
    }
    Ok(())
}

fn run_employees(shop: &mut Shop, cmd: EmployeeCommands) -> Result<()> {
    match cmd {
        EmployeeCommands::List => render::employees(&shop.employees()?),
        EmployeeCommands::Add {
            name,
            code,
            job_title,
            phone,
            email,
        } => {
            let employee = shop.add_employee(NewEmployee {
                name,
                code,
                job_title,
                phone,
                email,
            })?;
            println!("Added employee {} ({}).", employee.name, employee.id);
        }
        EmployeeCommands::Update {
            id,
            name,
            code,
            job_title,
            phone,
            email,
        } => {
            let current = find_employee(shop, &id)?;
            let updated = Employee {
                name: name.unwrap_or(current.name),
                code: code.unwrap_or(current.code),
                job_title: job_title.unwrap_or(current.job_title),
                phone: phone.unwrap_or(current.phone),
                email: email.or(current.email),
                ..current
            };
            shop.update_employee(updated)?;
            println!("Updated employee {id}.");
        }
        EmployeeCommands::Remove { id } => {
            let employee = shop.remove_employee(&id)?;
            println!("Removed employee {}.", employee.name);
        }
    }
    Ok(())
}

fn find_employee(shop: &Shop, id: &str) -> Result<Employee> {
    shop.employees()?
        .into_iter()
        .find(|e| e.id == id)
        .with_context(|| format!("No employee with id '{id}'"))
}

fn run_permissions(shop: &mut Shop, cmd: PermissionCommands) -> Result<()> {
    match cmd {
        PermissionCommands::List => render::permissions(&shop.permissions()?),
        PermissionCommands::Add {
            employee,
            destination,
            items,
            date,
        } => {
            let permission = shop.issue_permission(NewPermission {
                employee_id: employee,
                date: date.unwrap_or_else(today),
                destination,
                items,
            })?;
            println!("Issued permission {} for {}.", permission.id, permission.employee_name);
        }
        PermissionCommands::Remove { id } => {
            shop.remove_permission(&id)?;
            println!("Removed permission {id}.");
        }
    }
    Ok(())
}

fn run_users(shop: &mut Shop, cmd: UserCommands) -> Result<()> {
    match cmd {
        UserCommands::List => render::users(&shop.users()?),
        UserCommands::Add { username, admin } => {
            let role = if admin { UserRole::Admin } else { UserRole::Limited };
            let user = shop.add_user(&username, role)?;
            println!("Added user {} ({}).", user.username, user.id);
        }
        UserCommands::Remove { id } => {
            let user = shop.remove_user(&id)?;
            println!("Removed user {}.", user.username);
        }
    }
    Ok(())
}

fn run_settings(shop: &mut Shop, cmd: SettingsCommands) -> Result<()> {
    match cmd {
        SettingsCommands::Show => render::settings(&shop.settings()?),
        SettingsCommands::Set {
            gold24,
            gold21,
            gold18,
            tax_rate,
            currency,
        } => {
            let mut settings = shop.settings()?;
            if let Some(price) = gold24 {
                settings.gold_price24 = price;
            }
            if let Some(price) = gold21 {
                settings.gold_price21 = price;
            }
            if let Some(price) = gold18 {
                settings.gold_price18 = price;
            }
            if let Some(rate) = tax_rate {
                settings.tax_rate = rate;
            }
            if let Some(currency) = currency {
                settings.currency = currency;
            }
            shop.update_settings(settings)?;
            render::settings(&shop.settings()?);
        }
    }
    Ok(())
}
