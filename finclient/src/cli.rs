//! Command-line interface.

use crate::book::ClientBook;
use crate::error::AppResult;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finclient_domain::{Name, Networth, Party, PartyDetails, Remark, SortCriterion};
use finclient_store::SnapshotRepository;
use std::fmt::Write;

/// Manage clients and their pending orders.
#[derive(Debug, Parser)]
#[command(name = "finclient", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every party
    List {
        /// Reorder first: name, networth, amount, price or deadline
        #[arg(long)]
        sort: Option<SortCriterion>,
    },
    /// Show the clearing price of all pending orders
    Clearing,
    /// Add a party with no pending order
    Add {
        name: String,
        #[arg(long = "phone")]
        phones: Vec<String>,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        address: String,
        /// Free text, optionally ending in `by/yyyy-MM-dd HH:mm`
        #[arg(long)]
        remark: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        job: String,
        #[arg(long, default_value = "")]
        platform: String,
        #[arg(long)]
        networth: Option<Networth>,
    },
    /// Set the pending order of a party, e.g. `order "Alex Yeoh" "BUY 10 @ $5.50"`
    Order { name: String, order: String },
    /// Set the remark of a party, e.g. `remark "Alex Yeoh" "Call back by/2025-03-27 10:30"`
    Remark { name: String, remark: String },
    /// Remove a party
    Remove { name: String },
    /// Mask a party's details in listings
    Hide { name: String },
    /// Unmask a party's details
    Reveal { name: String },
    /// List parties with upcoming deadlines
    Upcoming {
        #[arg(long)]
        count: Option<usize>,
    },
}

/// Run `command` against `book` and render its output.
///
/// `default_count` applies to `upcoming` when no `--count` is given.
pub async fn execute<R: SnapshotRepository>(
    book: &mut ClientBook<R>,
    command: Command,
    today: NaiveDate,
    default_count: usize,
) -> AppResult<String> {
    let output = match command {
        Command::List { sort } => {
            if let Some(criterion) = sort {
                book.sort(criterion).await?;
            }
            render_parties(book.parties().iter())
        },
        Command::Clearing => match book.clearing_outcome() {
            Some(outcome) => format!(
                "Clearing price: ${} (matched volume {})",
                outcome.price,
                outcome.volume()
            ),
            None => "No trade possible".to_string(),
        },
        Command::Add {
            name,
            phones,
            email,
            address,
            remark,
            tags,
            company,
            job,
            platform,
            networth,
        } => {
            let details = PartyDetails {
                phones,
                email,
                address,
                remark: remark.as_deref().map(Remark::parse).transpose()?.unwrap_or_default(),
                tags: tags.into_iter().collect(),
                company,
                job,
                stock_platform: platform,
                networth: networth.unwrap_or_default(),
            };
            let party = Party::new(Name::new(&name)?, details);
            let summary = format!("New party added: {}", party);
            book.add(party).await?;
            summary
        },
        Command::Order { name, order } => {
            let updated = book.set_order(&name, &order).await?;
            format!("Order updated: {} {}", updated.name(), updated.order())
        },
        Command::Remark { name, remark } => {
            let updated = book.set_remark(&name, &remark).await?;
            format!("Remark updated: {} {}", updated.name(), updated.remark())
        },
        Command::Remove { name } => {
            let removed = book.remove(&name).await?;
            format!("Deleted party: {}", removed.name())
        },
        Command::Hide { name } => {
            book.hide(&name).await?;
            format!("Details hidden: {}", name.trim())
        },
        Command::Reveal { name } => {
            book.reveal(&name).await?;
            format!("Details revealed: {}", name.trim())
        },
        Command::Upcoming { count } => {
            let due = book.upcoming(today, count.unwrap_or(default_count));
            if due.is_empty() {
                "No upcoming deadlines".to_string()
            } else {
                render_parties(due.into_iter())
            }
        },
    };
    Ok(output)
}

fn render_parties<'a>(parties: impl Iterator<Item = &'a Party>) -> String {
    let mut out = String::new();
    for (index, party) in parties.enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, party);
    }
    if out.is_empty() {
        out.push_str("No parties");
    }
    out.trim_end().to_string()
}

// =============================================================================
// Tests
// =============================================================================
