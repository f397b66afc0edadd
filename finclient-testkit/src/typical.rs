//! Typical parties used across tests.
//!
//! `bob` and `amy` are deliberately left out of [`typical_parties`] so tests
//! can use them as parties absent from a book.

use crate::PartyBuilder;
use chrono::NaiveDateTime;
use finclient_domain::{Party, Remark};
use rust_decimal::Decimal;

fn remark(text: &str, deadline: Option<&str>) -> Remark {
    let timestamp = deadline.map(|d| {
        NaiveDateTime::parse_from_str(d, Remark::TIMESTAMP_FORMAT).expect("fixture deadline")
    });
    Remark::new(text, timestamp)
}

pub fn alice() -> Party {
    PartyBuilder::new("Alice Pauline")
        .with_phones(&["94351253"])
        .with_email("alice@example.com")
        .with_address("123, Jurong West Ave 6, #08-111")
        .with_tags(&["friends"])
        .with_company("Acme Capital")
        .with_job("Analyst")
        .with_stock_platform("Moomoo")
        .with_networth(Decimal::from(250_000))
        .with_remark(remark("Rebalance portfolio", Some("2025-04-02 09:30")))
        .with_order("BUY 10 @ $12")
        .build()
}

pub fn benson() -> Party {
    PartyBuilder::new("Benson Meier")
        .with_phones(&["98765432"])
        .with_email("johnd@example.com")
        .with_address("311, Clementi Ave 2, #02-25")
        .with_tags(&["owesMoney", "friends"])
        .with_company("Meier Holdings")
        .with_job("Trader")
        .with_stock_platform("Tiger")
        .with_networth(Decimal::from(1_200_000))
        .with_remark(remark("Review margin call", Some("2025-03-28 14:00")))
        .with_order("SELL 8 @ $10")
        .build()
}

pub fn carl() -> Party {
    PartyBuilder::new("Carl Kurz")
        .with_phones(&["95352563"])
        .with_email("heinz@example.com")
        .with_address("wall street")
        .with_networth(Decimal::from(40_000))
        .build()
}

pub fn daniel() -> Party {
    PartyBuilder::new("Daniel Meier")
        .with_phones(&["87652533"])
        .with_email("cornelia@example.com")
        .with_address("10th street")
        .with_tags(&["friends"])
        .with_networth(Decimal::from(75_000))
        .with_order("BUY 5 @ $11")
        .build()
}

pub fn elle() -> Party {
    PartyBuilder::new("Elle Meyer")
        .with_phones(&["94822240"])
        .with_email("werner@example.com")
        .with_address("michegan ave")
        .with_networth(Decimal::from(310_000))
        .with_remark(remark("Send quarterly report", None))
        .with_order("SELL 6 @ $11")
        .build()
}

pub fn fiona() -> Party {
    PartyBuilder::new("Fiona Kunz")
        .with_phones(&["94824270"])
        .with_email("lydia@example.com")
        .with_address("little tokyo")
        .with_networth(Decimal::from(5_000))
        .with_remark(remark("Follow up on IPO allocation", Some("2025-03-30 16:45")))
        .build()
}

pub fn george() -> Party {
    PartyBuilder::new("George Best")
        .with_phones(&["94824420"])
        .with_email("anna@example.com")
        .with_address("4th street")
        .with_networth(Decimal::from(980_000))
        .with_order("BUY 3 @ $9.50")
        .build()
}

/// Not part of [`typical_parties`].
pub fn amy() -> Party {
    PartyBuilder::new("Amy Bee")
        .with_phones(&["11111111"])
        .with_email("amy@example.com")
        .with_address("Block 312, Amy Street 1")
        .with_tags(&["friend"])
        .build()
}

/// Not part of [`typical_parties`].
pub fn bob() -> Party {
    PartyBuilder::new("Bob Choo")
        .with_phones(&["22222222"])
        .with_email("bob@example.com")
        .with_address("Block 123, Bobby Street 3")
        .with_tags(&["husband", "friend"])
        .with_order("SELL 2 @ $12")
        .build()
}

/// Alice through George, in that order.
pub fn typical_parties() -> Vec<Party> {
    vec![alice(), benson(), carl(), daniel(), elle(), fiona(), george()]
}
