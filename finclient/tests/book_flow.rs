//! End-to-end flows through the client book and the CLI front end.

use chrono::NaiveDate;
use finclient::{execute, AppError, ClientBook, Command};
use finclient_domain::SortCriterion;
use finclient_store::{BookEvent, EventBus, JsonFileStore, MemoryStore, SnapshotRepository, StoreError};
use finclient_testkit::{typical, PartyBuilder};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 27).unwrap()
}

#[tokio::test]
async fn full_cross_through_commands() -> anyhow::Result<()> {
    let store = MemoryStore::with_parties(vec![
        PartyBuilder::new("Bidder One").build(),
        PartyBuilder::new("Bidder Two").build(),
        PartyBuilder::new("Seller One").build(),
        PartyBuilder::new("Seller Two").build(),
    ]);
    let mut book = ClientBook::open(store).await?;

    let no_trade = execute(&mut book, Command::Clearing, today(), 5).await?;
    assert_eq!(no_trade, "No trade possible");

    for (name, order) in [
        ("Bidder One", "BUY 10 @ $12"),
        ("Bidder Two", "BUY 5 @ $11"),
        ("Seller One", "SELL 8 @ $10"),
        ("Seller Two", "SELL 6 @ $11"),
    ] {
        let command = Command::Order { name: name.to_string(), order: order.to_string() };
        execute(&mut book, command, today(), 5).await?;
    }

    let output = execute(&mut book, Command::Clearing, today(), 5).await?;
    assert_eq!(output, "Clearing price: $11 (matched volume 14)");
    assert_eq!(book.repository().save_count(), 4);
    Ok(())
}

#[tokio::test]
async fn snapshot_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data").join("finclient.json");

    {
        let mut book = ClientBook::open(JsonFileStore::new(&path)).await?;
        for party in typical::typical_parties() {
            book.add(party).await?;
        }
        book.sort(SortCriterion::Name).await?;
        book.hide("Carl Kurz").await?;
    }

    let book = ClientBook::open(JsonFileStore::new(&path)).await?;
    let mut expected = typical::typical_parties();
    expected.sort_by(|a, b| a.name().cmp(b.name()));

    assert_eq!(book.parties(), expected.as_slice());
    assert!(book.find("Carl Kurz")?.is_hidden());
    assert_eq!(book.clearing_price(), finclient_engine::ClearingEngine::compute(
        &expected.iter().map(|p| *p.order()).collect::<Vec<_>>()
    ));
    Ok(())
}

#[tokio::test]
async fn duplicate_file_is_rejected_whole() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("finclient.json");
    let text = r#"{ "parties": [
        { "name": "Alex Yeoh", "phones": ["87438807"], "email": "alexyeoh@example.com",
          "address": "Blk 30 Geylang Street 29", "order": "BUY 1 @ $1" },
        { "name": "Bernice Yu", "phones": ["99272758"], "email": "berniceyu@example.com",
          "address": "Blk 30 Lorong 3 Serangoon Gardens" },
        { "name": "Alex Yeoh", "phones": [], "email": "", "address": "" }
    ] }"#;
    tokio::fs::write(&path, text).await?;

    let result = ClientBook::open(JsonFileStore::new(&path)).await;

    assert!(matches!(result, Err(AppError::Store(StoreError::DuplicateEntity { ref name })) if name == "Alex Yeoh"));
    Ok(())
}

#[tokio::test]
async fn hidden_party_is_masked_in_listing() -> anyhow::Result<()> {
    let mut book = ClientBook::open(MemoryStore::with_parties(vec![typical::alice()])).await?;

    execute(&mut book, Command::Hide { name: "Alice Pauline".to_string() }, today(), 5).await?;
    let listing = execute(&mut book, Command::List { sort: None }, today(), 5).await?;

    assert!(listing.starts_with("1. Alice Pauline"));
    assert!(listing.contains("hidden@example.com"));
    assert!(listing.contains("Order: BUY 10 @ $12"));
    assert!(!listing.contains("alice@example.com"));

    execute(&mut book, Command::Reveal { name: "Alice Pauline".to_string() }, today(), 5).await?;
    let listing = execute(&mut book, Command::List { sort: None }, today(), 5).await?;
    assert!(listing.contains("alice@example.com"));
    Ok(())
}

#[tokio::test]
async fn upcoming_uses_default_count() -> anyhow::Result<()> {
    let mut book = ClientBook::open(MemoryStore::with_parties(typical::typical_parties())).await?;

    let listing = execute(&mut book, Command::Upcoming { count: None }, today(), 1).await?;
    assert_eq!(listing.lines().count(), 1);
    assert!(listing.starts_with("1. Benson Meier"));

    let listing = execute(&mut book, Command::Upcoming { count: Some(10) }, today(), 1).await?;
    assert_eq!(listing.lines().count(), 3);

    let later = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let listing = execute(&mut book, Command::Upcoming { count: None }, later, 5).await?;
    assert_eq!(listing, "No upcoming deadlines");
    Ok(())
}

#[tokio::test]
async fn rejected_commands_leave_book_untouched() -> anyhow::Result<()> {
    let bus = EventBus::new(16);
    let mut receiver = bus.subscribe();
    let store = MemoryStore::with_parties(vec![typical::alice(), typical::benson()]);
    let mut book = ClientBook::open_with_events(store, Some(bus)).await?;
    assert_eq!(receiver.drain(), vec![BookEvent::Reloaded { count: 2 }]);

    let bad_order = Command::Order { name: "Alice Pauline".to_string(), order: "HOLD 1 @ $1".to_string() };
    assert!(execute(&mut book, bad_order, today(), 5).await.is_err());

    let unknown = Command::Remove { name: "Nobody".to_string() };
    assert!(matches!(execute(&mut book, unknown, today(), 5).await, Err(AppError::UnknownParty(_))));

    assert!(receiver.drain().is_empty());
    assert_eq!(book.parties(), &[typical::alice(), typical::benson()]);
    assert_eq!(book.repository().load().await?, Some(vec![typical::alice(), typical::benson()]));
    Ok(())
}

#[tokio::test]
async fn remark_command_feeds_upcoming() -> anyhow::Result<()> {
    let mut book = ClientBook::open(MemoryStore::with_parties(vec![typical::carl()])).await?;
    assert_eq!(
        execute(&mut book, Command::Upcoming { count: None }, today(), 5).await?,
        "No upcoming deadlines"
    );

    let command = Command::Remark {
        name: "Carl Kurz".to_string(),
        remark: "Review holdings by/2025-03-28 09:00".to_string(),
    };
    let output = execute(&mut book, command, today(), 5).await?;
    assert_eq!(output, "Remark updated: Carl Kurz Review holdings (by 2025-03-28 09:00)");

    let listing = execute(&mut book, Command::Upcoming { count: None }, today(), 5).await?;
    assert!(listing.starts_with("1. Carl Kurz"));

    let malformed = Command::Remark {
        name: "Carl Kurz".to_string(),
        remark: "Later by/tomorrow".to_string(),
    };
    assert!(matches!(
        execute(&mut book, malformed, today(), 5).await,
        Err(AppError::Domain(_))
    ));
    assert_eq!(book.find("Carl Kurz")?.remark().text(), "Review holdings");
    Ok(())
}
