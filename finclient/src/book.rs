//! Client book service.
//!
//! Wires the order set to a snapshot repository and the clearing engine.
//! Every mutation goes through the [`OrderSet`] first and is persisted only
//! once it has been accepted; a rejected command leaves both the in-memory
//! set and the saved snapshot unchanged.

use crate::error::{AppError, AppResult};
use chrono::NaiveDate;
use finclient_domain::{Name, Order, Party, Price, Remark, SortCriterion};
use finclient_engine::{ClearingEngine, ClearingOutcome};
use finclient_store::{EventBus, OrderSet, SnapshotRepository};
use tracing::info;

/// Managed parties plus their persistence.
pub struct ClientBook<R: SnapshotRepository> {
    parties: OrderSet,
    repository: R,
}

impl<R: SnapshotRepository> ClientBook<R> {
    /// Open a book from the repository's last snapshot.
    ///
    /// A missing snapshot opens an empty book. A snapshot containing two
    /// parties with the same name is rejected as a whole.
    pub async fn open(repository: R) -> AppResult<Self> {
        Self::open_with_events(repository, None).await
    }

    /// Open a book that publishes changes on `bus`.
    pub async fn open_with_events(repository: R, bus: Option<EventBus>) -> AppResult<Self> {
        let mut parties = match bus {
            Some(bus) => OrderSet::with_events(bus),
            None => OrderSet::new(),
        };

        if let Some(snapshot) = repository.load().await? {
            parties.replace_all(snapshot)?;
        }
        info!(parties = parties.len(), "Client book opened");

        Ok(Self { parties, repository })
    }

    /// Current members, in display order.
    pub fn parties(&self) -> &[Party] {
        self.parties.parties()
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Look up a party by name.
    pub fn find(&self, name: &str) -> AppResult<&Party> {
        let name = Name::new(name)?;
        self.parties
            .find(&name)
            .ok_or_else(|| AppError::UnknownParty(name.to_string()))
    }

    /// Add a new party.
    pub async fn add(&mut self, party: Party) -> AppResult<()> {
        self.parties.add(party)?;
        self.persist().await
    }

    /// Replace the order held by `name` with `order_text`.
    ///
    /// Returns the updated party.
    pub async fn set_order(&mut self, name: &str, order_text: &str) -> AppResult<Party> {
        let order = Order::parse(order_text)?;
        let current = self.find(name)?.clone();
        let updated = current.with_order(order);

        self.parties.replace(&current, updated.clone())?;
        self.persist().await?;
        Ok(updated)
    }

    /// Replace the remark of `name` with `remark_text`.
    ///
    /// A trailing `by/yyyy-MM-dd HH:mm` sets the deadline used by
    /// [`upcoming`](Self::upcoming). Returns the updated party.
    pub async fn set_remark(&mut self, name: &str, remark_text: &str) -> AppResult<Party> {
        let remark = Remark::parse(remark_text)?;
        let current = self.find(name)?.clone();
        let updated = current.with_remark(remark);

        self.parties.replace(&current, updated.clone())?;
        self.persist().await?;
        Ok(updated)
    }

    /// Remove the party called `name`.
    pub async fn remove(&mut self, name: &str) -> AppResult<Party> {
        let current = self.find(name)?.clone();
        let removed = self.parties.remove(&current)?;
        self.persist().await?;
        Ok(removed)
    }

    /// Mask the details of `name`.
    pub async fn hide(&mut self, name: &str) -> AppResult<()> {
        let current = self.find(name)?.clone();
        self.parties.hide_party(&current);
        self.persist().await
    }

    /// Unmask the details of `name`.
    pub async fn reveal(&mut self, name: &str) -> AppResult<()> {
        let current = self.find(name)?.clone();
        self.parties.reveal_party(&current);
        self.persist().await
    }

    /// Reorder the book and persist the new order.
    pub async fn sort(&mut self, criterion: SortCriterion) -> AppResult<()> {
        self.parties.sort_by(criterion);
        self.persist().await
    }

    /// Clearing price of the current orders, `None` when no trade is possible.
    pub fn clearing_price(&self) -> Option<Price> {
        self.parties.clearing_price()
    }

    /// Clearing price together with the matched volumes.
    pub fn clearing_outcome(&self) -> Option<ClearingOutcome> {
        ClearingEngine::evaluate(&self.parties.snapshot_orders())
    }

    /// Parties with a deadline on or after `today`, soonest first.
    pub fn upcoming(&self, today: NaiveDate, count: usize) -> Vec<&Party> {
        self.parties.upcoming(today, count)
    }

    async fn persist(&self) -> AppResult<()> {
        self.repository.save(self.parties.parties()).await?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use finclient_domain::DomainError;
    use finclient_store::{MemoryStore, StoreError};
    use finclient_testkit::typical;

    async fn book_with(parties: Vec<Party>) -> ClientBook<MemoryStore> {
        ClientBook::open(MemoryStore::with_parties(parties)).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_empty_repository() {
        let book = ClientBook::open(MemoryStore::new()).await.unwrap();
        assert!(book.parties().is_empty());
        assert!(book.clearing_price().is_none());
    }

    #[tokio::test]
    async fn test_open_rejects_duplicate_snapshot() {
        let store = MemoryStore::with_parties(vec![typical::alice(), typical::alice()]);
        let result = ClientBook::open(store).await;
        assert!(matches!(result, Err(AppError::Store(StoreError::DuplicateEntity { .. }))));
    }

    #[tokio::test]
    async fn test_set_order_persists() {
        let mut book = book_with(vec![typical::carl()]).await;

        let updated = book.set_order("Carl Kurz", "buy 4 @ 7.25").await.unwrap();

        assert_eq!(updated.order().to_string(), "BUY 4 @ $7.25");
        let saved = book.repository().load().await.unwrap().unwrap();
        assert_eq!(saved, vec![updated]);
    }

    #[tokio::test]
    async fn test_invalid_order_changes_nothing() {
        let mut book = book_with(vec![typical::carl()]).await;

        let err = book.set_order("Carl Kurz", "BUY 10 @ $-5.50").await.unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::InvalidOrder(_))));
        assert_eq!(book.parties(), &[typical::carl()]);
        assert_eq!(book.repository().save_count(), 0);
    }

    #[tokio::test]
    async fn test_set_remark_with_deadline() {
        let mut book = book_with(vec![typical::carl()]).await;
        let today = NaiveDate::from_ymd_opt(2025, 3, 27).unwrap();
        assert!(book.upcoming(today, 5).is_empty());

        let updated = book.set_remark("Carl Kurz", "Call back by/2025-03-29 10:30").await.unwrap();

        assert_eq!(updated.remark().text(), "Call back");
        assert_eq!(book.upcoming(today, 5), vec![&updated]);
        assert_eq!(book.repository().load().await.unwrap(), Some(vec![updated]));
    }

    #[tokio::test]
    async fn test_set_remark_without_deadline_clears_it() {
        let mut book = book_with(vec![typical::benson()]).await;

        let updated = book.set_remark("Benson Meier", "Margin call settled").await.unwrap();

        assert_eq!(updated.deadline(), None);
        assert_eq!(updated.order(), typical::benson().order());
    }

    #[tokio::test]
    async fn test_malformed_deadline_changes_nothing() {
        let mut book = book_with(vec![typical::carl()]).await;

        let err = book.set_remark("Carl Kurz", "Call by/29-03-2025").await.unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::InvalidTimestamp(_))));
        assert_eq!(book.parties(), &[typical::carl()]);
        assert_eq!(book.repository().save_count(), 0);
    }

    #[tokio::test]
    async fn test_remark_for_unknown_party_changes_nothing() {
        let mut book = book_with(vec![typical::carl()]).await;

        let err = book.set_remark("Nobody Here", "Hello").await.unwrap_err();

        assert!(matches!(err, AppError::UnknownParty(_)));
        assert_eq!(book.parties(), &[typical::carl()]);
        assert_eq!(book.repository().save_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_party() {
        let mut book = book_with(vec![typical::carl()]).await;
        let err = book.remove("Nobody Here").await.unwrap_err();
        assert!(matches!(err, AppError::UnknownParty(ref name) if name == "Nobody Here"));
    }

    #[tokio::test]
    async fn test_duplicate_add_not_persisted() {
        let mut book = book_with(vec![typical::alice()]).await;
        assert!(book.add(typical::alice()).await.is_err());
        assert_eq!(book.repository().save_count(), 0);
    }

    #[tokio::test]
    async fn test_hide_keeps_clearing_price() {
        let mut book = book_with(vec![typical::alice(), typical::benson()]).await;
        let before = book.clearing_price();

        book.hide("Alice Pauline").await.unwrap();

        assert!(book.find("Alice Pauline").unwrap().is_hidden());
        assert_eq!(book.clearing_price(), before);
        assert!(book.repository().load().await.unwrap().unwrap()[0].is_hidden());
    }
}
