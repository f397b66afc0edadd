//! Invariant-preserving collection of parties
//!
//! `OrderSet` is the only mutation surface for the managed parties. After
//! every operation:
//! - no two members share an identity ([`same_identity`])
//! - members keep insertion order unless explicitly sorted
//!
//! Additions and replacements compare by identity; removal compares by full
//! value ([`same_value`]) so only the exact record is removed.
//!
//! Not synchronised: callers serialise access (one command at a time).

use crate::error::StoreError;
use crate::events::{BookEvent, EventBus};
use chrono::NaiveDate;
use finclient_domain::{same_identity, same_value, Name, Order, Party, Price, SortCriterion};
use finclient_engine::ClearingEngine;
use tracing::{info, warn};

/// Ordered, identity-unique collection of parties
#[derive(Debug, Default)]
pub struct OrderSet {
    members: Vec<Party>,
    events: Option<EventBus>,
}

impl OrderSet {
    /// Create an empty set with no change notifications
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set that publishes changes on `bus`
    pub fn with_events(bus: EventBus) -> Self {
        Self {
            members: Vec::new(),
            events: Some(bus),
        }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the set has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in current order
    pub fn parties(&self) -> &[Party] {
        &self.members
    }

    /// Iterate members in current order
    pub fn iter(&self) -> std::slice::Iter<'_, Party> {
        self.members.iter()
    }

    /// Find a member by name
    pub fn find(&self, name: &Name) -> Option<&Party> {
        self.members.iter().find(|p| p.name() == name)
    }

    /// True if some member shares identity with `party`
    pub fn contains(&self, party: &Party) -> bool {
        self.members.iter().any(|member| same_identity(member, party))
    }

    /// Append a party
    ///
    /// # Errors
    /// `StoreError::DuplicateEntity` if a member shares its identity
    pub fn add(&mut self, party: Party) -> Result<(), StoreError> {
        if self.contains(&party) {
            warn!(name = %party.name(), "Rejected add: duplicate party");
            return Err(StoreError::duplicate(party.name().as_str()));
        }

        let name = party.name().to_string();
        self.members.push(party);
        info!(name = %name, members = self.members.len(), "Party added");
        self.publish(BookEvent::PartyAdded { name });
        Ok(())
    }

    /// Swap `target` for `replacement`, keeping its position
    ///
    /// # Errors
    /// - `StoreError::EntityNotFound` if no member shares identity with `target`
    /// - `StoreError::DuplicateEntity` if `replacement` takes the identity of
    ///   another member
    pub fn replace(&mut self, target: &Party, replacement: Party) -> Result<(), StoreError> {
        let index = self
            .members
            .iter()
            .position(|member| same_identity(member, target))
            .ok_or_else(|| StoreError::not_found(target.name().as_str()))?;

        if !same_identity(target, &replacement) && self.contains(&replacement) {
            warn!(
                target = %target.name(),
                replacement = %replacement.name(),
                "Rejected replace: replacement collides with another party"
            );
            return Err(StoreError::duplicate(replacement.name().as_str()));
        }

        let previous = self.members[index].name().to_string();
        let name = replacement.name().to_string();
        self.members[index] = replacement;
        info!(previous = %previous, name = %name, index, "Party replaced");
        self.publish(BookEvent::PartyReplaced { previous, name });
        Ok(())
    }

    /// Remove the member whose every field equals `party`
    ///
    /// # Errors
    /// `StoreError::EntityNotFound` if no member is value-equal to `party`
    pub fn remove(&mut self, party: &Party) -> Result<Party, StoreError> {
        let index = self
            .members
            .iter()
            .position(|member| same_value(member, party))
            .ok_or_else(|| StoreError::not_found(party.name().as_str()))?;

        let removed = self.members.remove(index);
        info!(name = %removed.name(), members = self.members.len(), "Party removed");
        self.publish(BookEvent::PartyRemoved {
            name: removed.name().to_string(),
        });
        Ok(removed)
    }

    /// Replace every member with `snapshot`, in the given order
    ///
    /// The batch is rejected as a whole, leaving the set untouched, if any two
    /// of its parties share an identity.
    ///
    /// # Errors
    /// `StoreError::DuplicateEntity` naming the first colliding party
    pub fn replace_all(&mut self, snapshot: Vec<Party>) -> Result<(), StoreError> {
        if let Some(duplicate) = first_duplicate(&snapshot) {
            warn!(name = %duplicate.name(), size = snapshot.len(), "Rejected bulk replace");
            return Err(StoreError::duplicate(duplicate.name().as_str()));
        }

        let count = snapshot.len();
        self.members = snapshot;
        info!(members = count, "Order set reloaded");
        self.publish(BookEvent::Reloaded { count });
        Ok(())
    }

    /// Stable sort by `criterion`; equal members keep their relative order
    pub fn sort_by(&mut self, criterion: SortCriterion) {
        self.members.sort_by(|a, b| a.compare(b, criterion));
        info!(criterion = %criterion, "Order set sorted");
        self.publish(BookEvent::Sorted { criterion });
    }

    /// Orders of every member, in current member order
    ///
    /// Members without an order contribute `Order::none()`.
    pub fn snapshot_orders(&self) -> Vec<Order> {
        self.members.iter().map(|p| *p.order()).collect()
    }

    /// Clearing price of the current snapshot
    pub fn clearing_price(&self) -> Option<Price> {
        ClearingEngine::compute(&self.snapshot_orders())
    }

    /// Mask members matching `predicate`; returns how many matched
    pub fn hide<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Party) -> bool,
    {
        self.set_hidden(predicate, true)
    }

    /// Mask the member sharing identity with `party`
    pub fn hide_party(&mut self, party: &Party) -> usize {
        self.set_hidden(|member| same_identity(member, party), true)
    }

    /// Unmask members matching `predicate`; returns how many matched
    pub fn reveal<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Party) -> bool,
    {
        self.set_hidden(predicate, false)
    }

    /// Unmask the member sharing identity with `party`
    pub fn reveal_party(&mut self, party: &Party) -> usize {
        self.set_hidden(|member| same_identity(member, party), false)
    }

    fn set_hidden<F>(&mut self, predicate: F, hidden: bool) -> usize
    where
        F: Fn(&Party) -> bool,
    {
        let mut affected = 0;
        for member in self.members.iter_mut().filter(|m| predicate(&**m)) {
            *member = member.with_hidden(hidden);
            affected += 1;
        }

        if affected > 0 {
            info!(affected, hidden, "Party visibility changed");
            self.publish(BookEvent::VisibilityChanged { affected, hidden });
        }
        affected
    }

    /// Members with a deadline on or after `today`, soonest first, at most `count`
    pub fn upcoming(&self, today: NaiveDate, count: usize) -> Vec<&Party> {
        let mut due: Vec<&Party> = self
            .members
            .iter()
            .filter(|p| p.deadline().map_or(false, |ts| ts.date() >= today))
            .collect();
        due.sort_by_key(|p| p.deadline());
        due.truncate(count);
        due
    }

    fn publish(&self, event: BookEvent) {
        if let Some(bus) = &self.events {
            bus.send(event);
        }
    }
}

impl<'a> IntoIterator for &'a OrderSet {
    type Item = &'a Party;
    type IntoIter = std::slice::Iter<'a, Party>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

fn first_duplicate(parties: &[Party]) -> Option<&Party> {
    parties.iter().enumerate().find_map(|(i, party)| {
        parties[i + 1..]
            .iter()
            .any(|other| same_identity(party, other))
            .then_some(party)
    })
}

// =============================================================================
// Tests
// =============================================================================
