// chorus/chorus-directory
//
// Copyright: 2026, Chorus Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use tracing::debug;

use crate::caps::CapabilitySet;
use crate::handles::Handle;
use crate::presence::{Availability, Presence, ResourceName, ResourcePresence};

#[derive(Debug, Clone)]
struct ResourceEntry {
    name: ResourceName,
    presence: ResourcePresence,
}

/// Per-contact presence state: one entry per known resource plus the cached
/// aggregate that queries are answered from.
///
/// Entries keep their insertion slot across updates, so tie-breaks between
/// otherwise equal resources are stable.
#[derive(Debug, Clone, Default)]
pub struct PresenceRecord {
    entries: Vec<ResourceEntry>,
    aggregate: Presence,
    caps: CapabilitySet,
}

impl PresenceRecord {
    /// The aggregated status/message/priority of the winning resource.
    pub fn presence(&self) -> &Presence {
        &self.aggregate
    }

    /// The aggregated capability union. Kept while unavailable: this cache
    /// survives resources going away and is only replaced by a non-empty
    /// recomputed union or the record's destruction.
    pub fn caps(&self) -> &CapabilitySet {
        &self.caps
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_ref())
    }

    pub fn resource(&self, name: &str) -> Option<&ResourcePresence> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_ref() == name)
            .map(|entry| &entry.presence)
    }

    /// Highest presentness first, then highest priority, then first
    /// insertion order.
    fn winner(&self) -> Option<&ResourceEntry> {
        let mut best: Option<&ResourceEntry> = None;
        for entry in &self.entries {
            let better = match best {
                None => true,
                Some(incumbent) => {
                    let a = &entry.presence.presence;
                    let b = &incumbent.presence.presence;
                    a.availability > b.availability
                        || (a.availability == b.availability && a.priority > b.priority)
                }
            };
            if better {
                best = Some(entry);
            }
        }
        best
    }

    fn recompute_status(&mut self) {
        self.aggregate = self
            .winner()
            .map(|entry| entry.presence.presence.clone())
            .unwrap_or_default();
    }

    fn recompute_caps(&mut self) {
        let mut union = CapabilitySet::new();
        for entry in &self.entries {
            union.extend_from(&entry.presence.caps);
        }
        // An empty union never clears the cache: capabilities stay known
        // while the contact is unavailable.
        if !union.is_empty() {
            self.caps = union;
        }
    }
}

/// Multi-resource presence aggregator, keyed by contact handle.
///
/// All operations are total: an update for an unknown contact creates its
/// record, queries on unknown contacts answer with offline/empty defaults.
/// The `changed` flag from [`update_presence`](Self::update_presence) tells
/// the caller whether anything observable moved; delivery of notifications
/// is the caller's business.
#[derive(Debug, Default)]
pub struct PresenceDirectory {
    records: HashMap<Handle, PresenceRecord>,
}

impl PresenceDirectory {
    pub fn new() -> Self {
        PresenceDirectory::default()
    }

    /// Feeds one reduced presence report into the directory.
    ///
    /// A report without a resource is the lossy override: it replaces the
    /// aggregate status/message outright and drops every per-resource entry,
    /// bypassing ranking entirely. The capability cache survives it.
    ///
    /// A report for a named resource inserts or overwrites that resource
    /// (or removes it, when it is offline with no message), then recomputes
    /// the aggregate: status/message come from the resource with the
    /// highest presentness, ties broken by priority then by insertion
    /// order; capabilities are the union over all resources regardless of
    /// priority.
    pub fn update_presence(
        &mut self,
        contact: Handle,
        resource: Option<&str>,
        availability: Availability,
        status: Option<String>,
        priority: i16,
    ) -> bool {
        let record = self.records.entry(contact).or_default();

        let Some(name) = resource else {
            let changed = record.aggregate.availability != availability
                || record.aggregate.status != status;
            record.entries.clear();
            record.aggregate = Presence {
                availability,
                status,
                priority,
            };
            if changed {
                debug!(%contact, %availability, "presence overridden without resource");
            }
            return changed;
        };

        let before_availability = record.aggregate.availability;
        let before_status = record.aggregate.status.clone();
        let before_caps = record.caps.clone();

        // A plain "offline, nothing further to say" is the resource going
        // away; offline with a message stays listed.
        let leaves = availability == Availability::Offline && status.is_none();
        let slot = record
            .entries
            .iter()
            .position(|entry| entry.name.as_ref() == name);

        match (slot, leaves) {
            (Some(idx), true) => {
                record.entries.remove(idx);
            }
            (None, true) => {}
            (Some(idx), false) => {
                record.entries[idx].presence.presence = Presence {
                    availability,
                    status,
                    priority,
                };
            }
            (None, false) => {
                record.entries.push(ResourceEntry {
                    name: ResourceName::from(name),
                    presence: ResourcePresence {
                        presence: Presence {
                            availability,
                            status,
                            priority,
                        },
                        caps: CapabilitySet::new(),
                    },
                });
            }
        }

        record.recompute_status();
        record.recompute_caps();

        let changed = record.aggregate.availability != before_availability
            || record.aggregate.status != before_status
            || record.caps != before_caps;
        if changed {
            debug!(
                %contact,
                resource = name,
                availability = %record.aggregate.availability,
                "aggregate presence changed"
            );
        }
        changed
    }

    /// Replaces one resource's capability set and recomputes the aggregate
    /// union. Status and message are untouched; a resource unknown so far
    /// gets an offline placeholder entry.
    pub fn set_capabilities(&mut self, contact: Handle, resource: &str, caps: CapabilitySet) {
        let record = self.records.entry(contact).or_default();
        match record
            .entries
            .iter_mut()
            .find(|entry| entry.name.as_ref() == resource)
        {
            Some(entry) => entry.presence.caps = caps,
            None => record.entries.push(ResourceEntry {
                name: ResourceName::from(resource),
                presence: ResourcePresence {
                    presence: Presence::default(),
                    caps,
                },
            }),
        }
        record.recompute_caps();
    }

    pub fn record(&self, contact: Handle) -> Option<&PresenceRecord> {
        self.records.get(&contact)
    }

    /// Aggregated presence for `contact`; offline for unknown contacts.
    pub fn presence(&self, contact: Handle) -> Presence {
        self.records
            .get(&contact)
            .map(|record| record.aggregate.clone())
            .unwrap_or_default()
    }

    /// Aggregated capability union for `contact`; empty for unknown
    /// contacts.
    pub fn capabilities(&self, contact: Handle) -> CapabilitySet {
        self.records
            .get(&contact)
            .map(|record| record.caps.clone())
            .unwrap_or_default()
    }

    /// Picks the resource a capability-gated request should be routed to:
    /// non-negative priority and all of `required` present. The highest
    /// priority wins, ties broken by presentness, then by insertion order.
    /// Negative-priority resources are never returned, even when nothing
    /// else qualifies.
    pub fn pick_resource_by_caps(
        &self,
        contact: Handle,
        required: &CapabilitySet,
    ) -> Option<&str> {
        let record = self.records.get(&contact)?;
        let mut best: Option<&ResourceEntry> = None;
        for entry in &record.entries {
            if entry.presence.presence.priority < 0 {
                continue;
            }
            if !entry.presence.caps.at_least(required) {
                continue;
            }
            let better = match best {
                None => true,
                Some(incumbent) => {
                    let a = &entry.presence.presence;
                    let b = &incumbent.presence.presence;
                    a.priority > b.priority
                        || (a.priority == b.priority && a.availability > b.availability)
                }
            };
            if better {
                best = Some(entry);
            }
        }
        best.map(|entry| entry.name.as_ref())
    }

    /// Drops the whole record; called when the contact handle dies.
    pub fn remove_contact(&mut self, contact: Handle) -> bool {
        self.records.remove(&contact).is_some()
    }

    pub fn contacts(&self) -> impl Iterator<Item = Handle> + '_ {
        self.records.keys().copied()
    }
}
