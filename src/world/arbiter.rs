//! Scene-wide contact discovery and island scheduling.

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::collision::Contact;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::solver::{solve_penetration, solve_velocity, PenetrationSettings};

use super::BodyHandle;

/// Finds every contact in the scene each tick and solves them island by island.
///
/// Colliders take part in detection only while registered here. Registration
/// order decides which body of a pair is body A.
#[derive(Debug, Clone)]
pub struct Arbiter {
    registered: Vec<BodyHandle>,
    up: Vec2,
    penetration: PenetrationSettings,
    contacts: Vec<Contact>,
    in_tick: bool,
}

impl Arbiter {
    pub fn new(up: Vec2, penetration: PenetrationSettings) -> Self {
        Self {
            registered: Vec::new(),
            up,
            penetration,
            contacts: Vec::new(),
            in_tick: false,
        }
    }

    /// Registers a collider. Returns `false` if it was already registered.
    pub fn register(&mut self, body: BodyHandle) -> bool {
        debug_assert!(!self.in_tick, "collider registered during a tick");
        if self.registered.contains(&body) {
            return false;
        }
        self.registered.push(body);
        true
    }

    /// Unregisters a collider. Returns `false` if it was not registered.
    pub fn unregister(&mut self, body: BodyHandle) -> bool {
        debug_assert!(!self.in_tick, "collider unregistered during a tick");
        match self.registered.iter().position(|&h| h == body) {
            Some(index) => {
                self.registered.remove(index);
                self.contacts.retain(|c| !c.involves(body));
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, body: BodyHandle) -> bool {
        self.registered.contains(&body)
    }

    pub fn registered(&self) -> &[BodyHandle] {
        &self.registered
    }

    pub fn up(&self) -> Vec2 {
        self.up
    }

    /// Contacts found in the last tick, in solving order, with the penetration
    /// left after solving.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Runs one detection and solving pass over `bodies`. Returns the number
    /// of islands solved.
    pub fn step(&mut self, bodies: &mut SlotMap<BodyHandle, RigidBody>) -> usize {
        self.in_tick = true;
        self.contacts = self.find_contacts(bodies);

        let up = self.up;
        // Stable, so equal heights keep discovery order.
        self.contacts.sort_by(|x, y| y.height(up).total_cmp(&x.height(up)));

        let islands = partition_islands(&self.contacts);
        for island in &islands {
            trace!(contacts = island.len(), "solving island");
            self.solve_island(bodies, island);
        }

        debug!(
            contacts = self.contacts.len(),
            islands = islands.len(),
            "arbiter pass complete"
        );
        self.in_tick = false;
        islands.len()
    }

    /// Broad phase on bounding circles, then exact contour crossings.
    fn find_contacts(&self, bodies: &SlotMap<BodyHandle, RigidBody>) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for (i, &handle_a) in self.registered.iter().enumerate() {
            let Some(a) = bodies.get(handle_a) else {
                continue;
            };
            if !a.is_enabled() {
                continue;
            }
            for &handle_b in &self.registered[i + 1..] {
                let Some(b) = bodies.get(handle_b) else {
                    continue;
                };
                // Two immovable bodies have nothing to solve.
                if !b.is_enabled() || (a.is_fixed() && b.is_fixed()) {
                    continue;
                }
                if !a.collider().can_contact(b.collider()) {
                    continue;
                }
                for contact in a.collider().find_contacts(handle_a, b.collider(), handle_b) {
                    trace!(
                        body_a = ?handle_a,
                        body_b = ?handle_b,
                        position = ?contact.position,
                        normal = ?contact.normal,
                        penetration = contact.penetration,
                        "contact"
                    );
                    contacts.push(contact);
                }
            }
        }
        contacts
    }

    /// Velocity then penetration for each contact, forward and then in reverse.
    fn solve_island(&mut self, bodies: &mut SlotMap<BodyHandle, RigidBody>, island: &[usize]) {
        let order = island.iter().chain(island.iter().rev());
        for &index in order {
            let contact = &mut self.contacts[index];
            let Some([a, b]) = bodies.get_disjoint_mut([contact.body_a, contact.body_b]) else {
                debug!(body_a = ?contact.body_a, body_b = ?contact.body_b, "contact bodies unavailable, skipped");
                continue;
            };
            solve_velocity(a, b, contact);
            solve_penetration(a, b, contact, &self.penetration);
        }
    }
}

/// Splits contacts into groups connected through shared bodies.
///
/// Each island starts at the first contact not yet assigned and absorbs every
/// remaining contact that touches one of its bodies, until nothing more joins.
/// Indices within an island keep the order of `contacts`.
pub fn partition_islands(contacts: &[Contact]) -> Vec<Vec<usize>> {
    let mut pending: Vec<usize> = (0..contacts.len()).collect();
    let mut islands = Vec::new();

    while !pending.is_empty() {
        let root = pending.remove(0);
        let mut island = vec![root];
        let mut members = vec![contacts[root].body_a, contacts[root].body_b];

        loop {
            let before = island.len();
            pending.retain(|&index| {
                let contact = &contacts[index];
                if members.contains(&contact.body_a) || members.contains(&contact.body_b) {
                    island.push(index);
                    for body in [contact.body_a, contact.body_b] {
                        if !members.contains(&body) {
                            members.push(body);
                        }
                    }
                    false
                } else {
                    true
                }
            });
            if island.len() == before {
                break;
            }
        }

        island.sort_unstable();
        islands.push(island);
    }
    islands
}
