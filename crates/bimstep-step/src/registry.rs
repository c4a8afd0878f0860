//! Instance-name registry.
//!
//! Maps entity identity to the `#id` it was written under. Lookup and
//! reservation happen under one lock, and [`IdentityRegistry::assign_with`]
//! runs the record write inside that same critical section, so two threads
//! can never both see an identity as new. Ids start at 1 and are handed out in
//! write order.

use std::collections::HashMap;

use bimstep_model::Identity;
use parking_lot::Mutex;

/// Identity to instance-name map for one export run.
#[derive(Debug)]
pub struct IdentityRegistry {
    state: Mutex<RegistryState>,
}

#[derive(Debug)]
struct RegistryState {
    ids: HashMap<Identity, u64>,
    next_id: u64,
}

impl IdentityRegistry {
    /// Create an empty registry whose first id is 1.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                ids: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// The id already assigned to `identity`, if any.
    pub fn lookup(&self, identity: &Identity) -> Option<u64> {
        self.state.lock().ids.get(identity).copied()
    }

    /// Return the existing id of `identity` (`false`), or reserve the next one
    /// (`true`).
    pub fn assign(&self, identity: Identity) -> (u64, bool) {
        match self.assign_with(identity, |_| Ok::<(), std::convert::Infallible>(())) {
            Ok(assigned) => assigned,
            Err(never) => match never {},
        }
    }

    /// Like [`assign`](Self::assign), but runs `emit` with the reserved id
    /// before committing it, all under the registry lock.
    ///
    /// If `emit` fails nothing is committed and the id is not consumed.
    pub fn assign_with<E>(
        &self,
        identity: Identity,
        emit: impl FnOnce(u64) -> Result<(), E>,
    ) -> Result<(u64, bool), E> {
        let mut state = self.state.lock();
        if let Some(&id) = state.ids.get(&identity) {
            return Ok((id, false));
        }
        let id = state.next_id;
        emit(id)?;
        state.next_id += 1;
        state.ids.insert(identity, id);
        Ok((id, true))
    }

    /// Number of assigned ids.
    pub fn len(&self) -> usize {
        self.state.lock().ids.len()
    }

    /// Whether no id has been assigned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
