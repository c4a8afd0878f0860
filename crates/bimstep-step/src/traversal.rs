//! Single-threaded traversal.
//!
//! Depth-first over forward attributes from the root: an entity's record is
//! written once all of its forward references have been, so every `#id` in a
//! record points at an earlier line. Inverse attributes are never followed
//! during the descent. They are queued when their owner is written and drained
//! afterwards, breadth-first, one entity at a time; collections on the queue
//! are flattened onto it rather than recursed into.

use std::collections::VecDeque;
use std::io::Write;

use bimstep_model::{descriptor_for, EntityDescriptor, EntityKey, Instance, Model, Value};
use tracing::trace;

use crate::error::{Result, StepError};
use crate::registry::IdentityRegistry;
use crate::render::{self, Visitor};
use crate::writer::InverseFailurePolicy;

/// What a finished run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunOutcome {
    pub root_id: u64,
    pub records: usize,
    pub skipped_inverse: usize,
}

/// Write one `#id=TAG(...);` line.
pub(crate) fn write_record<W: Write + ?Sized>(
    out: &mut W,
    id: u64,
    body: &str,
) -> std::io::Result<()> {
    writeln!(out, "#{id}={body};")
}

/// The set inverse attributes of `instance`, in descriptor order.
pub(crate) fn inverse_values<'i>(
    instance: &'i Instance,
    descriptor: &EntityDescriptor,
) -> Vec<&'i Value> {
    descriptor
        .inverse()
        .iter()
        .filter_map(|inv| instance.inverse(inv.name))
        .filter(|value| !value.is_null())
        .collect()
}

/// State of one sequential export run.
pub(crate) struct Traversal<'a, W: Write> {
    model: &'a Model,
    out: &'a mut W,
    registry: IdentityRegistry,
    pending: VecDeque<Value>,
    /// Entities between `Unvisited` and `Assigned` on the current descent.
    assigning: Vec<EntityKey>,
    policy: InverseFailurePolicy,
    records: usize,
    skipped: usize,
}

impl<'a, W: Write> Traversal<'a, W> {
    pub fn new(model: &'a Model, out: &'a mut W, policy: InverseFailurePolicy) -> Self {
        Self {
            model,
            out,
            registry: IdentityRegistry::new(),
            pending: VecDeque::new(),
            assigning: Vec::new(),
            policy,
            records: 0,
            skipped: 0,
        }
    }

    /// Write `root`, everything forward-reachable from it, then everything
    /// reachable through inverse attributes.
    pub fn run(mut self, root: EntityKey) -> Result<RunOutcome> {
        let root_id = self.visit(root)?;
        self.drain()?;
        Ok(RunOutcome {
            root_id,
            records: self.records,
            skipped_inverse: self.skipped,
        })
    }

    fn drain(&mut self) -> Result<()> {
        while let Some(value) = self.pending.pop_front() {
            match value {
                Value::List(items) | Value::Set(items) => self.pending.extend(items),
                Value::Ref(key) => {
                    self.assigning.clear();
                    if let Err(err) = self.visit(key) {
                        self.policy.absorb(err)?;
                        self.skipped += 1;
                    }
                }
                Value::Null | Value::Leaf(_) => {}
            }
        }
        Ok(())
    }
}

impl<W: Write> Visitor for Traversal<'_, W> {
    fn model(&self) -> &Model {
        self.model
    }

    fn visit(&mut self, key: EntityKey) -> Result<u64> {
        let model = self.model;
        let instance = model.get(key).ok_or(StepError::MissingEntity(key))?;
        let identity = instance.identity();
        if let Some(id) = self.registry.lookup(&identity) {
            return Ok(id);
        }
        if self.assigning.contains(&key) {
            return Err(StepError::ForwardCycle {
                entity: instance.type_def().name,
                key,
            });
        }

        let descriptor = descriptor_for(instance.type_def())?;
        self.assigning.push(key);
        let body = render::render_record(self, instance, &descriptor)?;
        self.assigning.pop();

        let out = &mut *self.out;
        let (id, fresh) = self
            .registry
            .assign_with(identity, |id| write_record(out, id, &body))?;
        if fresh {
            trace!(id, entity = descriptor.tag(), "record written");
            self.records += 1;
            self.pending
                .extend(inverse_values(instance, &descriptor).into_iter().cloned());
        }
        Ok(id)
    }
}
