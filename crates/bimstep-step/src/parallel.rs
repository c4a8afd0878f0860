//! Pooled traversal.
//!
//! Same record contract as [`crate::traversal`], with two sources of
//! parallelism:
//! - a collection of two or more entities of one type is written with
//!   `par_iter`, and the parent record waits for all of them;
//! - every inverse attribute value of a freshly written entity becomes its
//!   own task on a [`rayon::Scope`].
//!
//! The scope is the wait-group: `ThreadPool::scope` returns only once every
//! task spawned into it, transitively, has finished, so the run is quiescent
//! exactly when it returns. Record writes and id commits happen under the
//! registry lock, with the sink lock taken inside it, so lock order is always
//! registry then sink.

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use bimstep_model::{descriptor_for, EntityKey, Model, Value};
use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::{Scope, ThreadPool};
use tracing::{debug, trace};

use crate::error::{Result, StepError};
use crate::registry::IdentityRegistry;
use crate::render::{self, Visitor};
use crate::traversal::{inverse_values, write_record, RunOutcome};
use crate::writer::InverseFailurePolicy;

/// Shared state of one pooled export run.
pub(crate) struct ParallelRun<'a, W: Write + Send> {
    model: &'a Model,
    registry: IdentityRegistry,
    sink: Mutex<&'a mut W>,
    policy: InverseFailurePolicy,
    /// First failure of an inverse task that the policy did not absorb.
    failure: Mutex<Option<StepError>>,
    /// Set once the run is known to fail; queued inverse tasks then return
    /// without visiting.
    aborted: AtomicBool,
    records: AtomicUsize,
    skipped: AtomicUsize,
    tasks: AtomicUsize,
}

impl<'a, W: Write + Send> ParallelRun<'a, W> {
    pub fn new(model: &'a Model, sink: &'a mut W, policy: InverseFailurePolicy) -> Self {
        Self {
            model,
            registry: IdentityRegistry::new(),
            sink: Mutex::new(sink),
            policy,
            failure: Mutex::new(None),
            aborted: AtomicBool::new(false),
            records: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
            tasks: AtomicUsize::new(0),
        }
    }

    /// Write everything reachable from `root` using `pool`, returning once no
    /// task is outstanding.
    pub fn run(&self, pool: &ThreadPool, root: EntityKey) -> Result<RunOutcome> {
        let root_result = pool.scope(|scope| {
            let result = Worker::new(self, scope, Vec::new()).visit(root);
            if result.is_err() {
                self.aborted.store(true, Ordering::Release);
            }
            result
        });
        let root_id = root_result?;
        if let Some(err) = self.failure.lock().take() {
            return Err(err);
        }

        let outcome = RunOutcome {
            root_id,
            records: self.records.load(Ordering::Acquire),
            skipped_inverse: self.skipped.load(Ordering::Acquire),
        };
        debug!(
            threads = pool.current_num_threads(),
            tasks = self.tasks.load(Ordering::Relaxed),
            records = outcome.records,
            "pooled traversal quiescent"
        );
        Ok(outcome)
    }

    /// Queue one inverse attribute value.
    fn spawn_drain<'s>(&'s self, scope: &Scope<'s>, value: &'a Value) {
        self.tasks.fetch_add(1, Ordering::Relaxed);
        scope.spawn(move |scope| self.drain(scope, value));
    }

    fn drain<'s>(&'s self, scope: &Scope<'s>, value: &'a Value) {
        if self.aborted.load(Ordering::Acquire) {
            return;
        }
        match value {
            Value::List(items) | Value::Set(items) => {
                for item in items {
                    self.spawn_drain(scope, item);
                }
            }
            Value::Ref(key) => {
                if let Err(err) = Worker::new(self, scope, Vec::new()).visit(*key) {
                    self.record_failure(err);
                }
            }
            Value::Null | Value::Leaf(_) => {}
        }
    }

    fn record_failure(&self, err: StepError) {
        match self.policy.absorb(err) {
            Ok(()) => {
                self.skipped.fetch_add(1, Ordering::AcqRel);
            }
            Err(err) => {
                self.aborted.store(true, Ordering::Release);
                self.failure.lock().get_or_insert(err);
            }
        }
    }
}

/// One descent on one worker thread.
struct Worker<'a, 's, 't, W: Write + Send> {
    run: &'s ParallelRun<'a, W>,
    scope: &'t Scope<'s>,
    /// Entities between `Unvisited` and `Assigned` on this descent.
    assigning: Vec<EntityKey>,
}

impl<'a, 's, 't, W: Write + Send> Worker<'a, 's, 't, W> {
    fn new(
        run: &'s ParallelRun<'a, W>,
        scope: &'t Scope<'s>,
        assigning: Vec<EntityKey>,
    ) -> Self {
        Self {
            run,
            scope,
            assigning,
        }
    }
}

impl<W: Write + Send> Visitor for Worker<'_, '_, '_, W> {
    fn model(&self) -> &Model {
        self.run.model
    }

    fn visit(&mut self, key: EntityKey) -> Result<u64> {
        let run = self.run;
        let instance = run.model.get(key).ok_or(StepError::MissingEntity(key))?;
        let identity = instance.identity();
        if let Some(id) = run.registry.lookup(&identity) {
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

        // another worker may have written the same identity meanwhile
        let (id, fresh) = run.registry.assign_with(identity, |id| {
            let mut sink = run.sink.lock();
            write_record(&mut **sink, id, &body)
        })?;
        if fresh {
            trace!(id, entity = descriptor.tag(), "record written");
            run.records.fetch_add(1, Ordering::AcqRel);
            for value in inverse_values(instance, &descriptor) {
                run.spawn_drain(self.scope, value);
            }
        }
        Ok(id)
    }

    fn visit_siblings(&mut self, keys: &[EntityKey]) -> Result<Vec<u64>> {
        let (run, scope, assigning) = (self.run, self.scope, &self.assigning);
        keys.par_iter()
            .map(|&key| Worker::new(run, scope, assigning.clone()).visit(key))
            .collect()
    }
}
