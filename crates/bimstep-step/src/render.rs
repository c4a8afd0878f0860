//! Attribute value rendering.
//!
//! Turns one attribute value into its record token. Leaves render
//! themselves; entity handles go back to the traversal through [`Visitor`],
//! which writes the referenced record first and returns its id.

use bimstep_model::{EntityDescriptor, EntityKey, Instance, Model, ToStep, Value, ValueKind};

use crate::error::Result;

/// The traversal side of rendering: resolves entity handles to instance ids.
pub(crate) trait Visitor {
    /// Model being written.
    fn model(&self) -> &Model;

    /// Write `key` (and everything it forward-references) if not yet written
    /// and return its id.
    fn visit(&mut self, key: EntityKey) -> Result<u64>;

    /// Visit sibling entities of one type held in a single collection.
    ///
    /// The records are independent of each other, so implementations may
    /// visit them in any order or concurrently; ids come back in input order.
    fn visit_siblings(&mut self, keys: &[EntityKey]) -> Result<Vec<u64>> {
        keys.iter().map(|&key| self.visit(key)).collect()
    }
}

/// Render the body of a record, `TAG(arg,arg,...)`.
pub(crate) fn render_record<V: Visitor + ?Sized>(
    visitor: &mut V,
    instance: &Instance,
    descriptor: &EntityDescriptor,
) -> Result<String> {
    let mut tokens = Vec::with_capacity(descriptor.forward().len());
    for attr in descriptor.forward() {
        if attr.derived {
            tokens.push("*".to_string());
            continue;
        }
        tokens.push(render_value(visitor, instance.attribute(attr.name), attr.kind)?);
    }
    Ok(format!("{}({})", descriptor.tag(), tokens.join(",")))
}

/// Render one attribute value.
pub(crate) fn render_value<V: Visitor + ?Sized>(
    visitor: &mut V,
    value: &Value,
    kind: ValueKind,
) -> Result<String> {
    match value {
        Value::Null => Ok("$".to_string()),
        Value::Leaf(leaf) => Ok(match (kind, leaf.type_name()) {
            (ValueKind::Select, Some(type_name)) => {
                format!("{}({})", type_name.to_ascii_uppercase(), leaf.to_step())
            }
            _ => leaf.to_step(),
        }),
        Value::Ref(key) => Ok(format!("#{}", visitor.visit(*key)?)),
        Value::List(items) | Value::Set(items) => {
            let tokens: Vec<String> = match homogeneous_siblings(visitor.model(), items) {
                Some(keys) => visitor
                    .visit_siblings(&keys)?
                    .into_iter()
                    .map(|id| format!("#{id}"))
                    .collect(),
                None => items
                    .iter()
                    .map(|item| render_value(&mut *visitor, item, kind))
                    .collect::<Result<Vec<_>>>()?,
            };
            Ok(format!("({})", tokens.join(",")))
        }
    }
}

/// Handles of a collection whose elements are two or more live entities of
/// one type.
fn homogeneous_siblings(model: &Model, items: &[Value]) -> Option<Vec<EntityKey>> {
    if items.len() < 2 {
        return None;
    }
    let mut keys = Vec::with_capacity(items.len());
    let mut shared_type = None;
    for item in items {
        let key = item.as_entity()?;
        let ty = model.get(key)?.type_def();
        match shared_type {
            None => shared_type = Some(ty),
            Some(first) if std::ptr::eq(first, ty) => {}
            Some(_) => return None,
        }
        keys.push(key);
    }
    Some(keys)
}
