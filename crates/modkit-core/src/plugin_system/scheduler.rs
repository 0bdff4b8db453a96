use std::collections::{BTreeMap, BTreeSet, HashSet, btree_set};

use log::{debug, info};

use crate::plugin_system::descriptor::DescriptorSet;
use crate::plugin_system::error::PluginSystemError;

/// Builds the `load_after` adjacency used for ordering.
///
/// `load_before` declarations are rewritten onto their targets ("a loads
/// before b" becomes "b loads after a"), and every dependency is added as a
/// `load_after` edge of its owner. References to ids outside the set are
/// kept here and ignored during traversal. The descriptors are not modified.
pub fn normalized_load_after(
    descriptors: &DescriptorSet,
) -> Result<BTreeMap<String, BTreeSet<String>>, PluginSystemError> {
    let mut load_after: BTreeMap<String, BTreeSet<String>> = descriptors
        .iter()
        .map(|d| (d.id.clone(), d.load_after.clone()))
        .collect();

    for descriptor in descriptors {
        for other in &descriptor.load_before {
            if let Some(after) = load_after.get_mut(other) {
                after.insert(descriptor.id.clone());
            }
        }
        for constraint in descriptor.constraints()? {
            if descriptors.contains(&constraint.required_id) {
                if let Some(after) = load_after.get_mut(&descriptor.id) {
                    after.insert(constraint.required_id);
                }
            }
        }
    }

    Ok(load_after)
}

/// Computes the order in which mods are instantiated and staged.
///
/// Depth-first over ascending ids, so the result depends only on the
/// contents of the set. Every id present in a mod's normalized `load_after`
/// appears before that mod. Fails with
/// [`PluginSystemError::CircularDependency`] when the ordering cannot be
/// linearized.
pub fn compute_order(descriptors: &DescriptorSet) -> Result<Vec<String>, PluginSystemError> {
    let load_after = normalized_load_after(descriptors)?;
    debug!("Load-after adjacency: {:?}", load_after);

    let mut emitter = Emitter {
        load_after: &load_after,
        emitted: HashSet::new(),
        order: Vec::with_capacity(load_after.len()),
    };
    for (id, after) in &load_after {
        if !emitter.emitted.contains(id.as_str()) {
            emitter.visit(id, after)?;
        }
    }

    info!("Computed load order: [{}]", emitter.order.join(", "));
    Ok(emitter.order)
}

struct Emitter<'a> {
    load_after: &'a BTreeMap<String, BTreeSet<String>>,
    emitted: HashSet<&'a str>,
    order: Vec<String>,
}

impl<'a> Emitter<'a> {
    /// Depth-first from `root` with an explicit stack, so long `load_after`
    /// chains do not grow the call stack. Frames are the ids currently being
    /// visited, outermost first.
    fn visit(&mut self, root: &'a str, after: &'a BTreeSet<String>) -> Result<(), PluginSystemError> {
        let mut stack: Vec<(&'a str, btree_set::Iter<'a, String>)> = vec![(root, after.iter())];

        while let Some((id, pending)) = stack.last_mut() {
            let Some(dep) = pending.next() else {
                let id = *id;
                stack.pop();
                self.order.push(id.to_string());
                self.emitted.insert(id);
                continue;
            };
            let dep = dep.as_str();
            let Some(dep_after) = self.load_after.get(dep) else {
                continue;
            };
            if let Some(start) = stack.iter().position(|(visiting, _)| *visiting == dep) {
                let mut path: Vec<String> = stack[start..].iter().map(|(v, _)| v.to_string()).collect();
                path.push(dep.to_string());
                return Err(PluginSystemError::CircularDependency { path });
            }
            if !self.emitted.contains(dep) {
                stack.push((dep, dep_after.iter()));
            }
        }
        Ok(())
    }
}
