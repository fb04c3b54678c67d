//! Scoped lookup of the active navigator.
//!
//! Step content is usually built far away from the code that owns the
//! navigator. A [`ScopeTree`] mirrors the containment hierarchy of the UI:
//! the wizard host provides its navigator on a scope, and any descendant
//! scope can look it up without being handed it explicitly. Lookup walks
//! from the requesting scope towards the root and returns the nearest
//! provided navigator.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use waypoint::animation::TransitionPager;
//! use waypoint::{NavigatorConfig, ScopeTree, Step, StepRegistry, WizardNavigator};
//!
//! let tree = ScopeTree::new();
//! let host = tree.create_root();
//! let page = tree.create_child(host)?;
//! let field = tree.create_child(page)?;
//!
//! let registry = StepRegistry::from_steps([Step::new(), Step::new()])?;
//! let navigator = Arc::new(WizardNavigator::new(
//!     registry,
//!     Arc::new(TransitionPager::default()),
//!     NavigatorConfig::default(),
//! )?);
//! tree.provide(host, navigator.clone())?;
//!
//! assert!(Arc::ptr_eq(&tree.lookup(field)?, &navigator));
//! # Ok::<(), waypoint::NavigationError>(())
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};
use waypoint_core::logging::targets;

use crate::error::{NavigationError, NavigationResult};
use crate::navigator::WizardNavigator;

new_key_type! {
    /// Identifier of a scope in a [`ScopeTree`].
    pub struct ScopeId;
}

struct ScopeNode {
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    navigator: Option<Arc<WizardNavigator>>,
}

impl ScopeNode {
    fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            navigator: None,
        }
    }
}

/// A forest of scopes, each optionally providing a navigator.
pub struct ScopeTree {
    nodes: RwLock<SlotMap<ScopeId, ScopeNode>>,
}

impl ScopeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(SlotMap::with_key()),
        }
    }

    /// Add a scope without a parent.
    pub fn create_root(&self) -> ScopeId {
        let id = self.nodes.write().insert(ScopeNode::new(None));
        tracing::trace!(target: targets::SCOPE, ?id, "root scope created");
        id
    }

    /// Add a scope under `parent`.
    pub fn create_child(&self, parent: ScopeId) -> NavigationResult<ScopeId> {
        let mut nodes = self.nodes.write();
        if !nodes.contains_key(parent) {
            return Err(NavigationError::UnknownScope);
        }
        let id = nodes.insert(ScopeNode::new(Some(parent)));
        if let Some(node) = nodes.get_mut(parent) {
            node.children.push(id);
        }
        tracing::trace!(target: targets::SCOPE, ?id, ?parent, "child scope created");
        Ok(id)
    }

    /// Provide `navigator` to `scope` and its descendants.
    ///
    /// Returns the navigator previously provided on `scope`, if any.
    pub fn provide(
        &self,
        scope: ScopeId,
        navigator: Arc<WizardNavigator>,
    ) -> NavigationResult<Option<Arc<WizardNavigator>>> {
        let mut nodes = self.nodes.write();
        let node = nodes.get_mut(scope).ok_or(NavigationError::UnknownScope)?;
        tracing::debug!(target: targets::SCOPE, ?scope, "navigator provided");
        Ok(node.navigator.replace(navigator))
    }

    /// Stop providing a navigator on `scope`, returning it.
    pub fn revoke(&self, scope: ScopeId) -> NavigationResult<Option<Arc<WizardNavigator>>> {
        let mut nodes = self.nodes.write();
        let node = nodes.get_mut(scope).ok_or(NavigationError::UnknownScope)?;
        Ok(node.navigator.take())
    }

    /// The navigator provided nearest to `scope`, starting at `scope` itself.
    ///
    /// Fails with [`NavigationError::NoControllerFound`] when neither `scope`
    /// nor any ancestor provides one.
    pub fn lookup(&self, scope: ScopeId) -> NavigationResult<Arc<WizardNavigator>> {
        let nodes = self.nodes.read();
        let mut node = nodes.get(scope).ok_or(NavigationError::UnknownScope)?;

        loop {
            if let Some(navigator) = &node.navigator {
                return Ok(navigator.clone());
            }
            match node.parent.and_then(|parent| nodes.get(parent)) {
                Some(parent) => node = parent,
                None => break,
            }
        }

        tracing::warn!(target: targets::SCOPE, ?scope, "no navigator in scope chain");
        Err(NavigationError::NoControllerFound)
    }

    /// Remove `scope` and all of its descendants.
    ///
    /// Navigators provided in the removed subtree are released. Returns the
    /// number of scopes removed.
    pub fn remove(&self, scope: ScopeId) -> NavigationResult<usize> {
        let mut nodes = self.nodes.write();
        let parent = nodes
            .get(scope)
            .ok_or(NavigationError::UnknownScope)?
            .parent;

        if let Some(parent) = parent.and_then(|p| nodes.get_mut(p)) {
            parent.children.retain(|&child| child != scope);
        }

        let mut removed = 0;
        let mut pending = vec![scope];
        while let Some(id) = pending.pop() {
            if let Some(node) = nodes.remove(id) {
                pending.extend(node.children);
                removed += 1;
            }
        }

        tracing::trace!(target: targets::SCOPE, ?scope, removed, "scope removed");
        Ok(removed)
    }

    /// Whether `scope` belongs to this tree.
    pub fn contains(&self, scope: ScopeId) -> bool {
        self.nodes.read().contains_key(scope)
    }

    /// Parent of `scope`, if it has one.
    pub fn parent(&self, scope: ScopeId) -> NavigationResult<Option<ScopeId>> {
        self.nodes
            .read()
            .get(scope)
            .map(|node| node.parent)
            .ok_or(NavigationError::UnknownScope)
    }

    /// Number of scopes.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Whether the tree has no scopes.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TransitionPager;
    use crate::config::NavigatorConfig;
    use crate::registry::StepRegistry;
    use crate::step::Step;

    fn navigator() -> Arc<WizardNavigator> {
        let registry = StepRegistry::from_steps([Step::new(), Step::new()]).unwrap();
        Arc::new(
            WizardNavigator::new(
                registry,
                Arc::new(TransitionPager::default()),
                NavigatorConfig::default(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_lookup_walks_ancestors() {
        let tree = ScopeTree::new();
        let root = tree.create_root();
        let child = tree.create_child(root).unwrap();
        let grandchild = tree.create_child(child).unwrap();

        let nav = navigator();
        tree.provide(root, nav.clone()).unwrap();

        assert!(Arc::ptr_eq(&tree.lookup(grandchild).unwrap(), &nav));
        assert!(Arc::ptr_eq(&tree.lookup(root).unwrap(), &nav));
    }

    #[test]
    fn test_nearest_provider_wins() {
        let tree = ScopeTree::new();
        let root = tree.create_root();
        let child = tree.create_child(root).unwrap();

        let outer = navigator();
        let inner = navigator();
        tree.provide(root, outer.clone()).unwrap();
        tree.provide(child, inner.clone()).unwrap();

        assert!(Arc::ptr_eq(&tree.lookup(child).unwrap(), &inner));
        assert!(Arc::ptr_eq(&tree.lookup(root).unwrap(), &outer));

        let revoked = tree.revoke(child).unwrap().unwrap();
        assert!(Arc::ptr_eq(&revoked, &inner));
        assert!(Arc::ptr_eq(&tree.lookup(child).unwrap(), &outer));
    }

    #[test]
    fn test_lookup_without_provider() {
        let tree = ScopeTree::new();
        let root = tree.create_root();
        let child = tree.create_child(root).unwrap();

        assert_eq!(
            tree.lookup(child).unwrap_err(),
            NavigationError::NoControllerFound
        );
    }

    #[test]
    fn test_provide_replaces() {
        let tree = ScopeTree::new();
        let root = tree.create_root();
        let first = navigator();

        assert!(tree.provide(root, first.clone()).unwrap().is_none());
        let previous = tree.provide(root, navigator()).unwrap().unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
    }

    #[test]
    fn test_remove_subtree() {
        let tree = ScopeTree::new();
        let root = tree.create_root();
        let child = tree.create_child(root).unwrap();
        let grandchild = tree.create_child(child).unwrap();
        let sibling = tree.create_child(root).unwrap();

        assert_eq!(tree.remove(child).unwrap(), 2);
        assert!(!tree.contains(grandchild));
        assert!(tree.contains(sibling));
        assert_eq!(tree.len(), 2);

        assert_eq!(tree.lookup(child).unwrap_err(), NavigationError::UnknownScope);
        assert_eq!(
            tree.create_child(child).unwrap_err(),
            NavigationError::UnknownScope
        );
        assert_eq!(tree.parent(sibling).unwrap(), Some(root));
    }
}
