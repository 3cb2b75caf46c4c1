//! Context Scope - Parent-to-descendant handle propagation.
//!
//! Root components (Menu, Select, Tags, ...) create a child [`Scope`] and
//! `provide` their API handle into it. Descendants mounted under that scope
//! (or any scope below it) `require` the handle by type. Looking it up
//! outside such a subtree is a [`RaxError::MissingContext`].
//!
//! Each scope accepts one handle per type. Only the root that created a
//! scope writes to it; descendants only read.
//!
//! ```text
//! root scope ─ Menu scope (MenuApi) ─┬─ MenuButton
//!                                    ├─ MenuItems
//!                                    └─ MenuItem ...
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::runtime::Runtime;
use crate::error::{RaxError, Result};

struct ScopeNode {
    runtime: Runtime,
    parent: Option<Scope>,
    provided: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
}

/// A node in the component ownership tree. Cheap to clone.
#[derive(Clone)]
pub struct Scope {
    node: Rc<ScopeNode>,
}

impl Scope {
    /// Root scope for a component tree.
    pub fn root(runtime: Runtime) -> Self {
        Self {
            node: Rc::new(ScopeNode {
                runtime,
                parent: None,
                provided: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Create a child scope that sees everything this scope sees.
    pub fn child(&self) -> Self {
        Self {
            node: Rc::new(ScopeNode {
                runtime: self.node.runtime.clone(),
                parent: Some(self.clone()),
                provided: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.node.runtime
    }

    /// Provide a handle into this scope. `component` names the provider.
    pub fn provide<T: 'static>(&self, component: &'static str, value: Rc<T>) -> Result<()> {
        let mut provided = self.node.provided.borrow_mut();
        let key = TypeId::of::<T>();
        if provided.contains_key(&key) {
            return Err(RaxError::ContextAlreadyProvided { component });
        }
        provided.insert(key, value);
        Ok(())
    }

    /// Find the nearest handle of type `T`, walking up ancestors.
    pub fn inject<T: 'static>(&self) -> Option<Rc<T>> {
        let key = TypeId::of::<T>();
        let mut scope = Some(self);
        while let Some(current) = scope {
            let found = current.node.provided.borrow().get(&key).cloned();
            if let Some(value) = found {
                return value.downcast::<T>().ok();
            }
            scope = current.node.parent.as_ref();
        }
        None
    }

    /// Like [`Scope::inject`], but a missing handle is an error naming
    /// the calling component and the ancestor it needs.
    pub fn require<T: 'static>(&self, component: &'static str, parent: &'static str) -> Result<Rc<T>> {
        self.inject::<T>().ok_or_else(|| {
            tracing::warn!(component, parent, "context lookup failed");
            RaxError::MissingContext { component, parent }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Api(u32);
    struct OtherApi;

    #[test]
    fn test_inject_walks_up_ancestors() {
        let root = Scope::root(Runtime::default());
        let provider = root.child();
        provider.provide("Root", Rc::new(Api(7))).unwrap();

        let grandchild = provider.child().child();
        let api = grandchild.inject::<Api>().unwrap();
        assert_eq!(api.0, 7);

        // Siblings and ancestors of the provider don't see it
        assert!(root.inject::<Api>().is_none());
        assert!(root.child().inject::<Api>().is_none());
    }

    #[test]
    fn test_nearest_provider_wins() {
        let root = Scope::root(Runtime::default());
        let outer = root.child();
        outer.provide("Outer", Rc::new(Api(1))).unwrap();
        let inner = outer.child();
        inner.provide("Inner", Rc::new(Api(2))).unwrap();

        assert_eq!(inner.child().inject::<Api>().unwrap().0, 2);
        assert_eq!(outer.child().inject::<Api>().unwrap().0, 1);
    }

    #[test]
    fn test_provide_is_write_once() {
        let scope = Scope::root(Runtime::default()).child();
        scope.provide("Menu", Rc::new(Api(1))).unwrap();
        let err = scope.provide("Menu", Rc::new(Api(2))).unwrap_err();
        assert_eq!(err, RaxError::ContextAlreadyProvided { component: "Menu" });

        // Other types are independent
        scope.provide("Other", Rc::new(OtherApi)).unwrap();
    }

    #[test]
    fn test_require_reports_both_names() {
        let scope = Scope::root(Runtime::default());
        let err = scope.require::<Api>("MenuItem", "Menu").err().unwrap();
        assert_eq!(
            err.to_string(),
            "<MenuItem /> is missing a parent <Menu /> component."
        );
    }
}
