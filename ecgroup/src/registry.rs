//! Named curves, built on first use.

use crate::{Error, Result, curve::Curve, curve::CurveRef, params::CurveDef};
use alloc::{boxed::Box, vec::Vec};
use once_cell::race::OnceBox;

struct Entry {
    def: CurveDef,
    curve: OnceBox<CurveRef>,
}

impl Entry {
    fn new(def: CurveDef) -> Self {
        Self {
            def,
            curve: OnceBox::new(),
        }
    }
}

/// Set of curve definitions, each turned into a [`Curve`] the first time it
/// is requested.
///
/// Concurrent first requests may both build the curve, one of the results
/// is kept and every later request returns the same [`CurveRef`].
pub struct CurveRegistry {
    entries: Vec<Entry>,
}

impl CurveRegistry {
    /// Registry holding every definition of [`CurveDef::BUILTIN`].
    pub fn new() -> Self {
        Self {
            entries: CurveDef::BUILTIN.iter().copied().map(Entry::new).collect(),
        }
    }

    /// Registry without any curve.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Process-wide registry of the built-in curves.
    pub fn global() -> &'static CurveRegistry {
        static GLOBAL: OnceBox<CurveRegistry> = OnceBox::new();
        GLOBAL.get_or_init(|| Box::new(CurveRegistry::new()))
    }

    /// Adds a definition. Names are compared case-insensitively and must be
    /// unique.
    pub fn register(&mut self, def: CurveDef) -> Result<()> {
        if self.find(def.name).is_some() {
            return Err(Error::InvalidArgument("curve name already registered"));
        }

        self.entries.push(Entry::new(def));
        Ok(())
    }

    /// The curve called `name`, built on the first call.
    pub fn get(&self, name: &str) -> Result<CurveRef> {
        let entry = self.find(name).ok_or(Error::UnknownCurve)?;

        entry
            .curve
            .get_or_try_init(|| {
                log::debug!("registry: building curve {}", entry.def.name);
                Curve::from_def(&entry.def).map(Box::new)
            })
            .cloned()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.def.name)
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.def.name.eq_ignore_ascii_case(name))
    }
}

impl Default for CurveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::CurveRegistry;
    use crate::{Error, params};
    use alloc::{sync::Arc, vec::Vec};

    #[test]
    fn builtins() {
        let registry = CurveRegistry::new();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.len(), params::CurveDef::BUILTIN.len());
        assert!(names.contains(&"SECP256K1"));

        let a = registry.get("p256").unwrap();
        let b = registry.get("P256").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name(), "P256");

        assert_eq!(registry.get("P257").unwrap_err(), Error::UnknownCurve);
    }

    #[test]
    fn isolated_registries() {
        let mut registry = CurveRegistry::empty();
        assert!(registry.get("P256").is_err());

        registry.register(params::P256).unwrap();
        assert!(registry.register(params::P256).is_err());

        let ours = registry.get("P256").unwrap();
        let global = CurveRegistry::global().get("P256").unwrap();
        assert!(!Arc::ptr_eq(&ours, &global));
        assert!(Arc::ptr_eq(&global, &CurveRegistry::global().get("P256").unwrap()));
    }
}
