use derive_more::Display;
use std::collections::HashMap;

/// A Haskell library a Debian package provides, e.g. `aeson 2.1.2.1`.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
#[display("{name} {version}")]
pub struct Provide {
    pub name: String,
    pub version: String,
}
impl Provide {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { name: name.into(), version: version.into() }
    }
}

/// One Debian binary package that provides at least one Haskell library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Debian package name (`libghc-aeson-dev`), unique within an [`Index`].
    pub name: String,
    /// The one-line synopsis from `Description`.
    pub description: Option<String>,
    /// Debian version (`2.1.2.1-1+b2`).
    pub version: Option<String>,
    /// Never empty for packages held in an [`Index`].
    pub provides: Vec<Provide>,
}

/// Packages keyed by Debian name, iterated in the order they were first seen.
///
/// Inserting a name that already exists replaces the package but keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    packages: Vec<Package>,
    positions: HashMap<String, usize>,
}
impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a package, returning the one it replaced (if any).
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        match self.positions.get(&package.name) {
            Some(&position) => Some(std::mem::replace(&mut self.packages[position], package)),
            None => {
                self.positions.insert(package.name.clone(), self.packages.len());
                self.packages.push(package);
                None
            },
        }
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.positions.get(name).map(|&position| &self.packages[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.packages.iter()
    }

    /// Every `(package, library)` pair where the library is named `haskell_name`,
    /// regardless of version.
    pub fn providers_of<'a>(&'a self, haskell_name: &'a str) -> impl Iterator<Item = (&'a Package, &'a Provide)> {
        self.packages.iter().flat_map(move |package| {
            package
                .provides
                .iter()
                .filter(move |provide| provide.name == haskell_name)
                .map(move |provide| (package, provide))
        })
    }
}
impl<'a> IntoIterator for &'a Index {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl FromIterator<Package> for Index {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut index = Index::new();
        iter.into_iter().for_each(|package| {
            index.insert(package);
        });
        index
    }
}
