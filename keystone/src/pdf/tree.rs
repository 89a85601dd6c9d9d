//! Name and number trees.
//!
//! Both trees share one node shape: `Kids` pointing to child nodes, the
//! local entries (`Names` or `Nums`) as a flat key/value array and the
//! `Limits` of the keys reachable through the node.

use std::collections::BTreeMap;

use fnv::FnvHashSet;

use super::{Dictionary, KsString, Object, ObjectKind, Reference};

pub const K_KIDS: &[u8] = b"Kids";
pub const K_NAMES: &[u8] = b"Names";
pub const K_NUMS: &[u8] = b"Nums";
pub const K_LIMITS: &[u8] = b"Limits";

/// Object kinds allowed as entry values.
const DIRECT_DESCENDANTS: [ObjectKind; 6] = [
    ObjectKind::Reference,
    ObjectKind::Real,
    ObjectKind::Integer,
    ObjectKind::Bool,
    ObjectKind::Name,
    ObjectKind::Null,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeNodeError {
    #[error("invalid name tree node: {0}")]
    InvalidNameTreeNode(&'static str),
    #[error("invalid number tree node: {0}")]
    InvalidNumberTreeNode(&'static str),
    #[error("tree kid {0} is reachable twice")]
    CyclicKids(Reference),
}

/// Key type of a tree.
pub trait TreeKey: Ord + Clone + Sized {
    /// Dictionary key of the entry array.
    const ENTRIES: &'static [u8];

    fn from_object(object: &Object) -> Option<Self>;

    fn invalid(reason: &'static str) -> TreeNodeError;
}

impl TreeKey for KsString {
    const ENTRIES: &'static [u8] = K_NAMES;

    fn from_object(object: &Object) -> Option<Self> {
        object.string().cloned()
    }

    fn invalid(reason: &'static str) -> TreeNodeError {
        TreeNodeError::InvalidNameTreeNode(reason)
    }
}

impl TreeKey for i64 {
    const ENTRIES: &'static [u8] = K_NUMS;

    fn from_object(object: &Object) -> Option<Self> {
        object.integer()
    }

    fn invalid(reason: &'static str) -> TreeNodeError {
        TreeNodeError::InvalidNumberTreeNode(reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<K> {
    pub kids: Vec<Reference>,
    pub entries: BTreeMap<K, Object>,
    pub lower_limit: K,
    pub upper_limit: K,
}

pub type NameTreeNode = TreeNode<KsString>;
pub type NumberTreeNode = TreeNode<i64>;

impl<K: TreeKey> TreeNode<K> {
    /// `true` if `key` lies within the limits of this node.
    pub fn covers(&self, key: &K) -> bool {
        &self.lower_limit <= key && key <= &self.upper_limit
    }

    /// Looks up `key` in this node and its descendants.
    ///
    /// Kids are loaded on demand through `load_kid`. They are expected to be
    /// sorted by their limits, which is used to binary search them. A kid
    /// that is reached a second time fails with [`TreeNodeError::CyclicKids`].
    pub fn get<E, F>(&self, key: &K, load_kid: &mut F) -> Result<Option<Object>, E>
    where
        E: From<TreeNodeError>,
        F: FnMut(&Reference) -> Result<Self, E>,
    {
        let mut visited = FnvHashSet::default();
        let mut descended: Option<Self> = None;
        loop {
            let node = descended.as_ref().unwrap_or(self);
            if !node.covers(key) {
                return Ok(None);
            }
            if let Some(value) = node.entries.get(key) {
                return Ok(Some(value.clone()));
            }

            match node.find_kid(key, &mut visited, load_kid)? {
                Some(kid) => descended = Some(kid),
                None => return Ok(None),
            }
        }
    }

    /// Binary search for the kid whose limits contain `key`.
    fn find_kid<E, F>(&self, key: &K, visited: &mut FnvHashSet<Reference>, load_kid: &mut F) -> Result<Option<Self>, E>
    where
        E: From<TreeNodeError>,
        F: FnMut(&Reference) -> Result<Self, E>,
    {
        let (mut low, mut high) = (0, self.kids.len());
        while low < high {
            let middle = low + (high - low) / 2;
            let reference = self.kids[middle];
            if !visited.insert(reference) {
                return Err(TreeNodeError::CyclicKids(reference).into());
            }

            let kid = load_kid(&reference)?;
            if key < &kid.lower_limit {
                high = middle;
            } else if key > &kid.upper_limit {
                low = middle + 1;
            } else {
                return Ok(Some(kid));
            }
        }
        Ok(None)
    }
}

impl<K: TreeKey> TryFrom<&Dictionary> for TreeNode<K> {
    type Error = TreeNodeError;

    fn try_from(dict: &Dictionary) -> Result<Self, Self::Error> {
        let kids = dict
            .get(K_KIDS)
            .ok_or_else(|| K::invalid("missing `Kids`"))?
            .array()
            .ok_or_else(|| K::invalid("`Kids` is not an array"))?
            .iter()
            .map(|kid| kid.reference().copied().ok_or_else(|| K::invalid("kid is not a reference")))
            .collect::<Result<Vec<_>, _>>()?;

        let flat = dict
            .get(K::ENTRIES)
            .ok_or_else(|| K::invalid("missing entries"))?
            .array()
            .ok_or_else(|| K::invalid("entries are not an array"))?;
        if flat.len() % 2 != 0 {
            return Err(K::invalid("odd number of entry elements"));
        }
        let mut entries = BTreeMap::new();
        for pair in flat.chunks_exact(2) {
            let key = K::from_object(&pair[0]).ok_or_else(|| K::invalid("entry key has the wrong type"))?;
            if !DIRECT_DESCENDANTS.contains(&pair[1].kind()) {
                return Err(K::invalid("entry value is not a valid direct descendant"));
            }
            entries.insert(key, pair[1].clone());
        }

        let limits = dict
            .get(K_LIMITS)
            .ok_or_else(|| K::invalid("missing `Limits`"))?
            .array()
            .ok_or_else(|| K::invalid("`Limits` is not an array"))?;
        let (lower_limit, upper_limit) = match &limits[..] {
            [lower, upper] => (
                K::from_object(lower).ok_or_else(|| K::invalid("lower limit has the wrong type"))?,
                K::from_object(upper).ok_or_else(|| K::invalid("upper limit has the wrong type"))?,
            ),
            _ => return Err(K::invalid("`Limits` must have two elements")),
        };

        Ok(Self {
            kids,
            entries,
            lower_limit,
            upper_limit,
        })
    }
}
