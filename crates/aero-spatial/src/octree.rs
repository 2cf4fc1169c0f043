//! Arena-based octree over point objects.
//!
//! Nodes live in a flat `Vec` and refer to their children by index, and the
//! stored objects live in a slab addressed by stable [`EntryId`] handles.
//! This keeps the tree free of `Box`-per-node pointer chasing and lets
//! callers hold on to handles across inserts.

use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use crate::error::SpatialError;
use crate::overlap::{Aabb, Sphere};

/// Stable handle to an object stored in an [`Octree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    position: Point3<f64>,
}

#[derive(Debug, Clone)]
enum NodeKind {
    /// Entry handles stored directly in this node.
    Leaf(Vec<EntryId>),
    /// Indices of the eight children, octant order (-x-y-z first, +x+y+z last).
    Internal([usize; 8]),
}

#[derive(Debug, Clone)]
struct Node {
    center: Point3<f64>,
    /// Edge length of this node's cube.
    size: f64,
    kind: NodeKind,
}

/// A loose collection of point objects partitioned by an octree, supporting
/// insertion, removal by handle, and radius queries.
///
/// A leaf subdivides once it holds more than `split_threshold` entries,
/// unless its cube is already at or below `min_node_size` - the tree never
/// splits into cubes too small to be worth pruning. Nodes are never merged
/// back when entries are removed.
///
/// Slab slots vacated by [`Octree::remove`] are not reused: a removed
/// handle stays dead forever instead of silently aliasing a later insert.
/// Slab memory therefore grows with total inserts, not peak occupancy,
/// until [`Octree::clear`] resets it.
///
/// # Example
///
/// ```
/// use aero_spatial::Octree;
/// use nalgebra::Point3;
///
/// let mut tree = Octree::try_new(Point3::origin(), 1000.0).unwrap();
/// let id = tree.insert("beacon", Point3::new(10.0, 20.0, 30.0)).unwrap();
///
/// let hits = tree.query_radius(Point3::origin(), 50.0);
/// assert_eq!(hits, vec![(id, &"beacon")]);
///
/// assert_eq!(tree.remove(id), Some("beacon"));
/// assert!(tree.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Octree<T> {
    nodes: Vec<Node>,
    entries: Vec<Option<Entry<T>>>,
    /// Live entry count (slab may contain vacated slots).
    count: usize,
    /// Inserts dropped because their position fell outside the root cube.
    stale_drops: u64,
    split_threshold: usize,
    min_node_size: f64,
}

impl<T> Octree<T> {
    /// Default maximum leaf occupancy before subdividing.
    pub const DEFAULT_SPLIT_THRESHOLD: usize = 8;
    /// Default smallest node edge length that may still subdivide.
    pub const DEFAULT_MIN_NODE_SIZE: f64 = 100.0;

    /// Creates an empty octree whose root cube is centered at `center` with
    /// edge length `size`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidOctreeSize`] if `size` is zero,
    /// negative, NaN, or infinite.
    pub fn try_new(center: Point3<f64>, size: f64) -> Result<Self, SpatialError> {
        if size <= 0.0 || !size.is_finite() {
            return Err(SpatialError::InvalidOctreeSize(size));
        }
        Ok(Self {
            nodes: vec![Node {
                center,
                size,
                kind: NodeKind::Leaf(Vec::new()),
            }],
            entries: Vec::new(),
            count: 0,
            stale_drops: 0,
            split_threshold: Self::DEFAULT_SPLIT_THRESHOLD,
            min_node_size: Self::DEFAULT_MIN_NODE_SIZE,
        })
    }

    /// Sets the maximum leaf occupancy before subdividing (minimum 1).
    #[must_use]
    pub fn with_split_threshold(mut self, threshold: usize) -> Self {
        self.split_threshold = threshold.max(1);
        self
    }

    /// Sets the smallest node edge length that may still subdivide.
    #[must_use]
    pub fn with_min_node_size(mut self, min_size: f64) -> Self {
        self.min_node_size = min_size.max(0.0);
        self
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the tree holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of inserts dropped for falling outside the root
    /// cube.
    #[must_use]
    pub const fn stale_drops(&self) -> u64 {
        self.stale_drops
    }

    /// Returns the world-space bounds of the root cube.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.node_aabb(0)
    }

    /// Inserts an object at a position, returning a handle to it.
    ///
    /// Positions outside the root cube are not representable in the tree:
    /// the object is dropped, the stale-drop counter is bumped, and a
    /// warning is logged.
    pub fn insert(&mut self, item: T, position: Point3<f64>) -> Option<EntryId> {
        if !self.bounds().contains(&position) {
            self.stale_drops += 1;
            warn!(
                x = position.x,
                y = position.y,
                z = position.z,
                stale_drops = self.stale_drops,
                "octree insert outside root bounds, dropping"
            );
            return None;
        }

        let id = EntryId(self.entries.len());
        self.entries.push(Some(Entry { item, position }));
        self.count += 1;
        self.insert_at(0, id);
        Some(id)
    }

    /// Returns a reference to the object behind a handle.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.entries.get(id.0)?.as_ref().map(|entry| &entry.item)
    }

    /// Returns the position an object was inserted at.
    #[must_use]
    pub fn position(&self, id: EntryId) -> Option<Point3<f64>> {
        self.entries.get(id.0)?.as_ref().map(|entry| entry.position)
    }

    /// Removes an object by handle, returning it. Removing an already
    /// removed handle returns `None`.
    pub fn remove(&mut self, id: EntryId) -> Option<T> {
        let entry = self.entries.get_mut(id.0)?.take()?;
        self.count -= 1;

        let leaf = self.locate_leaf(&entry.position);
        if let NodeKind::Leaf(ids) = &mut self.nodes[leaf].kind {
            if let Some(slot) = ids.iter().position(|&held| held == id) {
                ids.swap_remove(slot);
            }
        }

        Some(entry.item)
    }

    /// Returns every entry whose position lies within `radius` of `center`,
    /// pruning subtrees whose cubes the query sphere cannot reach.
    ///
    /// Each live entry appears at most once; the order is unspecified.
    #[must_use]
    pub fn query_radius(&self, center: Point3<f64>, radius: f64) -> Vec<(EntryId, &T)> {
        let sphere = Sphere::new(center, radius);
        let mut results = Vec::new();
        let mut stack = vec![0usize];

        while let Some(idx) = stack.pop() {
            if !sphere.intersects_aabb(&self.node_aabb(idx)) {
                continue;
            }
            match &self.nodes[idx].kind {
                NodeKind::Internal(children) => stack.extend_from_slice(children),
                NodeKind::Leaf(ids) => {
                    for &id in ids {
                        if let Some(entry) = &self.entries[id.0] {
                            if sphere.contains(&entry.position) {
                                results.push((id, &entry.item));
                            }
                        }
                    }
                }
            }
        }

        results
    }

    /// Iterates every live entry with its handle and position.
    pub fn items(&self) -> impl Iterator<Item = (EntryId, Point3<f64>, &T)> + '_ {
        self.entries.iter().enumerate().filter_map(|(idx, slot)| {
            slot.as_ref()
                .map(|entry| (EntryId(idx), entry.position, &entry.item))
        })
    }

    /// Removes all entries and collapses the tree back to a single root
    /// leaf. The stale-drop counter is preserved.
    pub fn clear(&mut self) {
        let root = Node {
            center: self.nodes[0].center,
            size: self.nodes[0].size,
            kind: NodeKind::Leaf(Vec::new()),
        };
        self.nodes.clear();
        self.nodes.push(root);
        self.entries.clear();
        self.count = 0;
    }

    /// Logs the tree structure at debug level, one line per node.
    pub fn debug_print(&self) {
        self.debug_print_node(0, 0);
    }

    fn debug_print_node(&self, idx: usize, depth: usize) {
        let node = &self.nodes[idx];
        match &node.kind {
            NodeKind::Leaf(ids) => {
                debug!(
                    indent = depth * 2,
                    size = node.size,
                    entries = ids.len(),
                    "leaf"
                );
            }
            NodeKind::Internal(children) => {
                debug!(indent = depth * 2, size = node.size, "internal");
                for &child in children {
                    self.debug_print_node(child, depth + 1);
                }
            }
        }
    }

    fn node_aabb(&self, idx: usize) -> Aabb {
        let node = &self.nodes[idx];
        Aabb::from_center(node.center, Vector3::repeat(node.size * 0.5))
    }

    /// Picks the child cube containing a position. Cube boundaries are
    /// inclusive, so a point on an internal face is contained by more than
    /// one child; taking the first match keeps insert and remove descending
    /// to the same leaf.
    fn child_containing(&self, children: &[usize; 8], position: &Point3<f64>) -> usize {
        for &child in children {
            if self.node_aabb(child).contains(position) {
                return child;
            }
        }
        children[0]
    }

    fn locate_leaf(&self, position: &Point3<f64>) -> usize {
        let mut idx = 0;
        loop {
            match &self.nodes[idx].kind {
                NodeKind::Leaf(_) => return idx,
                NodeKind::Internal(children) => {
                    idx = self.child_containing(children, position);
                }
            }
        }
    }

    fn insert_at(&mut self, start: usize, id: EntryId) {
        let position = match &self.entries[id.0] {
            Some(entry) => entry.position,
            None => return,
        };

        let mut idx = start;
        loop {
            match &self.nodes[idx].kind {
                NodeKind::Internal(children) => {
                    let children = *children;
                    idx = self.child_containing(&children, &position);
                }
                NodeKind::Leaf(ids) => {
                    let full = ids.len() >= self.split_threshold;
                    if full && self.nodes[idx].size > self.min_node_size {
                        self.subdivide(idx);
                        continue;
                    }
                    if let NodeKind::Leaf(ids) = &mut self.nodes[idx].kind {
                        ids.push(id);
                    }
                    return;
                }
            }
        }
    }

    /// Splits a leaf into eight octants and redistributes its entries.
    fn subdivide(&mut self, idx: usize) {
        let (center, size) = {
            let node = &self.nodes[idx];
            (node.center, node.size)
        };
        let quarter = size * 0.25;
        let child_size = size * 0.5;

        let mut children = [0usize; 8];
        for (octant, child) in children.iter_mut().enumerate() {
            let dx = if octant & 1 == 0 { -quarter } else { quarter };
            let dy = if octant & 2 == 0 { -quarter } else { quarter };
            let dz = if octant & 4 == 0 { -quarter } else { quarter };
            *child = self.nodes.len();
            self.nodes.push(Node {
                center: Point3::new(center.x + dx, center.y + dy, center.z + dz),
                size: child_size,
                kind: NodeKind::Leaf(Vec::new()),
            });
        }

        let old = std::mem::replace(&mut self.nodes[idx].kind, NodeKind::Internal(children));
        if let NodeKind::Leaf(ids) = old {
            for id in ids {
                self.insert_at(idx, id);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tree() -> Octree<u32> {
        Octree::try_new(Point3::origin(), 1000.0).unwrap()
    }

    #[test]
    fn test_rejects_bad_size() {
        assert!(matches!(
            Octree::<u32>::try_new(Point3::origin(), 0.0),
            Err(SpatialError::InvalidOctreeSize(_))
        ));
        assert!(matches!(
            Octree::<u32>::try_new(Point3::origin(), f64::NAN),
            Err(SpatialError::InvalidOctreeSize(_))
        ));
    }

    #[test]
    fn test_insert_get_remove() {
        let mut tree = tree();
        let id = tree.insert(7, Point3::new(1.0, 2.0, 3.0)).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(id), Some(&7));
        assert_eq!(tree.position(id), Some(Point3::new(1.0, 2.0, 3.0)));

        assert_eq!(tree.remove(id), Some(7));
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.get(id), None);
        // Double remove is a no-op.
        assert_eq!(tree.remove(id), None);
    }

    #[test]
    fn test_removed_handle_never_aliases_later_insert() {
        let mut tree = tree();
        let first = tree.insert(1, Point3::new(10.0, 0.0, 0.0)).unwrap();
        assert_eq!(tree.remove(first), Some(1));

        let second = tree.insert(2, Point3::new(10.0, 0.0, 0.0)).unwrap();
        assert_ne!(first, second);
        // The dead handle stays dead; it never resolves to the new entry.
        assert_eq!(tree.get(first), None);
        assert_eq!(tree.remove(first), None);
        assert_eq!(tree.get(second), Some(&2));
    }

    #[test]
    fn test_insert_outside_root_dropped() {
        let mut tree = tree();
        assert!(tree.insert(1, Point3::new(5000.0, 0.0, 0.0)).is_none());
        assert_eq!(tree.stale_drops(), 1);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_subdivision_preserves_membership() {
        let mut tree = tree();
        let mut ids = Vec::new();
        // Ninth insert pushes the root leaf past the default threshold.
        for i in 0..9 {
            let p = Point3::new(f64::from(i) * 50.0 - 200.0, 10.0, -10.0);
            ids.push(tree.insert(i, p).unwrap());
        }

        assert_eq!(tree.len(), 9);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(tree.get(*id), Some(&u32::try_from(i).unwrap()));
        }

        // Every entry is still found by a covering query exactly once.
        let hits = tree.query_radius(Point3::origin(), 1000.0);
        assert_eq!(hits.len(), 9);
    }

    #[test]
    fn test_min_node_size_stops_subdivision() {
        let mut tree = Octree::try_new(Point3::origin(), 150.0).unwrap();
        // All at the same point: without the size floor this would recurse
        // forever trying to separate them.
        for i in 0..40 {
            tree.insert(i, Point3::new(1.0, 1.0, 1.0)).unwrap();
        }
        assert_eq!(tree.len(), 40);
        assert_eq!(tree.query_radius(Point3::origin(), 10.0).len(), 40);
    }

    #[test]
    fn test_remove_after_subdivision() {
        let mut tree = tree();
        let mut ids = Vec::new();
        for i in 0..20 {
            let p = Point3::new(f64::from(i) * 40.0 - 400.0, f64::from(i % 3) * 100.0, 0.0);
            ids.push(tree.insert(i, p).unwrap());
        }
        for id in &ids {
            assert!(tree.remove(*id).is_some());
        }
        assert!(tree.is_empty());
        assert!(tree.query_radius(Point3::origin(), 1000.0).is_empty());
    }

    #[test]
    fn test_query_radius_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut tree = tree();
        let mut reference = Vec::new();

        for i in 0..500 {
            let p = Point3::new(
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-500.0..500.0),
            );
            if let Some(id) = tree.insert(i, p) {
                reference.push((id, p));
            }
        }

        for _ in 0..20 {
            let center = Point3::new(
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-500.0..500.0),
            );
            let radius = rng.gen_range(0.0..400.0);

            let mut hits: Vec<_> = tree
                .query_radius(center, radius)
                .into_iter()
                .map(|(id, _)| id)
                .collect();
            hits.sort_by_key(|id| id.0);

            let mut expected: Vec<_> = reference
                .iter()
                .filter(|(_, p)| (p - center).norm_squared() <= radius * radius)
                .map(|(id, _)| *id)
                .collect();
            expected.sort_by_key(|id| id.0);

            assert_eq!(hits, expected);
        }
    }

    #[test]
    fn test_boundary_point_found_once() {
        let mut tree = tree();
        // Force a split, then insert a point on an internal face.
        for i in 0..8 {
            tree.insert(i, Point3::new(f64::from(i) * 30.0 - 120.0, 50.0, 50.0))
                .unwrap();
        }
        let id = tree.insert(99, Point3::new(0.0, 0.0, 0.0)).unwrap();

        let hits: Vec<_> = tree
            .query_radius(Point3::origin(), 1.0)
            .into_iter()
            .filter(|(hit, _)| *hit == id)
            .collect();
        assert_eq!(hits.len(), 1);

        assert_eq!(tree.remove(id), Some(99));
    }

    #[test]
    fn test_clear() {
        let mut tree = tree();
        for i in 0..30 {
            tree.insert(i, Point3::new(f64::from(i), 0.0, 0.0)).unwrap();
        }
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.query_radius(Point3::origin(), 1000.0).is_empty());

        // Still usable after clearing.
        let id = tree.insert(1, Point3::origin()).unwrap();
        assert_eq!(tree.get(id), Some(&1));
    }
}
