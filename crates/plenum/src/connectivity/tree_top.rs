//! Ascent to the root of a hook tree.
//!
//! The walk runs in two phases. [`ascend`] follows primary hooks without
//! touching the drawing and reports the path together with any self-loop
//! it found. [`find_tree_top`] then folds the path into a [`TreeTop`],
//! flags the matched objects for redraw and prunes the self-loop.

use indexmap::IndexSet;
use log::{debug, trace, warn};

use plenum_core::identifier::ObjectId;

use crate::{error::PlenumError, repository::GraphRepository};

/// Accumulated result of a tree-top search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeTop {
    found_tree: bool,
    top_connector: Option<ObjectId>,
    top_shape: Option<ObjectId>,
    second_connector: Option<ObjectId>,
    level: Option<usize>,
}

impl TreeTop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an accumulator that also counts shape levels.
    pub fn with_level() -> Self {
        Self {
            level: Some(0),
            ..Self::default()
        }
    }

    pub fn found_tree(&self) -> bool {
        self.found_tree
    }

    /// Root-most connector reached.
    pub fn top_connector(&self) -> Option<ObjectId> {
        self.top_connector
    }

    /// Root-most shape reached.
    pub fn top_shape(&self) -> Option<ObjectId> {
        self.top_shape
    }

    /// Connector array hanging off the top shape, distinct from the primary
    /// branch.
    pub fn second_connector(&self) -> Option<ObjectId> {
        self.second_connector
    }

    /// Number of shapes passed, when counting was requested.
    pub fn level(&self) -> Option<usize> {
        self.level
    }
}

/// Primary-hook path from a start object towards its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ascent {
    path: Vec<ObjectId>,
    self_loop: Option<ObjectId>,
    hooked: bool,
}

impl Ascent {
    /// Objects visited, start first. Lines stop the walk and are not included.
    pub fn path(&self) -> &[ObjectId] {
        &self.path
    }

    /// Object whose primary hook points at itself, if the walk met one.
    pub fn self_loop(&self) -> Option<ObjectId> {
        self.self_loop
    }

    /// True when the last object on the path still carries a hook: a
    /// self-loop, a missing parent or a line parent.
    fn ends_on_hook(&self) -> bool {
        self.hooked
    }
}

/// Follows primary hooks from `start` without modifying the drawing.
///
/// # Errors
///
/// Returns [`PlenumError::HookCycle`] when a parent repeats, naming the
/// first repeated object.
pub fn ascend<R>(repo: &R, start: ObjectId) -> Result<Ascent, PlenumError>
where
    R: GraphRepository + ?Sized,
{
    let mut visited = IndexSet::new();
    let mut self_loop = None;
    let mut hooked = false;
    let mut current = start;

    while let Some(object) = repo.resolve(current) {
        if object.is_line() {
            break;
        }
        visited.insert(current);

        let Some(hook) = object.primary_hook() else {
            break;
        };
        hooked = true;
        let parent = hook.parent_id();
        if parent == current {
            self_loop = Some(current);
            break;
        }
        if visited.contains(&parent) {
            warn!(start:?, parent:?; "Hook cycle detected");
            return Err(PlenumError::HookCycle(parent));
        }
        if repo.resolve(parent).is_none_or(|parent| parent.is_line()) {
            break;
        }
        trace!(from:? = current, to:? = parent; "Ascending primary hook");
        hooked = false;
        current = parent;
    }

    Ok(Ascent {
        path: visited.into_iter().collect(),
        self_loop,
        hooked,
    })
}

/// Ascends from `start` to the top of its hook tree.
///
/// Connectors on the path become the top connector; shapes become the top
/// shape and bump the level. When the walk ends on an unhooked object, the
/// connector array hanging off it is probed: before any tree was found that
/// array is the tree top, and after a connector it is recorded as the
/// second connector. With `mark_links`, every matched object is flagged
/// dirty. A self-looping primary hook is pruned once the walk finishes.
///
/// Returns whether a tree was found. A line as `start` never is.
///
/// # Errors
///
/// Returns [`PlenumError::HookCycle`] on a cyclic hook chain. The
/// accumulator then reports no tree and nothing is marked or pruned.
pub fn find_tree_top<R>(
    repo: &mut R,
    start: ObjectId,
    mark_links: bool,
    acc: &mut TreeTop,
) -> Result<bool, PlenumError>
where
    R: GraphRepository + ?Sized,
{
    if repo.resolve(start).is_some_and(|object| object.is_line()) {
        return Ok(false);
    }

    let ascent = match ascend(repo, start) {
        Ok(ascent) => ascent,
        Err(err) => {
            acc.found_tree = false;
            return Err(err);
        }
    };

    let mut marked = Vec::new();
    for &id in ascent.path() {
        let Some(object) = repo.resolve(id) else {
            continue;
        };
        if object.is_connector() {
            acc.top_connector = Some(id);
            acc.found_tree = true;
            marked.push(id);
        } else if object.is_shape() {
            acc.top_shape = Some(id);
            if let Some(level) = acc.level.as_mut() {
                *level += 1;
            }
            marked.push(id);
        }
    }

    if let Some(&last) = ascent.path().last()
        && !ascent.ends_on_hook()
    {
        let last_is_connector = repo.resolve(last).is_some_and(|object| object.is_connector());
        if acc.found_tree && last_is_connector {
            acc.second_connector = acc
                .top_shape
                .and_then(|shape| repo.child_array_anchor(shape, None));
        } else if !acc.found_tree
            && let Some(anchor) = repo.child_array_anchor(last, None)
        {
            acc.top_connector = Some(anchor);
            acc.found_tree = true;
            marked.push(anchor);
        }
    }

    if mark_links {
        for id in marked {
            repo.mark_dirty(id, true);
        }
    }
    if let Some(id) = ascent.self_loop() {
        repo.prune_primary_hook(id);
    }

    debug!(
        start:?,
        found = acc.found_tree,
        top_connector:? = acc.top_connector,
        top_shape:? = acc.top_shape;
        "Tree top resolved"
    );
    Ok(acc.found_tree)
}
