//! Connected-component discovery.
//!
//! [`line_tree`] and [`connector_tree`] are mutually recursive. Between them
//! they walk primary hooks, connector arrays and two-ended lines, collecting
//! every reachable id into an insertion-ordered set. A shape walk follows a
//! line seen for the first time, and a connector is walked at most once
//! without member lines and once with them, so the walk terminates on any
//! hook data, malformed or not.

use indexmap::IndexSet;
use log::trace;

use plenum_core::{identifier::ObjectId, object::ObjectType};

use crate::repository::GraphRepository;

/// Ids discovered by a component walk, in discovery order.
pub type Component = IndexSet<ObjectId>;

/// Collects the component reachable from `start`, skipping `exclude_line`.
pub fn line_component<R>(repo: &R, start: ObjectId, exclude_line: Option<ObjectId>) -> Component
where
    R: GraphRepository + ?Sized,
{
    let mut acc = Component::new();
    line_tree(repo, start, exclude_line, &mut acc);
    acc
}

/// Adds everything reachable from the shape `start` to `acc`.
///
/// The walk ascends the primary hook, fans out into the connector arrays
/// hanging off `start` and crosses its child lines. `exclude_line` is the
/// line the walk arrived over; it is never crossed back.
pub fn line_tree<R>(
    repo: &R,
    start: ObjectId,
    exclude_line: Option<ObjectId>,
    acc: &mut Component,
) where
    R: GraphRepository + ?Sized,
{
    Walk::new(repo, acc).line(start, exclude_line);
}

/// Adds the connector `connector_id` and everything hanging off its array
/// to `acc`.
///
/// Slot 0 of the array is the connector's own anchor and is not descended
/// into. With `include_child_lines`, lines attached to the array members
/// are crossed as well.
pub fn connector_tree<R>(
    repo: &R,
    connector_id: ObjectId,
    acc: &mut Component,
    include_child_lines: bool,
) where
    R: GraphRepository + ?Sized,
{
    Walk::new(repo, acc).connector(connector_id, include_child_lines);
}

/// State shared by one walk.
///
/// A connector can be reached first without its member lines, through the
/// array of another connector, and later with them. `lined` holds the
/// connectors already fanned out with lines, so each connector is walked
/// at most once per mode.
struct Walk<'a, R: ?Sized> {
    repo: &'a R,
    acc: &'a mut Component,
    lined: IndexSet<ObjectId>,
}

impl<'a, R> Walk<'a, R>
where
    R: GraphRepository + ?Sized,
{
    fn new(repo: &'a R, acc: &'a mut Component) -> Self {
        Self {
            repo,
            acc,
            lined: IndexSet::new(),
        }
    }

    /// Walks `connector_id` with lines unless that already happened.
    fn lined_connector(&mut self, connector_id: ObjectId) {
        if !self.lined.contains(&connector_id) {
            self.connector(connector_id, true);
        }
    }

    fn line(&mut self, start: ObjectId, exclude_line: Option<ObjectId>) {
        let repo = self.repo;
        self.acc.insert(start);
        trace!(start:?, exclude_line:?; "Walking line tree");

        if let Some(hook) = repo.resolve(start).and_then(|object| object.primary_hook()) {
            let parent_id = hook.parent_id();
            match repo.resolve(parent_id) {
                Some(parent) if parent.is_connector() => self.lined_connector(parent_id),
                Some(parent) if !self.acc.contains(&parent_id) => {
                    // Time lines and events are pass-through nodes.
                    let next = match parent.object_type() {
                        ObjectType::TimeLine => parent_id,
                        ObjectType::Event => parent
                            .primary_hook()
                            .map_or(start, |hook| hook.parent_id()),
                        _ => start,
                    };
                    self.acc.insert(next);
                }
                _ => {}
            }
        }

        for child in repo.child_connectors(start) {
            self.lined_connector(child);
        }

        for line_id in repo.child_lines(start) {
            if Some(line_id) == exclude_line || self.acc.contains(&line_id) {
                continue;
            }
            self.acc.insert(line_id);
            let Some(line) = repo.resolve(line_id) else {
                continue;
            };

            if line.hooks().len() == 2 {
                self.cross(line_id, start);
            } else if line.object_type() == ObjectType::Event
                && let Some(associated) = line.associated_id()
            {
                self.acc.insert(associated);
            }
        }
    }

    fn connector(&mut self, connector_id: ObjectId, include_child_lines: bool) {
        let repo = self.repo;
        self.acc.insert(connector_id);
        if include_child_lines {
            self.lined.insert(connector_id);
        }
        trace!(connector_id:?, include_child_lines; "Walking connector tree");

        let Some(array) = repo
            .resolve(connector_id)
            .and_then(|object| object.as_connector())
            .map(|connector| connector.array())
        else {
            return;
        };

        for hooked in array.children() {
            if self.acc.insert(hooked)
                && repo
                    .resolve(hooked)
                    .is_some_and(|object| object.is_connector())
            {
                self.connector(hooked, false);
            }

            for child in repo.child_connectors(hooked) {
                if include_child_lines {
                    self.lined_connector(child);
                } else if !self.acc.contains(&child) {
                    self.connector(child, false);
                }
            }

            if !include_child_lines {
                continue;
            }
            for line_id in repo.child_lines(hooked) {
                if !self.acc.insert(line_id) {
                    continue;
                }
                if repo
                    .resolve(line_id)
                    .is_some_and(|line| line.hooks().len() == 2)
                {
                    self.cross(line_id, hooked);
                }
            }
        }
    }

    /// Follows the two-ended line `line_id` from `from` to the shape at its
    /// other end.
    fn cross(&mut self, line_id: ObjectId, from: ObjectId) {
        let repo = self.repo;
        let Some(line) = repo.resolve(line_id) else {
            return;
        };
        for hook in line.hooks() {
            let endpoint = hook.parent_id();
            if endpoint != from && repo.resolve(endpoint).is_some_and(|object| object.is_shape()) {
                self.line(endpoint, Some(line_id));
            }
        }
    }
}
