//! Graph store - the authoritative set of nodes and edges.

use std::collections::{HashMap, HashSet};

use super::{Edge, NodeId, NodeKind, TaskNode};
use crate::error::RulesError;
use crate::grid::{GridPosition, OccupiedCells};

/// Ordered node list plus edge list, indexed by node id.
///
/// Nodes keep their insertion order; that order is the tie-breaker for
/// directional focus moves. Position uniqueness is a caller contract: callers
/// pick free cells through the placement engine before inserting. Use
/// [`TaskGraph::validate`] to check the structural invariants of data from
/// outside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGraph {
    nodes: Vec<TaskNode>,
    edges: Vec<Edge>,
    index: HashMap<NodeId, usize>,
}

impl TaskGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from raw parts without validation.
    pub fn from_parts(nodes: Vec<TaskNode>, edges: Vec<Edge>) -> Self {
        let mut graph = Self {
            nodes,
            edges,
            index: HashMap::new(),
        };
        graph.rebuild_index();
        graph
    }

    /// Split the graph back into its node and edge lists.
    pub fn into_parts(self) -> (Vec<TaskNode>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), i))
            .collect();
    }

    /// Append nodes and edges in one step.
    ///
    /// Fails without changing anything if a new id is already taken or an
    /// edge endpoint exists neither in the graph nor among the new nodes.
    pub fn insert(&mut self, nodes: Vec<TaskNode>, edges: Vec<Edge>) -> Result<(), RulesError> {
        let mut incoming = HashSet::new();
        for node in &nodes {
            if self.contains(&node.id) || !incoming.insert(node.id.clone()) {
                return Err(RulesError::DuplicateNodeId(node.id.clone()));
            }
        }

        let known = |id: &NodeId| self.contains(id) || incoming.contains(id);
        if let Some(edge) = edges.iter().find(|e| !known(&e.source) || !known(&e.target)) {
            return Err(RulesError::DanglingEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
            });
        }

        for node in nodes {
            self.index.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
        }
        self.edges.extend(edges);
        Ok(())
    }

    /// Apply `change` to the node with the given id.
    ///
    /// Returns false (and does nothing) if the id is absent. The node keeps
    /// its id whatever `change` does to it.
    pub fn update(&mut self, id: &NodeId, change: impl FnOnce(&mut TaskNode)) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let node = &mut self.nodes[i];
        change(node);
        node.id = id.clone();
        true
    }

    /// Remove a node and every edge touching it.
    pub fn remove(&mut self, id: &NodeId) -> Option<TaskNode> {
        let i = self.index.get(id).copied()?;
        let removed = self.nodes.remove(i);
        self.edges.retain(|edge| !edge.touches(id));
        self.rebuild_index();
        Some(removed)
    }

    /// Get node by ID.
    pub fn get(&self, id: &NodeId) -> Option<&TaskNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Check if a node exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[TaskNode] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether an edge joins `a` and `b` in either direction.
    pub fn is_adjacent(&self, a: &NodeId, b: &NodeId) -> bool {
        self.edges.iter().any(|edge| edge.connects(a, b))
    }

    /// Ids of every node connected to `id`.
    pub fn neighbors(&self, id: &NodeId) -> Vec<&NodeId> {
        self.edges.iter().filter_map(|edge| edge.other(id)).collect()
    }

    /// The node occupying a lattice cell, if any.
    pub fn node_at(&self, position: GridPosition) -> Option<&TaskNode> {
        self.nodes.iter().find(|node| node.position == position)
    }

    /// Every occupied lattice cell.
    pub fn occupied(&self) -> OccupiedCells {
        self.nodes.iter().map(|node| node.position).collect()
    }

    /// Check the structural invariants: unique ids, unique positions, exactly
    /// one start node and no dangling edges.
    pub fn validate(&self) -> Result<(), RulesError> {
        let mut ids = HashSet::new();
        let mut cells: HashMap<GridPosition, &NodeId> = HashMap::new();
        for node in &self.nodes {
            if !ids.insert(&node.id) {
                return Err(RulesError::DuplicateNodeId(node.id.clone()));
            }
            if let Some(first) = cells.insert(node.position, &node.id) {
                return Err(RulesError::DuplicatePosition {
                    position: node.position,
                    first: first.clone(),
                    second: node.id.clone(),
                });
            }
        }

        let starts = self
            .nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Start)
            .count();
        if starts != 1 {
            return Err(RulesError::StartNodeCount(starts));
        }

        if let Some(edge) = self
            .edges
            .iter()
            .find(|e| !self.contains(&e.source) || !self.contains(&e.target))
        {
            return Err(RulesError::DanglingEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
            });
        }

        Ok(())
    }
}
