//! The box dependency graph induced by shared variables.
//!
//! Vertices are boxes in declaration order. An edge `A -> B` exists when a
//! variable produced by an output port of `A` is consumed by an input port of
//! `B`. A box consuming its own output yields a self loop.

mod cycle;

use crate::pipeline::{Pipeline, PipelineBox};
use ahash::AHashMap;
use itertools::Itertools;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    names: Vec<String>,
    /// Outgoing edges per vertex, without duplicates, in first-seen order.
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Builds the graph from a box list.
    pub fn build(boxes: &[PipelineBox]) -> Self {
        let mut consumers: AHashMap<&str, Vec<usize>> = AHashMap::new();
        for (index, b) in boxes.iter().enumerate() {
            for port in b.ports_in.values() {
                if let Some(variable) = port.value.variable() {
                    consumers.entry(variable).or_default().push(index);
                }
            }
        }

        let edges = boxes
            .iter()
            .map(|b| {
                b.ports_out
                    .values()
                    .filter_map(|port| port.value.variable())
                    .filter_map(|variable| consumers.get(variable))
                    .flatten()
                    .copied()
                    .unique()
                    .collect()
            })
            .collect();

        Self {
            names: boxes.iter().map(|b| b.name.clone()).collect(),
            edges,
        }
    }

    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self::build(&pipeline.boxes)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Box names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// All edges as `(from, to)` box names.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().enumerate().flat_map(move |(from, targets)| {
            targets
                .iter()
                .map(move |&to| (self.names[from].as_str(), self.names[to].as_str()))
        })
    }

    /// Boxes consuming something `box_name` produces.
    pub fn successors(&self, box_name: &str) -> Option<Vec<&str>> {
        let index = self.index_of(box_name)?;
        Some(
            self.edges[index]
                .iter()
                .map(|&to| self.names[to].as_str())
                .collect(),
        )
    }

    /// Boxes producing something `box_name` consumes.
    pub fn predecessors(&self, box_name: &str) -> Option<Vec<&str>> {
        let index = self.index_of(box_name)?;
        Some(
            self.edges
                .iter()
                .enumerate()
                .filter(|(_, targets)| targets.contains(&index))
                .map(|(from, _)| self.names[from].as_str())
                .collect(),
        )
    }

    /// Whether any box is reachable from itself.
    pub fn has_cycle(&self) -> bool {
        cycle::first_cycle(&self.edges).is_some()
    }

    /// Box names along the first cycle the search meets, closing at the
    /// repeated box (`[A, B, A]`), or `None` for acyclic graphs.
    pub fn find_cycle(&self) -> Option<Vec<&str>> {
        cycle::first_cycle(&self.edges).map(|path| {
            path.into_iter()
                .map(|index| self.names[index].as_str())
                .collect()
        })
    }

    /// Box names ordered so that every producer precedes its consumers.
    /// Ties keep declaration order. `None` if the graph has a cycle.
    pub fn topological_order(&self) -> Option<Vec<&str>> {
        let mut in_degree = vec![0usize; self.len()];
        for &to in self.edges.iter().flatten() {
            in_degree[to] += 1;
        }

        let mut queue: VecDeque<usize> = (0..self.len()).filter(|&v| in_degree[v] == 0).collect();
        let mut order = Vec::with_capacity(self.len());
        while let Some(vertex) = queue.pop_front() {
            order.push(self.names[vertex].as_str());
            for &next in &self.edges[vertex] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        (order.len() == self.len()).then_some(order)
    }

    fn index_of(&self, box_name: &str) -> Option<usize> {
        self.names.iter().position(|name| name == box_name)
    }
}
