//! In-memory hypernym DAG backing the [`Taxonomy`] trait.
//!
//! The on-disk format is one concept per line: the concept identifier
//! followed by the identifiers of its direct hypernyms, whitespace
//! separated. Blank lines and `#` comments are skipped. Concepts are
//! enumerated in first-mention order, which fixes the sampling population
//! order across runs.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{Subsumer, Taxonomy};
use crate::error::{CoreError, CoreResult};
use crate::types::Concept;

/// A hypernym DAG held entirely in memory.
#[derive(Debug, Clone)]
pub struct InMemoryTaxonomy {
    concepts: Vec<Concept>,
    index: HashMap<Concept, usize>,
    parents: Vec<Vec<usize>>,
    /// Longest hypernym-path length to a root, per concept.
    depths: Vec<usize>,
    max_depth: usize,
}

impl InMemoryTaxonomy {
    /// Build a taxonomy from `(concept, direct hypernyms)` entries.
    ///
    /// Parents may be mentioned before their own entry appears; a parent
    /// with no entry of its own is treated as a root.
    pub fn from_entries<I, P>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (Concept, P)>,
        P: IntoIterator<Item = Concept>,
    {
        let mut concepts: Vec<Concept> = Vec::new();
        let mut index: HashMap<Concept, usize> = HashMap::new();
        let mut parent_lists: Vec<Vec<usize>> = Vec::new();

        let intern = |concept: Concept,
                          concepts: &mut Vec<Concept>,
                          parent_lists: &mut Vec<Vec<usize>>,
                          index: &mut HashMap<Concept, usize>| {
            if let Some(&i) = index.get(&concept) {
                return i;
            }
            let i = concepts.len();
            index.insert(concept.clone(), i);
            concepts.push(concept);
            parent_lists.push(Vec::new());
            i
        };

        for (child, parents) in entries {
            let child_idx = intern(child, &mut concepts, &mut parent_lists, &mut index);
            for parent in parents {
                let parent_idx = intern(parent, &mut concepts, &mut parent_lists, &mut index);
                if parent_idx == child_idx {
                    return Err(CoreError::Taxonomy(format!(
                        "concept '{}' lists itself as hypernym",
                        concepts[child_idx]
                    )));
                }
                if !parent_lists[child_idx].contains(&parent_idx) {
                    parent_lists[child_idx].push(parent_idx);
                }
            }
        }

        let depths = compute_depths(&concepts, &parent_lists)?;
        let max_depth = depths.iter().copied().max().unwrap_or(0);

        Ok(Self {
            concepts,
            index,
            parents: parent_lists,
            depths,
            max_depth,
        })
    }

    /// Load a taxonomy from a hypernym adjacency file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let file = File::open(path).map_err(|e| {
            CoreError::Taxonomy(format!("cannot open taxonomy file {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a taxonomy from any buffered reader of adjacency lines.
    pub fn from_reader(reader: impl BufRead) -> CoreResult<Self> {
        let mut entries: Vec<(Concept, Vec<Concept>)> = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                CoreError::Taxonomy(format!("read error at line {}: {}", lineno + 1, e))
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let child = Concept::from(fields.next().unwrap_or_default());
            let parents: Vec<Concept> = fields.map(Concept::from).collect();
            entries.push((child, parents));
        }
        if entries.is_empty() {
            return Err(CoreError::Taxonomy("taxonomy file contains no concepts".into()));
        }
        Self::from_entries(entries)
    }

    /// Number of concepts in the taxonomy.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Whether the taxonomy is empty.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    fn lookup(&self, c: &Concept) -> CoreResult<usize> {
        self.index
            .get(c)
            .copied()
            .ok_or_else(|| CoreError::Taxonomy(format!("unknown concept '{}'", c)))
    }

    /// Minimum hypernym distance from `start` to itself and every ancestor.
    fn hypernym_distances(&self, start: usize) -> HashMap<usize, usize> {
        let mut dist: HashMap<usize, usize> = HashMap::new();
        let mut frontier = vec![start];
        dist.insert(start, 0);
        let mut steps = 0usize;
        while !frontier.is_empty() {
            steps += 1;
            let mut next = Vec::new();
            for node in frontier {
                for &parent in &self.parents[node] {
                    if !dist.contains_key(&parent) {
                        dist.insert(parent, steps);
                        next.push(parent);
                    }
                }
            }
            frontier = next;
        }
        dist
    }
}

impl Taxonomy for InMemoryTaxonomy {
    fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn path_distance(&self, a: &Concept, b: &Concept) -> CoreResult<Option<usize>> {
        let (ia, ib) = (self.lookup(a)?, self.lookup(b)?);
        let da = self.hypernym_distances(ia);
        let db = self.hypernym_distances(ib);
        let best = da
            .iter()
            .filter_map(|(node, &d1)| db.get(node).map(|&d2| d1 + d2))
            .min();
        Ok(best)
    }

    fn deepest_common_subsumer(&self, a: &Concept, b: &Concept) -> CoreResult<Option<Subsumer>> {
        let (ia, ib) = (self.lookup(a)?, self.lookup(b)?);
        let da = self.hypernym_distances(ia);
        let db = self.hypernym_distances(ib);
        let mut best: Option<Subsumer> = None;
        for (&node, &d1) in &da {
            let Some(&d2) = db.get(&node) else { continue };
            let candidate = Subsumer {
                concept: self.concepts[node].clone(),
                depth: self.depths[node],
                dist_left: d1,
                dist_right: d2,
            };
            let better = match &best {
                None => true,
                Some(current) => {
                    candidate.depth > current.depth
                        || (candidate.depth == current.depth
                            && candidate.concept < current.concept)
                }
            };
            if better {
                best = Some(candidate);
            }
        }
        Ok(best)
    }

    fn common_subsumers(&self, a: &Concept, b: &Concept) -> CoreResult<Vec<Concept>> {
        let (ia, ib) = (self.lookup(a)?, self.lookup(b)?);
        let da = self.hypernym_distances(ia);
        let db = self.hypernym_distances(ib);
        let mut common: Vec<Concept> = da
            .keys()
            .filter(|node| db.contains_key(node))
            .map(|&node| self.concepts[node].clone())
            .collect();
        common.sort();
        Ok(common)
    }
}

/// Longest hypernym-path depth for every concept, with cycle detection.
fn compute_depths(concepts: &[Concept], parents: &[Vec<usize>]) -> CoreResult<Vec<usize>> {
    const UNVISITED: u8 = 0;
    const IN_PROGRESS: u8 = 1;
    const DONE: u8 = 2;

    let n = concepts.len();
    let mut state = vec![UNVISITED; n];
    let mut depth = vec![0usize; n];

    for root in 0..n {
        if state[root] == DONE {
            continue;
        }
        // Iterative post-order DFS over hypernym links.
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        state[root] = IN_PROGRESS;
        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            if next < parents[node].len() {
                top.1 += 1;
                let parent = parents[node][next];
                match state[parent] {
                    UNVISITED => {
                        state[parent] = IN_PROGRESS;
                        stack.push((parent, 0));
                    }
                    IN_PROGRESS => {
                        return Err(CoreError::Taxonomy(format!(
                            "hypernym cycle detected through '{}'",
                            concepts[parent]
                        )));
                    }
                    _ => {}
                }
            } else {
                depth[node] = parents[node]
                    .iter()
                    .map(|&p| depth[p] + 1)
                    .max()
                    .unwrap_or(0);
                state[node] = DONE;
                stack.pop();
            }
        }
    }
    Ok(depth)
}
