//! Research DAG gating buildable kinds and garrison upgrades.

use serde::{Deserialize, Serialize};

use crate::error::TechError;

/// Research that raises the garrison damage scale.
pub const REINFORCED_ROUNDS: &str = "reinforced_rounds";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tech {
    pub id: String,
    /// Research points.
    pub cost: u32,
    pub prereqs: Vec<String>,
}

impl Tech {
    pub fn new(id: &str, cost: u32, prereqs: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            cost,
            prereqs: prereqs.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Default research nodes.
pub fn default_techs() -> Vec<Tech> {
    vec![
        Tech::new("armor", 1, &[]),
        Tech::new("heavy_ordnance", 1, &[]),
        Tech::new("emp_research", 2, &["heavy_ordnance"]),
        Tech::new(REINFORCED_ROUNDS, 2, &["armor"]),
    ]
}

/// Tracks which techs are unlocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechTree {
    techs: Vec<Tech>,
    unlocked: Vec<String>,
}

impl Default for TechTree {
    fn default() -> Self {
        Self {
            techs: default_techs(),
            unlocked: Vec::new(),
        }
    }
}

impl TechTree {
    /// Build a tree, rejecting duplicate ids, unknown prerequisites and cycles.
    pub fn new(techs: Vec<Tech>) -> Result<Self, TechError> {
        for (i, tech) in techs.iter().enumerate() {
            if techs[..i].iter().any(|t| t.id == tech.id) {
                return Err(TechError::DuplicateId(tech.id.clone()));
            }
        }
        for tech in &techs {
            for prereq in &tech.prereqs {
                if !techs.iter().any(|t| &t.id == prereq) {
                    return Err(TechError::UnknownPrereq {
                        tech: tech.id.clone(),
                        prereq: prereq.clone(),
                    });
                }
            }
        }
        let tree = Self {
            techs,
            unlocked: Vec::new(),
        };
        tree.check_acyclic()?;
        Ok(tree)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.techs.iter().position(|t| t.id == id)
    }

    /// Depth-first search with white/grey/black marks.
    fn check_acyclic(&self) -> Result<(), TechError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(tree: &TechTree, i: usize, marks: &mut [Mark]) -> Result<(), TechError> {
            match marks[i] {
                Mark::Done => return Ok(()),
                Mark::InProgress => return Err(TechError::Cycle(tree.techs[i].id.clone())),
                Mark::Unvisited => {}
            }
            marks[i] = Mark::InProgress;
            for prereq in &tree.techs[i].prereqs {
                if let Some(j) = tree.index_of(prereq) {
                    visit(tree, j, marks)?;
                }
            }
            marks[i] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.techs.len()];
        for i in 0..self.techs.len() {
            visit(self, i, &mut marks)?;
        }
        Ok(())
    }

    pub fn techs(&self) -> &[Tech] {
        &self.techs
    }

    pub fn get(&self, id: &str) -> Option<&Tech> {
        self.techs.iter().find(|t| t.id == id)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    /// Unknown and already-unlocked techs are never unlockable.
    pub fn can_unlock(&self, id: &str, points: u32) -> bool {
        self.check_unlock(id, points).is_ok()
    }

    /// Unlock `id`, spending its cost from `points`.
    pub fn unlock(&mut self, id: &str, points: &mut u32) -> Result<(), TechError> {
        let cost = self.check_unlock(id, *points)?;
        *points -= cost;
        self.unlocked.push(id.to_string());
        tracing::info!(tech = id, cost, "research unlocked");
        Ok(())
    }

    fn check_unlock(&self, id: &str, points: u32) -> Result<u32, TechError> {
        let tech = self
            .get(id)
            .ok_or_else(|| TechError::UnknownTech(id.to_string()))?;
        if self.is_unlocked(id) {
            return Err(TechError::AlreadyUnlocked(id.to_string()));
        }
        if let Some(missing) = tech.prereqs.iter().find(|p| !self.is_unlocked(p)) {
            return Err(TechError::MissingPrereq {
                tech: id.to_string(),
                prereq: missing.clone(),
            });
        }
        if points < tech.cost {
            return Err(TechError::InsufficientPoints {
                have: points,
                need: tech.cost,
            });
        }
        Ok(tech.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tree_is_valid() {
        assert!(TechTree::new(default_techs()).is_ok());
        let tree = TechTree::default();
        assert!(!tree.is_unlocked("armor"));
    }

    #[test]
    fn rejects_duplicates_unknown_prereqs_and_cycles() {
        let dup = vec![Tech::new("a", 1, &[]), Tech::new("a", 2, &[])];
        assert_eq!(
            TechTree::new(dup).unwrap_err(),
            TechError::DuplicateId("a".into())
        );

        let unknown = vec![Tech::new("a", 1, &["ghost"])];
        assert!(matches!(
            TechTree::new(unknown),
            Err(TechError::UnknownPrereq { .. })
        ));

        let cycle = vec![
            Tech::new("a", 1, &["c"]),
            Tech::new("b", 1, &["a"]),
            Tech::new("c", 1, &["b"]),
        ];
        assert!(matches!(TechTree::new(cycle), Err(TechError::Cycle(_))));
    }

    #[test]
    fn unlock_requires_prereqs_and_points() {
        let mut tree = TechTree::default();
        let mut points = 5;
        assert!(!tree.can_unlock("emp_research", points));
        assert!(matches!(
            tree.unlock("emp_research", &mut points),
            Err(TechError::MissingPrereq { .. })
        ));

        tree.unlock("heavy_ordnance", &mut points).unwrap();
        assert_eq!(points, 4);
        assert!(tree.can_unlock("emp_research", points));
        assert!(!tree.can_unlock("emp_research", 1));

        tree.unlock("emp_research", &mut points).unwrap();
        assert_eq!(points, 2);
        assert!(tree.is_unlocked("emp_research"));
        assert_eq!(
            tree.unlock("emp_research", &mut points),
            Err(TechError::AlreadyUnlocked("emp_research".into()))
        );
        assert!(!tree.can_unlock("nope", 100));
    }
}
