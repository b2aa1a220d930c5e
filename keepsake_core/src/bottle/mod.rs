//! Bottle collector - folded papers taken out of a bottle one at a time.

mod placement;

pub use placement::*;

use keepsake_rules::{Paper, PaperId};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BottleError {
    #[error("the bottle has no papers")]
    Empty,

    #[error("paper {0} appears more than once")]
    DuplicatePaper(PaperId),

    #[error("no paper with id {0}")]
    UnknownPaper(PaperId),

    #[error("paper {0} has already been collected")]
    AlreadyCollected(PaperId),
}

/// Result of collecting the open paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collected {
    pub paper: PaperId,
    pub collected: usize,
    pub complete: bool,
}

#[derive(Debug, Clone)]
pub struct Bottle {
    papers: Vec<Paper>,
    placements: HashMap<PaperId, Placement>,
    /// Collection box, in the order papers were collected.
    collection: Vec<PaperId>,
    collected: HashSet<PaperId>,
    open: Option<PaperId>,
}

impl Bottle {
    /// Fill the bottle with `papers`, each given a random placement.
    pub fn new<R: Rng + ?Sized>(papers: Vec<Paper>, rng: &mut R) -> Result<Self, BottleError> {
        if papers.is_empty() {
            return Err(BottleError::Empty);
        }
        let mut ids = HashSet::new();
        for paper in &papers {
            if !ids.insert(paper.id) {
                return Err(BottleError::DuplicatePaper(paper.id));
            }
        }

        let mut bottle = Self {
            papers,
            placements: HashMap::new(),
            collection: Vec::new(),
            collected: HashSet::new(),
            open: None,
        };
        bottle.shake(rng);
        Ok(bottle)
    }

    pub fn total(&self) -> usize {
        self.papers.len()
    }

    pub fn collected_count(&self) -> usize {
        self.collection.len()
    }

    pub fn is_complete(&self) -> bool {
        self.collection.len() == self.papers.len()
    }

    pub fn is_collected(&self, id: PaperId) -> bool {
        self.collected.contains(&id)
    }

    /// Papers still in the bottle.
    pub fn pool(&self) -> impl Iterator<Item = &Paper> {
        self.papers.iter().filter(|p| !self.collected.contains(&p.id))
    }

    /// Papers in the collection box, oldest first.
    pub fn collection(&self) -> impl Iterator<Item = &Paper> {
        self.collection.iter().filter_map(|id| self.paper(*id))
    }

    pub fn placement(&self, id: PaperId) -> Option<&Placement> {
        self.placements.get(&id)
    }

    /// The paper shown in the detail view.
    pub fn open_paper(&self) -> Option<&Paper> {
        self.open.and_then(|id| self.paper(id))
    }

    fn paper(&self, id: PaperId) -> Option<&Paper> {
        self.papers.iter().find(|p| p.id == id)
    }

    /// Show paper `id` in the detail view, replacing whatever was open.
    pub fn open(&mut self, id: PaperId) -> Result<&Paper, BottleError> {
        if self.collected.contains(&id) {
            return Err(BottleError::AlreadyCollected(id));
        }
        let index = self
            .papers
            .iter()
            .position(|p| p.id == id)
            .ok_or(BottleError::UnknownPaper(id))?;

        self.open = Some(id);
        debug!(paper = %id, "paper opened");
        Ok(&self.papers[index])
    }

    /// Move the open paper into the collection box. No-op when nothing is open.
    pub fn collect(&mut self) -> Option<Collected> {
        let id = self.open.take()?;

        self.collected.insert(id);
        self.collection.push(id);
        self.placements.remove(&id);

        let outcome = Collected {
            paper: id,
            collected: self.collection.len(),
            complete: self.is_complete(),
        };
        if outcome.complete {
            info!("all papers collected");
        }
        Some(outcome)
    }

    /// Close the detail view without collecting. Returns whether a paper was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Re-randomise the placement of every paper still in the bottle.
    pub fn shake<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let total = self.papers.len();
        for (index, paper) in self.papers.iter().enumerate() {
            if self.collected.contains(&paper.id) {
                continue;
            }
            self.placements
                .insert(paper.id, Placement::random(index, total, rng));
        }
    }

    pub fn progress_label(&self) -> String {
        format!("{}/{} papers collected", self.collection.len(), self.papers.len())
    }

    /// Acknowledgement shown once every paper is collected.
    pub fn completion_message(&self) -> Option<&'static str> {
        self.is_complete()
            .then_some("🎉 Congratulations! You've collected all our precious memories!")
    }
}
