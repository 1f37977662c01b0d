//! Cemetery search: a linear walk over a nested cemetery snapshot.
//!
//! The snapshot ([`CemeteryTree`]) nests cemetery → sections → blocks →
//! plots → occupants. Search lowercases the query, keeps plots and
//! occupants whose text contains it, and orders hits alphabetically by
//! label with the plot locator as tie-break. There is no index and no
//! relevance ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cemetery::{
    Assignment, Block, Cemetery, Deceased, Plot, PlotLocator, PlotStatus, Section,
};
use crate::geo::Coordinate;
use crate::id::{BlockId, CemeteryId, DeceasedId, PlotId, SectionId};
use crate::time::Date;

/// Number of hits returned when the query does not say.
pub const DEFAULT_LIMIT: usize = 50;

/// Upper bound on hits, whatever the query asks for.
pub const MAX_LIMIT: usize = 500;

/// A deceased person together with the assignment placing them in a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occupant {
    pub assignment: Assignment,
    pub deceased: Deceased,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotNode {
    pub plot: Plot,
    pub occupants: Vec<Occupant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub block: Block,
    pub plots: Vec<PlotNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    pub section: Section,
    pub blocks: Vec<BlockNode>,
}

/// Everything known about one cemetery, nested by layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CemeteryTree {
    pub cemetery: Cemetery,
    pub sections: Vec<SectionNode>,
}

/// A plot found in a tree, with the layout nodes above it.
#[derive(Debug, Clone, Copy)]
pub struct PlotPath<'a> {
    pub section: &'a Section,
    pub block: &'a Block,
    pub node: &'a PlotNode,
}

impl PlotPath<'_> {
    #[must_use]
    pub fn locator(&self) -> PlotLocator {
        PlotLocator {
            section: self.section.name.clone(),
            block: self.block.name.clone(),
            lot: self.node.plot.lot.clone(),
        }
    }
}

impl CemeteryTree {
    /// Assemble a tree from flat records.
    ///
    /// Records whose parent is not part of this cemetery are dropped.
    /// Sections, blocks and plots come out in natural name order.
    #[must_use]
    pub fn assemble(
        cemetery: Cemetery,
        sections: Vec<Section>,
        blocks: Vec<Block>,
        plots: Vec<Plot>,
        assignments: Vec<Assignment>,
        deceased: Vec<Deceased>,
    ) -> Self {
        let mut people: HashMap<DeceasedId, Deceased> =
            deceased.into_iter().map(|d| (d.id, d)).collect();

        let mut occupants_by_plot: HashMap<PlotId, Vec<Occupant>> = HashMap::new();
        for assignment in assignments {
            if let Some(deceased) = people.remove(&assignment.deceased_id) {
                occupants_by_plot
                    .entry(assignment.plot_id)
                    .or_default()
                    .push(Occupant {
                        assignment,
                        deceased,
                    });
            }
        }

        let mut plots_by_block: HashMap<BlockId, Vec<PlotNode>> = HashMap::new();
        for plot in plots {
            let mut occupants = occupants_by_plot.remove(&plot.id).unwrap_or_default();
            occupants.sort_by(|a, b| a.assignment.assigned_at.cmp(&b.assignment.assigned_at));
            plots_by_block
                .entry(plot.block_id)
                .or_default()
                .push(PlotNode { plot, occupants });
        }

        let mut blocks_by_section: HashMap<SectionId, Vec<BlockNode>> = HashMap::new();
        for block in blocks {
            let mut plots = plots_by_block.remove(&block.id).unwrap_or_default();
            plots.sort_by(|a, b| natural_cmp(&a.plot.lot, &b.plot.lot));
            blocks_by_section
                .entry(block.section_id)
                .or_default()
                .push(BlockNode { block, plots });
        }

        let mut sections: Vec<SectionNode> = sections
            .into_iter()
            .filter(|section| section.cemetery_id == cemetery.id)
            .map(|section| {
                let mut blocks = blocks_by_section.remove(&section.id).unwrap_or_default();
                blocks.sort_by(|a, b| natural_cmp(&a.block.name, &b.block.name));
                SectionNode { section, blocks }
            })
            .collect();
        sections.sort_by(|a, b| natural_cmp(&a.section.name, &b.section.name));

        Self { cemetery, sections }
    }

    /// Walk every plot in layout order.
    pub fn plots(&self) -> impl Iterator<Item = PlotPath<'_>> {
        self.sections.iter().flat_map(|section_node| {
            section_node.blocks.iter().flat_map(move |block_node| {
                block_node.plots.iter().map(move |node| PlotPath {
                    section: &section_node.section,
                    block: &block_node.block,
                    node,
                })
            })
        })
    }

    /// Find a plot by id.
    #[must_use]
    pub fn find_plot(&self, plot_id: PlotId) -> Option<PlotPath<'_>> {
        self.plots().find(|path| path.node.plot.id == plot_id)
    }

    /// Best-known map position for a plot: its own location, else the
    /// center of its block, its section, and finally the cemetery.
    #[must_use]
    pub fn center_of(&self, path: &PlotPath<'_>) -> Option<Coordinate> {
        path.node
            .plot
            .location
            .or_else(|| path.block.center())
            .or_else(|| path.section.center())
            .or_else(|| self.cemetery.center())
    }

    /// Search this cemetery only.
    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit> {
        search(std::slice::from_ref(self), query)
    }
}

/// Compare names so that "2" sorts before "10"; non-numeric names compare
/// case-insensitively.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Parameters of a search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free text matched against names and plot locators.
    #[serde(default)]
    pub text: String,
    /// Keep only plots in this status.
    pub status: Option<PlotStatus>,
    /// Keep only plots in the section with this name (case-insensitive).
    pub section: Option<String>,
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Free-text query with no filters.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Requested limit, defaulted and clamped to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    fn has_filter(&self) -> bool {
        self.status.is_some()
            || self
                .section
                .as_deref()
                .is_some_and(|section| !section.trim().is_empty())
    }
}

/// What part of the record matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The deceased person's name contained the text.
    Deceased,
    /// The plot locator contained the text, or only filters were given.
    Plot,
}

/// Short form of a deceased record embedded in a hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeceasedSummary {
    pub id: DeceasedId,
    pub full_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Date,
}

impl From<&Deceased> for DeceasedSummary {
    fn from(deceased: &Deceased) -> Self {
        Self {
            id: deceased.id,
            full_name: deceased.full_name(),
            date_of_birth: deceased.date_of_birth,
            date_of_death: deceased.date_of_death,
        }
    }
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: MatchKind,
    /// Text shown in result lists; also the sort key.
    pub label: String,
    pub cemetery_id: CemeteryId,
    pub cemetery_name: String,
    pub section_id: SectionId,
    pub block_id: BlockId,
    pub plot_id: PlotId,
    pub locator: PlotLocator,
    pub plot_status: PlotStatus,
    pub status_color: String,
    pub deceased: Option<DeceasedSummary>,
    pub center: Option<Coordinate>,
}

/// Search several cemeteries at once.
///
/// Empty text with no filter yields nothing. Empty text with a filter lists
/// every plot passing the filter.
#[must_use]
pub fn search(trees: &[CemeteryTree], query: &SearchQuery) -> Vec<SearchHit> {
    let needle = query.text.trim().to_lowercase();
    if needle.is_empty() && !query.has_filter() {
        return Vec::new();
    }
    let section_filter = query
        .section
        .as_deref()
        .map(|section| section.trim().to_lowercase())
        .filter(|section| !section.is_empty());

    let mut hits = Vec::new();
    for tree in trees {
        for path in tree.plots() {
            let plot = &path.node.plot;
            if query.status.is_some_and(|status| status != plot.status) {
                continue;
            }
            if let Some(wanted) = &section_filter
                && path.section.name.trim().to_lowercase() != *wanted
            {
                continue;
            }

            let locator = path.locator();
            let center = tree.center_of(&path);
            let hit = |kind, label: String, deceased: Option<DeceasedSummary>| SearchHit {
                kind,
                label,
                cemetery_id: tree.cemetery.id,
                cemetery_name: tree.cemetery.name.clone(),
                section_id: path.section.id,
                block_id: path.block.id,
                plot_id: plot.id,
                locator: locator.clone(),
                plot_status: plot.status,
                status_color: plot.status.color().to_string(),
                deceased,
                center,
            };

            let locator_text = locator.to_string();
            if needle.is_empty() || locator_text.to_lowercase().contains(&needle) {
                hits.push(hit(MatchKind::Plot, locator_text, None));
            }
            if needle.is_empty() {
                continue;
            }
            for occupant in &path.node.occupants {
                let name = occupant.deceased.full_name();
                if name.to_lowercase().contains(&needle) {
                    let summary = DeceasedSummary::from(&occupant.deceased);
                    hits.push(hit(MatchKind::Deceased, name, Some(summary)));
                }
            }
        }
    }

    hits.sort_by_cached_key(|hit| (hit.label.to_lowercase(), hit.locator.clone()));
    hits.truncate(query.effective_limit());
    hits
}
