//! Map view of a cemetery: shapes, centers and status colors.

use serde::{Deserialize, Serialize};

use crate::cemetery::{PlotLocator, PlotStatus};
use crate::error::{ConflictError, PortalError};
use crate::geo::{BoundingBox, Coordinate, NavigationEstimate};
use crate::id::{BlockId, CemeteryId, PlotId, SectionId};
use crate::search::CemeteryTree;
use crate::stats::PlotStatusCounts;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapArea<Id> {
    pub id: Id,
    pub name: String,
    pub boundary: Vec<Coordinate>,
    pub center: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPlot {
    pub id: PlotId,
    pub locator: PlotLocator,
    pub status: PlotStatus,
    pub color: String,
    pub occupants: usize,
    pub center: Option<Coordinate>,
}

/// One legend row: a status, its color and how many plots have it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub status: PlotStatus,
    pub label: String,
    pub color: String,
    pub count: usize,
}

/// Everything the map page needs to draw a cemetery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CemeteryMap {
    pub cemetery_id: CemeteryId,
    pub name: String,
    pub center: Option<Coordinate>,
    /// Box around every drawn shape and plot marker, used to fit the viewport.
    pub bounds: Option<BoundingBox>,
    pub sections: Vec<MapArea<SectionId>>,
    pub blocks: Vec<MapArea<BlockId>>,
    pub plots: Vec<MapPlot>,
    pub legend: Vec<LegendEntry>,
}

impl CemeteryMap {
    #[must_use]
    pub fn from_tree(tree: &CemeteryTree) -> Self {
        let sections: Vec<MapArea<SectionId>> = tree
            .sections
            .iter()
            .map(|node| MapArea {
                id: node.section.id,
                name: node.section.name.clone(),
                boundary: node.section.boundary.clone(),
                center: node.section.center(),
            })
            .collect();

        let blocks: Vec<MapArea<BlockId>> = tree
            .sections
            .iter()
            .flat_map(|node| node.blocks.iter())
            .map(|node| MapArea {
                id: node.block.id,
                name: node.block.name.clone(),
                boundary: node.block.boundary.clone(),
                center: node.block.center(),
            })
            .collect();

        let mut counts = PlotStatusCounts::default();
        let plots: Vec<MapPlot> = tree
            .plots()
            .map(|path| {
                let plot = &path.node.plot;
                counts.add(plot.status);
                MapPlot {
                    id: plot.id,
                    locator: path.locator(),
                    status: plot.status,
                    color: plot.status.color().to_string(),
                    occupants: path.node.occupants.len(),
                    center: tree.center_of(&path),
                }
            })
            .collect();

        let legend = PlotStatus::ALL
            .iter()
            .map(|status| LegendEntry {
                status: *status,
                label: status.label().to_string(),
                color: status.color().to_string(),
                count: counts.get(*status),
            })
            .collect();

        let points = tree
            .cemetery
            .boundary
            .iter()
            .chain(tree.cemetery.location.iter())
            .chain(sections.iter().flat_map(|area| area.boundary.iter()))
            .chain(blocks.iter().flat_map(|area| area.boundary.iter()))
            .chain(plots.iter().filter_map(|plot| plot.center.as_ref()));

        Self {
            cemetery_id: tree.cemetery.id,
            name: tree.cemetery.name.clone(),
            center: tree.cemetery.center(),
            bounds: BoundingBox::from_points(points),
            sections,
            blocks,
            plots,
            legend,
        }
    }
}

/// Walking directions from a visitor's position to a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotDirections {
    pub plot_id: PlotId,
    pub cemetery_id: CemeteryId,
    pub locator: PlotLocator,
    pub estimate: NavigationEstimate,
}

impl PlotDirections {
    /// Directions from `from` to the best-known position of `plot_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the plot is not in `tree`, or
    /// [`ConflictError::PlotNotLocated`] when neither the plot nor any of its
    /// parents has a position.
    pub fn find(tree: &CemeteryTree, plot_id: PlotId, from: Coordinate) -> Result<Self, PortalError> {
        let path = tree
            .find_plot(plot_id)
            .ok_or_else(|| PortalError::not_found("Plot", plot_id))?;
        let to = tree
            .center_of(&path)
            .ok_or_else(|| ConflictError::PlotNotLocated {
                plot: plot_id.to_string(),
            })?;
        Ok(Self {
            plot_id,
            cemetery_id: tree.cemetery.id,
            locator: path.locator(),
            estimate: NavigationEstimate::between(from, to),
        })
    }
}
