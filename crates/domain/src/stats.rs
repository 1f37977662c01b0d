//! Counting and aggregation for cemetery and dashboard statistics.

use serde::{Deserialize, Serialize};

use crate::cemetery::{Plot, PlotStatus};
use crate::id::{CemeteryId, SectionId};
use crate::permit::{Permit, PermitStatus};
use crate::reservation::{Reservation, ReservationStatus};
use crate::search::CemeteryTree;
use crate::service_request::{RequestStatus, ServiceRequest};
use crate::time::Timestamp;

/// Plot totals per occupancy status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotStatusCounts {
    pub total: usize,
    pub available: usize,
    pub reserved: usize,
    pub occupied: usize,
    pub unavailable: usize,
}

impl PlotStatusCounts {
    pub fn from_plots<'a>(plots: impl IntoIterator<Item = &'a Plot>) -> Self {
        plots.into_iter().fold(Self::default(), |mut counts, plot| {
            counts.add(plot.status);
            counts
        })
    }

    pub fn add(&mut self, status: PlotStatus) {
        self.total += 1;
        match status {
            PlotStatus::Available => self.available += 1,
            PlotStatus::Reserved => self.reserved += 1,
            PlotStatus::Occupied => self.occupied += 1,
            PlotStatus::Unavailable => self.unavailable += 1,
        }
    }

    #[must_use]
    pub fn get(&self, status: PlotStatus) -> usize {
        match status {
            PlotStatus::Available => self.available,
            PlotStatus::Reserved => self.reserved,
            PlotStatus::Occupied => self.occupied,
            PlotStatus::Unavailable => self.unavailable,
        }
    }

    /// Share of plots that are occupied, in `[0, 1]`; zero when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn occupancy_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.occupied as f64 / self.total as f64
        }
    }
}

/// Counts for one section of a cemetery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStats {
    pub section_id: SectionId,
    pub name: String,
    pub blocks: usize,
    pub plots: PlotStatusCounts,
    pub occupancy_rate: f64,
}

/// Counts for one cemetery, broken down by section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CemeteryStats {
    pub cemetery_id: CemeteryId,
    pub name: String,
    pub sections: Vec<SectionStats>,
    pub plots: PlotStatusCounts,
    pub occupancy_rate: f64,
    pub interments: usize,
}

impl CemeteryStats {
    /// Reduce a snapshot into counts. Sections keep the tree order.
    #[must_use]
    pub fn from_tree(tree: &CemeteryTree) -> Self {
        let sections: Vec<SectionStats> = tree
            .sections
            .iter()
            .map(|node| {
                let plots = PlotStatusCounts::from_plots(
                    node.blocks
                        .iter()
                        .flat_map(|block| block.plots.iter().map(|p| &p.plot)),
                );
                SectionStats {
                    section_id: node.section.id,
                    name: node.section.name.clone(),
                    blocks: node.blocks.len(),
                    plots,
                    occupancy_rate: plots.occupancy_rate(),
                }
            })
            .collect();

        let plots = PlotStatusCounts::from_plots(tree.plots().map(|path| &path.node.plot));
        let interments = tree.plots().map(|path| path.node.occupants.len()).sum();

        Self {
            cemetery_id: tree.cemetery.id,
            name: tree.cemetery.name.clone(),
            sections,
            plots,
            occupancy_rate: plots.occupancy_rate(),
            interments,
        }
    }
}

/// Permit totals per review status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub cancelled: usize,
}

impl PermitCounts {
    #[must_use]
    pub fn from_permits(permits: &[Permit]) -> Self {
        permits.iter().fold(Self::default(), |mut counts, permit| {
            counts.total += 1;
            match permit.status {
                PermitStatus::Pending => counts.pending += 1,
                PermitStatus::Approved => counts.approved += 1,
                PermitStatus::Rejected => counts.rejected += 1,
                PermitStatus::Cancelled => counts.cancelled += 1,
            }
            counts
        })
    }
}

/// Reservation totals relative to a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationCounts {
    pub total: usize,
    pub pending: usize,
    /// Confirmed and not yet finished at the reference time.
    pub upcoming_confirmed: usize,
    pub cancelled: usize,
}

impl ReservationCounts {
    #[must_use]
    pub fn from_reservations(reservations: &[Reservation], at: Timestamp) -> Self {
        reservations
            .iter()
            .fold(Self::default(), |mut counts, reservation| {
                counts.total += 1;
                match reservation.status {
                    ReservationStatus::Pending => counts.pending += 1,
                    ReservationStatus::Confirmed if reservation.ends_at > at => {
                        counts.upcoming_confirmed += 1;
                    }
                    ReservationStatus::Confirmed => {}
                    ReservationStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }
}

/// Service request totals per work state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequestCounts {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
    pub urgent_active: usize,
}

impl ServiceRequestCounts {
    #[must_use]
    pub fn from_requests(requests: &[ServiceRequest]) -> Self {
        requests.iter().fold(Self::default(), |mut counts, request| {
            counts.total += 1;
            match request.status {
                RequestStatus::Open => counts.open += 1,
                RequestStatus::InProgress => counts.in_progress += 1,
                RequestStatus::Resolved => counts.resolved += 1,
                RequestStatus::Closed => counts.closed += 1,
            }
            if request.is_urgent_and_active() {
                counts.urgent_active += 1;
            }
            counts
        })
    }
}

/// Portal-wide overview shown on the staff dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub cemeteries: usize,
    pub plots: PlotStatusCounts,
    pub occupancy_rate: f64,
    pub deceased: usize,
    pub permits: PermitCounts,
    pub facilities: usize,
    pub reservations: ReservationCounts,
    pub service_requests: ServiceRequestCounts,
    pub generated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cemetery::{Block, Cemetery, Section};
    use crate::id::{BlockId, DeceasedId, FacilityId};
    use crate::permit::{PermitDecision, PermitKind};
    use crate::service_request::ServiceCategory;
    use crate::time::{now, parse_timestamp};

    fn plot(status: PlotStatus) -> Plot {
        Plot::builder(BlockId::new())
            .lot("1")
            .status(status)
            .build()
            .unwrap()
    }

    #[test]
    fn should_count_plots_by_status() {
        let plots = [
            plot(PlotStatus::Available),
            plot(PlotStatus::Occupied),
            plot(PlotStatus::Occupied),
            plot(PlotStatus::Reserved),
        ];
        let counts = PlotStatusCounts::from_plots(&plots);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.get(PlotStatus::Occupied), 2);
        assert_eq!(counts.unavailable, 0);
        assert!((counts.occupancy_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_report_zero_occupancy_when_empty() {
        assert!(PlotStatusCounts::default().occupancy_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn should_break_cemetery_down_by_section() {
        let cemetery = Cemetery::builder().name("Hillside").build().unwrap();
        let a = Section::builder(cemetery.id).name("A").build().unwrap();
        let b = Section::builder(cemetery.id).name("B").build().unwrap();
        let block_a = Block::builder(a.id).name("1").build().unwrap();
        let block_b = Block::builder(b.id).name("1").build().unwrap();
        let mut plots = vec![
            Plot::builder(block_a.id).lot("1").build().unwrap(),
            Plot::builder(block_a.id).lot("2").build().unwrap(),
            Plot::builder(block_b.id).lot("1").build().unwrap(),
        ];
        plots[2].status = PlotStatus::Occupied;

        let tree = CemeteryTree::assemble(
            cemetery,
            vec![a, b],
            vec![block_a, block_b],
            plots,
            vec![],
            vec![],
        );
        let stats = CemeteryStats::from_tree(&tree);

        assert_eq!(stats.plots.total, 3);
        assert_eq!(stats.sections.len(), 2);
        assert_eq!(stats.sections[0].name, "A");
        assert_eq!(stats.sections[0].plots.available, 2);
        assert!((stats.sections[1].occupancy_rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(stats.interments, 0);
    }

    #[test]
    fn should_count_permits_by_status() {
        let make = || {
            Permit::builder(PermitKind::Cremation, DeceasedId::new())
                .applicant_name("A")
                .applicant_contact("B")
                .build()
                .unwrap()
        };
        let mut approved = make();
        approved
            .decide(PermitDecision::Approve, None, now())
            .unwrap();
        let counts = PermitCounts::from_permits(&[make(), make(), approved]);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.approved, 1);
    }

    #[test]
    fn should_only_count_unfinished_confirmed_reservations_as_upcoming() {
        let reference = parse_timestamp("2026-07-04T12:00:00Z").unwrap();
        let make = |from: &str, to: &str, status| {
            let mut r = Reservation::builder(FacilityId::new())
                .reserved_by("A")
                .contact("B")
                .period(parse_timestamp(from).unwrap(), parse_timestamp(to).unwrap())
                .build()
                .unwrap();
            r.status = status;
            r
        };
        let reservations = [
            make("2026-07-04T08:00:00Z", "2026-07-04T10:00:00Z", ReservationStatus::Confirmed),
            make("2026-07-04T11:00:00Z", "2026-07-04T13:00:00Z", ReservationStatus::Confirmed),
            make("2026-07-05T08:00:00Z", "2026-07-05T10:00:00Z", ReservationStatus::Pending),
            make("2026-07-05T08:00:00Z", "2026-07-05T10:00:00Z", ReservationStatus::Cancelled),
        ];
        let counts = ReservationCounts::from_reservations(&reservations, reference);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.upcoming_confirmed, 1);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.cancelled, 1);
    }

    #[test]
    fn should_count_urgent_active_requests() {
        let make = |category| {
            ServiceRequest::builder(category)
                .description("d")
                .address("a")
                .reporter("r", "c")
                .build()
                .unwrap()
        };
        let mut resolved_flood = make(ServiceCategory::Flooding);
        resolved_flood
            .transition(RequestStatus::InProgress, now())
            .unwrap();
        resolved_flood
            .transition(RequestStatus::Resolved, now())
            .unwrap();

        let counts = ServiceRequestCounts::from_requests(&[
            make(ServiceCategory::Flooding),
            make(ServiceCategory::MeterIssue),
            resolved_flood,
        ]);
        assert_eq!(counts.open, 2);
        assert_eq!(counts.resolved, 1);
        assert_eq!(counts.urgent_active, 1);
    }
}
