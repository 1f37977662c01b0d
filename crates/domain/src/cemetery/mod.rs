//! Cemetery records: the physical layout and who rests where.
//!
//! A [`Cemetery`] is divided into [`Section`]s, each section into
//! [`Block`]s, and each block into numbered [`Plot`]s. A [`Deceased`] record
//! is linked to a plot through an [`Assignment`].

mod assignment;
mod deceased;
mod layout;
mod plot;

pub use assignment::{Assignment, AssignmentBuilder};
pub use deceased::{Deceased, DeceasedBuilder};
pub use layout::{Block, BlockBuilder, Cemetery, CemeteryBuilder, Section, SectionBuilder};
pub use plot::{Plot, PlotBuilder, PlotKind, PlotLocator, PlotStatus};

/// Reject names that are empty once trimmed.
fn require_text(value: &str, field: &'static str) -> Result<(), crate::error::ValidationError> {
    if value.trim().is_empty() {
        return Err(crate::error::ValidationError::EmptyField(field));
    }
    Ok(())
}
