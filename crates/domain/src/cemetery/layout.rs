//! Cemetery, section and block: the nested layout above plots.

use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::PortalError;
use crate::geo::{self, Coordinate};
use crate::id::{BlockId, CemeteryId, SectionId};

/// A burial ground managed by the municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cemetery {
    pub id: CemeteryId,
    pub name: String,
    pub address: Option<String>,
    /// Entrance or reference point shown on the map.
    pub location: Option<Coordinate>,
    pub boundary: Vec<Coordinate>,
}

impl Cemetery {
    /// Create a builder for constructing a [`Cemetery`].
    #[must_use]
    pub fn builder() -> CemeteryBuilder {
        CemeteryBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when `name` is blank or a
    /// coordinate is out of range.
    pub fn validate(&self) -> Result<(), PortalError> {
        require_text(&self.name, "name")?;
        if let Some(location) = &self.location {
            location.validate()?;
        }
        geo::validate_boundary(&self.boundary)?;
        Ok(())
    }

    /// Map anchor: the explicit location, else the center of the boundary.
    #[must_use]
    pub fn center(&self) -> Option<Coordinate> {
        self.location
            .or_else(|| geo::geometry_center(&self.boundary))
    }
}

/// Step-by-step builder for [`Cemetery`].
#[derive(Debug, Default)]
pub struct CemeteryBuilder {
    id: Option<CemeteryId>,
    name: Option<String>,
    address: Option<String>,
    location: Option<Coordinate>,
    boundary: Vec<Coordinate>,
}

impl CemeteryBuilder {
    #[must_use]
    pub fn id(mut self, id: CemeteryId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn boundary(mut self, boundary: Vec<Coordinate>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Consume the builder, validate, and return a [`Cemetery`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if `name` is missing or blank, or a
    /// coordinate is out of range.
    pub fn build(self) -> Result<Cemetery, PortalError> {
        let cemetery = Cemetery {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            address: self.address,
            location: self.location,
            boundary: self.boundary,
        };
        cemetery.validate()?;
        Ok(cemetery)
    }
}

/// A named division of a cemetery (e.g. "A", "Garden of Peace").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub cemetery_id: CemeteryId,
    pub name: String,
    pub boundary: Vec<Coordinate>,
}

impl Section {
    /// Create a builder for a section of `cemetery_id`.
    #[must_use]
    pub fn builder(cemetery_id: CemeteryId) -> SectionBuilder {
        SectionBuilder {
            id: None,
            cemetery_id,
            name: None,
            boundary: Vec::new(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when `name` is blank or a boundary
    /// vertex is out of range.
    pub fn validate(&self) -> Result<(), PortalError> {
        require_text(&self.name, "name")?;
        geo::validate_boundary(&self.boundary)?;
        Ok(())
    }

    /// Center of the section boundary, if one was drawn.
    #[must_use]
    pub fn center(&self) -> Option<Coordinate> {
        geo::geometry_center(&self.boundary)
    }
}

/// Step-by-step builder for [`Section`].
#[derive(Debug)]
pub struct SectionBuilder {
    id: Option<SectionId>,
    cemetery_id: CemeteryId,
    name: Option<String>,
    boundary: Vec<Coordinate>,
}

impl SectionBuilder {
    #[must_use]
    pub fn id(mut self, id: SectionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn boundary(mut self, boundary: Vec<Coordinate>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Consume the builder, validate, and return a [`Section`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Section, PortalError> {
        let section = Section {
            id: self.id.unwrap_or_default(),
            cemetery_id: self.cemetery_id,
            name: self.name.unwrap_or_default(),
            boundary: self.boundary,
        };
        section.validate()?;
        Ok(section)
    }
}

/// A group of plots inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub section_id: SectionId,
    pub name: String,
    pub boundary: Vec<Coordinate>,
}

impl Block {
    /// Create a builder for a block of `section_id`.
    #[must_use]
    pub fn builder(section_id: SectionId) -> BlockBuilder {
        BlockBuilder {
            id: None,
            section_id,
            name: None,
            boundary: Vec::new(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when `name` is blank or a boundary
    /// vertex is out of range.
    pub fn validate(&self) -> Result<(), PortalError> {
        require_text(&self.name, "name")?;
        geo::validate_boundary(&self.boundary)?;
        Ok(())
    }

    /// Center of the block boundary, if one was drawn.
    #[must_use]
    pub fn center(&self) -> Option<Coordinate> {
        geo::geometry_center(&self.boundary)
    }
}

/// Step-by-step builder for [`Block`].
#[derive(Debug)]
pub struct BlockBuilder {
    id: Option<BlockId>,
    section_id: SectionId,
    name: Option<String>,
    boundary: Vec<Coordinate>,
}

impl BlockBuilder {
    #[must_use]
    pub fn id(mut self, id: BlockId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn boundary(mut self, boundary: Vec<Coordinate>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Consume the builder, validate, and return a [`Block`].
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Block, PortalError> {
        let block = Block {
            id: self.id.unwrap_or_default(),
            section_id: self.section_id,
            name: self.name.unwrap_or_default(),
            boundary: self.boundary,
        };
        block.validate()?;
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn square(lat: f64, lon: f64) -> Vec<Coordinate> {
        vec![
            Coordinate::new(lat, lon).unwrap(),
            Coordinate::new(lat + 0.002, lon).unwrap(),
            Coordinate::new(lat + 0.002, lon + 0.002).unwrap(),
            Coordinate::new(lat, lon + 0.002).unwrap(),
        ]
    }

    #[test]
    fn should_build_cemetery_when_name_provided() {
        let cemetery = Cemetery::builder()
            .name("North Memorial Park")
            .address("1 Memorial Rd")
            .build()
            .unwrap();
        assert_eq!(cemetery.name, "North Memorial Park");
        assert_eq!(cemetery.address.as_deref(), Some("1 Memorial Rd"));
    }

    #[test]
    fn should_return_validation_error_when_name_is_blank() {
        let result = Cemetery::builder().name("   ").build();
        assert!(matches!(
            result,
            Err(PortalError::Validation(ValidationError::EmptyField("name")))
        ));
    }

    #[test]
    fn should_reject_boundary_vertex_out_of_range() {
        let result = Cemetery::builder()
            .name("Bad")
            .boundary(vec![Coordinate {
                latitude: 120.0,
                longitude: 0.0,
            }])
            .build();
        assert!(matches!(
            result,
            Err(PortalError::Validation(
                ValidationError::InvalidCoordinate { .. }
            ))
        ));
    }

    #[test]
    fn should_prefer_location_over_boundary_center() {
        let location = Coordinate::new(1.0, 1.0).unwrap();
        let cemetery = Cemetery::builder()
            .name("Central")
            .location(location)
            .boundary(square(10.0, 10.0))
            .build()
            .unwrap();
        assert_eq!(cemetery.center(), Some(location));
    }

    #[test]
    fn should_fall_back_to_boundary_center() {
        let cemetery = Cemetery::builder()
            .name("Central")
            .boundary(square(10.0, 10.0))
            .build()
            .unwrap();
        let center = cemetery.center().unwrap();
        assert!((center.latitude - 10.001).abs() < 1e-9);
        assert!((center.longitude - 10.001).abs() < 1e-9);
    }

    #[test]
    fn should_build_section_and_block_under_parents() {
        let cemetery_id = CemeteryId::new();
        let section = Section::builder(cemetery_id).name("A").build().unwrap();
        let block = Block::builder(section.id).name("3").build().unwrap();
        assert_eq!(section.cemetery_id, cemetery_id);
        assert_eq!(block.section_id, section.id);
        assert!(block.center().is_none());
    }

    #[test]
    fn should_reject_unnamed_block() {
        let result = Block::builder(SectionId::new()).build();
        assert!(result.is_err());
    }
}
