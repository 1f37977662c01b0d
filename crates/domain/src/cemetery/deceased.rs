//! Deceased: the civil record of a person interred or cremated.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::{PortalError, ValidationError};
use crate::id::DeceasedId;
use crate::time::Date;

/// A deceased person as recorded by the civil registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deceased {
    pub id: DeceasedId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Date,
    pub cause_of_death: Option<String>,
}

impl Deceased {
    /// Create a builder for constructing a [`Deceased`] record.
    #[must_use]
    pub fn builder() -> DeceasedBuilder {
        DeceasedBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] when a name is blank or the date
    /// of birth falls after the date of death.
    pub fn validate(&self) -> Result<(), PortalError> {
        require_text(&self.first_name, "first_name")?;
        require_text(&self.last_name, "last_name")?;
        if self
            .date_of_birth
            .is_some_and(|born| born > self.date_of_death)
        {
            return Err(ValidationError::BirthAfterDeath.into());
        }
        Ok(())
    }

    /// "First Middle Last", skipping a missing or blank middle name.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self.middle_name.as_deref().map(str::trim) {
            Some(middle) if !middle.is_empty() => {
                format!("{} {} {}", self.first_name, middle, self.last_name)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Completed years of life, when the birth date is known.
    #[must_use]
    pub fn age_at_death(&self) -> Option<i32> {
        let born = self.date_of_birth?;
        let died = self.date_of_death;
        let mut age = died.year() - born.year();
        if (died.month(), died.day()) < (born.month(), born.day()) {
            age -= 1;
        }
        Some(age)
    }
}

/// Step-by-step builder for [`Deceased`].
#[derive(Debug, Default)]
pub struct DeceasedBuilder {
    id: Option<DeceasedId>,
    first_name: Option<String>,
    middle_name: Option<String>,
    last_name: Option<String>,
    date_of_birth: Option<Date>,
    date_of_death: Option<Date>,
    cause_of_death: Option<String>,
}

impl DeceasedBuilder {
    #[must_use]
    pub fn id(mut self, id: DeceasedId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn date_of_birth(mut self, date: Date) -> Self {
        self.date_of_birth = Some(date);
        self
    }

    #[must_use]
    pub fn date_of_death(mut self, date: Date) -> Self {
        self.date_of_death = Some(date);
        self
    }

    #[must_use]
    pub fn cause_of_death(mut self, cause: impl Into<String>) -> Self {
        self.cause_of_death = Some(cause.into());
        self
    }

    /// Consume the builder, validate, and return a [`Deceased`] record.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Validation`] if a name or the date of death is
    /// missing, or the dates are inconsistent.
    pub fn build(self) -> Result<Deceased, PortalError> {
        let date_of_death = self
            .date_of_death
            .ok_or(ValidationError::EmptyField("date_of_death"))?;
        let deceased = Deceased {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            middle_name: self.middle_name,
            last_name: self.last_name.unwrap_or_default(),
            date_of_birth: self.date_of_birth,
            date_of_death,
            cause_of_death: self.cause_of_death,
        };
        deceased.validate()?;
        Ok(deceased)
    }
}
