//! Employee records
//!
//! An `Employee` can only be built through validating constructors, so any
//! value of the type holds a non-empty name, a real calendar date and one of
//! the two recognized genders.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::dates::{self, DateStrategy};
use crate::core::errors::ValidationError;

/// Gender as stored in the `gender` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Canonical text form written to the database
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("male") {
            Ok(Gender::Male)
        } else if trimmed.eq_ignore_ascii_case("female") {
            Ok(Gender::Female)
        } else {
            Err(ValidationError::InvalidGender(s.to_string()))
        }
    }
}

/// One employee as held in memory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Employee {
    full_name: String,
    birth_date: NaiveDate,
    gender: Gender,
}

impl Employee {
    /// Build a record from already typed parts; the name is trimmed and must
    /// not be empty
    pub fn new(
        full_name: impl Into<String>,
        birth_date: NaiveDate,
        gender: Gender,
    ) -> Result<Self, ValidationError> {
        let full_name: String = full_name.into();
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        Ok(Employee {
            full_name: full_name.to_string(),
            birth_date,
            gender,
        })
    }

    /// Build a record whose name is known to be non-empty
    pub(crate) fn from_generated(full_name: String, birth_date: NaiveDate, gender: Gender) -> Self {
        debug_assert!(!full_name.trim().is_empty());
        Employee {
            full_name,
            birth_date,
            gender,
        }
    }

    /// Validate three raw strings (name, ISO date, gender) into a record
    pub fn parse(full_name: &str, birth_date: &str, gender: &str) -> Result<Self, ValidationError> {
        let birth_date = DateStrategy::Parser.parse(birth_date.trim())?;
        let gender = gender.parse::<Gender>()?;
        Employee::new(full_name, birth_date, gender)
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Birth date in the stored `YYYY-MM-DD` form
    pub fn birth_date_iso(&self) -> String {
        dates::format_iso(self.birth_date)
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Age in whole years as of today
    pub fn age(&self) -> i32 {
        self.age_on(dates::today())
    }

    /// Age in whole years as of the given date
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        dates::age_on(self.birth_date, today)
    }

    /// Attach the age as of `today`
    pub fn with_age_on(self, today: NaiveDate) -> AgedEmployee {
        let age = self.age_on(today);
        AgedEmployee {
            employee: self,
            age,
        }
    }
}

/// A record read back from the store together with its derived age
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgedEmployee {
    #[serde(flatten)]
    pub employee: Employee,
    pub age: i32,
}

impl AgedEmployee {
    pub fn full_name(&self) -> &str {
        self.employee.full_name()
    }

    /// The (name, birth date, gender) triple used for deduplication
    pub fn key(&self) -> (&str, NaiveDate, Gender) {
        (
            self.employee.full_name(),
            self.employee.birth_date(),
            self.employee.gender(),
        )
    }
}
