//! Record flattening and filtering
//!
//! Turns the nested organization -> year -> project document into flat
//! records. Both entry points borrow their input and return lazy iterators,
//! so the same document can be transformed any number of times.

use crate::core::model::{Organization, OrganizationRecord, Project, StudentRecord};

/// Case-insensitive substring match.
///
/// An absent or empty pattern matches everything.
pub fn matches(value: &str, pattern: Option<&str>) -> bool {
    match pattern {
        None => true,
        Some(p) if p.is_empty() => true,
        Some(p) => value.to_lowercase().contains(&p.to_lowercase()),
    }
}

/// True if any element matches a non-empty pattern.
///
/// An absent or empty pattern matches even an empty list; a real pattern
/// never matches an empty one.
pub fn matches_any(values: &[String], pattern: Option<&str>) -> bool {
    match pattern {
        None => true,
        Some(p) if p.is_empty() => true,
        Some(_) => values.iter().any(|v| matches(v, pattern)),
    }
}

/// Optional filter criteria for the student export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact match on the year label
    pub year: Option<String>,
    pub organization: Option<String>,
    pub student: Option<String>,
    pub category: Option<String>,
    /// Matched against each of the organization's technologies
    pub technology: Option<String>,
    /// Matched against each of the organization's topics
    pub topic: Option<String>,
}

/// Trim a raw value and drop it if nothing is left
pub fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FilterCriteria {
    /// Build criteria from raw values, treating blank strings as absent
    pub fn new(
        year: Option<String>,
        organization: Option<String>,
        student: Option<String>,
        category: Option<String>,
        technology: Option<String>,
        topic: Option<String>,
    ) -> Self {
        Self {
            year: normalize(year),
            organization: normalize(organization),
            student: normalize(student),
            category: normalize(category),
            technology: normalize(technology),
            topic: normalize(topic),
        }
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self.values().next().is_none()
    }

    /// Present criterion values in year, organization, student, category,
    /// technology, topic order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        [
            &self.year,
            &self.organization,
            &self.student,
            &self.category,
            &self.technology,
            &self.topic,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
    }

    pub fn accepts_organization(&self, org: &Organization) -> bool {
        matches(&org.name, self.organization.as_deref())
            && matches(&org.category, self.category.as_deref())
            && matches_any(&org.topics, self.topic.as_deref())
            && matches_any(&org.technologies, self.technology.as_deref())
    }

    pub fn accepts_year(&self, label: &str) -> bool {
        match self.year.as_deref() {
            None | Some("") => true,
            Some(year) => year == label,
        }
    }

    pub fn accepts_project(&self, project: &Project) -> bool {
        matches(&project.student_name, self.student.as_deref())
    }
}

/// Flatten organizations into one student record per accepted project.
///
/// Organizations are checked first and skipped whole on a miss, then year
/// labels, then projects, each in document order.
pub fn flatten<'a>(
    organizations: &'a [Organization],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = StudentRecord> + 'a {
    organizations
        .iter()
        .filter(move |org| criteria.accepts_organization(org))
        .flat_map(move |org| {
            org.years
                .iter()
                .filter(move |entry| criteria.accepts_year(&entry.label))
                .flat_map(move |entry| {
                    entry
                        .data
                        .projects
                        .iter()
                        .filter(move |project| criteria.accepts_project(project))
                        .map(move |project| StudentRecord::new(org, &entry.label, project))
                })
        })
}

/// List organizations one row each, stamped with the requested year
pub fn list_organizations<'a>(
    organizations: &'a [Organization],
    year: &'a str,
) -> impl Iterator<Item = OrganizationRecord> + 'a {
    organizations
        .iter()
        .map(move |org| OrganizationRecord::new(year, org))
}
