//! Data Model
//!
//! Entities decoded from the GSoC organizations API and the flat records
//! produced from them. Every field carries a default applied at parse time,
//! so a missing or `null` key never reaches the filtering code.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Deserialize a value, mapping `null` to `T::default()`
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A participating organization
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Organization {
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_default")]
    pub category: String,

    #[serde(default, deserialize_with = "null_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_default")]
    pub url: String,

    /// Passed through as given; the API has served both numbers and strings
    #[serde(default, deserialize_with = "null_default")]
    pub num_projects: Value,

    #[serde(default, deserialize_with = "null_default")]
    pub projects_url: String,

    #[serde(default, deserialize_with = "null_default")]
    pub contact_email: String,

    #[serde(default, deserialize_with = "null_default")]
    pub mailing_list: String,

    #[serde(default, deserialize_with = "null_default")]
    pub irc_channel: String,

    #[serde(default, deserialize_with = "null_default")]
    pub twitter_url: String,

    #[serde(default, deserialize_with = "null_default")]
    pub blog_url: String,

    #[serde(default, deserialize_with = "null_default")]
    pub topics: Vec<String>,

    #[serde(default, deserialize_with = "null_default")]
    pub technologies: Vec<String>,

    /// Year label -> year data, in document order
    #[serde(default, deserialize_with = "year_entries")]
    pub years: Vec<YearEntry>,
}

/// One entry of an organization's `years` mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearEntry {
    pub label: String,
    pub data: YearData,
}

/// Participation data for a single year
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct YearData {
    #[serde(default, deserialize_with = "null_default")]
    pub projects: Vec<Project>,
}

/// A student project
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "null_default")]
    pub student_name: String,

    #[serde(default, deserialize_with = "null_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_default")]
    pub short_description: String,

    #[serde(default, deserialize_with = "null_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_default")]
    pub project_url: String,

    #[serde(default, deserialize_with = "null_default")]
    pub code_url: String,
}

/// Decode the `years` object into an ordered list.
///
/// `serde_json::Map` would sort the labels; visiting the map directly keeps
/// the order the API returned them in.
fn year_entries<'de, D>(deserializer: D) -> Result<Vec<YearEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct YearsVisitor;

    impl<'de> Visitor<'de> for YearsVisitor {
        type Value = Vec<YearEntry>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of year labels to year data")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((label, data)) = map.next_entry::<String, Option<YearData>>()? {
                entries.push(YearEntry {
                    label,
                    data: data.unwrap_or_default(),
                });
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(YearsVisitor)
}

/// An API response body.
///
/// The per-year endpoint wraps the list in an object, the all-years
/// endpoint returns the bare list. The shape is picked from the first token,
/// so a bad value inside an organization is reported with its position
/// instead of as a shape mismatch.
#[derive(Debug, Clone)]
pub enum Document {
    Organizations(Vec<Organization>),
    Listing { organizations: Vec<Organization> },
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of organizations or an object with an `organizations` key")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut organizations = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(org) = seq.next_element::<Organization>()? {
                    organizations.push(org);
                }
                Ok(Document::Organizations(organizations))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut organizations = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == "organizations" {
                        organizations = map
                            .next_value::<Option<Vec<Organization>>>()?
                            .unwrap_or_default();
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(Document::Listing { organizations })
            }
        }

        deserializer.deserialize_any(DocumentVisitor)
    }
}

impl Document {
    pub fn into_organizations(self) -> Vec<Organization> {
        match self {
            Document::Organizations(orgs) => orgs,
            Document::Listing { organizations } => organizations,
        }
    }
}

/// Join list values the way they appear in output cells
pub fn join_list(values: &[String]) -> String {
    values.join(", ")
}

/// Cell text for a pass-through scalar; strings lose their JSON quotes
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One row of the organization listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationRecord {
    pub year: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub url: String,
    pub num_projects: Value,
    pub projects_url: String,
    pub contact_email: String,
    pub mailing_list: String,
    pub irc_channel: String,
    pub twitter_url: String,
    pub blog_url: String,
    pub topics: String,
    pub technologies: String,
}

impl OrganizationRecord {
    pub fn new(year: &str, org: &Organization) -> Self {
        Self {
            year: year.to_string(),
            name: org.name.clone(),
            category: org.category.clone(),
            description: org.description.clone(),
            url: org.url.clone(),
            num_projects: match &org.num_projects {
                Value::Null => Value::from(0),
                value => value.clone(),
            },
            projects_url: org.projects_url.clone(),
            contact_email: org.contact_email.clone(),
            mailing_list: org.mailing_list.clone(),
            irc_channel: org.irc_channel.clone(),
            twitter_url: org.twitter_url.clone(),
            blog_url: org.blog_url.clone(),
            topics: join_list(&org.topics),
            technologies: join_list(&org.technologies),
        }
    }
}

/// One student project joined with its organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub year: String,
    pub organization_name: String,
    pub organization_category: String,
    pub student_name: String,
    pub project_title: String,
    pub project_short_description: String,
    pub project_description: String,
    pub project_url: String,
    pub code_url: String,
    pub organization_topics: String,
    pub organization_technologies: String,
}

impl StudentRecord {
    pub fn new(org: &Organization, year: &str, project: &Project) -> Self {
        Self {
            year: year.to_string(),
            organization_name: org.name.clone(),
            organization_category: org.category.clone(),
            student_name: project.student_name.clone(),
            project_title: project.title.clone(),
            project_short_description: project.short_description.clone(),
            project_description: project.description.clone(),
            project_url: project.project_url.clone(),
            code_url: project.code_url.clone(),
            organization_topics: join_list(&org.topics),
            organization_technologies: join_list(&org.technologies),
        }
    }
}
