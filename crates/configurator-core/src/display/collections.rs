//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{ConfiguratorSummary, Submission};

/// Newtype wrapper for displaying configurator listings.
///
/// # Examples
///
/// ```rust
/// use configurator_core::{display::ConfiguratorSummaries, models::ConfiguratorSummary};
/// use jiff::Timestamp;
///
/// let summary = ConfiguratorSummary {
///     id: 1,
///     slug: "veranda".to_string(),
///     name: "Veranda".to_string(),
///     description: None,
///     step_count: 3,
///     submission_count: 0,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = ConfiguratorSummaries(vec![summary]).to_string();
/// assert!(output.contains("Veranda (ID: 1, slug: `veranda`)"));
/// ```
pub struct ConfiguratorSummaries(pub Vec<ConfiguratorSummary>);

impl ConfiguratorSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfiguratorSummary> {
        self.0.iter()
    }
}

impl Index<usize> for ConfiguratorSummaries {
    type Output = ConfiguratorSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a ConfiguratorSummaries {
    type Item = &'a ConfiguratorSummary;
    type IntoIter = std::slice::Iter<'a, ConfiguratorSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ConfiguratorSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No configurators found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying submission listings, newest first.
pub struct Submissions(pub Vec<Submission>);

impl Submissions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Submission> {
        self.0.iter()
    }
}

impl Index<usize> for Submissions {
    type Output = Submission;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Submissions {
    type Item = &'a Submission;
    type IntoIter = std::slice::Iter<'a, Submission>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Submissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No submissions found.")
        } else {
            for submission in &self.0 {
                write!(f, "{submission}")?;
            }
            Ok(())
        }
    }
}
