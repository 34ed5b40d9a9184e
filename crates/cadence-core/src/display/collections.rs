//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::datetime::LocalDate;
use crate::models::MarketingPlan;

/// Newtype wrapper for displaying the plan history, most recent first.
///
/// # Examples
///
/// ```rust
/// use cadence_core::display::History;
///
/// let history = History(Vec::new());
/// assert_eq!(history.to_string(), "No plans in history.\n");
/// ```
pub struct History(pub Vec<MarketingPlan>);

impl History {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plans in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan at the given index.
    pub fn get(&self, index: usize) -> Option<&MarketingPlan> {
        self.0.get(index)
    }

    /// Get an iterator over the plans.
    pub fn iter(&self) -> std::slice::Iter<'_, MarketingPlan> {
        self.0.iter()
    }
}

impl Index<usize> for History {
    type Output = MarketingPlan;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for History {
    type Item = MarketingPlan;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a MarketingPlan;
    type IntoIter = std::slice::Iter<'a, MarketingPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans in history.");
        }

        for (index, plan) in self.0.iter().enumerate() {
            let (done, total) = plan.completion();
            writeln!(f, "## {}. {} ({done}/{total})", index + 1, plan.title())?;
            writeln!(f)?;
            writeln!(f, "- **ID**: {}", plan.id)?;
            writeln!(
                f,
                "- **Industry**: {} / {}",
                plan.input.industry, plan.input.style
            )?;
            writeln!(f, "- **Generated**: {}", LocalDate(&plan.timestamp))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_plan;

    #[test]
    fn test_history_lists_plans_in_order() {
        let newer = sample_plan("花店");
        let mut older = sample_plan("咖啡廳");
        older.input.brand_name = "晨光咖啡".to_string();
        older.weeks[4].posts[1].is_completed = true;

        let history = History(vec![newer.clone(), older.clone()]);
        let output = history.to_string();

        assert_eq!(history.len(), 2);
        assert_eq!(history[1].id, older.id);
        assert!(output.contains("## 1. 花店 (0/22)"));
        assert!(output.contains("## 2. 晨光咖啡 (1/22)"));
        assert!(output.contains(&format!("- **ID**: {}", newer.id)));
        assert!(output.find("花店").unwrap() < output.find("晨光咖啡").unwrap());
    }
}
