use crate::calendar::is_weekend;
use crate::error::CoreError;
use crate::models::{SupportAssignment, SupportDay, SupportStats};
use crate::repository::CsvRepository;
use crate::support::{bulk_assign, days, delete_range, lookup, stats, week_dates};
use chrono::NaiveDate;

impl super::SupportRepository for CsvRepository {
    fn support_for_week(&self, week: u32) -> Result<Vec<SupportDay>, CoreError> {
        let dates = week_dates(self.year, week)?;
        Ok(days(&self.support, &dates))
    }

    fn support_on(&self, date: NaiveDate) -> Option<&SupportAssignment> {
        lookup(&self.support, date)
    }

    fn assign_support(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        primary: Option<&str>,
        secondary: Option<&str>,
    ) -> Result<usize, CoreError> {
        for name in [primary, secondary].into_iter().flatten() {
            if !name.trim().is_empty() {
                self.check_member(name.trim())?;
            }
        }

        let table = bulk_assign(self.support.clone(), start, end, primary, secondary)?;
        let assigned = table
            .iter()
            .filter(|a| a.date >= start && a.date <= end && !is_weekend(a.date))
            .count();
        self.support = table;
        self.changed.support = true;
        Ok(assigned)
    }

    fn clear_support(&mut self, start: NaiveDate, end: NaiveDate) -> Result<usize, CoreError> {
        let (table, removed) = delete_range(self.support.clone(), start, end)?;
        self.support = table;
        if removed > 0 {
            self.changed.support = true;
        }
        Ok(removed)
    }

    fn support_stats(&self, today: NaiveDate) -> Vec<SupportStats> {
        stats(&self.support, &self.roster, today)
    }
}
