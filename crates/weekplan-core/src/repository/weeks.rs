use crate::calendar::validate_week;
use crate::error::CoreError;
use crate::models::WeekEntry;
use crate::propagation::carry_forward;
use crate::repository::CsvRepository;
use tracing::info;

impl super::WeekRepository for CsvRepository {
    fn weeks(&self) -> Vec<u32> {
        let mut weeks: Vec<u32> = self.weeks.iter().map(|w| w.week).collect();
        weeks.sort_unstable();
        weeks
    }

    fn create_week(&mut self, week: u32) -> Result<usize, CoreError> {
        let week = validate_week(week)?;
        if self.weeks.iter().any(|w| w.week == week) {
            return Err(CoreError::InvalidInput(format!(
                "Week {} has already been created",
                week
            )));
        }

        let before = self.tasks.len();
        self.tasks = carry_forward(self.tasks.clone(), week)?;
        let carried = self.tasks.len() - before;

        self.weeks.push(WeekEntry { week });
        self.weeks.sort_by_key(|w| w.week);
        self.changed.weeks = true;
        if carried > 0 {
            self.changed.tasks = true;
        }

        info!(week, carried, "week created");
        Ok(carried)
    }

    fn delete_week(&mut self, week: u32) -> Result<(), CoreError> {
        let index = self
            .weeks
            .iter()
            .position(|w| w.week == week)
            .ok_or_else(|| CoreError::NotFound(format!("Week {} has not been created", week)))?;
        self.weeks.remove(index);
        self.changed.weeks = true;
        Ok(())
    }
}
