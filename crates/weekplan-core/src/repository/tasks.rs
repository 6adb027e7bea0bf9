use crate::calendar::validate_week;
use crate::error::CoreError;
use crate::models::{EditedRow, NewTaskData, Task, TaskStatus, UpdateTaskData};
use crate::partition::{filter, merge_partition, sort_for_display, validate_fields, validate_rows};
use crate::repository::CsvRepository;
use crate::store::next_id;
use tracing::debug;

impl CsvRepository {
    fn task_mut(&mut self, id: u64) -> Result<&mut Task, CoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("No task with id {}", id)))
    }
}

impl super::TaskRepository for CsvRepository {
    fn add_task(&mut self, data: NewTaskData) -> Result<Task, CoreError> {
        let week = validate_week(data.week)?;
        validate_fields(&data.team_member, &data.label, &data.description, &self.roster)?;

        let task = Task {
            id: next_id(&self.tasks)?,
            week,
            team_member: data.team_member,
            label: data.label.trim().to_string(),
            description: data.description.trim().to_string(),
            status: data.status.unwrap_or_default(),
        };
        self.tasks.push(task.clone());
        self.changed.tasks = true;
        debug!(id = task.id, week, "task added");
        Ok(task)
    }

    fn find_task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn week_tasks(&self, week: u32, member: Option<&str>) -> Result<Vec<Task>, CoreError> {
        let mut tasks = filter(&self.tasks, Some(week), member)?;
        sort_for_display(&mut tasks);
        Ok(tasks)
    }

    fn update_task_status(&mut self, id: u64, status: TaskStatus) -> Result<Task, CoreError> {
        let task = self.task_mut(id)?;
        task.status = status;
        let task = task.clone();
        self.changed.tasks = true;
        Ok(task)
    }

    fn update_task(&mut self, id: u64, data: UpdateTaskData) -> Result<Task, CoreError> {
        let current = self
            .find_task(id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("No task with id {}", id)))?;

        let updated = Task {
            id,
            week: match data.week {
                Some(week) => validate_week(week)?,
                None => current.week,
            },
            team_member: data.team_member.unwrap_or(current.team_member),
            label: data.label.map_or(current.label, |l| l.trim().to_string()),
            description: data
                .description
                .map_or(current.description, |d| d.trim().to_string()),
            status: data.status.unwrap_or(current.status),
        };
        validate_fields(&updated.team_member, &updated.label, &updated.description, &self.roster)?;

        *self.task_mut(id)? = updated.clone();
        self.changed.tasks = true;
        Ok(updated)
    }

    fn delete_task(&mut self, id: u64) -> Result<Task, CoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("No task with id {}", id)))?;
        self.changed.tasks = true;
        Ok(self.tasks.remove(index))
    }

    fn replace_partition(
        &mut self,
        week: u32,
        member: Option<&str>,
        rows: Vec<EditedRow>,
    ) -> Result<Vec<Task>, CoreError> {
        validate_week(week)?;
        if let Some(member) = member {
            self.check_member(member)?;
        }
        validate_rows(&rows, &self.roster)?;

        let first_new = next_id(&self.tasks)?;
        self.tasks = merge_partition(self.tasks.clone(), week, member, rows)?;
        self.changed.tasks = true;

        Ok(self
            .tasks
            .iter()
            .filter(|t| t.id >= first_new)
            .cloned()
            .collect())
    }
}
