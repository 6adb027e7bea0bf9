use crate::error::CoreError;
use crate::models::{NewProjectData, OnHoldProject, TaskStatus};
use crate::partition::{filter_on_hold, validate_fields};
use crate::repository::CsvRepository;
use crate::store::next_id;

impl super::OnHoldRepository for CsvRepository {
    fn add_project(&mut self, data: NewProjectData) -> Result<OnHoldProject, CoreError> {
        validate_fields(&data.team_member, &data.label, &data.description, &self.roster)?;

        let project = OnHoldProject {
            id: next_id(&self.on_hold)?,
            team_member: data.team_member,
            label: data.label.trim().to_string(),
            description: data.description.trim().to_string(),
            status: data.status.unwrap_or_default(),
        };
        self.on_hold.push(project.clone());
        self.changed.on_hold = true;
        Ok(project)
    }

    fn find_project(&self, id: u64) -> Option<&OnHoldProject> {
        self.on_hold.iter().find(|p| p.id == id)
    }

    fn projects(&self, member: Option<&str>) -> Vec<OnHoldProject> {
        let mut projects = filter_on_hold(&self.on_hold, member);
        projects.sort_by(|a, b| {
            a.team_member
                .cmp(&b.team_member)
                .then_with(|| a.label.cmp(&b.label))
                .then_with(|| a.id.cmp(&b.id))
        });
        projects
    }

    fn update_project_status(&mut self, id: u64, status: TaskStatus) -> Result<OnHoldProject, CoreError> {
        let project = self
            .on_hold
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("No on-hold project with id {}", id)))?;
        project.status = status;
        let project = project.clone();
        self.changed.on_hold = true;
        Ok(project)
    }

    fn delete_project(&mut self, id: u64) -> Result<OnHoldProject, CoreError> {
        let index = self
            .on_hold
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("No on-hold project with id {}", id)))?;
        self.changed.on_hold = true;
        Ok(self.on_hold.remove(index))
    }
}
