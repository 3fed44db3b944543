use crate::error::TaskboardError;
use crate::models::{NewProject, Project};
use crate::store::schema::{self, ProjectRecord};
use crate::store::{RemoteStore, Resource, StoreError};

/// Client-side list of projects. Projects are append-only.
pub struct ProjectCollection<S> {
    store: S,
    projects: Vec<Project>,
    load_failed: bool,
}

impl<S: RemoteStore> ProjectCollection<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            projects: Vec::new(),
            load_failed: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub async fn load(&mut self) -> Result<&[Project], TaskboardError> {
        let records = match self.fetch_projects().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "loading projects failed");
                self.load_failed = true;
                return Err(TaskboardError::fetch(Resource::Projects.as_str(), &e));
            }
        };
        self.projects = records.into_iter().map(ProjectRecord::into_project).collect();
        self.load_failed = false;
        tracing::info!(count = self.projects.len(), "projects loaded");
        Ok(&self.projects)
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        self.store
            .fetch_all(Resource::Projects)
            .await?
            .into_iter()
            .map(schema::decode_row)
            .collect()
    }

    pub async fn append(&mut self, new_project: &NewProject) -> Result<Project, TaskboardError> {
        let mut project = new_project.validate()?;

        let record = schema::encode_row(&ProjectRecord::for_append(&project))
            .map_err(|e| TaskboardError::append(Resource::Projects.as_str(), &e))?;
        let response = self
            .store
            .append_one(Resource::Projects, record)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, name = %project.name, "appending project failed");
                TaskboardError::append(Resource::Projects.as_str(), &e)
            })?;

        if let Some(id) = schema::assigned_id(response.as_ref()) {
            project.id = id;
        }
        self.projects.push(project.clone());
        Ok(project)
    }
}
