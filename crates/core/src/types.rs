/// Project primary keys are caller-chosen slugs. They double as the
/// storage folder name under `projects/`.
pub type ProjectId = String;
