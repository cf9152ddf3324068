pub mod delete_job;
pub mod list_jobs;
pub mod my_jobs;
pub mod post_job;
pub mod update_job;
