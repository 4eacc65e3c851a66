//! Shared application state handed to every worker.

use std::sync::Arc;

use object_store::ObjectStore;
use paceline_db::Db;

use crate::auth::Jwt;
use crate::config::S3Config;
use crate::repo::{ActivityRepo, UserRepo};
use crate::services::{ActivityService, AuthService, FileService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: UserService,
    pub activities: ActivityService,
    pub files: FileService,
}

impl AppState {
    pub fn new(db: Db, store: Arc<dyn ObjectStore>, jwt: Jwt, s3: &S3Config) -> Self {
        let user_repo = UserRepo::new(db.clone());
        let activity_repo = ActivityRepo::new(db);
        Self {
            auth: AuthService::new(user_repo.clone(), jwt),
            users: UserService::new(user_repo),
            activities: ActivityService::new(activity_repo),
            files: FileService::new(store, s3),
        }
    }
}
