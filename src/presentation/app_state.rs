// Application state for HTTP handlers
use crate::application::auth_service::AuthService;
use crate::application::data_manager::DataManager;
use crate::application::navigation::NavigationController;
use crate::application::royalty_repository::RoyaltyRepository;
use std::sync::Arc;

pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub repository: Arc<dyn RoyaltyRepository>,
    pub navigation: Arc<NavigationController>,
    pub data_manager: Arc<DataManager>,
    pub fragment_dir: String,
}
