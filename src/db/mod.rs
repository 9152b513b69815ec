pub mod models;

pub use models::{
    find_user_by_username, get_current_site, get_or_create_config, init_db,
    insert_access_request, ApiAccessRequest, NewAccessRequest, RequestStatus, User,
};
