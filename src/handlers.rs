pub mod admin;
pub mod blog;
pub mod pages;

pub use admin::{admin_blog, admin_home, create_form, delete_post, edit_form, save_post};
pub use blog::{blog_index, blog_view};
pub use pages::{about, health_check, home, links};
