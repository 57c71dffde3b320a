//! # Data Models
//!
//! SeaORM entities for advertisements, categories, their join table, brands
//! and the users that own them.

pub mod adv_category;
pub mod adv_summary;
pub mod brand;
pub mod category;
pub mod user;

pub use adv_category::Entity as AdvCategory;
pub use adv_summary::Entity as AdvSummary;
pub use brand::Entity as Brand;
pub use category::Entity as Category;
pub use user::Entity as User;
