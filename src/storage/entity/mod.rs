pub mod business;
pub mod category;
pub mod checkin;
pub mod friend;
pub mod neighborhood;
pub mod review;
pub mod user;

pub use business::Entity as Business;
pub use category::Entity as Category;
pub use checkin::Entity as Checkin;
pub use friend::Entity as Friend;
pub use neighborhood::Entity as Neighborhood;
pub use review::Entity as Review;
pub use user::Entity as User;
