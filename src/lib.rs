pub mod components;
pub mod schedulers;
pub mod search_space;
