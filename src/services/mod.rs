pub mod cache;
pub mod recommend_api;
pub mod recommender;
pub mod tmdb;

pub use recommend_api::RecommendClient;
pub use tmdb::TmdbClient;
