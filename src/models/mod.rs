pub mod media;
pub mod recommendation;
pub mod watched;

pub use media::{
    format_runtime, genre_name, image_url, pick_trailer, Genre, MovieCard, MovieDetailView,
    MovieDetails, MovieSummary, Page, SeriesCard, SeriesSummary, Video,
};
pub use recommendation::{RecommendationOutcome, RecommendationResponse, ScoredTitle};
pub use watched::{MediaKind, WatchedItem};
