use serde::{Deserialize, Serialize};

/// Base URL for metadata API images
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Paged response wrapper used by the metadata API list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Movie entry as returned by trending/popular list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Series entry as returned by the top-rated list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Full movie record from the detail endpoint, kept verbatim from the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

/// Browse-feed movie payload: a summary plus the presentation fields the
/// client used to derive itself (genre names, image URLs)
#[derive(Debug, Clone, Serialize)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub genre_names: Vec<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub vote_average: Option<f64>,
}

impl From<MovieSummary> for MovieCard {
    fn from(movie: MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            release_date: movie.release_date,
            genre_names: movie.genre_ids.iter().map(|&id| genre_name(id).to_string()).collect(),
            poster_url: image_url(movie.poster_path.as_deref(), "w500"),
            backdrop_url: image_url(movie.backdrop_path.as_deref(), "original"),
            vote_average: movie.vote_average,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesCard {
    pub id: u64,
    pub name: String,
    pub overview: Option<String>,
    pub first_air_date: Option<String>,
    pub genre_names: Vec<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub vote_average: Option<f64>,
}

impl From<SeriesSummary> for SeriesCard {
    fn from(series: SeriesSummary) -> Self {
        Self {
            id: series.id,
            name: series.name,
            overview: series.overview,
            first_air_date: series.first_air_date,
            genre_names: series.genre_ids.iter().map(|&id| genre_name(id).to_string()).collect(),
            poster_url: image_url(series.poster_path.as_deref(), "w500"),
            backdrop_url: image_url(series.backdrop_path.as_deref(), "original"),
            vote_average: series.vote_average,
        }
    }
}

/// Detail payload with the raw record plus derived presentation fields
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetailView {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub runtime_display: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
}

impl From<MovieDetails> for MovieDetailView {
    fn from(details: MovieDetails) -> Self {
        let runtime_display = format_runtime(details.runtime);
        let poster_url = image_url(details.poster_path.as_deref(), "w500");
        let backdrop_url = image_url(details.backdrop_path.as_deref(), "original");
        Self {
            details,
            runtime_display,
            poster_url,
            backdrop_url,
        }
    }
}

/// Builds a full image URL for an API-relative image path
pub fn image_url(path: Option<&str>, size: &str) -> Option<String> {
    path.map(|p| format!("{}{}{}", IMAGE_BASE_URL, size, p))
}

/// Formats a runtime in minutes as `"2 hr 28 min"`
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(minutes) if minutes > 0 => format!("{} hr {} min", minutes / 60, minutes % 60),
        _ => String::new(),
    }
}

/// Maps a metadata API genre id to its display name
pub fn genre_name(genre_id: u32) -> &'static str {
    match genre_id {
        28 => "Action",
        12 => "Adventure",
        16 => "Animation",
        35 => "Comedy",
        80 => "Crime",
        99 => "Documentary",
        18 => "Drama",
        10751 => "Family",
        14 => "Fantasy",
        36 => "History",
        27 => "Horror",
        10402 => "Music",
        9648 => "Mystery",
        10749 => "Romance",
        878 => "Sci-Fi",
        10770 => "TV Movie",
        53 => "Thriller",
        10752 => "War",
        37 => "Western",
        _ => "Unknown",
    }
}

/// Picks the video to play as the trailer: the first YouTube `Trailer` or
/// `Teaser`, falling back to the first YouTube video of any type.
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && (v.video_type == "Trailer" || v.video_type == "Teaser"))
        .or_else(|| videos.iter().find(|v| v.site == "YouTube"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, site: &str, video_type: &str) -> Video {
        Video {
            id: id.to_string(),
            key: format!("key-{id}"),
            name: format!("video {id}"),
            site: site.to_string(),
            video_type: video_type.to_string(),
        }
    }

    #[test]
    fn format_runtime_splits_hours_and_minutes() {
        assert_eq!(format_runtime(Some(148)), "2 hr 28 min");
        assert_eq!(format_runtime(Some(59)), "0 hr 59 min");
    }

    #[test]
    fn format_runtime_is_empty_without_minutes() {
        assert_eq!(format_runtime(None), "");
        assert_eq!(format_runtime(Some(0)), "");
    }

    #[test]
    fn genre_name_maps_known_and_unknown_ids() {
        assert_eq!(genre_name(878), "Sci-Fi");
        assert_eq!(genre_name(28), "Action");
        assert_eq!(genre_name(424242), "Unknown");
    }

    #[test]
    fn image_url_prefixes_base_and_size() {
        assert_eq!(
            image_url(Some("/abc.jpg"), "w500"),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg".to_string())
        );
        assert_eq!(image_url(None, "w500"), None);
    }

    #[test]
    fn pick_trailer_prefers_youtube_trailer() {
        let videos = vec![
            video("1", "YouTube", "Featurette"),
            video("2", "Vimeo", "Trailer"),
            video("3", "YouTube", "Trailer"),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.id.as_str()), Some("3"));
    }

    #[test]
    fn pick_trailer_accepts_teaser() {
        let videos = vec![video("1", "YouTube", "Clip"), video("2", "YouTube", "Teaser")];
        assert_eq!(pick_trailer(&videos).map(|v| v.id.as_str()), Some("2"));
    }

    #[test]
    fn pick_trailer_falls_back_to_first_youtube_video() {
        let videos = vec![video("1", "Vimeo", "Trailer"), video("2", "YouTube", "Clip")];
        assert_eq!(pick_trailer(&videos).map(|v| v.id.as_str()), Some("2"));
    }

    #[test]
    fn pick_trailer_yields_none_without_youtube_videos() {
        let videos = vec![video("1", "Vimeo", "Trailer")];
        assert!(pick_trailer(&videos).is_none());
    }

    #[test]
    fn movie_card_derives_presentation_fields() {
        let summary = MovieSummary {
            id: 27205,
            title: "Inception".to_string(),
            overview: Some("A thief who steals corporate secrets.".to_string()),
            release_date: Some("2010-07-15".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
            genre_ids: vec![28, 878],
            vote_average: Some(8.4),
        };

        let card = MovieCard::from(summary);
        assert_eq!(card.genre_names, vec!["Action", "Sci-Fi"]);
        assert_eq!(
            card.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert!(card.backdrop_url.is_none());
    }

    #[test]
    fn detail_view_flattens_raw_record() {
        let details = MovieDetails {
            id: 27205,
            title: "Inception".to_string(),
            overview: None,
            release_date: Some("2010-07-15".to_string()),
            runtime: Some(148),
            genres: vec![Genre { id: 878, name: "Science Fiction".to_string() }],
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
        };

        let view = serde_json::to_value(MovieDetailView::from(details)).unwrap();
        assert_eq!(view["id"], 27205);
        assert_eq!(view["runtime_display"], "2 hr 28 min");
        assert_eq!(view["genres"][0]["name"], "Science Fiction");
    }
}
