//! Metadata API (TMDB) client used for browse feeds, detail hydration, and
//! trailer lookup.
//! API Documentation: <https://developer.themoviedb.org/reference/intro/getting-started>.

use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    cached,
    error::{AppError, AppResult},
    models::{MovieDetails, MovieSummary, Page, SeriesSummary, Video},
    services::cache::{CacheKey, QueryCache},
};

const FEED_CACHE_TTL: u64 = 300; // 5 minutes
const DETAIL_CACHE_TTL: u64 = 3600; // 1 hour

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: QueryCache,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            cache: QueryCache::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::not_found("Title not found"));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Metadata API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    pub async fn trending_movies(&self) -> AppResult<Vec<MovieSummary>> {
        let page: Page<MovieSummary> = cached!(
            self.cache,
            CacheKey::Feed("trending"),
            FEED_CACHE_TTL,
            self.get_json::<Page<MovieSummary>>("/trending/movie/day")
        )?;
        Ok(page.results)
    }

    pub async fn popular_movies(&self) -> AppResult<Vec<MovieSummary>> {
        let page: Page<MovieSummary> = cached!(
            self.cache,
            CacheKey::Feed("popular"),
            FEED_CACHE_TTL,
            self.get_json::<Page<MovieSummary>>("/movie/popular")
        )?;
        Ok(page.results)
    }

    pub async fn top_rated_series(&self) -> AppResult<Vec<SeriesSummary>> {
        let page: Page<SeriesSummary> = cached!(
            self.cache,
            CacheKey::Feed("top_rated_series"),
            FEED_CACHE_TTL,
            self.get_json::<Page<SeriesSummary>>("/tv/top_rated")
        )?;
        Ok(page.results)
    }

    pub async fn movie_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        cached!(
            self.cache,
            CacheKey::MovieDetails(movie_id),
            DETAIL_CACHE_TTL,
            self.get_json::<MovieDetails>(&format!("/movie/{}", movie_id))
        )
    }

    pub async fn movie_videos(&self, movie_id: u64) -> AppResult<Vec<Video>> {
        let page: Page<Video> = self
            .get_json(&format!("/movie/{}/videos", movie_id))
            .await?;
        Ok(page.results)
    }

    pub async fn series_videos(&self, series_id: u64) -> AppResult<Vec<Video>> {
        let page: Page<Video> = self.get_json(&format!("/tv/{}/videos", series_id)).await?;
        Ok(page.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_summary_deserializes_from_list_payload() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "overview": "A thief who steals corporate secrets.",
            "release_date": "2010-07-15",
            "poster_path": "/poster.jpg",
            "backdrop_path": "/backdrop.jpg",
            "genre_ids": [28, 878],
            "vote_average": 8.4,
            "adult": false
        }"#;

        let summary: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, 27205);
        assert_eq!(summary.title, "Inception");
        assert_eq!(summary.genre_ids, vec![28, 878]);
    }

    #[test]
    fn movie_details_tolerates_missing_optionals() {
        let json = r#"{"id": 27205, "title": "Inception"}"#;
        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.runtime, None);
        assert!(details.genres.is_empty());
    }

    #[test]
    fn video_list_deserializes_with_type_field() {
        let json = r#"{
            "results": [
                {"id": "v1", "key": "8hP9D6kZseM", "name": "Official Trailer", "site": "YouTube", "type": "Trailer"}
            ]
        }"#;

        let page: Page<Video> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results[0].video_type, "Trailer");
        assert_eq!(page.results[0].key, "8hP9D6kZseM");
    }

    #[test]
    fn series_summary_uses_name_and_first_air_date() {
        let json = r#"{"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"}"#;
        let summary: SeriesSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.name, "Breaking Bad");
        assert_eq!(summary.first_air_date.as_deref(), Some("2008-01-20"));
    }
}
