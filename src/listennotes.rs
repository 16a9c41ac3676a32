use async_trait::async_trait;
use reqwest::{
    header::{HeaderName, HeaderValue},
    Url,
};
use serde::Deserialize;

use crate::{
    catalog::Catalog,
    config::Config,
    error::{Error, Result},
    http::Client as HttpClient,
    protocol::{
        self, genre::GenreId, podcast::Millis, Episode, Genres, PodcastDetail, PodcastPage,
        RandomPodcast, SearchPage,
    },
};

/// [`Catalog`] backed by the Listen Notes REST API.
pub struct ListenNotes {
    http_client: HttpClient,
    api_url: Url,
    api_key: HeaderValue,
}

impl ListenNotes {
    /// Header carrying the API key on every request.
    const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-listenapi-key");

    /// Episodes are requested in ascending order so that the
    /// `next_episode_pub_date` cursor grows towards the latest episode.
    const EPISODE_SORT: &'static str = "oldest_first";

    /// # Errors
    ///
    /// Will return `Err` if:
    /// - the API key cannot be sent as a header value
    /// - the HTTP client cannot be built
    pub fn new(config: &Config) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(config.api_key.as_str())?;
        api_key.set_sensitive(true);

        Ok(Self {
            http_client: HttpClient::new(config)?,
            api_url: config.api_url.clone(),
            api_key,
        })
    }

    /// Builds the url of `path` below the API base url.
    ///
    /// Each element of `path` becomes exactly one percent-encoded segment,
    /// so ids cannot escape their endpoint.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the API base url cannot take a path.
    fn url(&self, path: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::internal(format!("{} cannot be a base url", self.api_url)))?
            .pop_if_empty()
            .extend(path);

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// Performs a rate-limited GET and decodes the JSON reply.
    ///
    /// Every error is marked as a remote failure.
    ///
    /// # Errors
    ///
    /// Will return `Err` if:
    /// - the HTTP request fails
    /// - the provider replies with an error status
    /// - the reply cannot be parsed as `T`
    async fn request<T>(&self, path: &[&str], query: &[(&str, String)]) -> Result<T>
    where
        T: std::fmt::Debug + for<'de> Deserialize<'de>,
    {
        self.fetch(path, query).await.map_err(Error::into_remote)
    }

    async fn fetch<T>(&self, path: &[&str], query: &[(&str, String)]) -> Result<T>
    where
        T: std::fmt::Debug + for<'de> Deserialize<'de>,
    {
        let url = self.url(path, query)?;
        let path = path.join("/");
        debug!("GET {url}");

        let mut request = self.http_client.get(url);
        request
            .headers_mut()
            .insert(Self::API_KEY_HEADER, self.api_key.clone());

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{path}: {status}");
            return Err(status.into());
        }

        let body = response.text().await?;
        protocol::json(&body, &path)
    }
}

#[async_trait]
impl Catalog for ListenNotes {
    async fn all_categories(&self) -> Result<Genres> {
        self.request(&["genres"], &[]).await
    }

    async fn top_podcasts(&self, page: u32) -> Result<PodcastPage> {
        self.request(&["best_podcasts"], &[("page", page.to_string())])
            .await
    }

    async fn podcasts(&self, genre_id: GenreId, page: u32) -> Result<PodcastPage> {
        self.request(
            &["best_podcasts"],
            &[
                ("genre_id", genre_id.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn search_podcasts(&self, query: &str, offset: u32) -> Result<SearchPage> {
        self.request(
            &["search"],
            &[
                ("q", query.to_owned()),
                ("offset", offset.to_string()),
                ("type", "podcast".to_owned()),
            ],
        )
        .await
    }

    async fn podcast_info(&self, id: &str, cursor: Option<Millis>) -> Result<PodcastDetail> {
        let mut query = vec![("sort", Self::EPISODE_SORT.to_owned())];
        if let Some(cursor) = cursor {
            query.push(("next_episode_pub_date", cursor.to_string()));
        }

        self.request(&["podcasts", id], &query).await
    }

    async fn episode(&self, id: &str) -> Result<Episode> {
        self.request(&["episodes", id], &[]).await
    }

    async fn random_podcast(&self) -> Result<RandomPodcast> {
        self.request(&["just_listen"], &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> ListenNotes {
        let mut config = Config::with_api_key("key".parse().unwrap());
        config.api_url = api_url.parse().unwrap();
        ListenNotes::new(&config).unwrap()
    }

    #[test]
    fn urls_are_built_below_the_base() {
        let client = client("https://listen-api.example.com/api/v2");
        let url = client
            .url(
                &["best_podcasts"],
                &[("genre_id", "68".to_owned()), ("page", "2".to_owned())],
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://listen-api.example.com/api/v2/best_podcasts?genre_id=68&page=2"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_tolerated() {
        let client = client("https://listen-api.example.com/api/v2/");
        let url = client.url(&["genres"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://listen-api.example.com/api/v2/genres");
    }

    #[test]
    fn search_query_is_encoded() {
        let client = client("https://listen-api.example.com/api/v2");
        let url = client
            .url(&["search"], &[("q", "star & talk".to_owned())])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://listen-api.example.com/api/v2/search?q=star+%26+talk"
        );
    }

    #[test]
    fn ids_stay_inside_their_path_segment() {
        let client = client("https://listen-api.example.com/api/v2");
        let url = client
            .url(
                &["podcasts", "x/../../v1/admin?a=b#frag"],
                &[("sort", "oldest_first".to_owned())],
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://listen-api.example.com/api/v2/podcasts/x%2F..%2F..%2Fv1%2Fadmin%3Fa=b%23frag?sort=oldest_first"
        );
    }
}
