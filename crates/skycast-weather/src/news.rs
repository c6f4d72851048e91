//! Weather headlines from NewsAPI.

use crate::provider::HttpClient;
use crate::types::{NewsArticle, WeatherError};
use serde::Deserialize;
use tracing::instrument;

pub const NEWS_API_BASE: &str = "https://newsapi.org/v2";

const NEWS_QUERY: &str = "weather";
const NEWS_LANGUAGE: &str = "en";
const NEWS_SORT: &str = "relevancy";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
struct ApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

impl From<ApiArticle> for NewsArticle {
    fn from(a: ApiArticle) -> Self {
        Self {
            title: a.title.unwrap_or_default(),
            description: a.description.unwrap_or_default(),
            url: a.url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
}

impl NewsClient {
    pub fn new(http: HttpClient, api_key: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: NEWS_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch weather articles in the service's relevance order.
    ///
    /// The list is not truncated here; the desktop shell shows the first five.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_weather_news(&self) -> Result<Vec<NewsArticle>, WeatherError> {
        tracing::info!("Fetching weather news...");

        let url = format!("{}/everything", self.base_url);
        let params = [
            ("q", NEWS_QUERY.to_string()),
            ("apiKey", self.api_key.clone()),
            ("language", NEWS_LANGUAGE.to_string()),
            ("sortBy", NEWS_SORT.to_string()),
        ];

        let body: NewsResponse = match self.http.get_json("news", &url, &params).await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("Error fetching weather news: {}", e);
                return Err(e);
            }
        };

        let articles: Vec<NewsArticle> = body.articles.into_iter().map(NewsArticle::from).collect();
        tracing::info!("Weather news fetched successfully ({} articles)", articles.len());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> NewsClient {
        NewsClient::new(HttpClient::new(None).unwrap(), "news_key").with_base_url(base_url)
    }

    #[tokio::test]
    async fn test_fetch_news_in_service_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("q", "weather"))
            .and(query_param("language", "en"))
            .and(query_param("sortBy", "relevancy"))
            .and(query_param("apiKey", "news_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "totalResults": 3,
                "articles": [
                    {"title": "Heatwave", "description": "Hot days ahead", "url": "https://news.test/1"},
                    {"title": "Storm", "description": null, "url": "https://news.test/2"},
                    {"title": "Snow", "description": "Early snow", "url": "https://news.test/3"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let articles = client(&mock_server.uri()).fetch_weather_news().await.unwrap();

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "Heatwave");
        assert_eq!(articles[1].description, "");
        assert_eq!(articles[2].url, "https://news.test/3");
    }

    #[tokio::test]
    async fn test_fetch_news_without_articles_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok"
            })))
            .mount(&mock_server)
            .await;

        let articles = client(&mock_server.uri()).fetch_weather_news().await.unwrap();

        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_news_rejected_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "status": "error",
                "code": "apiKeyInvalid"
            })))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri()).fetch_weather_news().await;

        assert!(matches!(result, Err(WeatherError::Status { service: "news", .. })));
    }
}
