//! Product lookup command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::mobase::{pipeline, MobaseClient, ProductFetch, ProductRecord};
use anyhow::{Context, Result};
use tracing::info;

/// Executes a product lookup by article number.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a product by article number and returns formatted output.
    pub async fn execute(&self, article: &str) -> Result<String> {
        let client = MobaseClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, article).await
    }

    /// Fetches a product with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ProductFetch,
        article: &str,
    ) -> Result<String> {
        let article = validate_article(article)?;

        info!("Looking up product: {}", article);

        let record = pipeline::scrape_product(client, &article).await;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_record(&record))
    }

    /// Fetches multiple products by article number.
    pub async fn execute_batch(&self, articles: &[String]) -> Result<String> {
        let client = MobaseClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_batch_with_client(&client, articles).await
    }

    /// Fetches multiple products with a provided client (for testing).
    pub async fn execute_batch_with_client(
        &self,
        client: &impl ProductFetch,
        articles: &[String],
    ) -> Result<String> {
        let mut records: Vec<ProductRecord> = Vec::new();

        for article in articles {
            let article = match validate_article(article) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Skipping invalid article number: {}", e);
                    continue;
                }
            };

            info!("Looking up product: {}", article);
            records.push(pipeline::scrape_product(client, &article).await);
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_records(&records))
    }
}

/// Normalizes and validates an article number (alphanumeric, 6 to 20 characters).
fn validate_article(article: &str) -> Result<String> {
    let article = article.trim().to_uppercase();
    if article.len() < 6
        || article.len() > 20
        || !article.chars().all(|c| c.is_ascii_alphanumeric())
    {
        anyhow::bail!(
            "Invalid article number: '{}'. Expected 6-20 alphanumeric characters.",
            article
        );
    }
    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::mobase::FetchError;
    use async_trait::async_trait;

    /// Mock catalog client for testing.
    struct MockClient {
        html: String,
        fail_with: Option<fn() -> FetchError>,
    }

    impl MockClient {
        fn new(html: impl Into<String>) -> Self {
            Self { html: html.into(), fail_with: None }
        }

        fn failing(fail_with: fn() -> FetchError) -> Self {
            Self { html: String::new(), fail_with: Some(fail_with) }
        }
    }

    #[async_trait]
    impl ProductFetch for MockClient {
        async fn product_page(&self, _article: &str) -> Result<String, FetchError> {
            match self.fail_with {
                Some(make_err) => Err(make_err()),
                None => Ok(self.html.clone()),
            }
        }

        fn product_url(&self, article: &str) -> String {
            format!("https://www.mymobase.com/de/p/{}", article)
        }
    }

    fn make_test_config() -> Config {
        Config { delay_ms: 0, delay_jitter_ms: 0, ..Config::default() }
    }

    fn make_product_html(material: &str, weight: &str) -> String {
        format!(
            r#"<html><head><title>Bremsscheibe | MoBase</title></head><body>
                <table>
                    <tr><td>Werkstoff</td><td>{}</td></tr>
                    <tr><td>Gewicht</td><td>{}</td></tr>
                </table>
            </body></html>"#,
            material, weight
        )
    }

    #[test]
    fn test_article_validation() {
        assert_eq!(validate_article("A2V00001234567").unwrap(), "A2V00001234567");
        assert_eq!(validate_article("  a2v001  ").unwrap(), "A2V001");

        assert!(validate_article("A2V").is_err());
        assert!(validate_article("A2V-0000-1234").is_err());
        assert!(validate_article("A2V000012345678901234567").is_err());
    }

    #[tokio::test]
    async fn test_product_command_basic() {
        let client = MockClient::new(make_product_html("Stahl C45", "2,5 kg"));
        let cmd = ProductCommand::new(make_test_config());

        let output = cmd.execute_with_client(&client, "A2V00001234567").await.unwrap();
        assert!(output.contains("A2V00001234567"));
        assert!(output.contains("Stahl C45"));
        assert!(output.contains("2,5 kg"));
        assert!(output.contains("Erfolgreich"));
    }

    #[tokio::test]
    async fn test_product_command_invalid_article() {
        let client = MockClient::new(String::new());
        let cmd = ProductCommand::new(make_test_config());

        let result = cmd.execute_with_client(&client, "BAD").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid article number"));
    }

    #[tokio::test]
    async fn test_product_command_article_normalized() {
        let client = MockClient::new(make_product_html("Stahl", "1 kg"));
        let cmd = ProductCommand::new(make_test_config());

        let output = cmd.execute_with_client(&client, "  a2v00001234567  ").await.unwrap();
        assert!(output.contains("A2V00001234567"));
    }

    #[tokio::test]
    async fn test_product_command_fetch_failure_reported_in_record() {
        let client = MockClient::failing(|| FetchError::NotFound);
        let cmd = ProductCommand::new(make_test_config());

        // Fetch failures are not command errors; they land in the record status.
        let output = cmd.execute_with_client(&client, "A2V9999999").await.unwrap();
        assert!(output.contains("Produkt nicht gefunden (404)"));
    }

    #[tokio::test]
    async fn test_product_command_transport_failure_sets_error_type() {
        let client = MockClient::failing(|| FetchError::Transport("connection refused".into()));
        let mut config = make_test_config();
        config.format = OutputFormat::Json;
        let cmd = ProductCommand::new(config);

        let output = cmd.execute_with_client(&client, "A2V9999999").await.unwrap();
        assert!(output.contains("Fehler: connection refused"));
        assert!(output.contains("TransportError"));
    }

    #[tokio::test]
    async fn test_product_command_json_format() {
        let client = MockClient::new(make_product_html("Stahl", "1 kg"));
        let mut config = make_test_config();
        config.format = OutputFormat::Json;
        let cmd = ProductCommand::new(config);

        let output = cmd.execute_with_client(&client, "A2V00001234567").await.unwrap();
        assert!(output.starts_with('{'));
        assert!(output.contains("\"identifier\""));
        assert!(output.contains("\"materialClassificationAssessment\""));
    }

    #[tokio::test]
    async fn test_product_command_markdown_format() {
        let client = MockClient::new(make_product_html("Stahl", "1 kg"));
        let mut config = make_test_config();
        config.format = OutputFormat::Markdown;
        let cmd = ProductCommand::new(config);

        let output = cmd.execute_with_client(&client, "A2V00001234567").await.unwrap();
        assert!(output.contains("## Bremsscheibe"));
        assert!(output.contains("**Werkstoff:** Stahl"));
    }

    #[tokio::test]
    async fn test_product_command_batch() {
        let client = MockClient::new(make_product_html("Stahl", "1 kg"));
        let cmd = ProductCommand::new(make_test_config());

        let articles = vec!["A2V00001234567".to_string(), "A2V00007654321".to_string()];
        let output = cmd.execute_batch_with_client(&client, &articles).await.unwrap();
        assert!(output.contains("A2V00001234567"));
        assert!(output.contains("A2V00007654321"));
        assert!(output.contains("Total: 2 records"));
    }

    #[tokio::test]
    async fn test_product_command_batch_skips_invalid() {
        let client = MockClient::new(make_product_html("Stahl", "1 kg"));
        let cmd = ProductCommand::new(make_test_config());

        let articles = vec![
            "A2V00001234567".to_string(),
            "BAD".to_string(),
            "A2V00007654321".to_string(),
        ];
        let output = cmd.execute_batch_with_client(&client, &articles).await.unwrap();
        assert!(output.contains("Total: 2 records"));
    }

    #[tokio::test]
    async fn test_product_command_batch_mixes_failures_and_successes() {
        // Batch keeps going after a fetch failure; the failed record
        // carries the error status.
        let client = MockClient::failing(|| FetchError::HttpStatus(503));
        let mut config = make_test_config();
        config.format = OutputFormat::Json;
        let cmd = ProductCommand::new(config);

        let articles = vec!["A2V00001234567".to_string()];
        let output = cmd.execute_batch_with_client(&client, &articles).await.unwrap();
        assert!(output.contains("HTTP-Fehler: 503"));
    }
}
