//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::AfdianClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::Transport;
use crate::pagination::PageRequest;
use serde_json::Value;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its result to stdout
    pub async fn run(&self) -> Result<()> {
        let client = AfdianClient::from_config(self.client_config()?)?;
        let output = self.execute(&client).await?;
        println!("{}", render(&output, self.cli.format)?);
        Ok(())
    }

    /// Config file (if any) with command-line overrides applied
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_yaml_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(user_id) = &self.cli.user_id {
            config.user_id.clone_from(user_id);
        }
        if let Some(token) = &self.cli.token {
            config.token.clone_from(token);
        }
        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(secs) = self.cli.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(max_pages) = self.cli.max_pages {
            config.max_pages = max_pages;
        }

        config.validate()?;
        Ok(config)
    }

    /// Execute the command against `client` and return what should be printed
    pub async fn execute<T: Transport>(&self, client: &AfdianClient<T>) -> Result<Value> {
        match &self.cli.command {
            Commands::Order { out_trade_no } => {
                client.query_order_by_out_trade_no(out_trade_no).await
            }
            Commands::Orders { all: true, .. } => {
                Ok(Value::Array(client.get_all_orders().await?))
            }
            Commands::Orders { page, per_page, .. } => {
                client
                    .list_orders_page(PageRequest::new(*page, *per_page))
                    .await
            }
            Commands::Sponsors { all: true, .. } => {
                Ok(Value::Array(client.get_all_sponsors().await?))
            }
            Commands::Sponsors { page, per_page, .. } => {
                client
                    .list_sponsors_page(PageRequest::new(*page, *per_page))
                    .await
            }
        }
    }
}

/// Serialize `value` for output; non-ASCII text is kept as-is
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use clap::Parser;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner(args: &[&str]) -> Runner {
        let mut argv = vec!["afdian"];
        argv.extend_from_slice(args);
        Runner::new(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["afdian", "orders"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Orders {
                page: 1,
                per_page: 50,
                all: false
            }
        );
        assert_eq!(cli.format, OutputFormat::Pretty);

        let cli = Cli::try_parse_from(["afdian", "sponsors", "--all"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Sponsors {
                page: 1,
                per_page: 20,
                all: true
            }
        );
    }

    #[test]
    fn test_parse_order_requires_number() {
        assert!(Cli::try_parse_from(["afdian", "order"]).is_err());

        let cli = Cli::try_parse_from(["afdian", "order", "2021062321"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Order {
                out_trade_no: "2021062321".to_string()
            }
        );
    }

    #[test]
    fn test_client_config_from_flags() {
        let config = runner(&[
            "--user-id",
            "u1",
            "--token",
            "tok",
            "--max-pages",
            "5",
            "orders",
        ])
        .client_config()
        .unwrap();

        assert_eq!(config.user_id, "u1");
        assert_eq!(config.token, "tok");
        assert_eq!(config.max_pages, 5);
    }

    #[test]
    fn test_client_config_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "user_id: file-user\ntoken: file-token\ntimeout_secs: 9").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = runner(&["-C", path.as_str(), "--token", "flag-token", "sponsors"])
            .client_config()
            .unwrap();

        assert_eq!(config.user_id, "file-user");
        assert_eq!(config.token, "flag-token");
        assert_eq!(config.timeout_secs, 9);
    }

    #[test]
    fn test_client_config_missing_credentials() {
        let err = runner(&["orders"]).client_config().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_render_formats() {
        let value = json!({"name": "爱发电", "list": [1]});
        assert_eq!(
            render(&value, OutputFormat::Json).unwrap(),
            r#"{"name":"爱发电","list":[1]}"#
        );
        let pretty = render(&value, OutputFormat::Pretty).unwrap();
        assert!(pretty.contains("\n  \"name\": \"爱发电\""));
    }

    #[tokio::test]
    async fn test_execute_sponsors_all() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/open/query-sponsor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ec": 200,
                "data": {"list": [{"user": {"name": "Alice"}}]}
            })))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/open/query-sponsor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ec": 200,
                "data": {"list": []}
            })))
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/api/open", mock_server.uri());
        let runner = runner(&[
            "--user-id",
            "u1",
            "--token",
            "tok",
            "--base-url",
            base_url.as_str(),
            "sponsors",
            "--all",
        ]);
        let client = AfdianClient::from_config(runner.client_config().unwrap()).unwrap();

        let output = runner.execute(&client).await.unwrap();
        assert_eq!(output, json!([{"user": {"name": "Alice"}}]));
    }
}
