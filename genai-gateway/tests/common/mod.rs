use genai_gateway::config::{GatewayConfig, GoogleConfig, ModelConfig, UploadConfig};
use genai_gateway::services::providers::gemini::GEMINI_API_BASE;
use genai_gateway::services::providers::mock::MockTextProvider;
use genai_gateway::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub provider: Arc<MockTextProvider>,
    pub client: reqwest::Client,
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        models: ModelConfig {
            text_model: "gemini-2.0-flash".to_string(),
            api_base_url: GEMINI_API_BASE.to_string(),
            request_timeout_secs: None,
        },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
        },
        uploads: UploadConfig::default(),
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(MockTextProvider::new(), test_config()).await
    }

    pub async fn spawn_with(provider: MockTextProvider, config: GatewayConfig) -> Self {
        let provider = Arc::new(provider);

        let app = Application::build_with_provider(config, provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            provider,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
