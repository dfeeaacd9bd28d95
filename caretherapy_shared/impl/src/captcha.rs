use caretherapy_extern_contracts::recaptcha::RecaptchaApiService;
use caretherapy_shared_contracts::captcha::{CaptchaCheckError, CaptchaService};

pub struct CaptchaServiceImpl<RecaptchaApi> {
    recaptcha_api: RecaptchaApi,
    config: CaptchaServiceConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptchaServiceConfig {
    pub secret: Option<String>,
    pub min_score: Option<f64>,
}

impl<RecaptchaApi> CaptchaServiceImpl<RecaptchaApi> {
    pub fn new(recaptcha_api: RecaptchaApi, config: CaptchaServiceConfig) -> Self {
        Self {
            recaptcha_api,
            config,
        }
    }
}

impl<RecaptchaApi> CaptchaService for CaptchaServiceImpl<RecaptchaApi>
where
    RecaptchaApi: RecaptchaApiService,
{
    fn is_configured(&self) -> bool {
        self.config.secret.is_some()
    }

    async fn check(&self, response: &str) -> Result<(), CaptchaCheckError> {
        let secret = self
            .config
            .secret
            .as_deref()
            .ok_or(CaptchaCheckError::NotConfigured)?;

        let result = self.recaptcha_api.siteverify(response, secret).await?;
        if !result.error_codes.is_empty() {
            tracing::debug!(error_codes = ?result.error_codes, "siteverify reported error codes");
        }

        let ok = result.success
            && match self.config.min_score {
                Some(min_score) => result.score.unwrap_or(0.0) >= min_score,
                None => true,
            };
        ok.then_some(()).ok_or(CaptchaCheckError::Failed)
    }
}

#[cfg(test)]
mod tests {
    use caretherapy_extern_contracts::recaptcha::{
        MockRecaptchaApiService, RecaptchaSiteverifyResponse,
    };
    use caretherapy_utils::assert_matches;

    use super::*;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "the secret".into(),
            Ok(RecaptchaSiteverifyResponse {
                success: true,
                score: Some(0.7),
                error_codes: Vec::new(),
            }),
        );

        let sut = CaptchaServiceImpl::new(recaptcha_api, config());

        // Act
        let result = sut.check("captcha response").await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn ok_no_min_score() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "the secret".into(),
            Ok(RecaptchaSiteverifyResponse {
                success: true,
                score: None,
                error_codes: Vec::new(),
            }),
        );

        let sut = CaptchaServiceImpl::new(
            recaptcha_api,
            CaptchaServiceConfig {
                min_score: None,
                ..config()
            },
        );

        // Act
        let result = sut.check("captcha response").await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn failed_no_score() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "the secret".into(),
            Ok(RecaptchaSiteverifyResponse {
                success: true,
                score: None,
                error_codes: Vec::new(),
            }),
        );

        let sut = CaptchaServiceImpl::new(recaptcha_api, config());

        // Act
        let result = sut.check("captcha response").await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn failed_insufficient_score() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "the secret".into(),
            Ok(RecaptchaSiteverifyResponse {
                success: true,
                score: Some(0.3),
                error_codes: Vec::new(),
            }),
        );

        let sut = CaptchaServiceImpl::new(recaptcha_api, config());

        // Act
        let result = sut.check("captcha response").await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn failed_no_success() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "the secret".into(),
            Ok(RecaptchaSiteverifyResponse {
                success: false,
                score: None,
                error_codes: vec!["invalid-input-response".into()],
            }),
        );

        let sut = CaptchaServiceImpl::new(recaptcha_api, config());

        // Act
        let result = sut.check("captcha response").await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Failed));
    }

    #[tokio::test]
    async fn not_configured() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new();

        let sut = CaptchaServiceImpl::new(
            recaptcha_api,
            CaptchaServiceConfig {
                secret: None,
                ..config()
            },
        );

        // Act
        let result = sut.check("captcha response").await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::NotConfigured));
    }

    #[tokio::test]
    async fn error() {
        // Arrange
        let recaptcha_api = MockRecaptchaApiService::new().with_siteverify(
            "captcha response".into(),
            "the secret".into(),
            Err(anyhow::anyhow!("connection refused")),
        );

        let sut = CaptchaServiceImpl::new(recaptcha_api, config());

        // Act
        let result = sut.check("captcha response").await;

        // Assert
        assert_matches!(result, Err(CaptchaCheckError::Other(_)));
    }

    #[test]
    fn is_configured() {
        // Arrange
        let with_secret = CaptchaServiceImpl::new(MockRecaptchaApiService::new(), config());
        let without_secret = CaptchaServiceImpl::new(
            MockRecaptchaApiService::new(),
            CaptchaServiceConfig {
                secret: None,
                ..config()
            },
        );

        // Act + Assert
        assert!(with_secret.is_configured());
        assert!(!without_secret.is_configured());
    }

    fn config() -> CaptchaServiceConfig {
        CaptchaServiceConfig {
            secret: Some("the secret".into()),
            min_score: Some(0.5),
        }
    }
}
