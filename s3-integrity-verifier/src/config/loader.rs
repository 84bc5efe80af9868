/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::{retry::RetryConfig, BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;

use crate::config::Builder;
use crate::error;
use crate::types::ConcurrencySetting;
use crate::Config;

const DEFAULT_REGION: &str = "us-east-1";

/// Load verifier [`Config`] for an S3-compatible endpoint using static credentials.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    endpoint_url: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    region: Option<String>,
    builder: Builder,
}

impl ConfigLoader {
    /// Set the endpoint URL of the store, e.g. `https://play.min.io`.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the access key used to sign requests.
    pub fn access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set the secret key used to sign requests.
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the signing region. Defaults to `us-east-1`.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the number of objects verified at the same time.
    ///
    /// Default is [ConcurrencySetting::Sequential].
    pub fn concurrency(mut self, concurrency: ConcurrencySetting) -> Self {
        self.builder = self.builder.concurrency(concurrency);
        self
    }

    /// Check that the endpoint and both credentials are set and non-empty.
    ///
    /// Does not touch the network.
    pub fn validate(&self) -> Result<(), error::Error> {
        let required = [
            ("endpoint", &self.endpoint_url),
            ("access key", &self.access_key),
            ("secret key", &self.secret_key),
        ];
        for (name, value) in required {
            if value.as_deref().map_or(true, str::is_empty) {
                return Err(error::invalid_input(format!("{name} is not provided")));
            }
        }
        Ok(())
    }

    /// Validate the settings and build the configuration.
    ///
    /// Requests use path style addressing, which S3-compatible servers expect. Failed requests
    /// are not retried; a failure marks the object as errored for the operator to rerun.
    pub async fn load(self) -> Result<Config, error::Error> {
        self.validate()?;
        let region = self.region.unwrap_or_else(|| DEFAULT_REGION.to_owned());
        let credentials = Credentials::new(
            self.access_key.unwrap_or_default(),
            self.secret_key.unwrap_or_default(),
            None,
            None,
            "s3-integrity-verifier",
        );

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(region))
            .retry_config(RetryConfig::disabled())
            .endpoint_url(self.endpoint_url.unwrap_or_default())
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(true)
            .build();

        let builder = self.builder.client(aws_sdk_s3::Client::from_conf(s3_config));
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigLoader;
    use crate::error::ErrorKind;

    fn loader() -> ConfigLoader {
        ConfigLoader::default()
            .endpoint_url("http://127.0.0.1:9000")
            .access_key("access")
            .secret_key("secret")
    }

    #[test]
    fn test_validate_complete() {
        loader().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_missing_or_empty() {
        let cases = [
            (ConfigLoader::default(), "endpoint"),
            (loader().endpoint_url(""), "endpoint"),
            (loader().access_key(""), "access key"),
            (loader().secret_key(""), "secret key"),
        ];
        for (loader, name) in cases {
            let err = loader.validate().unwrap_err();
            assert_eq!(&ErrorKind::InputInvalid, err.kind());
            let source = std::error::Error::source(&err).unwrap().to_string();
            assert_eq!(format!("{name} is not provided"), source);
        }
    }

    #[tokio::test]
    async fn test_load_rejects_before_building_client() {
        let err = loader().secret_key("").load().await.unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }

    #[tokio::test]
    async fn test_load() {
        let config = loader().region("eu-west-1").load().await.unwrap();
        assert_eq!(
            Some("eu-west-1"),
            config.client().config().region().map(|r| r.as_ref())
        );
        let retry = config.client().config().retry_config().unwrap();
        assert_eq!(1, retry.max_attempts());
    }
}
